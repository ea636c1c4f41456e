//! Widget descriptors: the metadata the dashboard reads from `/widgets.json`
//! to lay out and render each widget.

use serde::{Deserialize, Serialize};

use crate::types::ComponentOption;

/// Static description of one widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetDescriptor {
    /// Defaults to `endpoint` when the catalog leaves it blank.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub widget_type: String,
    pub endpoint: String,
    pub grid_data: GridData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<WidgetData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridData {
    pub w: u32,
    pub h: u32,
}

/// A query parameter the dashboard renders as an input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamSpec {
    pub param_name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub param_type: String,
    pub required: bool,
    pub show: bool,
    /// Default value.
    pub value: String,
    pub description: String,
    #[serde(default)]
    pub options: Vec<ComponentOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetData {
    pub table: TableSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSpec {
    pub enable_charts: bool,
    pub show_all: bool,
    pub chart_view: ChartView,
    pub columns_defs: Vec<ColumnDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    pub enabled: bool,
    pub chart_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub field: String,
    pub header_name: String,
    /// One of `category`, `series`, `time`, `excluded`.
    pub chart_data_type: String,
}

impl ColumnDef {
    pub fn new(field: &str, header_name: &str, chart_data_type: &str) -> Self {
        Self {
            field: field.to_string(),
            header_name: header_name.to_string(),
            chart_data_type: chart_data_type.to_string(),
        }
    }
}

impl WidgetDescriptor {
    /// Fills in `id` from `endpoint` when it was left blank.
    pub(crate) fn normalize(mut self) -> Self {
        if self.id.is_empty() {
            self.id = self.endpoint.clone();
        }
        self
    }
}
