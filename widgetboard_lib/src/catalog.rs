//! The declarative widget table.
//!
//! Indicator widgets differ only in their source file and labels, so they are
//! listed compactly and expanded into full descriptors here. Widgets with
//! their own handlers are listed as complete descriptors.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::descriptor::{
    ChartView, ColumnDef, GridData, ParamSpec, TableSpec, WidgetData, WidgetDescriptor,
};
use crate::error::WidgetError;
use crate::extract::{COUNT, FILING_DATE};
use crate::types::ComponentOption;
use crate::validation::validate_endpoint;

const BUILTIN_CATALOG: &str = include_str!("catalog.yml");

/// Query parameter carrying the component value.
pub const PARAM_NAME: &str = "type";

fn default_series_header() -> String {
    "Index Value".to_string()
}

/// One CSV-backed indicator widget.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IndicatorEntry {
    pub endpoint: String,
    pub name: String,
    pub description: String,
    /// CSV location, relative to the source base URL or absolute.
    pub source: String,
    pub param_label: String,
    pub param_description: String,
    /// Header of the `count` column in the rendered table.
    #[serde(default = "default_series_header")]
    pub series_header: String,
    /// Preferred default component, when the first listed option is not it.
    #[serde(default, rename = "default")]
    pub default_value: Option<String>,
    /// Fallback options for when the live listing returns nothing.
    #[serde(default)]
    pub options: Vec<ComponentOption>,
}

impl IndicatorEntry {
    /// Builds the descriptor for this widget with resolved `options`.
    pub fn descriptor(&self, options: Vec<ComponentOption>) -> WidgetDescriptor {
        let value = self
            .default_value
            .clone()
            .or_else(|| options.first().map(|o| o.value.clone()))
            .unwrap_or_default();

        WidgetDescriptor {
            id: self.endpoint.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            widget_type: "table".to_string(),
            endpoint: self.endpoint.clone(),
            grid_data: GridData { w: 20, h: 12 },
            params: vec![ParamSpec {
                param_name: PARAM_NAME.to_string(),
                label: self.param_label.clone(),
                param_type: "text".to_string(),
                required: true,
                show: true,
                value,
                description: self.param_description.clone(),
                options,
            }],
            data: Some(WidgetData {
                table: TableSpec {
                    enable_charts: true,
                    show_all: false,
                    chart_view: ChartView {
                        enabled: true,
                        chart_type: "line".to_string(),
                    },
                    columns_defs: vec![
                        ColumnDef::new(FILING_DATE, "Date", "time"),
                        ColumnDef::new(COUNT, &self.series_header, "series"),
                    ],
                },
            }),
        }
    }
}

/// Every widget the server exposes.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub indicators: Vec<IndicatorEntry>,
    #[serde(default)]
    pub widgets: Vec<WidgetDescriptor>,
}

impl Catalog {
    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, WidgetError> {
        Self::from_yaml(BUILTIN_CATALOG)
    }

    /// Reads a catalog from a YAML file.
    pub fn load(path: &Path) -> Result<Self, WidgetError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            WidgetError::Catalog(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&text)
    }

    /// Parses and validates a catalog.
    pub fn from_yaml(text: &str) -> Result<Self, WidgetError> {
        let mut catalog: Catalog = serde_yml::from_str(text)?;
        catalog.widgets = catalog
            .widgets
            .into_iter()
            .map(WidgetDescriptor::normalize)
            .collect();
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), WidgetError> {
        let mut seen = HashSet::new();
        let endpoints = self
            .indicators
            .iter()
            .map(|e| e.endpoint.as_str())
            .chain(self.widgets.iter().map(|w| w.endpoint.as_str()));
        for endpoint in endpoints {
            validate_endpoint(endpoint)?;
            if !seen.insert(endpoint) {
                return Err(WidgetError::Catalog(format!(
                    "duplicate endpoint '{}'",
                    endpoint
                )));
            }
        }
        for entry in &self.indicators {
            if entry.source.trim().is_empty() {
                return Err(WidgetError::Catalog(format!(
                    "indicator '{}' has no source",
                    entry.endpoint
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.indicators.len() + self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"
indicators:
  - endpoint: ipo_index_widget
    name: IPO Index
    description: IPO counts
    source: "Corporate%20Finance/ipo/overview.csv"
    param_label: IPO Component Type
    param_description: Pick one
    series_header: Count
    default: domestic_us
    options:
      - { value: domestic_us, label: Domestic US }
  - endpoint: war_widget
    name: War Index
    description: War
    source: War/war/overview.csv
    param_label: War Component
    param_description: Pick one
widgets:
  - name: Plain
    description: plain
    type: table
    endpoint: plain_widget
    gridData: { w: 12, h: 4 }
"#;

    #[test]
    fn builtin_catalog_parses() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.indicators.len(), 27);
        assert_eq!(catalog.widgets.len(), 3);
        assert!(catalog
            .indicators
            .iter()
            .any(|e| e.endpoint == "semiconductor_materials_widget"));
        assert!(catalog.widgets.iter().all(|w| w.id == w.endpoint));
    }

    #[test]
    fn builtin_ipo_entry_keeps_its_fallback() {
        let catalog = Catalog::builtin().unwrap();
        let ipo = catalog
            .indicators
            .iter()
            .find(|e| e.endpoint == "ipo_index_widget")
            .unwrap();
        assert_eq!(ipo.default_value.as_deref(), Some("domestic_us"));
        assert_eq!(ipo.options.len(), 6);
        assert_eq!(ipo.series_header, "Count");
    }

    #[test]
    fn series_header_defaults() {
        let catalog = Catalog::from_yaml(SMALL).unwrap();
        assert_eq!(catalog.indicators[1].series_header, "Index Value");
        assert!(catalog.indicators[1].default_value.is_none());
        assert!(catalog.indicators[1].options.is_empty());
    }

    #[test]
    fn descriptor_default_is_first_option() {
        let catalog = Catalog::from_yaml(SMALL).unwrap();
        let war = &catalog.indicators[1];
        let descriptor = war.descriptor(vec![
            ComponentOption::from_value("civil_war"),
            ComponentOption::from_value("interstate"),
        ]);
        assert_eq!(descriptor.params[0].value, "civil_war");
        assert_eq!(descriptor.params[0].options.len(), 2);
        assert_eq!(descriptor.id, "war_widget");
    }

    #[test]
    fn descriptor_default_empty_without_options() {
        let catalog = Catalog::from_yaml(SMALL).unwrap();
        let descriptor = catalog.indicators[1].descriptor(Vec::new());
        assert_eq!(descriptor.params[0].value, "");
        assert!(descriptor.params[0].options.is_empty());
    }

    #[test]
    fn descriptor_configured_default_wins() {
        let catalog = Catalog::from_yaml(SMALL).unwrap();
        let descriptor = catalog.indicators[0]
            .descriptor(vec![ComponentOption::from_value("aaa")]);
        assert_eq!(descriptor.params[0].value, "domestic_us");
        let columns = &descriptor.data.as_ref().unwrap().table.columns_defs;
        assert_eq!(columns[0].field, "filing_date");
        assert_eq!(columns[1].field, "count");
        assert_eq!(columns[1].header_name, "Count");
    }

    #[test]
    fn duplicate_endpoint_rejected() {
        let yaml = r#"
indicators:
  - { endpoint: a, name: A, description: a, source: a.csv, param_label: A, param_description: a }
widgets:
  - { name: A, description: a, type: table, endpoint: a, gridData: { w: 1, h: 1 } }
"#;
        let err = Catalog::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate endpoint 'a'"));
    }

    #[test]
    fn bad_endpoint_rejected() {
        let yaml = r#"
indicators:
  - { endpoint: "widgets.json", name: A, description: a, source: a.csv, param_label: A, param_description: a }
"#;
        assert!(matches!(
            Catalog::from_yaml(yaml),
            Err(WidgetError::Catalog(_))
        ));
    }

    #[test]
    fn empty_source_rejected() {
        let yaml = r#"
indicators:
  - { endpoint: a, name: A, description: a, source: "  ", param_label: A, param_description: a }
"#;
        assert!(Catalog::from_yaml(yaml).is_err());
    }

    #[test]
    fn malformed_yaml_is_catalog_error() {
        assert!(matches!(
            Catalog::from_yaml("indicators: [ {"),
            Err(WidgetError::Catalog(_))
        ));
    }

    #[test]
    fn load_missing_file() {
        let err = Catalog::load(Path::new("/nonexistent/catalog.yml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
