//! The populated widget table: built once at startup, read-only afterwards.

use std::collections::{BTreeMap, HashMap};

use crate::catalog::IndicatorEntry;
use crate::descriptor::WidgetDescriptor;
use crate::types::ComponentOption;

/// Endpoint → descriptor, plus endpoint → CSV source for indicator widgets.
///
/// Shared between request handlers behind an `Arc`; nothing mutates it after
/// construction.
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    descriptors: BTreeMap<String, WidgetDescriptor>,
    sources: HashMap<String, String>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a widget served by its own handler.
    pub fn insert(&mut self, descriptor: WidgetDescriptor) {
        self.descriptors
            .insert(descriptor.endpoint.clone(), descriptor);
    }

    /// Registers an indicator widget with its resolved options.
    pub fn insert_indicator(&mut self, entry: &IndicatorEntry, options: Vec<ComponentOption>) {
        self.sources
            .insert(entry.endpoint.clone(), entry.source.clone());
        self.insert(entry.descriptor(options));
    }

    pub fn get(&self, endpoint: &str) -> Option<&WidgetDescriptor> {
        self.descriptors.get(endpoint)
    }

    /// CSV source for an indicator endpoint; `None` for other widgets.
    pub fn indicator_source(&self, endpoint: &str) -> Option<&str> {
        self.sources.get(endpoint).map(String::as_str)
    }

    /// All descriptors, keyed by endpoint. This is the `/widgets.json` body.
    pub fn descriptors(&self) -> &BTreeMap<String, WidgetDescriptor> {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
