//! Error types for the library layer.

use std::fmt;

use crate::extract::ExtractError;

/// Errors produced while serving a widget or building the widget catalog.
#[derive(Debug)]
pub enum WidgetError {
    /// The upstream CSV could not be fetched.
    Fetch(datamule_api::Error),
    /// The fetched CSV could not be turned into a series.
    Extract(ExtractError),
    /// Caller-supplied input failed validation.
    InvalidInput(String),
    /// The widget catalog is malformed.
    Catalog(String),
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "Could not fetch CSV data: {}", e),
            Self::Extract(e) => write!(f, "{}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Catalog(msg) => write!(f, "Catalog error: {}", msg),
        }
    }
}

impl std::error::Error for WidgetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch(e) => Some(e),
            Self::Extract(e) => Some(e),
            _ => None,
        }
    }
}

impl From<datamule_api::Error> for WidgetError {
    fn from(e: datamule_api::Error) -> Self {
        Self::Fetch(e)
    }
}

impl From<ExtractError> for WidgetError {
    fn from(e: ExtractError) -> Self {
        Self::Extract(e)
    }
}

impl From<serde_yml::Error> for WidgetError {
    fn from(e: serde_yml::Error) -> Self {
        Self::Catalog(e.to_string())
    }
}
