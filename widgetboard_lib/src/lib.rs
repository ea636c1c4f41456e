//! Library layer for widgetboard: the indicator CSV pipeline, the widget
//! catalog, and the registry served at `/widgets.json`.
//!
//! Wraps the `datamule_api` fetch client with CSV extraction, component
//! option listing, and startup population of widget descriptors.

pub mod catalog;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod extract;
pub mod options;
pub mod pipeline;
pub mod registry;
pub mod types;
pub mod validation;

pub use datamule_api;

pub use catalog::{Catalog, IndicatorEntry, PARAM_NAME};
pub use config::Settings;
pub use descriptor::WidgetDescriptor;
pub use error::WidgetError;
pub use extract::{distinct_components, extract_series, ExtractError, NotFoundCause};
pub use options::list_options;
pub use pipeline::IndicatorPipeline;
pub use registry::WidgetRegistry;
pub use types::{ComponentOption, IndicatorPoint, IndicatorSeries};
