//! HTTP surface for widgetboard: the widget endpoints, `/widgets.json`,
//! and `/apps.json`.

pub mod demo;
pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use routes::{build_router, AppState};
