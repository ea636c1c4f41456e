//! Thin HTTP client for the remote indicator CSV files and the JSON feeds
//! proxied by the widget server.

mod client;
mod errors;
pub use self::client::{Client, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use self::errors::Error;
