//! Router construction and shared handler state.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use widgetboard_lib::{IndicatorPipeline, WidgetRegistry};

use crate::{demo, handlers};

/// State shared by every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<WidgetRegistry>,
    pub pipeline: IndicatorPipeline,
    pub apps_json: Arc<PathBuf>,
    pub llama_url: Arc<str>,
}

impl AppState {
    pub fn new(
        registry: WidgetRegistry,
        pipeline: IndicatorPipeline,
        apps_json: PathBuf,
        llama_url: &str,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            pipeline,
            apps_json: Arc::new(apps_json),
            llama_url: Arc::from(llama_url),
        }
    }
}

/// Builds the full HTTP surface.
///
/// Fixed routes win over `/:endpoint`, which serves the indicator widgets and
/// answers 404 for anything not in the registry.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/widgets.json", get(handlers::widgets))
        .route("/apps.json", get(handlers::apps))
        .route("/table_to_chart_widget", get(demo::table_to_chart_widget))
        .route(
            "/table_to_time_series_widget",
            get(demo::table_to_time_series_widget),
        )
        .route(
            "/table_widget_from_api_endpoint",
            get(handlers::table_widget_from_api_endpoint),
        )
        .route("/:endpoint", get(handlers::indicator_widget))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
