//! HTTP request handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use widgetboard_lib::datamule_api;
use widgetboard_lib::validation::validate_discriminator;
use widgetboard_lib::{IndicatorSeries, WidgetDescriptor};

use crate::error::ApiError;
use crate::routes::AppState;

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    #[serde(rename = "Info")]
    info: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct IndicatorQuery {
    #[serde(rename = "type")]
    component: Option<String>,
}

/// GET / - liveness banner
pub async fn root() -> Json<InfoResponse> {
    Json(InfoResponse {
        info: "Hello World",
    })
}

/// GET /widgets.json - every registered widget descriptor, keyed by endpoint
pub async fn widgets(State(state): State<AppState>) -> Json<BTreeMap<String, WidgetDescriptor>> {
    Json(state.registry.descriptors().clone())
}

/// GET /apps.json - the dashboard app layouts, read from disk on every request
pub async fn apps(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let path = state.apps_json.as_path();
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Could not read {}: {}", path.display(), e),
        )
    })?;
    let value = serde_json::from_str(&text).map_err(|e| {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Invalid JSON in {}: {}", path.display(), e),
        )
    })?;
    Ok(Json(value))
}

/// GET /table_widget_from_api_endpoint - DefiLlama chain TVLs, passed through
pub async fn table_widget_from_api_endpoint(
    State(state): State<AppState>,
) -> Result<Json<Value>, ApiError> {
    match state.pipeline.client().fetch_json(&state.llama_url).await {
        Ok(value) => Ok(Json(value)),
        Err(datamule_api::Error::HttpStatus { status, body }) => Err(ApiError::new(
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            body,
        )),
        Err(e) => Err(ApiError::new(
            StatusCode::SERVICE_UNAVAILABLE,
            format!("Could not fetch chain data: {}", e),
        )),
    }
}

/// GET /{endpoint}?type={component} - time series for one indicator component
pub async fn indicator_widget(
    State(state): State<AppState>,
    Path(endpoint): Path<String>,
    Query(query): Query<IndicatorQuery>,
) -> Result<Json<IndicatorSeries>, ApiError> {
    let source = state
        .registry
        .indicator_source(&endpoint)
        .ok_or_else(ApiError::not_found)?;
    let component = query.component.ok_or_else(|| {
        ApiError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Missing required query parameter 'type'",
        )
    })?;
    let component = validate_discriminator(&component)?;

    let series = state.pipeline.series(source, component).await?;
    Ok(Json(series))
}

/// Fallback for anything unrouted.
pub async fn not_found() -> ApiError {
    ApiError::not_found()
}
