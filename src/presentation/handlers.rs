// HTTP request handlers
use crate::application::migration::{migrate_legacy_panel, MigratedPanel};
use crate::domain::frame::DataFrame;
use crate::domain::options::{FieldConfig, OptionsSchema, PanelOptions};
use crate::domain::panel::{Panel, PanelView, RenderRequest};
use crate::infrastructure::http_response::ApiError;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Render request that carries its own panel configuration
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdhocRenderRequest {
    #[serde(default)]
    pub options: PanelOptions,
    #[serde(default, alias = "field_config")]
    pub field_config: FieldConfig,
    #[serde(default)]
    pub frames: Vec<DataFrame>,
    pub width: f64,
    pub height: f64,
    #[serde(default, alias = "time_zone")]
    pub time_zone: Option<String>,
}

fn read_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List all stored panels
pub async fn list_panels(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Panel>>, ApiError> {
    Ok(Json(state.panel_service.list_panels().await?))
}

/// Selectable option values and defaults
pub async fn options_schema() -> Json<OptionsSchema> {
    Json(OptionsSchema::new())
}

pub async fn get_panel(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Panel>, ApiError> {
    Ok(Json(state.panel_service.get_panel(&id).await?))
}

/// Render a stored panel against the posted frames
pub async fn render_panel(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Json<PanelView>, ApiError> {
    let request = read_body(payload)?;
    tracing::debug!("Rendering panel {} with {} frame(s)", id, request.frames.len());

    state
        .panel_service
        .render_stored(&id, &request)
        .await?
        .map(Json)
        .ok_or(ApiError::NoData)
}

/// Render with options supplied in the request instead of the repository
pub async fn render_adhoc(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AdhocRenderRequest>, JsonRejection>,
) -> Result<Json<PanelView>, ApiError> {
    let body = read_body(payload)?;
    let request = RenderRequest {
        frames: body.frames,
        width: body.width,
        height: body.height,
        time_zone: body.time_zone,
    };

    state
        .panel_service
        .render(&body.options, &body.field_config, &request)
        .map(Json)
        .ok_or(ApiError::NoData)
}

/// Convert a legacy flat panel model
pub async fn migrate_panel(payload: Result<Json<Value>, JsonRejection>) -> Result<Json<MigratedPanel>, ApiError> {
    let legacy = read_body(payload)?;
    if !legacy.is_object() {
        return Err(ApiError::BadRequest("expected a panel object".to_string()));
    }
    Ok(Json(migrate_legacy_panel(&legacy)))
}
