// HTTP response utilities for JSON error bodies
use crate::application::panel_service::PanelError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("panel {0} not found")]
    NotFound(String),
    /// Nothing to show: the presentation layer falls back to its error view
    #[error("no data")]
    NoData,
    #[error("invalid request: {0}")]
    BadRequest(String),
    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

impl From<PanelError> for ApiError {
    fn from(err: PanelError) -> Self {
        match err {
            PanelError::NotFound(id) => ApiError::NotFound(id),
            PanelError::Repository(e) => ApiError::Internal(e),
        }
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::NoData => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Internal(e) = &self {
            tracing::error!("Request failed: {:#}", e);
        }

        let body = json!({
            "error": self.to_string(),
            "view": if matches!(self, ApiError::NoData) { "noData" } else { "error" },
        });
        (status, Json(body)).into_response()
    }
}
