// Route table and HTTP middleware
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_panel, health_check, list_panels, migrate_panel, options_schema, render_adhoc, render_panel,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/panels", get(list_panels))
        .route("/panels/migrate", post(migrate_panel))
        .route("/panels/schema", get(options_schema))
        .route("/panels/:id", get(get_panel))
        .route("/panels/:id/render", post(render_panel))
        .route("/render", post(render_adhoc))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::panel_service::PanelService;
    use crate::domain::options::{FieldConfig, PanelOptions};
    use crate::domain::panel::Panel;
    use crate::infrastructure::display::StandardDisplayProcessor;
    use crate::infrastructure::memory_repository::InMemoryPanelRepository;
    use crate::infrastructure::palette::ThemePalette;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let panel = Panel::new(
            "water".to_string(),
            "Water".to_string(),
            PanelOptions {
                prefix: "${__name}: ".to_string(),
                ..PanelOptions::default()
            },
            FieldConfig::default(),
        );
        let panel_service = PanelService::new(
            Arc::new(InMemoryPanelRepository::new(vec![panel])),
            Arc::new(StandardDisplayProcessor),
            Arc::new(ThemePalette::default()),
        );
        build_router(Arc::new(AppState { panel_service }))
    }

    fn frames() -> Value {
        json!([{
            "name": "reef",
            "fields": [
                {"name": "time", "type": "time", "values": [0, 1000, 2000]},
                {"name": "value", "type": "number", "values": [70, null, 90]}
            ]
        }])
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app()
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_list_and_get_panels() {
        let (status, body) = send(Request::get("/panels").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "water");

        let (status, body) = send(Request::get("/panels/water").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["options"]["valueName"], "avg");

        let (status, body) = send(Request::get("/panels/lagoon").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["view"], "error");
    }

    #[tokio::test]
    async fn test_options_schema() {
        let (status, body) = send(Request::get("/panels/schema").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valueNames"].as_array().map(Vec::len), Some(11));
        assert_eq!(body["fontSizes"][5], "100%");
        assert_eq!(body["defaults"]["nullPointMode"], "connected");
    }

    #[tokio::test]
    async fn test_render_stored_panel() {
        let (status, body) = send(post_json(
            "/panels/water/render",
            json!({"frames": frames(), "width": 300, "height": 200}),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"]["text"], "80");
        assert_eq!(body["value"]["color"], "#F2495C");
        assert_eq!(body["prefix"], "reef: ");
        assert!(body.get("gauge").is_none());
    }

    #[tokio::test]
    async fn test_render_without_frames_is_no_data() {
        let (status, body) = send(post_json(
            "/panels/water/render",
            json!({"frames": [], "width": 300, "height": 200}),
        ))
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["view"], "noData");
    }

    #[tokio::test]
    async fn test_render_adhoc_with_gauge() {
        let (status, body) = send(post_json(
            "/render",
            json!({
                "options": {"valueName": "max", "gauge": {"show": true}},
                "fieldConfig": {"unit": "percent"},
                "frames": frames(),
                "width": 300,
                "height": 200
            }),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"]["text"], "90%");
        assert_eq!(body["gauge"]["normalizedValue"], 0.9);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (status, body) = send(post_json("/render", json!({"frames": "nope"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["view"], "error");
    }

    #[tokio::test]
    async fn test_migrate_legacy_panel() {
        let (status, body) = send(post_json(
            "/panels/migrate",
            json!({"format": "celsius", "thresholds": "30", "colors": ["blue", "red"], "valueName": "current"}),
        ))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["options"]["valueName"], "current");
        assert_eq!(body["fieldConfig"]["unit"], "celsius");
        assert_eq!(body["fieldConfig"]["thresholds"]["steps"][1]["value"], 30.0);

        let (status, _) = send(post_json("/panels/migrate", json!([1, 2]))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
