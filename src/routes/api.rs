use crate::{
    config::Config,
    docs::ApiDoc,
    handlers::{
        diagnostics, health_check, list_shared_workspaces, ready_check, share_workspace,
        unshare_workspace, update_shared_workspace,
    },
    websocket::handler::websocket_handler,
    AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create API routes
pub fn create_api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/v1/diagnostics", get(diagnostics))
        .route(
            "/shared-workspaces",
            get(list_shared_workspaces).post(share_workspace),
        )
        .route(
            "/shared-workspaces/:workspace_id",
            put(update_shared_workspace).delete(unshare_workspace),
        )
}

/// Full application: API, relay socket and Swagger UI
pub fn create_app(state: Arc<AppState>) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_body_bytes);
    let cors = cors_layer(&state.config);

    Router::new()
        // Mount API routes
        .nest("/api", create_api_routes())
        // Presence relay
        .route("/ws", get(websocket_handler))
        // Mount Swagger UI
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(body_limit)
        .layer(cors)
        // Add tracing layer
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origin = match config.allowed_origins() {
        Some(origins) => AllowOrigin::list(origins.iter().filter_map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| warn!("Ignoring invalid CORS origin {}: {}", origin, e))
                .ok()
        })),
        None => AllowOrigin::from(Any),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_app(Arc::new(AppState::new(Config::default())))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_service_name() {
        let response = app()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"status": "ok", "service": "collaboration-service"})
        );
    }

    #[tokio::test]
    async fn diagnostics_counts_start_at_zero() {
        let response = app()
            .oneshot(Request::get("/api/v1/diagnostics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["n_conn"], 0);
        assert_eq!(body["n_rooms"], 0);
        assert_eq!(body["n_shared_workspaces"], 0);
    }

    #[tokio::test]
    async fn shared_workspace_lifecycle() {
        let app = app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/shared-workspaces",
                json!({"workspace": {"id": "ws-1", "ownerId": "a@x.com", "isShared": true}}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert!(body["workspace"]["sharedAt"].is_string());

        let response = app
            .clone()
            .oneshot(Request::get("/api/shared-workspaces?userEmail=b@x.com").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await["workspaces"][0]["id"], "ws-1");

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/shared-workspaces/ws-1",
                json!({"workspace": {"name": "Roadmap"}}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["workspace"]["name"], "Roadmap");

        let response = app
            .clone()
            .oneshot(
                Request::delete("/api/shared-workspaces/ws-1?userEmail=b@x.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(response).await["error"],
            "Only the workspace owner can unshare it"
        );

        let response = app
            .oneshot(
                Request::delete("/api/shared-workspaces/ws-1?userEmail=a@x.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn listing_without_email_is_rejected() {
        let response = app()
            .oneshot(Request::get("/api/shared-workspaces").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], 400);
        assert_eq!(body["error"], "userEmail query parameter is required");
    }

    #[tokio::test]
    async fn update_of_unknown_workspace_is_not_found() {
        let response = app()
            .oneshot(json_request(
                "PUT",
                "/api/shared-workspaces/nope",
                json!({"workspace": {"name": "x"}}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn share_without_content_type_is_a_json_bad_request() {
        let response = app()
            .oneshot(
                Request::post("/api/shared-workspaces")
                    .body(Body::from(r#"{"workspace":{"id":"ws-1"}}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], 400);
        assert_eq!(body["error"], "workspace object with id is required");
    }

    #[tokio::test]
    async fn empty_or_broken_bodies_are_json_bad_requests() {
        let empty = Request::post("/api/shared-workspaces")
            .header("content-type", "application/json")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(empty).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "workspace object with id is required");

        let broken = Request::put("/api/shared-workspaces/ws-1")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app().oneshot(broken).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "workspace object is required");
    }

    #[tokio::test]
    async fn numeric_workspace_id_is_rejected() {
        let app = app();
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/shared-workspaces",
                json!({"workspace": {"id": 5, "ownerId": "a@x.com", "isShared": true}}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "workspace object with id is required");

        let response = app
            .oneshot(Request::get("/api/shared-workspaces?userEmail=b@x.com").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_json(response).await["workspaces"], json!([]));
    }
}
