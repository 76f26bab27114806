//! API routes module

pub mod health;
pub mod items;

use axum::Router;

use crate::state::AppState;

/// Routes nested under `/api`
pub async fn routes(state: &AppState) -> eyre::Result<Router> {
    items::router(state).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn in_memory_state() -> AppState {
        let config = temp_env::with_var_unset("DATABASE_URL", || Config::from_env().unwrap());
        AppState { config, db: None }
    }

    async fn app() -> Router {
        let state = in_memory_state();
        let api = routes(&state).await.unwrap();
        axum_helpers::create_router::<crate::openapi::ApiDoc>(api, &state.config.server)
            .await
            .unwrap()
            .merge(axum_helpers::health_router(state.config.app))
            .merge(health::router(state))
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    #[tokio::test]
    async fn test_items_are_served_under_api() {
        let (status, body) = get(app().await, "/api/items/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "UP");

        let (status, body) = get(app().await, "/api/items").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_health_and_ready() {
        let (status, body) = get(app().await, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "items_api");

        let (status, body) = get(app().await, "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
        assert_eq!(body["store"], "connected");
    }

    #[tokio::test]
    async fn test_openapi_lists_item_paths() {
        let (status, body) = get(app().await, "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/items/{id}"].is_object());
        assert!(body["paths"]["/api/items/search"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = get(app().await, "/api/widgets").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }
}
