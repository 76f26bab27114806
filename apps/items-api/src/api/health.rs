//! Readiness endpoint backed by a real store check.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_helpers::server::{run_health_checks, HealthCheckFuture};

use crate::state::AppState;

/// 200 when the configured store answers, 503 otherwise.
///
/// Without PostgreSQL the in-memory store is always ready.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = match &state.db {
        Some(db) => {
            let db_check: HealthCheckFuture<'_> = Box::pin(async move {
                database::postgres::check_health(db)
                    .await
                    .map_err(|e| e.to_string())
            });
            vec![("database", db_check)]
        }
        None => {
            let store: HealthCheckFuture<'_> = Box::pin(async { Ok(()) });
            vec![("store", store)]
        }
    };

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(state)
}
