use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item {0} not found")]
    NotFound(i64),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    /// The store could not be reached (pool exhausted, connection refused).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Convert ItemError to AppError for standardized error responses
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(id) => AppError::NotFound(format!("Item {} not found", id)),
            ItemError::Validation(msg) => AppError::BadRequest(msg),
            ItemError::Database(msg) => AppError::InternalServerError(msg),
            ItemError::Unavailable(msg) => AppError::ServiceUnavailable(msg),
            ItemError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

impl From<DbErr> for ItemError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::ConnectionAcquire(e) => ItemError::Unavailable(e.to_string()),
            DbErr::Conn(e) => ItemError::Unavailable(e.to_string()),
            other => ItemError::Database(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ItemError::NotFound(7), StatusCode::NOT_FOUND),
            (
                ItemError::Validation("name is blank".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ItemError::Database("syntax error".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ItemError::Unavailable("pool timed out".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                ItemError::Internal("id space exhausted".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_db_errors_are_classified() {
        let err = ItemError::from(DbErr::Custom("boom".into()));
        assert!(matches!(err, ItemError::Database(_)));

        let err = ItemError::from(DbErr::ConnectionAcquire(
            sea_orm::ConnAcquireErr::Timeout,
        ));
        assert!(matches!(err, ItemError::Unavailable(_)));
    }

    async fn error_body(err: DbErr) -> (StatusCode, serde_json::Value) {
        use http_body_util::BodyExt;

        let response = ItemError::from(err).into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_db_errors_render_through_item_error() {
        let (status, body) = error_body(DbErr::ConnectionAcquire(
            sea_orm::ConnAcquireErr::Timeout,
        ))
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "SERVICE_UNAVAILABLE");
        assert_eq!(body["code"], 1011);

        let (status, body) = error_body(DbErr::Custom("relation missing".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "INTERNAL_ERROR");
        assert_eq!(body["message"], "An internal server error occurred");
    }
}
