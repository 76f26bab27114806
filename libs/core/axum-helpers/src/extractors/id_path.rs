//! Integer path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Extractor for a numeric `{id}` path segment.
///
/// Anything that does not parse as an `i64` is rejected with
/// `400 INVALID_PATH_PARAMETER` instead of axum's plain-text rejection.
///
/// # Example
/// ```ignore
/// use axum::{Router, routing::get};
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_item(IdPath(id): IdPath) -> String {
///     format!("Item ID: {}", id)
/// }
///
/// let app = Router::new().route("/items/{id}", get(get_item));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i64);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::InvalidPathParameter(e.body_text()))?;

        raw.trim()
            .parse::<i64>()
            .map(IdPath)
            .map_err(|_| {
                AppError::InvalidPathParameter(format!("Invalid id '{}': expected an integer", raw))
            })
    }
}
