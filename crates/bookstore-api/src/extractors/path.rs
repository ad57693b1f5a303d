//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::response::ApiError;

/// A single positive integer id taken from the path
///
/// Anything that is not a positive integer is rejected with 400 before the
/// handler runs.
#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub i64);

impl IdPath {
    fn parse(raw: &str) -> Result<i64, ApiError> {
        match raw.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(ApiError::invalid_path(format!("'{raw}' is not a valid id"))),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Self::parse(&raw).map(IdPath)
    }
}
