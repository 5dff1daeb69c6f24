//! Extractors whose rejections render as [`AppError`] JSON bodies.

use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};

use crate::error::{AppError, AppResult, OrFailed};

use super::temperatures::TemperatureQuery;

/// Integer id from the path.
///
/// Any integer is accepted; ids outside `i32` cannot exist in the store and
/// come out as `None`. A non-numeric segment is a not-found.
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub Option<i32>);

impl PathId {
    /// The id, or `NotFound` with `message` when it cannot name a row.
    pub fn or_not_found(self, message: &str) -> AppResult<i32> {
        self.0.ok_or_else(|| AppError::NotFound(message.to_string()))
    }
}

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(i32::try_from(id).ok())),
            Err(rejection) => {
                tracing::debug!(%rejection, "Path id is not an integer");
                Err(AppError::NotFound("Resource not found".to_string()))
            }
        }
    }
}

impl<S> FromRequestParts<S> for TemperatureQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    /// Repeated keys keep their first value.
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .or_failed("Failed to fetch temperatures")?;

        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };

        Ok(Self {
            lat: first("lat"),
            lon: first("lon"),
            from: first("from"),
            until: first("until"),
        })
    }
}
