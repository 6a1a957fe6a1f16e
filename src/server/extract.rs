//! The [`Validated`] extractor: JSON body → [`Record`].

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde_json::Value;

use super::error::ApiError;
use crate::record::Record;

/// Extracts a request body as JSON and decodes it into `T`.
///
/// Rejects with [`ApiError::InvalidBody`] when the body is not JSON and with
/// [`ApiError::Validation`] (listing every violated field) when it does not
/// satisfy `T`'s rules.
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: Record + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        Ok(Validated(T::decode(&value)?))
    }
}
