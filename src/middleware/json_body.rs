use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::LiftError;

/// JSON body extractor whose rejections use the crate's error envelope
/// (always 400) instead of axum's plain-text responses.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = LiftError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(body)) => Ok(JsonBody(body)),
            Err(rejection) => {
                debug!(status = %rejection.status(), "rejected request body");
                Err(LiftError::bad_request(rejection.body_text()))
            }
        }
    }
}
