use axum::Json;
use tracing::info;

use crate::LiftError;
use crate::middleware::JsonBody;
use crate::service::auth::authorize;
use crate::types::{SessionUser, SignInRequest};

/// POST /api/auth/signin
pub async fn sign_in(
    JsonBody(body): JsonBody<SignInRequest>,
) -> Result<Json<SessionUser>, LiftError> {
    let email = body.email.unwrap_or_default();
    let password = body.password.unwrap_or_default();
    let user = authorize(&email, &password).ok_or(LiftError::Unauthorized)?;
    info!(user = %user.name, "signed in");
    Ok(Json(user))
}
