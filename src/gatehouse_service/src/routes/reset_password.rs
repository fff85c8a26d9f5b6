use std::sync::Arc;

use axum::{Json, extract::State};
use gatehouse_application::AccountLifecycle;
use gatehouse_core::{Email, IdentityProvider};
use secrecy::Secret;
use serde::Deserialize;

use crate::routes::{error::ApiError, response::AuthResponse};

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: Secret<String>,
}

/// The success copy is the same whether or not the address has an account;
/// existence stays private.
#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<P>(
    State(lifecycle): State<Arc<AccountLifecycle<P>>>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<AuthResponse>, ApiError>
where
    P: IdentityProvider + 'static,
{
    let email = Email::try_from(request.email).map_err(|_| ApiError::MissingEmail)?;

    lifecycle.reset_password(email).await?;

    Ok(Json(AuthResponse::success(
        "Check your inbox for a link to reset your password.",
    )))
}
