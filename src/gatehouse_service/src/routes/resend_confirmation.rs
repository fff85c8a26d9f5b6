use std::sync::Arc;

use axum::{Json, extract::State};
use gatehouse_application::AccountLifecycle;
use gatehouse_core::{Email, IdentityProvider};
use secrecy::Secret;
use serde::Deserialize;

use crate::routes::{error::ApiError, response::AuthResponse};

#[derive(Debug, Deserialize)]
pub struct ResendConfirmationRequest {
    pub email: Secret<String>,
}

#[tracing::instrument(name = "Resend confirmation", skip_all)]
pub async fn resend_confirmation<P>(
    State(lifecycle): State<Arc<AccountLifecycle<P>>>,
    Json(request): Json<ResendConfirmationRequest>,
) -> Result<Json<AuthResponse>, ApiError>
where
    P: IdentityProvider + 'static,
{
    let email = Email::try_from(request.email).map_err(|_| ApiError::MissingEmail)?;

    lifecycle.resend_confirmation(email).await?;

    Ok(Json(AuthResponse::success(
        "A fresh confirmation email is on its way. Check your inbox.",
    )))
}
