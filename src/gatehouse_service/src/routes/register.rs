use std::sync::Arc;

use axum::{Json, extract::State};
use gatehouse_application::AccountLifecycle;
use gatehouse_core::{Email, IdentityProvider, Password};
use secrecy::Secret;
use serde::Deserialize;

use crate::routes::{error::ApiError, response::AuthResponse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<P>(
    State(lifecycle): State<Arc<AccountLifecycle<P>>>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError>
where
    P: IdentityProvider + 'static,
{
    let email = Email::try_from(request.email).map_err(|_| ApiError::MissingEmail)?;
    let password = Password::try_from(request.password).map_err(|_| ApiError::MissingPassword)?;

    let outcome = lifecycle
        .register(email, password, request.display_name)
        .await?;

    let message = if outcome.requires_confirmation {
        "Check your email for a confirmation link to activate your membership."
    } else {
        "Your account is ready."
    };

    Ok(Json(
        AuthResponse::success(message)
            .with_requires_confirmation(outcome.requires_confirmation)
            .with_user(outcome.user),
    ))
}
