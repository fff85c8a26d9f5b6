use std::sync::Arc;

use axum::{Json, extract::State};
use gatehouse_application::AccountLifecycle;
use gatehouse_core::{Email, IdentityProvider, Password};
use secrecy::Secret;
use serde::Deserialize;

use crate::routes::{error::ApiError, response::AuthResponse};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<P>(
    State(lifecycle): State<Arc<AccountLifecycle<P>>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError>
where
    P: IdentityProvider + 'static,
{
    let email = Email::try_from(request.email).map_err(|_| ApiError::MissingEmail)?;
    let password = Password::try_from(request.password).map_err(|_| ApiError::MissingPassword)?;

    let outcome = lifecycle.login(email, password).await?;

    Ok(Json(
        AuthResponse::success("Welcome back.")
            .with_user(outcome.user)
            .with_session(outcome.session),
    ))
}
