use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gatehouse_core::FlowError;
use thiserror::Error;

use crate::routes::response::AuthResponse;

/// Route-level failures: input the handler rejected before the lifecycle
/// saw it, or a lifecycle failure to render.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Please enter your email address.")]
    MissingEmail,

    #[error("Please enter a password.")]
    MissingPassword,

    #[error(transparent)]
    Flow(#[from] FlowError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingEmail | ApiError::MissingPassword => StatusCode::BAD_REQUEST,
            ApiError::Flow(error) => match error {
                FlowError::IneligibleEmail { .. } | FlowError::WeakPassword { .. } => {
                    StatusCode::BAD_REQUEST
                }
                FlowError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                FlowError::UnconfirmedAccount => StatusCode::FORBIDDEN,
                FlowError::DuplicateAccount => StatusCode::CONFLICT,
                FlowError::Provider { .. } => StatusCode::BAD_GATEWAY,
                FlowError::Configuration
                | FlowError::BackendMisconfiguration { .. }
                | FlowError::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn log(&self) {
        match self {
            ApiError::Flow(FlowError::Configuration) => {
                tracing::error!("identity provider is not configured");
            }
            ApiError::Flow(
                FlowError::BackendMisconfiguration { detail } | FlowError::Unexpected { detail },
            ) => {
                tracing::error!(%detail, "identity operation failed");
            }
            other => {
                tracing::debug!(error = %other, "identity request rejected");
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        let body = match self {
            ApiError::Flow(error) => AuthResponse::failure(&error),
            other => AuthResponse::failure_message(other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}
