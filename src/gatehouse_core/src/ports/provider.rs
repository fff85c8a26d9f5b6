use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{email::Email, password::Password};

// IdentityProvider port trait and errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// A structured fault reported by the provider, carrying its prose
    /// message for classification.
    #[error("{0}")]
    Fault(String),
    /// Anything that is not a structured provider fault: transport
    /// failures, unparseable responses, client construction errors.
    #[error("Unexpected provider failure: {0}")]
    Unexpected(String),
}

/// Confirmation state of a provider account, derived exactly once at the
/// provider boundary (zero linked identities means the confirmation email
/// is still outstanding). Downstream logic branches on this, never on raw
/// response fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationStatus {
    Pending,
    Confirmed,
}

/// Account record as the provider reports it. The core only reads it and
/// hands it on; the provider owns the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderUser {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub confirmation: ConfirmationStatus,
}

/// Opaque token bundle issued on sign-in, passed through unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSession {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Metadata and redirect attached to a sign-up request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpOptions {
    pub display_name: Option<String>,
    pub domain_tag: String,
    /// Route the emailed confirmation link lands on once the provider
    /// accepts it.
    pub email_redirect_to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpResponse {
    /// Absent when the provider reports success without an account record;
    /// callers must treat that shape as a failure of their own.
    pub user: Option<ProviderUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInResponse {
    pub user: Option<ProviderUser>,
    pub session: Option<ProviderSession>,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(
        &self,
        email: &Email,
        password: &Password,
        options: SignUpOptions,
    ) -> Result<SignUpResponse, ProviderError>;

    async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<SignInResponse, ProviderError>;

    async fn reset_password_for_email(
        &self,
        email: &Email,
        redirect_to: &str,
    ) -> Result<(), ProviderError>;

    async fn resend_confirmation(&self, email: &Email) -> Result<(), ProviderError>;
}
