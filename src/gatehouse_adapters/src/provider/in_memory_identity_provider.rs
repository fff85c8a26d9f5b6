use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use gatehouse_core::{
    ConfirmationStatus, Email, IdentityProvider, Password, ProviderError, ProviderSession,
    ProviderUser, SignInResponse, SignUpOptions, SignUpResponse,
};
use secrecy::ExposeSecret;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory stand-in for the hosted Identity Provider.
///
/// Reproduces the provider's observable behavior — duplicate-signup fault,
/// invalid-credentials fault, unconfirmed-account fault, existence-blind
/// reset and resend — for development composition and integration tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityProvider {
    accounts: Arc<RwLock<HashMap<String, MemberAccount>>>,
}

#[derive(Debug, Clone)]
struct MemberAccount {
    id: String,
    email: String,
    password: String,
    display_name: Option<String>,
    confirmed: bool,
}

impl MemberAccount {
    fn as_user(&self) -> ProviderUser {
        let confirmation = if self.confirmed {
            ConfirmationStatus::Confirmed
        } else {
            ConfirmationStatus::Pending
        };
        ProviderUser {
            id: self.id.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            confirmation,
        }
    }
}

fn account_key(email: &Email) -> String {
    email.as_ref().expose_secret().trim().to_lowercase()
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an account as confirmed, as if its emailed link was followed.
    pub async fn confirm(&self, email: &Email) {
        let mut accounts = self.accounts.write().await;
        if let Some(account) = accounts.get_mut(&account_key(email)) {
            account.confirmed = true;
        }
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn sign_up(
        &self,
        email: &Email,
        password: &Password,
        options: SignUpOptions,
    ) -> Result<SignUpResponse, ProviderError> {
        let key = account_key(email);
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&key) {
            return Err(ProviderError::Fault("User already registered".to_string()));
        }

        let account = MemberAccount {
            id: Uuid::new_v4().to_string(),
            email: key.clone(),
            password: password.as_ref().expose_secret().clone(),
            display_name: options.display_name,
            confirmed: false,
        };
        let user = account.as_user();
        accounts.insert(key, account);

        Ok(SignUpResponse { user: Some(user) })
    }

    async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<SignInResponse, ProviderError> {
        let accounts = self.accounts.read().await;
        let account = accounts
            .get(&account_key(email))
            .filter(|account| account.password == *password.as_ref().expose_secret())
            .ok_or_else(|| ProviderError::Fault("Invalid login credentials".to_string()))?;

        if !account.confirmed {
            return Err(ProviderError::Fault("Email not confirmed".to_string()));
        }

        let session = ProviderSession {
            access_token: Uuid::new_v4().to_string(),
            refresh_token: Uuid::new_v4().to_string(),
            token_type: "bearer".to_string(),
            expires_in: 3600,
        };
        Ok(SignInResponse {
            user: Some(account.as_user()),
            session: Some(session),
        })
    }

    async fn reset_password_for_email(
        &self,
        _email: &Email,
        _redirect_to: &str,
    ) -> Result<(), ProviderError> {
        // Deliberately blind to whether the account exists.
        Ok(())
    }

    async fn resend_confirmation(&self, _email: &Email) -> Result<(), ProviderError> {
        Ok(())
    }
}
