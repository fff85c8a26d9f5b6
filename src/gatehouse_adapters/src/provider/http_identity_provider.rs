use async_trait::async_trait;
use gatehouse_core::{
    ConfirmationStatus, Email, IdentityProvider, Password, ProviderError, ProviderSession,
    ProviderUser, SignInResponse, SignUpOptions, SignUpResponse,
};
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::json;

/// REST client for the hosted Identity Provider's auth endpoints.
///
/// Faults arrive as JSON bodies with a prose message under one of several
/// field names; those become [`ProviderError::Fault`]. Everything else
/// (transport, unparseable bodies) becomes [`ProviderError::Unexpected`].
pub struct HttpIdentityProvider {
    http_client: Client,
    base_url: String,
    publishable_key: Secret<String>,
}

const PROVIDER_KEY_HEADER: &str = "apikey";

const SIGN_UP_PATH: &str = "/auth/v1/signup";
const TOKEN_PATH: &str = "/auth/v1/token";
const RECOVER_PATH: &str = "/auth/v1/recover";
const RESEND_PATH: &str = "/auth/v1/resend";

impl HttpIdentityProvider {
    pub fn new(base_url: String, publishable_key: Secret<String>, http_client: Client) -> Self {
        Self {
            http_client,
            base_url,
            publishable_key,
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ProviderError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| ProviderError::Unexpected(e.to_string()))?;
        base.join(path)
            .map_err(|e| ProviderError::Unexpected(e.to_string()))
    }

    async fn post_json(
        &self,
        url: Url,
        body: serde_json::Value,
    ) -> Result<reqwest::Response, ProviderError> {
        let response = self
            .http_client
            .post(url)
            .header(PROVIDER_KEY_HEADER, self.publishable_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Unexpected(e.to_string()))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(fault_from_response(response).await)
        }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    #[tracing::instrument(name = "Provider sign-up", skip_all)]
    async fn sign_up(
        &self,
        email: &Email,
        password: &Password,
        options: SignUpOptions,
    ) -> Result<SignUpResponse, ProviderError> {
        let mut url = self.endpoint(SIGN_UP_PATH)?;
        url.query_pairs_mut()
            .append_pair("redirect_to", &options.email_redirect_to);

        let mut metadata = json!({ "domain_tag": options.domain_tag });
        if let Some(display_name) = &options.display_name {
            metadata["display_name"] = json!(display_name);
        }
        let body = json!({
            "email": email.as_ref().expose_secret(),
            "password": password.as_ref().expose_secret(),
            "data": metadata,
        });

        let value: serde_json::Value = self
            .post_json(url, body)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Unexpected(e.to_string()))?;

        Ok(parse_sign_up(value))
    }

    #[tracing::instrument(name = "Provider sign-in", skip_all)]
    async fn sign_in_with_password(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<SignInResponse, ProviderError> {
        let mut url = self.endpoint(TOKEN_PATH)?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        let body = json!({
            "email": email.as_ref().expose_secret(),
            "password": password.as_ref().expose_secret(),
        });

        let token: WireTokenResponse = self
            .post_json(url, body)
            .await?
            .json()
            .await
            .map_err(|e| ProviderError::Unexpected(e.to_string()))?;

        Ok(token.into_sign_in_response())
    }

    #[tracing::instrument(name = "Provider password reset", skip_all)]
    async fn reset_password_for_email(
        &self,
        email: &Email,
        redirect_to: &str,
    ) -> Result<(), ProviderError> {
        let mut url = self.endpoint(RECOVER_PATH)?;
        url.query_pairs_mut().append_pair("redirect_to", redirect_to);

        let body = json!({ "email": email.as_ref().expose_secret() });
        self.post_json(url, body).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Provider confirmation resend", skip_all)]
    async fn resend_confirmation(&self, email: &Email) -> Result<(), ProviderError> {
        let url = self.endpoint(RESEND_PATH)?;
        let body = json!({
            "type": "signup",
            "email": email.as_ref().expose_secret(),
        });
        self.post_json(url, body).await?;
        Ok(())
    }
}

async fn fault_from_response(response: reqwest::Response) -> ProviderError {
    let status = response.status();
    match response.json::<WireFault>().await {
        Ok(fault) => ProviderError::Fault(fault.into_message(status)),
        Err(e) => ProviderError::Unexpected(format!("status {status}: {e}")),
    }
}

/// Error body shape; the provider has used several field names for the
/// message over time, so all of them are accepted.
#[derive(Debug, Deserialize)]
struct WireFault {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
}

impl WireFault {
    fn into_message(self, status: StatusCode) -> String {
        self.msg
            .or(self.message)
            .or(self.error_description)
            .unwrap_or_else(|| format!("provider returned status {status}"))
    }
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    email: String,
    #[serde(default)]
    user_metadata: serde_json::Value,
    #[serde(default)]
    identities: Option<Vec<serde_json::Value>>,
}

impl WireUser {
    fn into_user(self) -> ProviderUser {
        // Zero linked identities means the confirmation email is still
        // outstanding; an absent list means the provider hid it, which only
        // happens for confirmed accounts.
        let confirmation = match &self.identities {
            Some(identities) if identities.is_empty() => ConfirmationStatus::Pending,
            _ => ConfirmationStatus::Confirmed,
        };
        let display_name = self
            .user_metadata
            .get("display_name")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        ProviderUser {
            id: self.id,
            email: self.email,
            display_name,
            confirmation,
        }
    }
}

/// The sign-up endpoint returns either `{"user": {...}, ...}` or the bare
/// user object, depending on whether a session was issued alongside.
/// Anything unrecognizable maps to an absent user, which the lifecycle
/// treats as its unknown-reason failure.
fn parse_sign_up(value: serde_json::Value) -> SignUpResponse {
    let candidate = match value.get("user") {
        Some(user) => user.clone(),
        None => value,
    };
    let user = serde_json::from_value::<WireUser>(candidate)
        .ok()
        .map(WireUser::into_user);
    SignUpResponse { user }
}

#[derive(Debug, Deserialize)]
struct WireTokenResponse {
    access_token: String,
    refresh_token: String,
    token_type: String,
    expires_in: u64,
    user: Option<WireUser>,
}

impl WireTokenResponse {
    fn into_sign_in_response(self) -> SignInResponse {
        let session = ProviderSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_type: self.token_type,
            expires_in: self.expires_in,
        };
        SignInResponse {
            user: self.user.map(WireUser::into_user),
            session: Some(session),
        }
    }
}
