use gatehouse_core::{FlowError, ProviderSession, ProviderUser};
use serde::Serialize;

/// Wire envelope shared by every identity operation.
///
/// Exactly one of the two field groups is populated: `message` (plus the
/// optional success payload) when `success` is true, `error` (plus the
/// optional `technical_error`) when it is false. `technical_error` is raw
/// provider detail for logs and support tooling, never display copy.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requires_confirmation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<ProviderUser>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<ProviderSession>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical_error: Option<String>,
}

impl AuthResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            requires_confirmation: None,
            user: None,
            session: None,
            error: None,
            technical_error: None,
        }
    }

    pub fn with_requires_confirmation(mut self, requires_confirmation: bool) -> Self {
        self.requires_confirmation = Some(requires_confirmation);
        self
    }

    pub fn with_user(mut self, user: ProviderUser) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_session(mut self, session: Option<ProviderSession>) -> Self {
        self.session = session;
        self
    }

    pub fn failure(error: &FlowError) -> Self {
        Self::failure_message(error.to_string())
            .with_technical_error(error.technical_detail().map(str::to_string))
    }

    pub(crate) fn failure_message(error: String) -> Self {
        Self {
            success: false,
            message: None,
            requires_confirmation: None,
            user: None,
            session: None,
            error: Some(error),
            technical_error: None,
        }
    }

    fn with_technical_error(mut self, technical_error: Option<String>) -> Self {
        self.technical_error = technical_error;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_keeps_detail_out_of_the_error_sentence() {
        let flow_error = FlowError::BackendMisconfiguration {
            detail: "Database error saving new user".to_string(),
        };
        let envelope = AuthResponse::failure(&flow_error);

        assert!(!envelope.success);
        let error = envelope.error.unwrap();
        assert!(!error.contains("Database error"));
        assert_eq!(
            envelope.technical_error.as_deref(),
            Some("Database error saving new user")
        );
    }

    #[test]
    fn serialized_success_omits_the_failure_group() {
        let envelope = AuthResponse::success("Welcome back.").with_requires_confirmation(false);
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["requiresConfirmation"], false);
        assert!(json.get("error").is_none());
        assert!(json.get("technicalError").is_none());
    }
}
