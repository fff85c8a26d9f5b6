use gatehouse_core::{
    ConfirmationStatus, EligibilityPolicy, Email, FlowError, IdentityProvider, PASSWORD_MIN_LENGTH,
    Password, ProviderError, ProviderSession, ProviderUser, SignUpOptions, meets_password_policy,
};

use crate::fault::{self, AuthFlow, classify_provider_fault};

/// Routes handed to the provider for its emailed links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRoutes {
    /// Landing route for the sign-up confirmation link.
    pub confirmation: String,
    /// Landing route for the password-reset link.
    pub password_reset: String,
}

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOutcome {
    pub user: ProviderUser,
    /// True when the account still awaits its confirmation email.
    pub requires_confirmation: bool,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub user: ProviderUser,
    pub session: Option<ProviderSession>,
}

/// The lifecycle controller: registration, login, password reset, and
/// confirmation resend over an injected [`IdentityProvider`].
///
/// Every operation returns `Result<_, FlowError>`; provider faults and
/// transport failures are recovered here and never propagate past the
/// operation boundary. The controller holds no state between calls, so
/// operations are independently retryable and may run concurrently.
///
/// Cancellation caveat for test authors: dropping a pending operation
/// future makes no promise about the provider-side effect. The sign-up,
/// sign-in, or reset request may or may not have already taken effect;
/// do not assert on provider state after abandoning a call.
pub struct AccountLifecycle<P> {
    provider: Option<P>,
    policy: EligibilityPolicy,
    redirects: RedirectRoutes,
}

impl<P> AccountLifecycle<P>
where
    P: IdentityProvider,
{
    pub fn new(provider: P, policy: EligibilityPolicy, redirects: RedirectRoutes) -> Self {
        Self {
            provider: Some(provider),
            policy,
            redirects,
        }
    }

    /// Lifecycle with no reachable provider. Every operation reports the
    /// configuration failure; used when provider credentials are absent
    /// from the deployment.
    pub fn unconfigured(policy: EligibilityPolicy, redirects: RedirectRoutes) -> Self {
        Self {
            provider: None,
            policy,
            redirects,
        }
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    /// The configuration check runs before validation on purpose: a broken
    /// deployment must report itself even when the input is also bad.
    fn provider(&self) -> Result<&P, FlowError> {
        self.provider.as_ref().ok_or(FlowError::Configuration)
    }

    #[tracing::instrument(name = "AccountLifecycle::register", skip_all)]
    pub async fn register(
        &self,
        email: Email,
        password: Password,
        display_name: Option<String>,
    ) -> Result<RegisterOutcome, FlowError> {
        let provider = self.provider()?;

        if !self.policy.is_eligible_email(&email) {
            tracing::debug!("registration attempt from outside the membership domain");
            return Err(FlowError::IneligibleEmail {
                suffix: self.policy.domain_suffix().to_string(),
            });
        }
        if !meets_password_policy(&password) {
            return Err(FlowError::WeakPassword {
                minimum: PASSWORD_MIN_LENGTH,
            });
        }

        let options = SignUpOptions {
            display_name,
            domain_tag: self.policy.domain_tag().to_string(),
            email_redirect_to: self.redirects.confirmation.clone(),
        };

        let response = match provider.sign_up(&email, &password, options).await {
            Ok(response) => response,
            Err(ProviderError::Fault(message)) => {
                tracing::warn!(fault = %message, "provider rejected sign-up");
                return Err(classify_provider_fault(AuthFlow::SignUp, &message));
            }
            Err(ProviderError::Unexpected(detail)) => {
                tracing::error!(%detail, "sign-up call failed outside the provider contract");
                return Err(FlowError::Unexpected { detail });
            }
        };

        match response.user {
            Some(user) => {
                let requires_confirmation = user.confirmation == ConfirmationStatus::Pending;
                tracing::info!(requires_confirmation, "member registered");
                Ok(RegisterOutcome {
                    user,
                    requires_confirmation,
                })
            }
            // Should be unreachable, but the provider contract does not
            // forbid it; stay total over every response shape.
            None => Err(FlowError::Unexpected {
                detail: "provider reported sign-up success without a user record".to_string(),
            }),
        }
    }

    #[tracing::instrument(name = "AccountLifecycle::login", skip_all)]
    pub async fn login(&self, email: Email, password: Password) -> Result<LoginOutcome, FlowError> {
        let provider = self.provider()?;

        // No eligibility or strength gating here: stored accounts may
        // predate the domain gate, and the provider owns credential checks.
        let response = match provider.sign_in_with_password(&email, &password).await {
            Ok(response) => response,
            Err(ProviderError::Fault(message)) => {
                tracing::debug!(fault = %message, "provider rejected sign-in");
                return Err(classify_provider_fault(AuthFlow::SignIn, &message));
            }
            Err(ProviderError::Unexpected(detail)) => {
                tracing::error!(%detail, "sign-in call failed outside the provider contract");
                return Err(FlowError::Unexpected { detail });
            }
        };

        match response.user {
            Some(user) => {
                tracing::info!("member signed in");
                Ok(LoginOutcome {
                    user,
                    session: response.session,
                })
            }
            None => Err(FlowError::Unexpected {
                detail: "provider reported sign-in success without a user record".to_string(),
            }),
        }
    }

    /// Ask the provider to email a password-reset link.
    ///
    /// Success does not reveal whether the address has an account; the
    /// provider decides what to send, and this layer adds no existence
    /// check of its own.
    #[tracing::instrument(name = "AccountLifecycle::reset_password", skip_all)]
    pub async fn reset_password(&self, email: Email) -> Result<(), FlowError> {
        let provider = self.provider()?;

        match provider
            .reset_password_for_email(&email, &self.redirects.password_reset)
            .await
        {
            Ok(()) => Ok(()),
            // Reset is not domain-sensitive; the provider's own wording is
            // surfaced as-is.
            Err(ProviderError::Fault(message)) => {
                tracing::warn!(fault = %message, "provider rejected password reset");
                Err(fault::verbatim_or(&message, fault::RESET_FALLBACK))
            }
            Err(ProviderError::Unexpected(detail)) => {
                tracing::error!(%detail, "password reset call failed outside the provider contract");
                Err(FlowError::Unexpected { detail })
            }
        }
    }

    /// Ask the provider to resend the sign-up confirmation email. No
    /// cooldown is enforced here; repeat calls are independent.
    #[tracing::instrument(name = "AccountLifecycle::resend_confirmation", skip_all)]
    pub async fn resend_confirmation(&self, email: Email) -> Result<(), FlowError> {
        let provider = self.provider()?;

        match provider.resend_confirmation(&email).await {
            Ok(()) => Ok(()),
            Err(ProviderError::Fault(message)) => {
                tracing::warn!(fault = %message, "provider rejected confirmation resend");
                Err(fault::verbatim_or(&message, fault::RESEND_FALLBACK))
            }
            Err(ProviderError::Unexpected(detail)) => {
                tracing::error!(%detail, "resend call failed outside the provider contract");
                Err(FlowError::Unexpected { detail })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use gatehouse_core::{ProviderError, SignInResponse, SignUpResponse};
    use secrecy::Secret;

    use super::*;

    /// Provider double returning pre-scripted results and counting calls.
    struct ScriptedProvider {
        sign_up_result: Result<SignUpResponse, ProviderError>,
        sign_in_result: Result<SignInResponse, ProviderError>,
        reset_result: Result<(), ProviderError>,
        resend_result: Result<(), ProviderError>,
        sign_up_calls: AtomicUsize,
        sign_in_calls: AtomicUsize,
        reset_calls: AtomicUsize,
        resend_calls: AtomicUsize,
    }

    impl Default for ScriptedProvider {
        fn default() -> Self {
            Self {
                sign_up_result: Ok(SignUpResponse::default()),
                sign_in_result: Ok(SignInResponse::default()),
                reset_result: Ok(()),
                resend_result: Ok(()),
                sign_up_calls: AtomicUsize::new(0),
                sign_in_calls: AtomicUsize::new(0),
                reset_calls: AtomicUsize::new(0),
                resend_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for ScriptedProvider {
        async fn sign_up(
            &self,
            _email: &Email,
            _password: &Password,
            _options: SignUpOptions,
        ) -> Result<SignUpResponse, ProviderError> {
            self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
            self.sign_up_result.clone()
        }

        async fn sign_in_with_password(
            &self,
            _email: &Email,
            _password: &Password,
        ) -> Result<SignInResponse, ProviderError> {
            self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
            self.sign_in_result.clone()
        }

        async fn reset_password_for_email(
            &self,
            _email: &Email,
            _redirect_to: &str,
        ) -> Result<(), ProviderError> {
            self.reset_calls.fetch_add(1, Ordering::SeqCst);
            self.reset_result.clone()
        }

        async fn resend_confirmation(&self, _email: &Email) -> Result<(), ProviderError> {
            self.resend_calls.fetch_add(1, Ordering::SeqCst);
            self.resend_result.clone()
        }
    }

    fn email(raw: &str) -> Email {
        Email::try_from(Secret::from(raw.to_string())).unwrap()
    }

    fn password(raw: &str) -> Password {
        Password::try_from(Secret::from(raw.to_string())).unwrap()
    }

    fn policy() -> EligibilityPolicy {
        EligibilityPolicy::new("@gatehouse.press")
    }

    fn redirects() -> RedirectRoutes {
        RedirectRoutes {
            confirmation: "/welcome/confirmed".to_string(),
            password_reset: "/account/reset-password".to_string(),
        }
    }

    fn member_user(confirmation: ConfirmationStatus) -> ProviderUser {
        ProviderUser {
            id: "7d2a".to_string(),
            email: "reader@gatehouse.press".to_string(),
            display_name: Some("Reader".to_string()),
            confirmation,
        }
    }

    fn lifecycle(provider: ScriptedProvider) -> AccountLifecycle<ScriptedProvider> {
        AccountLifecycle::new(provider, policy(), redirects())
    }

    #[tokio::test]
    async fn register_rejects_foreign_domain_without_a_provider_call() {
        let lifecycle = lifecycle(ScriptedProvider::default());

        let result = lifecycle
            .register(email("reader@example.com"), password("longenough1"), None)
            .await;

        assert!(matches!(result, Err(FlowError::IneligibleEmail { .. })));
        assert_eq!(
            lifecycle.provider().unwrap().sign_up_calls.load(Ordering::SeqCst),
            0
        );
    }

    #[tokio::test]
    async fn register_rejects_short_password_without_a_provider_call() {
        let lifecycle = lifecycle(ScriptedProvider::default());

        let result = lifecycle
            .register(email("reader@gatehouse.press"), password("short77"), None)
            .await;

        assert_eq!(result, Err(FlowError::WeakPassword { minimum: 8 }));
        assert_eq!(
            lifecycle.provider().unwrap().sign_up_calls.load(Ordering::SeqCst),
            0
        );
    }

    #[tokio::test]
    async fn configuration_error_wins_over_validation() {
        let lifecycle =
            AccountLifecycle::<ScriptedProvider>::unconfigured(policy(), redirects());

        // Even an ineligible email reports the configuration failure, so a
        // broken deployment is diagnosed first.
        let result = lifecycle
            .register(email("reader@example.com"), password("short"), None)
            .await;

        assert_eq!(result, Err(FlowError::Configuration));
    }

    #[tokio::test]
    async fn every_operation_short_circuits_when_unconfigured() {
        let lifecycle =
            AccountLifecycle::<ScriptedProvider>::unconfigured(policy(), redirects());

        assert_eq!(
            lifecycle
                .login(email("reader@gatehouse.press"), password("whatever1"))
                .await,
            Err(FlowError::Configuration)
        );
        assert_eq!(
            lifecycle.reset_password(email("reader@gatehouse.press")).await,
            Err(FlowError::Configuration)
        );
        assert_eq!(
            lifecycle
                .resend_confirmation(email("reader@gatehouse.press"))
                .await,
            Err(FlowError::Configuration)
        );
    }

    #[tokio::test]
    async fn register_reports_pending_confirmation_for_fresh_accounts() {
        let provider = ScriptedProvider {
            sign_up_result: Ok(SignUpResponse {
                user: Some(member_user(ConfirmationStatus::Pending)),
            }),
            ..ScriptedProvider::default()
        };
        let lifecycle = lifecycle(provider);

        let outcome = lifecycle
            .register(
                email("reader@gatehouse.press"),
                password("longenough1"),
                Some("Reader".to_string()),
            )
            .await
            .unwrap();

        assert!(outcome.requires_confirmation);
        assert_eq!(outcome.user.email, "reader@gatehouse.press");
    }

    #[tokio::test]
    async fn register_skips_confirmation_for_already_linked_accounts() {
        let provider = ScriptedProvider {
            sign_up_result: Ok(SignUpResponse {
                user: Some(member_user(ConfirmationStatus::Confirmed)),
            }),
            ..ScriptedProvider::default()
        };
        let lifecycle = lifecycle(provider);

        let outcome = lifecycle
            .register(email("reader@gatehouse.press"), password("longenough1"), None)
            .await
            .unwrap();

        assert!(!outcome.requires_confirmation);
    }

    #[tokio::test]
    async fn register_classifies_duplicate_accounts() {
        let provider = ScriptedProvider {
            sign_up_result: Err(ProviderError::Fault("User already registered".to_string())),
            ..ScriptedProvider::default()
        };
        let lifecycle = lifecycle(provider);

        let result = lifecycle
            .register(email("reader@gatehouse.press"), password("longenough1"), None)
            .await;

        assert_eq!(result, Err(FlowError::DuplicateAccount));
    }

    #[tokio::test]
    async fn register_surfaces_backend_faults_with_detail() {
        let provider = ScriptedProvider {
            sign_up_result: Err(ProviderError::Fault(
                "Database error saving new user".to_string(),
            )),
            ..ScriptedProvider::default()
        };
        let lifecycle = lifecycle(provider);

        let error = lifecycle
            .register(email("reader@gatehouse.press"), password("longenough1"), None)
            .await
            .unwrap_err();

        assert_eq!(
            error.technical_detail(),
            Some("Database error saving new user")
        );
    }

    #[tokio::test]
    async fn register_stays_total_when_the_provider_returns_nothing() {
        let lifecycle = lifecycle(ScriptedProvider::default());

        let error = lifecycle
            .register(email("reader@gatehouse.press"), password("longenough1"), None)
            .await
            .unwrap_err();

        assert!(matches!(error, FlowError::Unexpected { .. }));
        assert!(error.technical_detail().is_some());
    }

    #[tokio::test]
    async fn login_does_not_gate_on_domain_or_length() {
        let provider = ScriptedProvider {
            sign_in_result: Ok(SignInResponse {
                user: Some(member_user(ConfirmationStatus::Confirmed)),
                session: None,
            }),
            ..ScriptedProvider::default()
        };
        let lifecycle = lifecycle(provider);

        // Foreign domain and a short password both go straight through.
        let result = lifecycle
            .login(email("veteran@example.com"), password("abc"))
            .await;

        assert!(result.is_ok());
        assert_eq!(
            lifecycle.provider().unwrap().sign_in_calls.load(Ordering::SeqCst),
            1
        );
    }

    #[tokio::test]
    async fn login_distinguishes_unconfirmed_from_invalid_credentials() {
        let unconfirmed = ScriptedProvider {
            sign_in_result: Err(ProviderError::Fault("Email not confirmed".to_string())),
            ..ScriptedProvider::default()
        };
        let invalid = ScriptedProvider {
            sign_in_result: Err(ProviderError::Fault(
                "Invalid login credentials".to_string(),
            )),
            ..ScriptedProvider::default()
        };

        let unconfirmed_error = lifecycle(unconfirmed)
            .login(email("reader@gatehouse.press"), password("longenough1"))
            .await
            .unwrap_err();
        let invalid_error = lifecycle(invalid)
            .login(email("reader@gatehouse.press"), password("longenough1"))
            .await
            .unwrap_err();

        assert_eq!(unconfirmed_error, FlowError::UnconfirmedAccount);
        assert_eq!(invalid_error, FlowError::InvalidCredentials);
        assert_ne!(unconfirmed_error.to_string(), invalid_error.to_string());
    }

    #[tokio::test]
    async fn login_success_carries_user_and_session() {
        let session = ProviderSession {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            token_type: "bearer".to_string(),
            expires_in: 3600,
        };
        let provider = ScriptedProvider {
            sign_in_result: Ok(SignInResponse {
                user: Some(member_user(ConfirmationStatus::Confirmed)),
                session: Some(session.clone()),
            }),
            ..ScriptedProvider::default()
        };
        let lifecycle = lifecycle(provider);

        let outcome = lifecycle
            .login(email("reader@gatehouse.press"), password("longenough1"))
            .await
            .unwrap();

        assert_eq!(outcome.session, Some(session));
    }

    #[tokio::test]
    async fn reset_password_passes_provider_faults_through_verbatim() {
        let provider = ScriptedProvider {
            reset_result: Err(ProviderError::Fault(
                "For security purposes, you can only request this once every 60 seconds"
                    .to_string(),
            )),
            ..ScriptedProvider::default()
        };
        let lifecycle = lifecycle(provider);

        let error = lifecycle
            .reset_password(email("reader@gatehouse.press"))
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "For security purposes, you can only request this once every 60 seconds"
        );
    }

    #[tokio::test]
    async fn reset_password_succeeds_for_any_address_the_provider_accepts() {
        let lifecycle = lifecycle(ScriptedProvider::default());

        // Unknown addresses get the same success; no existence leak here.
        assert!(lifecycle.reset_password(email("nobody@example.com")).await.is_ok());
    }

    #[tokio::test]
    async fn resend_confirmation_twice_yields_two_independent_successes() {
        let lifecycle = lifecycle(ScriptedProvider::default());
        let address = email("reader@gatehouse.press");

        assert!(lifecycle.resend_confirmation(address.clone()).await.is_ok());
        assert!(lifecycle.resend_confirmation(address).await.is_ok());
        assert_eq!(
            lifecycle.provider().unwrap().resend_calls.load(Ordering::SeqCst),
            2
        );
    }

    #[tokio::test]
    async fn unexpected_failures_never_escape_an_operation() {
        let provider = ScriptedProvider {
            sign_up_result: Err(ProviderError::Unexpected("connection reset".to_string())),
            sign_in_result: Err(ProviderError::Unexpected("connection reset".to_string())),
            reset_result: Err(ProviderError::Unexpected("connection reset".to_string())),
            resend_result: Err(ProviderError::Unexpected("connection reset".to_string())),
            ..ScriptedProvider::default()
        };
        let lifecycle = lifecycle(provider);
        let address = email("reader@gatehouse.press");

        for error in [
            lifecycle
                .register(address.clone(), password("longenough1"), None)
                .await
                .unwrap_err(),
            lifecycle
                .login(address.clone(), password("longenough1"))
                .await
                .unwrap_err(),
            lifecycle.reset_password(address.clone()).await.unwrap_err(),
            lifecycle.resend_confirmation(address).await.unwrap_err(),
        ] {
            assert!(matches!(error, FlowError::Unexpected { .. }));
            assert_eq!(error.technical_detail(), Some("connection reset"));
            // The member-facing sentence stays generic.
            assert!(!error.to_string().contains("connection reset"));
        }
    }
}
