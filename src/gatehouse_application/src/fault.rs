//! Provider fault classification.
//!
//! The hosted provider reports faults as prose, so known failure modes are
//! recognized by substring. All of that matching is isolated here, in one
//! pure function, so it stays unit-testable without any network involved.

use gatehouse_core::FlowError;

/// Which lifecycle operation produced the fault. Sign-up and sign-in carry
/// distinct known-phrase tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    SignUp,
    SignIn,
}

pub(crate) const SIGN_UP_FALLBACK: &str = "Sign-up failed. Please try again.";
pub(crate) const SIGN_IN_FALLBACK: &str = "Sign-in failed. Please try again.";
pub(crate) const RESET_FALLBACK: &str = "The password reset request could not be completed.";
pub(crate) const RESEND_FALLBACK: &str = "The confirmation email could not be resent.";

/// Map a provider fault message onto the user-facing taxonomy.
///
/// Matching is case-insensitive and first-match-wins; a message that fits
/// no known pattern is passed through verbatim.
pub fn classify_provider_fault(flow: AuthFlow, message: &str) -> FlowError {
    let haystack = message.to_lowercase();
    match flow {
        AuthFlow::SignUp => {
            if haystack.contains("already registered") {
                FlowError::DuplicateAccount
            } else if haystack.contains("database error") || haystack.contains("trigger") {
                FlowError::BackendMisconfiguration {
                    detail: message.to_string(),
                }
            } else {
                verbatim_or(message, SIGN_UP_FALLBACK)
            }
        }
        AuthFlow::SignIn => {
            if haystack.contains("invalid login credentials") {
                FlowError::InvalidCredentials
            } else if haystack.contains("email not confirmed") {
                FlowError::UnconfirmedAccount
            } else {
                verbatim_or(message, SIGN_IN_FALLBACK)
            }
        }
    }
}

/// Pass the provider's message through as-is, or substitute the fallback
/// when the provider supplied nothing readable.
pub(crate) fn verbatim_or(message: &str, fallback: &str) -> FlowError {
    let message = if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message.to_string()
    };
    FlowError::Provider { message }
}
