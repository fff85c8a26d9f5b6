//! Registration gate: pure rule checks with no I/O.
//!
//! These run before any provider call so ineligible requests never leave
//! the process.

use secrecy::ExposeSecret;

use crate::domain::{email::Email, password::Password};

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// The membership domain gate.
///
/// Account creation is restricted to a single organizational email domain;
/// this policy holds the configured suffix and answers eligibility queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityPolicy {
    domain_suffix: String,
}

impl EligibilityPolicy {
    /// Build a policy for the given domain. A leading `@` is added when
    /// missing, and the suffix is stored lowercased.
    pub fn new(domain: impl Into<String>) -> Self {
        let mut domain_suffix = domain.into().trim().to_lowercase();
        if !domain_suffix.starts_with('@') {
            domain_suffix.insert(0, '@');
        }
        Self { domain_suffix }
    }

    pub fn domain_suffix(&self) -> &str {
        &self.domain_suffix
    }

    /// Short tag identifying the membership domain, used as provider-side
    /// account metadata.
    pub fn domain_tag(&self) -> &str {
        self.domain_suffix.trim_start_matches('@')
    }

    /// Case-insensitive suffix match against the membership domain.
    pub fn is_eligible_email(&self, email: &Email) -> bool {
        email
            .as_ref()
            .expose_secret()
            .trim()
            .to_lowercase()
            .ends_with(&self.domain_suffix)
    }
}

/// Length gate applied at registration only. Kept as a single boolean so
/// further rules (charset, complexity) can join without changing callers.
pub fn meets_password_policy(password: &Password) -> bool {
    password.as_ref().expose_secret().chars().count() >= PASSWORD_MIN_LENGTH
}
