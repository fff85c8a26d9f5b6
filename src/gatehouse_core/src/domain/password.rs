use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password cannot be empty")]
    Empty,
}

/// Password in transit to the provider.
///
/// Only emptiness is rejected at construction. The minimum-length rule is a
/// registration-time policy ([`meets_password_policy`]); sign-in hands the
/// password to the provider untouched so pre-existing accounts keep working.
///
/// [`meets_password_policy`]: crate::domain::eligibility::meets_password_policy
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().is_empty() {
            return Err(PasswordError::Empty);
        }
        Ok(Self(value))
    }
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_short_passwords_at_construction() {
        // Length is a registration policy, not a parsing rule.
        assert!(Password::try_from(Secret::from("abc".to_string())).is_ok());
    }

    #[test]
    fn rejects_empty_password() {
        let result = Password::try_from(Secret::from(String::new()));
        assert!(matches!(result, Err(PasswordError::Empty)));
    }
}
