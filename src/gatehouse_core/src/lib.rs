pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    eligibility::{EligibilityPolicy, PASSWORD_MIN_LENGTH, meets_password_policy},
    email::{Email, EmailError},
    flow_error::FlowError,
    password::{Password, PasswordError},
};

pub use ports::provider::{
    ConfirmationStatus, IdentityProvider, ProviderError, ProviderSession, ProviderUser,
    SignInResponse, SignUpOptions, SignUpResponse,
};
