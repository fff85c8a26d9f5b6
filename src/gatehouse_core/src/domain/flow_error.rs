use thiserror::Error;

/// User-facing failure taxonomy for the account lifecycle.
///
/// `Display` renders the complete sentence shown to the member. Operator
/// detail travels separately through [`FlowError::technical_detail`] and is
/// never folded into the displayed message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The provider handle could not be built from configuration. Not
    /// retryable until the deployment is fixed.
    #[error("Account services are not configured. Please contact the editorial team.")]
    Configuration,

    /// Registration attempted from outside the membership domain.
    #[error("Registration is limited to {suffix} email addresses.")]
    IneligibleEmail { suffix: String },

    /// Registration password below the minimum length.
    #[error("Passwords must be at least {minimum} characters long.")]
    WeakPassword { minimum: usize },

    /// Registration against an email the provider already knows.
    #[error("An account with this email address already exists. Try signing in instead.")]
    DuplicateAccount,

    /// Sign-in with a wrong email/password pair.
    #[error("The email address or password is incorrect.")]
    InvalidCredentials,

    /// Sign-in before the confirmation email was acted on.
    #[error(
        "This account has not been confirmed yet. Check your inbox for the confirmation link."
    )]
    UnconfirmedAccount,

    /// Provider-side schema or trigger fault surfaced during registration.
    #[error("Registration is temporarily unavailable. Please try again later.")]
    BackendMisconfiguration { detail: String },

    /// Provider fault matching no known pattern; its message is shown as-is.
    #[error("{message}")]
    Provider { message: String },

    /// Anything not shaped as a provider fault: transport failures, decode
    /// failures, impossible response shapes.
    #[error("Something went wrong on our side. Please try again.")]
    Unexpected { detail: String },
}

impl FlowError {
    /// Raw detail for logs and support tooling. Never shown to members.
    pub fn technical_detail(&self) -> Option<&str> {
        match self {
            Self::BackendMisconfiguration { detail } | Self::Unexpected { detail } => {
                Some(detail.as_str())
            }
            _ => None,
        }
    }
}
