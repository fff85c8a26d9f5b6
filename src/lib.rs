//! # Gatehouse - Membership Identity Flow Library
//!
//! Facade crate re-exporting the public APIs of the Gatehouse identity
//! components: registration gated to a single email domain, login,
//! password recovery, and confirmation resend over an external Identity
//! Provider.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Password`, `EligibilityPolicy`,
//!   `FlowError`, and the `IdentityProvider` port
//! - **Lifecycle controller**: `AccountLifecycle` with the four
//!   member-facing operations
//! - **Adapters**: `HttpIdentityProvider`, `InMemoryIdentityProvider`,
//!   and the configuration layer
//! - **Service**: `IdentityService` - axum routes over the lifecycle

/// Core domain types and the provider port
pub mod core {
    pub use gatehouse_core::*;
}

// Re-export most commonly used core types at the root level
pub use gatehouse_core::{
    ConfirmationStatus, EligibilityPolicy, Email, FlowError, IdentityProvider, Password,
    ProviderError, ProviderSession, ProviderUser, SignInResponse, SignUpOptions, SignUpResponse,
    meets_password_policy,
};

/// Lifecycle orchestration
pub mod application {
    pub use gatehouse_application::*;
}

// Re-export the lifecycle controller at root level
pub use gatehouse_application::{
    AccountLifecycle, AuthFlow, LoginOutcome, RedirectRoutes, RegisterOutcome,
    classify_provider_fault,
};

/// Infrastructure adapters
pub mod adapters {
    /// Identity provider clients
    pub mod provider {
        pub use gatehouse_adapters::provider::*;
    }

    /// Configuration
    pub mod config {
        pub use gatehouse_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use gatehouse_adapters::{HttpIdentityProvider, InMemoryIdentityProvider, Settings};

/// Identity service (main entry point)
pub use gatehouse_service::IdentityService;

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the provider port
pub use async_trait::async_trait;

/// Re-export secrecy for working with credentials
pub use secrecy::{ExposeSecret, Secret};
