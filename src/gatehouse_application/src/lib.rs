//! Account lifecycle orchestration for the Gatehouse membership flow.
//!
//! [`AccountLifecycle`] drives the four member-facing operations
//! (register, login, reset password, resend confirmation) against an
//! injected [`gatehouse_core::IdentityProvider`], normalizing every
//! provider fault into the [`gatehouse_core::FlowError`] taxonomy. Nothing
//! escapes an operation boundary as an unhandled error.

pub mod fault;
pub mod lifecycle;

pub use fault::{AuthFlow, classify_provider_fault};
pub use lifecycle::{AccountLifecycle, LoginOutcome, RedirectRoutes, RegisterOutcome};
