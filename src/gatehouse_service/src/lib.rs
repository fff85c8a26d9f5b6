//! UI-facing surface of the Gatehouse identity flow.
//!
//! Thin axum routes over [`gatehouse_application::AccountLifecycle`]: each
//! of the four operations renders into a uniform JSON envelope
//! ([`routes::response::AuthResponse`]) that front-end controllers consume
//! without knowing anything about the provider underneath.

pub mod identity_service;
pub mod routes;
pub mod trace;

pub use identity_service::IdentityService;
