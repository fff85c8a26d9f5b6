//! Infrastructure adapters for the Gatehouse identity flow: the HTTP
//! client for the hosted Identity Provider, an in-memory provider for
//! development and tests, and the configuration layer.

pub mod config;
pub mod provider;

pub use config::settings::{AllowedOrigins, Settings};
pub use provider::{
    http_identity_provider::HttpIdentityProvider,
    in_memory_identity_provider::InMemoryIdentityProvider,
};
