use config::{Config, ConfigError, Environment, File};
use gatehouse_application::RedirectRoutes;
use gatehouse_core::EligibilityPolicy;
use secrecy::Secret;
use serde::Deserialize;

use crate::config::constants;

/// Service settings, loaded from an optional `gatehouse.json` file with
/// `GATEHOUSE__`-prefixed environment overrides on top.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub service: ServiceSettings,
    /// Absent provider credentials are not an error at load time; they
    /// surface later as a configuration failure on every operation.
    #[serde(default)]
    pub provider: ProviderSettings,
    pub registration: RegistrationSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceSettings {
    pub address: String,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

/// Connection details for the hosted Identity Provider. Both fields must
/// be present for the provider handle to be buildable; a deployment
/// missing either runs with every operation reporting a configuration
/// failure instead of crashing at startup.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderSettings {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub publishable_key: Option<Secret<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationSettings {
    /// Email domain registration is restricted to.
    pub member_domain: String,
    pub confirmation_route: String,
    pub reset_route: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.0.iter().any(|allowed| allowed == origin)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Config::builder()
            .set_default("service.address", constants::prod::APP_ADDRESS)?
            .set_default("registration.member_domain", "@gatehouse.press")?
            .set_default(
                "registration.confirmation_route",
                constants::routes::CONFIRMATION_LANDING,
            )?
            .set_default("registration.reset_route", constants::routes::RESET_LANDING)?
            .add_source(File::with_name("gatehouse").required(false))
            .add_source(
                Environment::with_prefix("GATEHOUSE")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Provider URL and key, present only when the deployment carries both.
    pub fn provider_credentials(&self) -> Option<(String, Secret<String>)> {
        match (&self.provider.url, &self.provider.publishable_key) {
            (Some(url), Some(key)) => Some((url.clone(), key.clone())),
            _ => None,
        }
    }

    pub fn eligibility_policy(&self) -> EligibilityPolicy {
        EligibilityPolicy::new(&self.registration.member_domain)
    }

    pub fn redirect_routes(&self) -> RedirectRoutes {
        RedirectRoutes {
            confirmation: self.registration.confirmation_route.clone(),
            password_reset: self.registration.reset_route.clone(),
        }
    }
}
