pub mod env {
    pub const PROVIDER_URL_ENV_VAR: &str = "GATEHOUSE__PROVIDER__URL";
    pub const PROVIDER_KEY_ENV_VAR: &str = "GATEHOUSE__PROVIDER__PUBLISHABLE_KEY";
    pub const MEMBER_DOMAIN_ENV_VAR: &str = "GATEHOUSE__REGISTRATION__MEMBER_DOMAIN";
    pub const ALLOWED_ORIGINS_ENV_VAR: &str = "GATEHOUSE__SERVICE__ALLOWED_ORIGINS";
}

pub mod routes {
    /// Landing route the confirmation email links back to.
    pub const CONFIRMATION_LANDING: &str = "/welcome/confirmed";
    /// Landing route the password-reset email links back to.
    pub const RESET_LANDING: &str = "/account/reset-password";
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:3000";
    pub mod provider_client {
        use std::time::Duration;

        pub const TIMEOUT: Duration = Duration::from_secs(10);
    }
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
    pub mod provider_client {
        use std::time::Duration;

        pub const TIMEOUT: Duration = Duration::from_millis(200);
    }
}
