use color_eyre::eyre::Result;
use gatehouse_adapters::{HttpIdentityProvider, Settings, config::constants};
use gatehouse_application::AccountLifecycle;
use gatehouse_service::IdentityService;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    // Load configuration
    let settings = Settings::load()?;
    let policy = settings.eligibility_policy();
    let redirects = settings.redirect_routes();

    // Build the provider handle; a deployment without credentials still
    // serves, reporting the configuration failure on every operation.
    let lifecycle = match settings.provider_credentials() {
        Some((url, publishable_key)) => {
            let http_client = reqwest::Client::builder()
                .timeout(constants::prod::provider_client::TIMEOUT)
                .build()?;
            let provider = HttpIdentityProvider::new(url, publishable_key, http_client);
            AccountLifecycle::new(provider, policy, redirects)
        }
        None => {
            tracing::warn!(
                "identity provider credentials missing; operations will report a configuration error"
            );
            AccountLifecycle::unconfigured(policy, redirects)
        }
    };

    let allowed_origins = (!settings.service.allowed_origins.is_empty())
        .then(|| settings.service.allowed_origins.clone());

    let listener = tokio::net::TcpListener::bind(&settings.service.address).await?;
    tracing::info!(address = %settings.service.address, "Starting Gatehouse identity service");

    IdentityService::new(lifecycle)
        .run_standalone(listener, allowed_origins)
        .await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
