use anyhow::{bail, Result};
use site_kit::config::Config;
use site_kit::i18n::StringsValidator;
use site_kit::server::{self, AppState};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("site_kit=info".parse()?),
        )
        .init();

    info!("Starting site-kit");

    // Every locale's label set must be complete before serving pages
    let report = StringsValidator::validate_all();
    for warning in &report.warnings {
        warn!("{}", warning);
    }
    if report.has_errors() {
        bail!("Localized strings are invalid: {:?}", report.errors);
    }

    let config = Config::from_env()?;
    info!(
        "Default locale: {}, base URL: {}",
        config.default_locale, config.site_base_url
    );
    if config.unsplash_access_key.is_none() {
        info!("UNSPLASH_ACCESS_KEY not set, galleries use placeholder images");
    }
    if config.elevenlabs_api_key.is_none() {
        info!("ELEVENLABS_API_KEY not set, speech uses the secondary provider");
    }

    server::serve(AppState::new(config)).await
}
