//! Library core bootstrap
//!
//! Loads configuration, builds the services with their seed data and logs
//! the resulting catalog.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use library_core::{config::AppConfig, Services};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_core={}", config.logging.level).into());

    let fmt_layer = match config.logging.format.as_str() {
        "json" => tracing_subscriber::fmt::layer().json().boxed(),
        _ => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Starting library core v{}", env!("CARGO_PKG_VERSION"));

    let services = Services::new(&config)?;

    tracing::info!(
        "Library ready: {} user(s), {} item(s), loans last {} day(s)",
        services.users.len(),
        services.catalog.len(),
        config.loans.duration_days
    );

    for item in services.catalog.all_items() {
        tracing::info!("{}", item);
    }

    Ok(())
}
