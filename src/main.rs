//! # Project Hub
//!
//! Loads configuration, installs logging for the configured environment and
//! serves the admin pages until Ctrl+C.

use anyhow::{Context, Result};
use tracing::info;

use project_hub::config::Settings;
use project_hub::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // logging depends on the environment, so configuration errors go to stderr
    let settings = Settings::load().context("failed to load configuration")?;
    project_hub::telemetry::init_tracing(&settings);

    info!(
        address = %settings.server_addr(),
        environment = %settings.environment,
        migrations = settings.database.run_migrations,
        "starting project hub"
    );

    Application::build(settings).await?.run_until_stopped().await
}
