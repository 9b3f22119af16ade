//! Headless host bridge binary for stdin/stdout JSON communication.
//!
//! Usage: `tabscout-host [CONFIG_PATH]`. Without an argument the default
//! config path is used; a missing file means default settings.
//!
//! All tracing/diagnostic output goes to stderr so that stdout remains a
//! clean JSON protocol channel.

use std::path::PathBuf;
use std::sync::Arc;

use tabscout::host::stdio::run_stdio_bridge;
use tabscout::{AppConfig, HostSession};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise tracing to stderr only (stdout is reserved for the JSON
    // protocol).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("tabscout=info,tabscout_search=info")
            }),
        )
        .init();

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(AppConfig::default_config_path);
    let config = AppConfig::load_or_default(&config_path)
        .map_err(|e| anyhow::anyhow!("failed to load {}: {e}", config_path.display()))?;
    config.validate()?;

    tracing::info!(
        config = %config_path.display(),
        store = %config.storage.path.display(),
        "tabscout-host starting"
    );

    let session = HostSession::new(&config)?;
    run_stdio_bridge(Arc::new(session)).await.map_err(|e| {
        tracing::error!(error = %e, "tabscout-host exited with error");
        anyhow::anyhow!("tabscout-host failed: {e}")
    })?;

    tracing::info!("tabscout-host shut down cleanly");
    Ok(())
}
