use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use tierlog::config::DEFAULT_CONFIG_FILE;
use tierlog::{log_system_info, LoggerRegistry, LoggingConfig};

fn main() -> Result<()> {
    // Diagnostics about the logging setup itself go to stderr
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tierlog=warn".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = LoggingConfig::load(&config_path)?;

    let registry = LoggerRegistry::new(config);
    let log = registry
        .get_or_create_default("tierlog")
        .context("Failed to create logger")?;

    log_system_info(&log).context("Failed to log system information")?;
    Ok(())
}
