//! Client configuration

use anyhow::{Context, Result};
use inspection_form::{FileSizeLimit, FormConfig};

/// Resolve the form configuration.
/// Priority: command-line flags > environment variables > defaults
pub fn load(server: Option<String>, max_file_size: Option<u64>) -> Result<FormConfig> {
    let mut config = FormConfig::from_env().context("Invalid inspection configuration")?;

    if let Some(server) = server {
        config.api_base_url = server;
    }
    if let Some(max_file_size) = max_file_size {
        anyhow::ensure!(max_file_size > 0, "--max-file-size must be greater than 0");
        config.max_file_size = FileSizeLimit::new(max_file_size);
    }

    Ok(config)
}
