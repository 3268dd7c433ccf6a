//! Configuration loading for the timeplan tool.
//!
//! Reads an alignment YAML file when one is given, otherwise falls back to
//! the built-in defaults.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};
use wx_time::AlignmentConfig;

/// Load the alignment config from `path`, or the defaults when absent.
pub fn load_config(path: Option<&Path>) -> Result<AlignmentConfig> {
    let Some(path) = path else {
        debug!("No config file given, using defaults");
        return Ok(AlignmentConfig::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = AlignmentConfig::from_yaml_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;

    info!(
        path = %path.display(),
        mode = %config.mode,
        policy = %config.outlook_policy,
        "Loaded alignment config"
    );
    Ok(config)
}
