mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;
use tonarchiv_av::MAX_COMPRESSION_LEVEL;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./tonarchiv.toml",
        "~/.config/tonarchiv/config.toml",
        "/etc/tonarchiv/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.conversion.compression_level > MAX_COMPRESSION_LEVEL {
        anyhow::bail!(
            "Compression level {} is out of range (0-{})",
            config.conversion.compression_level,
            MAX_COMPRESSION_LEVEL
        );
    }

    let layout = &config.layout;
    if layout.box_marker.trim().is_empty() || layout.single_marker.trim().is_empty() {
        anyhow::bail!("Layout marker folder names cannot be empty");
    }
    if layout.box_marker == layout.single_marker {
        anyhow::bail!(
            "Box and single-disc markers must differ (both are {:?})",
            layout.box_marker
        );
    }

    if config.cover.enabled && config.cover.candidates.is_empty() {
        tracing::warn!("Cover embedding is enabled but no cover candidates are configured");
    }

    if let Some(ref path) = config.tools.ffmpeg_path {
        if !path.exists() {
            tracing::warn!("Configured ffmpeg path does not exist: {:?}", path);
        }
    }

    Ok(())
}
