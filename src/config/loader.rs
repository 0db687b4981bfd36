// Configuration loader
// Loads settings from an explicit path, $TALKSAFE_CONFIG or ~/.talksafe/config.toml,
// then applies environment overrides

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::Config;

/// Load configuration, falling back to defaults when no file exists
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config = match config_file(explicit)? {
        Some(path) => load_config_from_path(&path)?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };

    let config = apply_env_overrides(config, |key| std::env::var(key).ok())?;
    validate(&config)?;
    Ok(config)
}

/// Parse a config file. Missing keys take their defaults.
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());
    validate(&config)?;
    Ok(config)
}

fn config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("Config file {} does not exist", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }

    if let Ok(path) = std::env::var("TALKSAFE_CONFIG") {
        if !path.is_empty() {
            let path = PathBuf::from(path);
            if !path.exists() {
                bail!("TALKSAFE_CONFIG points to missing file {}", path.display());
            }
            return Ok(Some(path));
        }
    }

    let Some(home) = dirs::home_dir() else {
        return Ok(None);
    };
    let path = home.join(".talksafe/config.toml");
    Ok(path.exists().then_some(path))
}

fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(catalog) = lookup("TALKSAFE_CATALOG").filter(|v| !v.is_empty()) {
        config.catalog_path = Some(PathBuf::from(catalog));
    }

    if let Some(seed) = lookup("TALKSAFE_SEED").filter(|v| !v.is_empty()) {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("TALKSAFE_SEED must be an unsigned integer, got '{}'", seed))?;
        config.seed = Some(seed);
    }

    if let Some(debug) = lookup("TALKSAFE_DEBUG") {
        if debug == "1" || debug.eq_ignore_ascii_case("true") {
            config.debug_logging = true;
        }
    }

    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.max_input_chars == 0 {
        bail!("max_input_chars must be at least 1");
    }
    if config.turn_window == 0 {
        bail!("turn_window must be at least 1");
    }
    if config.mood_window == 0 {
        bail!("mood_window must be at least 1");
    }
    Ok(())
}
