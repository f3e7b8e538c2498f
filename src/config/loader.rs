//! Configuration loader

use config::{Config, Environment, File, Map};
use std::path::Path;

use super::types::AppConfig;
use crate::common::errors::{Result, StatsError};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with APP__, e.g. `APP__LIMITER__CAPACITY`)
/// 2. `RIOT_API_KEY`
/// 3. Configuration file (TOML format)
/// 4. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    load_layered(config_path, std::env::var("RIOT_API_KEY").ok(), None)
}

/// Build the layered configuration
///
/// `app_env` replaces the process environment for the `APP__` layer when set.
fn load_layered(
    config_path: Option<&str>,
    riot_api_key: Option<String>,
    app_env: Option<Map<String, String>>,
) -> Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    // Sources added later win, so the bare key sits between the file and APP__
    if let Some(key) = riot_api_key {
        let vars = Map::from([("APP__RIOT__API_KEY".to_string(), key)]);
        builder = builder.add_source(app_environment().source(Some(vars)));
    }

    builder = builder.add_source(app_environment().source(app_env));

    let config: AppConfig = builder
        .build()
        .map_err(|e| StatsError::Configuration(e.to_string()))?
        .try_deserialize()
        .map_err(|e| StatsError::Configuration(e.to_string()))?;

    config.validate()?;
    Ok(config)
}

fn app_environment() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Load configuration from environment variables only
pub fn load_from_env() -> Result<AppConfig> {
    // Try to load from .env file
    dotenvy::dotenv().ok();

    let mut config = AppConfig::default();
    config.riot.api_key = std::env::var("RIOT_API_KEY").ok();
    if let Ok(url) = std::env::var("RIOT_PLATFORM_URL") {
        config.riot.platform_url = url;
    }
    if let Ok(capacity) = std::env::var("RIOT_LIMITER_CAPACITY") {
        config.limiter.capacity = capacity.parse().map_err(|e| {
            StatsError::Configuration(format!("RIOT_LIMITER_CAPACITY: {}", e))
        })?;
    }
    if let Ok(max) = std::env::var("RIOT_MAX_MATCH_COUNT") {
        config.fetch.max_match_count = max.parse().map_err(|e| {
            StatsError::Configuration(format!("RIOT_MAX_MATCH_COUNT: {}", e))
        })?;
    }

    config.validate()?;
    Ok(config)
}
