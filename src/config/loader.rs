use config::{Config, Environment, File};
use tracing::{debug, info};

use crate::error::GameError;
use super::AppConfig;

/// Prefix for environment overrides, e.g. `BACCARAT__BANKROLL__MAX_STEPS=6`.
pub const ENV_PREFIX: &str = "BACCARAT";

/// Layer the optional TOML file under environment overrides and validate.
pub fn load_config(path: &str) -> Result<AppConfig, GameError> {
    let settings = Config::builder()
        .add_source(File::with_name(path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("models.enabled")
                .try_parsing(true),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    config.validate().map_err(GameError::InvalidConfig)?;

    info!(
        "Configuration loaded from '{}': cash={}, bet={}, max_steps={}, models={:?}",
        path,
        config.bankroll.initial_cash,
        config.bankroll.initial_bet,
        config.bankroll.max_steps,
        config.models.enabled
    );
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Render the effective configuration as TOML.
pub fn to_toml(config: &AppConfig) -> Result<String, GameError> {
    Ok(toml::to_string_pretty(config)?)
}
