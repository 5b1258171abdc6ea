use thiserror::Error;

/// Errors surfaced by the history store, bankroll and configuration layers.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Invalid outcome '{0}': expected P (Player) or B (Banker)")]
    InvalidOutcome(String),

    #[error("Invalid configuration: {}", .0.join(", "))]
    InvalidConfig(Vec<String>),

    #[error("Unknown model '{0}'")]
    UnknownModel(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),
}
