use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::history::SIMULATED_PLAYER_PROBABILITY;
use crate::models::{is_known_model, DEFAULT_MODELS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Fixed RNG seed; absent means entropy-seeded
    pub seed: Option<u64>,
    pub bankroll: BankrollSettings,
    pub simulation: SimulationSettings,
    pub models: ModelSettings,
    pub display: DisplaySettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            bankroll: BankrollSettings::default(),
            simulation: SimulationSettings::default(),
            models: ModelSettings::default(),
            display: DisplaySettings::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        // Bankroll validation
        if self.bankroll.initial_bet <= Decimal::ZERO {
            errors.push("initial_bet must be > 0".to_string());
        }
        if self.bankroll.initial_cash < Decimal::ZERO {
            errors.push("initial_cash must be >= 0".to_string());
        }
        if self.bankroll.max_steps == 0 {
            errors.push("max_steps must be >= 1".to_string());
        }

        // Simulation validation
        if self.simulation.batch_size == 0 {
            errors.push("batch_size must be > 0".to_string());
        }
        let p = self.simulation.player_probability;
        if !(p > 0.0 && p < 1.0) {
            errors.push("player_probability must be between 0 and 1".to_string());
        }

        // Model validation
        for name in &self.models.enabled {
            if !is_known_model(name) {
                errors.push(format!("unknown model '{}'", name));
            }
        }

        if self.display.grid_size == 0 {
            errors.push("grid_size must be > 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankrollSettings {
    pub initial_cash: Decimal,
    pub initial_bet: Decimal,
    pub max_steps: u32,
}

impl Default for BankrollSettings {
    fn default() -> Self {
        Self {
            initial_cash: dec!(2818),
            initial_bet: dec!(2),
            max_steps: 8,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Hands appended by a bare `s` in the interactive shell
    pub batch_size: usize,
    pub player_probability: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            batch_size: 20,
            player_probability: SIMULATED_PLAYER_PROBABILITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Registration order; earlier models win confidence ties
    pub enabled: Vec<String>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Hands shown in the history grid
    pub grid_size: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self { grid_size: 25 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bankroll.initial_cash, dec!(2818));
        assert_eq!(config.bankroll.initial_bet, dec!(2));
        assert_eq!(config.bankroll.max_steps, 8);
        assert_eq!(config.models.enabled, vec!["alternation", "structural", "awakening", "fusion"]);
    }

    #[test]
    fn test_validate_collects_every_error() {
        let mut config = AppConfig::default();
        config.bankroll.initial_bet = Decimal::ZERO;
        config.bankroll.max_steps = 0;
        config.simulation.player_probability = 1.0;
        config.simulation.batch_size = 0;
        config.models.enabled.push("tarot".to_string());

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.iter().any(|e| e.contains("tarot")));
    }
}
