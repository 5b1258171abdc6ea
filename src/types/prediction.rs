use serde::{Deserialize, Serialize};

use super::Outcome;

/// What a single model says about the next hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub status: String,
    pub prediction: Option<Outcome>,
    pub confidence: u8,
}

impl PredictionResult {
    pub fn new(status: impl Into<String>, prediction: Option<Outcome>, confidence: u8) -> Self {
        Self {
            status: status.into(),
            prediction,
            confidence: confidence.min(100),
        }
    }

    pub fn predict(status: impl Into<String>, prediction: Outcome, confidence: u8) -> Self {
        Self::new(status, Some(prediction), confidence)
    }

    /// No pattern recognised; confidence zero.
    pub fn none(status: impl Into<String>) -> Self {
        Self::new(status, None, 0)
    }

    pub fn insufficient(have: usize, need: usize) -> Self {
        Self::none(format!("Insufficient data ({}/{})", have, need))
    }
}

/// Per-model entry of an analysis pass, in registration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelReport {
    pub name: String,
    pub status: String,
    pub prediction: Option<Outcome>,
    pub confidence: u8,
}
