use serde::Serialize;
use tracing::{debug, info};

use crate::models::{Predictor, ALTERNATION};
use crate::types::{ModelReport, Outcome};

/// Minimum hands before any model is consulted.
pub const MIN_ANALYSIS_HISTORY: usize = 5;

/// Aggregate confidence reported before any model has predicted.
pub const DEFAULT_CONFIDENCE: u8 = 95;

/// Model registered under a stable name
struct RegisteredModel {
    name: String,
    model: Box<dyn Predictor>,
}

/// Narrative level of one model, for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelLevel {
    pub name: String,
    pub level: u8,
}

/// Runs every registered model and keeps the most confident prediction.
pub struct AnalysisEngine {
    models: Vec<RegisteredModel>,
    current_prediction: Option<Outcome>,
    confidence: u8,
    last_results: Vec<ModelReport>,
}

impl AnalysisEngine {
    pub fn new() -> Self {
        Self {
            models: Vec::new(),
            current_prediction: None,
            confidence: DEFAULT_CONFIDENCE,
            last_results: Vec::new(),
        }
    }

    /// Register a model. Reusing a name replaces the model and keeps its position.
    pub fn register(&mut self, name: &str, model: Box<dyn Predictor>) {
        if let Some(existing) = self.models.iter_mut().find(|m| m.name == name) {
            info!("Engine: replaced model '{}' with '{}'", name, model.name());
            existing.model = model;
        } else {
            info!("Engine: registered model '{}' ({})", name, model.name());
            self.models.push(RegisteredModel {
                name: name.to_string(),
                model,
            });
        }
    }

    /// Run all models over the history.
    ///
    /// Fewer than `MIN_ANALYSIS_HISTORY` hands yields an empty result and leaves
    /// the aggregate untouched. Otherwise the highest confidence among models
    /// with a prediction wins; on equal confidence the earlier registration wins.
    pub fn analyze(&mut self, history: &[Outcome]) -> Vec<ModelReport> {
        if history.len() < MIN_ANALYSIS_HISTORY {
            return Vec::new();
        }

        let mut results = Vec::with_capacity(self.models.len());
        for entry in &mut self.models {
            let result = entry.model.analyze(history);
            let report = ModelReport {
                name: entry.name.clone(),
                status: result.status,
                prediction: result.prediction,
                confidence: entry.model.confidence(),
            };
            debug!(
                "Model '{}': {} -> {:?} ({}%)",
                report.name, report.status, report.prediction, report.confidence
            );
            results.push(report);
        }

        let mut best: Option<&ModelReport> = None;
        for report in results.iter().filter(|r| r.prediction.is_some()) {
            if best.map_or(true, |b| report.confidence > b.confidence) {
                best = Some(report);
            }
        }

        // Literal fallback to the alternation model when nothing qualified
        let best = best.or_else(|| {
            results
                .iter()
                .find(|r| r.name == ALTERNATION && r.prediction.is_some())
        });

        match best {
            Some(report) => {
                self.current_prediction = report.prediction;
                self.confidence = report.confidence;
                debug!(
                    "Aggregate: {:?} at {}% from '{}'",
                    self.current_prediction, self.confidence, report.name
                );
            }
            None => {
                self.current_prediction = None;
            }
        }

        self.last_results = results.clone();
        results
    }

    /// Last aggregate; call `analyze` first.
    pub fn current_prediction(&self) -> (Option<Outcome>, u8) {
        (self.current_prediction, self.confidence)
    }

    pub fn last_results(&self) -> &[ModelReport] {
        &self.last_results
    }

    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }

    /// Forward keystroke text to every model; returns the event messages raised.
    pub fn record_keystrokes(&mut self, text: &str) -> Vec<String> {
        self.models
            .iter_mut()
            .filter_map(|m| m.model.record_keystrokes(text))
            .collect()
    }

    pub fn record_response(&mut self, response: &str) {
        for entry in &mut self.models {
            entry.model.record_response(response);
        }
    }

    /// True once any model has raised its metamorphosis flag.
    pub fn metamorphosis(&self) -> bool {
        self.models.iter().any(|m| m.model.metamorphosis())
    }

    pub fn levels(&self) -> Vec<ModelLevel> {
        self.models
            .iter()
            .filter_map(|m| {
                m.model.level().map(|level| ModelLevel {
                    name: m.name.clone(),
                    level,
                })
            })
            .collect()
    }

    /// Reset every model and the aggregate.
    pub fn reset(&mut self) {
        for entry in &mut self.models {
            entry.model.reset();
        }
        self.current_prediction = None;
        self.confidence = DEFAULT_CONFIDENCE;
        self.last_results.clear();
    }
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}
