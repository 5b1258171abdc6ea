pub mod alternation;
pub mod structural;
pub mod narrative;

pub use alternation::AlternationModel;
pub use structural::StructuralModel;
pub use narrative::{AwakeningModel, FusionModel};

use crate::error::GameError;
use crate::types::{BoxedRng, Clock, Outcome, PredictionResult};

pub const ALTERNATION: &str = "alternation";
pub const STRUCTURAL: &str = "structural";
pub const AWAKENING: &str = "awakening";
pub const FUSION: &str = "fusion";

/// Registration order used when no model list is configured.
pub const DEFAULT_MODELS: [&str; 4] = [ALTERNATION, STRUCTURAL, AWAKENING, FUSION];

/// A next-hand predictor run by the analysis engine over a read-only history view.
pub trait Predictor: Send {
    fn name(&self) -> &str;
    fn analyze(&mut self, history: &[Outcome]) -> PredictionResult;
    /// Confidence computed by the most recent `analyze`.
    fn confidence(&self) -> u8;
    fn min_history_required(&self) -> usize;
    fn reset(&mut self);
    /// Feed raw keystroke text; returns an event message when a code is recognised (default: ignored)
    fn record_keystrokes(&mut self, _text: &str) -> Option<String> {
        None
    }
    /// Feed a free-form player reply to the last message (default: ignored)
    fn record_response(&mut self, _response: &str) {}
    /// Narrative level in 0..=100 for models that carry one
    fn level(&self) -> Option<u8> {
        None
    }
    /// Sticky rare-pattern flag
    fn metamorphosis(&self) -> bool {
        false
    }
}

pub fn is_known_model(name: &str) -> bool {
    DEFAULT_MODELS.contains(&name)
}

/// Build a model by registry name. Narrative models take their own randomness and clock.
pub fn create_model(
    name: &str,
    rng: BoxedRng,
    clock: Box<dyn Clock>,
) -> Result<Box<dyn Predictor>, GameError> {
    let model: Box<dyn Predictor> = match name {
        ALTERNATION => Box::new(AlternationModel::new()),
        STRUCTURAL => Box::new(StructuralModel::new()),
        AWAKENING => Box::new(AwakeningModel::new(rng, clock)),
        FUSION => Box::new(FusionModel::new(rng, clock)),
        other => return Err(GameError::UnknownModel(other.to_string())),
    };
    Ok(model)
}

/// True when every adjacent pair in the window differs.
pub(crate) fn is_alternating(window: &[Outcome]) -> bool {
    window.windows(2).all(|pair| pair[0] != pair[1])
}
