use crate::types::{Outcome, PredictionResult};
use super::{is_alternating, Predictor};

/// Alternation ("zigzag") model.
/// Looks for P-B-P-B style runs in the most recent hands and bets on the
/// alternation continuing.
pub struct AlternationModel {
    name: String,
    confidence: u8,
    window: usize,
    min_pattern_length: usize,
}

impl AlternationModel {
    pub fn new() -> Self {
        Self {
            name: "Alternation".to_string(),
            confidence: 0,
            window: 6,
            min_pattern_length: 3,
        }
    }

    fn full_window_confidence(&self, len: usize) -> u8 {
        let extra = (len - self.min_pattern_length).min(3) as u8;
        85 + extra * 3
    }
}

impl Default for AlternationModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Predictor for AlternationModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn analyze(&mut self, history: &[Outcome]) -> PredictionResult {
        if history.len() < self.min_history_required() {
            self.confidence = 0;
            return PredictionResult::insufficient(history.len(), self.min_history_required());
        }

        let start = history.len().saturating_sub(self.window);
        let recent = &history[start..];
        let last = recent[recent.len() - 1];

        let (status, confidence) = if recent.len() >= self.min_pattern_length && is_alternating(recent) {
            (
                format!("Alternation x{}", recent.len()),
                self.full_window_confidence(recent.len()),
            )
        } else if recent.len() >= 4 && is_alternating(&recent[recent.len() - 4..]) {
            ("Alternation x4".to_string(), 75)
        } else if is_alternating(&recent[recent.len() - 3..]) {
            ("Alternation x3".to_string(), 65)
        } else {
            self.confidence = 0;
            return PredictionResult::none("No alternation detected");
        };

        self.confidence = confidence;
        PredictionResult::predict(status, last.opposite(), confidence)
    }

    fn confidence(&self) -> u8 {
        self.confidence
    }

    fn min_history_required(&self) -> usize {
        5
    }

    fn reset(&mut self) {
        self.confidence = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(s: &str) -> Vec<Outcome> {
        Outcome::parse_sequence(s).unwrap()
    }

    #[test]
    fn test_insufficient_history() {
        let mut model = AlternationModel::new();
        let result = model.analyze(&seq("PBPB"));
        assert_eq!(result.prediction, None);
        assert_eq!(result.status, "Insufficient data (4/5)");
        assert_eq!(model.confidence(), 0);
    }

    #[test]
    fn test_six_long_alternation() {
        let mut model = AlternationModel::new();
        let result = model.analyze(&seq("BBPBPBPB"));
        assert_eq!(result.prediction, Some(Outcome::Player));
        assert_eq!(result.confidence, 94);
        assert_eq!(result.status, "Alternation x6");
        assert_eq!(model.confidence(), 94);
    }

    #[test]
    fn test_five_entry_history_uses_whole_window() {
        let mut model = AlternationModel::new();
        let result = model.analyze(&seq("PBPBP"));
        assert_eq!(result.prediction, Some(Outcome::Banker));
        assert_eq!(result.confidence, 91);
    }

    #[test]
    fn test_partial_alternations() {
        let mut model = AlternationModel::new();
        let four = model.analyze(&seq("PPPBPB"));
        assert_eq!(four.confidence, 75);
        assert_eq!(four.prediction, Some(Outcome::Player));

        let three = model.analyze(&seq("PPPPBP"));
        assert_eq!(three.confidence, 65);
        assert_eq!(three.prediction, Some(Outcome::Banker));
    }

    #[test]
    fn test_no_alternation() {
        let mut model = AlternationModel::new();
        model.analyze(&seq("PBPBPB"));
        let result = model.analyze(&seq("PBPBPP"));
        assert_eq!(result.prediction, None);
        assert_eq!(model.confidence(), 0);
    }
}
