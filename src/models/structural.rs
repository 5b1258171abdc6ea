use tracing::info;

use crate::history::{player_count, run_lengths};
use crate::types::{Outcome, PredictionResult};
use super::Predictor;

const FIBONACCI: [u64; 8] = [1, 1, 2, 3, 5, 8, 13, 21];
const TEMPLATES: [&str; 2] = ["PBPPBPPP", "BPPBPPPB"];

/// Structural pattern model.
///
/// Runs a fixed priority list of shape checks over the recent hands and stops
/// at the first one that matches:
/// Fibonacci-like run lengths, golden templates, mirror symmetry, short cycles,
/// near-even balance and finally short-term momentum.
///
/// The first time a Fibonacci or template match fires the model raises a sticky
/// metamorphosis flag which only `reset` clears.
pub struct StructuralModel {
    name: String,
    confidence: u8,
    window: usize,
    balance_window: usize,
    momentum_window: usize,
    metamorphosis: bool,
}

impl StructuralModel {
    pub fn new() -> Self {
        Self {
            name: "Structural".to_string(),
            confidence: 0,
            window: 8,
            balance_window: 12,
            momentum_window: 5,
            metamorphosis: false,
        }
    }

    fn check_patterns(&mut self, history: &[Outcome]) -> PredictionResult {
        let recent = tail(history, self.window);

        if has_fibonacci_runs(recent) {
            self.raise_metamorphosis("Fibonacci runs");
            let next = FIBONACCI[7] + FIBONACCI[6];
            let prediction = if next % 2 == 1 { Outcome::Player } else { Outcome::Banker };
            return PredictionResult::predict("Fibonacci run pattern", prediction, 95);
        }

        if let Some(prediction) = match_template(recent) {
            self.raise_metamorphosis("golden template");
            return PredictionResult::predict("Golden template pattern", prediction, 92);
        }

        if is_mirror(recent) {
            let prediction = mirror_counterpart(history);
            return PredictionResult::predict("Mirror symmetry", prediction, 88);
        }

        if let Some((cycle_len, prediction)) = detect_cycle(history) {
            return PredictionResult::predict(format!("{}-cycle", cycle_len), prediction, 85);
        }

        let balance = tail(history, self.balance_window);
        let players = player_count(balance);
        let bankers = balance.len() - players;
        let player_share = players as f64 / balance.len() as f64;
        if (0.45..=0.55).contains(&player_share) {
            let prediction = if players > bankers { Outcome::Banker } else { Outcome::Player };
            return PredictionResult::predict("Balance indicator", prediction, 75);
        }

        if let Some(prediction) = detect_trend(tail(history, self.momentum_window)) {
            return PredictionResult::predict("Momentum indicator", prediction, 70);
        }

        PredictionResult::none("No structural pattern")
    }

    fn raise_metamorphosis(&mut self, cause: &str) {
        if !self.metamorphosis {
            info!("Metamorphosis triggered by {}", cause);
        }
        self.metamorphosis = true;
    }

    pub fn reset_metamorphosis(&mut self) {
        self.metamorphosis = false;
    }
}

impl Default for StructuralModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Predictor for StructuralModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn analyze(&mut self, history: &[Outcome]) -> PredictionResult {
        if history.len() < self.min_history_required() {
            self.confidence = 0;
            return PredictionResult::insufficient(history.len(), self.min_history_required());
        }

        let result = self.check_patterns(history);
        self.confidence = result.confidence;
        result
    }

    fn confidence(&self) -> u8 {
        self.confidence
    }

    fn min_history_required(&self) -> usize {
        8
    }

    fn reset(&mut self) {
        self.confidence = 0;
        self.reset_metamorphosis();
    }

    fn metamorphosis(&self) -> bool {
        self.metamorphosis
    }
}

fn tail(history: &[Outcome], n: usize) -> &[Outcome] {
    &history[history.len().saturating_sub(n)..]
}

/// Any three consecutive run lengths with `a + b == c`.
fn has_fibonacci_runs(window: &[Outcome]) -> bool {
    let runs = run_lengths(window);
    runs.windows(3).any(|w| w[0] + w[1] == w[2])
}

/// Prediction from the first golden template contained in the window.
fn match_template(window: &[Outcome]) -> Option<Outcome> {
    let text: String = window.iter().map(Outcome::symbol).collect();
    TEMPLATES
        .iter()
        .find(|template| text.contains(*template))
        .and_then(|template| {
            let idx = text.len() % template.len();
            template.chars().nth(idx).and_then(Outcome::from_symbol)
        })
}

fn is_mirror(window: &[Outcome]) -> bool {
    window.len() >= 2 && window.iter().eq(window.iter().rev())
}

/// Counterpart about the midpoint of the whole history: the hand just before
/// the middle for even lengths, the opposite of the middle hand for odd ones.
fn mirror_counterpart(history: &[Outcome]) -> Outcome {
    let mid = history.len() / 2;
    if history.len() % 2 == 0 {
        history[mid - 1]
    } else {
        history[mid].opposite()
    }
}

/// A 3-cycle over the last 9 hands, else a 2-cycle over the last 6.
/// Neither is looked for below 9 hands. Returns the cycle length and its first element.
fn detect_cycle(history: &[Outcome]) -> Option<(usize, Outcome)> {
    if history.len() < 9 {
        return None;
    }

    let recent = tail(history, 9);
    if recent[0..3] == recent[3..6] && recent[3..6] == recent[6..9] {
        return Some((3, recent[0]));
    }

    let recent = tail(history, 6);
    if recent[0..2] == recent[2..4] && recent[2..4] == recent[4..6] {
        return Some((2, recent[0]));
    }

    None
}

/// Continuation when one side holds at least 60% of the window.
fn detect_trend(window: &[Outcome]) -> Option<Outcome> {
    if window.is_empty() {
        return None;
    }
    let players = player_count(window) as f64;
    let len = window.len() as f64;
    if players / len >= 0.6 {
        Some(Outcome::Player)
    } else if (len - players) / len >= 0.6 {
        Some(Outcome::Banker)
    } else {
        None
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
        let mut model = StructuralModel::new();
        let result = model.analyze(&seq("PBPBPBP"));
        assert_eq!(result.prediction, None);
        assert_eq!(result.status, "Insufficient data (7/8)");
    }

    #[test]
    fn test_fibonacci_runs_raise_metamorphosis() {
        let mut model = StructuralModel::new();
        // runs 1,1,2,3,1
        let result = model.analyze(&seq("PBPPBBBP"));
        assert_eq!(result.prediction, Some(Outcome::Banker));
        assert_eq!(result.confidence, 95);
        assert!(model.metamorphosis());

        // sticky across a non-matching pass
        model.analyze(&seq("PPPBBBPB"));
        assert!(model.metamorphosis());

        model.reset();
        assert!(!model.metamorphosis());
        assert_eq!(model.confidence(), 0);
    }

    #[test]
    fn test_mirror_symmetry() {
        let mut model = StructuralModel::new();
        let result = model.analyze(&seq("PBBPPBBP"));
        assert_eq!(result.status, "Mirror symmetry");
        assert_eq!(result.prediction, Some(Outcome::Player));
        assert_eq!(result.confidence, 88);
        assert!(!model.metamorphosis());
    }

    #[test]
    fn test_template_match() {
        assert_eq!(match_template(&seq("PBPPBPPP")), Some(Outcome::Player));
        assert_eq!(match_template(&seq("BPPBPPPB")), Some(Outcome::Banker));
        assert_eq!(match_template(&seq("PPPPPPPP")), None);
    }

    #[test]
    fn test_three_cycle() {
        let mut model = StructuralModel::new();
        let result = model.analyze(&seq("PBPPBPPBP"));
        assert_eq!(result.status, "3-cycle");
        assert_eq!(result.prediction, Some(Outcome::Player));
        assert_eq!(result.confidence, 85);
    }

    #[test]
    fn test_two_cycle() {
        let mut model = StructuralModel::new();
        let result = model.analyze(&seq("PPPPBPBPB"));
        assert_eq!(result.status, "2-cycle");
        assert_eq!(result.prediction, Some(Outcome::Player));
        assert_eq!(result.confidence, 85);
    }

    #[test]
    fn test_no_cycles_below_nine_hands() {
        let mut model = StructuralModel::new();
        let result = model.analyze(&seq("PPBPBPBP"));
        assert_eq!(result.status, "Momentum indicator");
        assert_eq!(result.prediction, Some(Outcome::Player));
        assert_eq!(result.confidence, 70);
    }

    #[test]
    fn test_mirror_uses_whole_history_midpoint() {
        let mut model = StructuralModel::new();

        let result = model.analyze(&seq("BBPBBPPBBP"));
        assert_eq!(result.status, "Mirror symmetry");
        assert_eq!(result.prediction, Some(Outcome::Banker));

        let result = model.analyze(&seq("BPBBPPBBP"));
        assert_eq!(result.status, "Mirror symmetry");
        assert_eq!(result.prediction, Some(Outcome::Banker));
    }

    #[test]
    fn test_balance_predicts_minority() {
        let mut model = StructuralModel::new();
        let result = model.analyze(&seq("PPPBBBPB"));
        assert_eq!(result.status, "Balance indicator");
        assert_eq!(result.prediction, Some(Outcome::Player));
        assert_eq!(result.confidence, 75);
    }

    #[test]
    fn test_momentum() {
        let mut model = StructuralModel::new();
        let result = model.analyze(&seq("PPPPBBPP"));
        assert_eq!(result.status, "Momentum indicator");
        assert_eq!(result.prediction, Some(Outcome::Player));
        assert_eq!(result.confidence, 70);
    }

    #[test]
    fn test_detect_trend_threshold() {
        assert_eq!(detect_trend(&seq("BBBPP")), Some(Outcome::Banker));
        assert_eq!(detect_trend(&seq("PPBB")), None);
    }
}
