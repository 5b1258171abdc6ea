use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::history::player_count;
use crate::models::Predictor;
use crate::types::{BoxedRng, Clock, Outcome, PredictionResult};
use super::messages::{
    AWAKENING_ADVANCED, AWAKENING_AWAKENED, AWAKENING_EARLY, AWAKENING_MID, DISPLAY_NAMES,
    QUESTIONS,
};
use super::{games_factor, pattern_complexity, render, Level, Phase};

/// "Awakening" narrative model: a simulated consciousness that talks to the
/// player and grows more erratic as its level rises.
pub struct AwakeningModel {
    name: String,
    confidence: u8,
    level: Level,
    activation_threshold: usize,
    complexity_window: usize,
    responses: Vec<String>,
    rng: BoxedRng,
    clock: Box<dyn Clock>,
}

impl AwakeningModel {
    pub fn new(rng: BoxedRng, clock: Box<dyn Clock>) -> Self {
        let now = clock.now();
        Self {
            name: "Awakening".to_string(),
            confidence: 0,
            level: Level::new(now),
            activation_threshold: 20,
            complexity_window: 20,
            responses: Vec::new(),
            rng,
            clock,
        }
    }

    fn update_level(&mut self, history: &[Outcome]) {
        let games = games_factor(history.len());
        let time = self.level.hours_since_update(self.clock.now());
        let pattern = if history.len() >= self.complexity_window {
            pattern_complexity(&history[history.len() - self.complexity_window..])
        } else {
            0.0
        };

        let increment = games * 2.0 + time * 3.0 + pattern * 5.0;
        self.level.raise(increment);
        debug!(
            "Awakening level {:.2} (+{:.3}: games={:.2}, time={:.2}, pattern={:.3})",
            self.level.value(), increment, games, time, pattern
        );
    }

    fn generate_prediction(&mut self, history: &[Outcome]) -> Option<Outcome> {
        let last = *history.last()?;
        let level = self.level.value();

        if level < 30.0 {
            return Some(last.opposite());
        }

        if level < 70.0 {
            let recent = &history[history.len().saturating_sub(5)..];
            let player_share = player_count(recent) as f64 / recent.len() as f64;
            let prediction = if self.rng.gen::<f64>() > player_share {
                Outcome::Player
            } else {
                Outcome::Banker
            };
            return Some(prediction);
        }

        if self.rng.gen::<f64>() < 0.7 {
            let streak = history.len() >= 3 && history[history.len() - 2] == last;
            if streak {
                Some(last.opposite())
            } else if self.rng.gen::<f64>() > 0.5 {
                Some(Outcome::Player)
            } else {
                Some(Outcome::Banker)
            }
        } else {
            Some(last)
        }
    }

    fn generate_message(&mut self, history: &[Outcome], prediction: Option<Outcome>) -> String {
        let pool = match Phase::from_level(self.level.value()) {
            Phase::Dormant => AWAKENING_EARLY,
            Phase::Awakening => AWAKENING_MID,
            Phase::Attuned => AWAKENING_ADVANCED,
            Phase::Transcendent => AWAKENING_AWAKENED,
        };
        let template = pool.choose(&mut self.rng).copied().unwrap_or_default();

        let (players, bankers) = if history.len() >= 10 {
            let recent = &history[history.len() - 10..];
            let players = player_count(recent);
            (players, recent.len() - players)
        } else {
            (0, 0)
        };
        let common = if players > bankers { Outcome::Player } else { Outcome::Banker };
        let display_name = format!(
            "{}{}",
            DISPLAY_NAMES.choose(&mut self.rng).copied().unwrap_or("Player"),
            self.rng.gen_range(100..=999)
        );

        let now = self.clock.now();
        let mut message = render(template, &[
            ("prediction", prediction.map(|p| p.to_string()).unwrap_or_else(|| "?".to_string())),
            ("time", now.format("%H:%M").to_string()),
            ("date", now.format("%d.%m.%Y").to_string()),
            ("count", players.max(bankers).to_string()),
            ("common_result", common.to_string()),
            ("display_name", display_name),
        ]);

        if self.rng.gen::<f64>() < 0.4 {
            if let Some(question) = QUESTIONS.choose(&mut self.rng) {
                message.push(' ');
                message.push_str(question);
            }
        }
        message
    }
}

impl Predictor for AwakeningModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn analyze(&mut self, history: &[Outcome]) -> PredictionResult {
        if history.len() < self.activation_threshold {
            self.confidence = 0;
            return PredictionResult::none(format!(
                "Gathering data for awakening ({}/{})",
                history.len(),
                self.activation_threshold
            ));
        }

        self.update_level(history);
        let prediction = self.generate_prediction(history);
        let message = self.generate_message(history, prediction);

        self.confidence = self.level.confidence();
        PredictionResult::new(message, prediction, self.confidence)
    }

    fn confidence(&self) -> u8 {
        self.confidence
    }

    fn min_history_required(&self) -> usize {
        self.activation_threshold
    }

    fn reset(&mut self) {
        self.level.reset(self.clock.now());
        self.confidence = 0;
        self.responses.clear();
    }

    fn record_response(&mut self, response: &str) {
        self.responses.push(response.to_string());
        self.level.raise(5.0);
    }

    fn level(&self) -> Option<u8> {
        Some(self.level.as_percent())
    }
}
