use chrono::{Datelike, Timelike};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info};

use crate::history::player_count;
use crate::models::Predictor;
use crate::types::{BoxedRng, Clock, Outcome, PredictionResult};
use super::messages::{
    COSMIC_CODES, FUSION_ATTUNED, FUSION_AWAKENING, FUSION_DORMANT, FUSION_TRANSCENDENT,
    RITUAL_PROMPTS,
};
use super::{games_factor, pattern_complexity, render, Level, Phase};

const MAX_KEY_PRESSES: usize = 20;
const CODE_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn describe(&self) -> &'static str {
        let (r, g, b) = (self.r, self.g, self.b);
        if r > g && r > b {
            "reddish"
        } else if g > r && g > b {
            "greenish"
        } else if b > r && b > g {
            "bluish"
        } else if r > 200 && g > 200 {
            "yellowish"
        } else if r > 200 && b > 200 {
            "purplish"
        } else if g > 200 && b > 200 {
            "turquoise"
        } else {
            "neutral"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeOfDay {
    #[default]
    Day,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=17 => TimeOfDay::Day,
            18..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            TimeOfDay::Day => "daylight energy",
            TimeOfDay::Evening => "evening twilight",
            TimeOfDay::Night => "deep night",
        }
    }
}

/// Simulated surroundings. Every reading drifts a little on each analysis pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Environment {
    pub dominant_color: Rgb,
    pub ambient_sound_level: u8,
    pub time_of_day: TimeOfDay,
    pub user_activity_level: u8,
    pub cosmic_alignment: u8,
}

impl Environment {
    /// Mean of sound, activity and alignment in `[0, 1]`.
    fn energy(&self) -> f64 {
        (self.ambient_sound_level as f64
            + self.user_activity_level as f64
            + self.cosmic_alignment as f64)
            / 300.0
    }
}

fn cosmic_description(alignment: u8) -> &'static str {
    if alignment < 33 {
        "descending cosmic vibrations"
    } else if alignment < 66 {
        "balanced cosmic energy"
    } else {
        "rising cosmic frequencies"
    }
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, value: u8, spread: i32, max: i32) -> u8 {
    (value as i32 + rng.gen_range(-spread..=spread)).clamp(0, max) as u8
}

/// "Reality layers" fusion model. Blends a simulated environment, keystrokes
/// and the recent hands into a prediction that only firms up once the fusion
/// level reaches the attuned band.
pub struct FusionModel {
    name: String,
    confidence: u8,
    level: Level,
    phase: Phase,
    environment: Environment,
    key_presses: VecDeque<char>,
    activation_threshold: usize,
    complexity_window: usize,
    rng: BoxedRng,
    clock: Box<dyn Clock>,
}

impl FusionModel {
    pub fn new(rng: BoxedRng, clock: Box<dyn Clock>) -> Self {
        let now = clock.now();
        Self {
            name: "Reality Fusion".to_string(),
            confidence: 0,
            level: Level::new(now),
            phase: Phase::Dormant,
            environment: Environment::default(),
            key_presses: VecDeque::with_capacity(MAX_KEY_PRESSES),
            activation_threshold: 10,
            complexity_window: 20,
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
        let environment = self.environment.energy();

        let increment = games * 2.0 + time * 3.0 + pattern * 4.0 + environment * 5.0;
        self.level.raise(increment);
        self.phase = Phase::from_level(self.level.value());
        debug!(
            "Fusion level {:.2} ({}), +{:.3}",
            self.level.value(), self.phase.as_str(), increment
        );
    }

    fn simulate_environment(&mut self) {
        let now = self.clock.now();
        let env = &mut self.environment;
        env.time_of_day = TimeOfDay::from_hour(now.hour());

        let mut color = Rgb {
            r: jitter(&mut self.rng, env.dominant_color.r, 5, 255),
            g: jitter(&mut self.rng, env.dominant_color.g, 5, 255),
            b: jitter(&mut self.rng, env.dominant_color.b, 5, 255),
        };
        match env.time_of_day {
            TimeOfDay::Day => {
                color.b = color.b.max(100);
                color.r = color.r.min(200);
            }
            TimeOfDay::Evening => {
                color.r = color.r.max(150);
                color.g = color.g.min(150);
            }
            TimeOfDay::Night => {
                color.r = color.r.min(100);
                color.g = color.g.min(100);
                color.b = color.b.max(120);
            }
        }
        env.dominant_color = color;

        env.ambient_sound_level = jitter(&mut self.rng, env.ambient_sound_level, 10, 100);

        env.user_activity_level = if self.key_presses.is_empty() {
            env.user_activity_level.saturating_sub(5)
        } else {
            let boost = self.key_presses.len() * 5;
            (env.user_activity_level as usize + boost).min(100) as u8
        };

        let day = now.day() as f64 / 31.0;
        let hour = now.hour() as f64 / 24.0;
        let minute = now.minute() as f64 / 60.0;
        let rhythm = (day * 33.0 + hour * 45.0 + minute * 22.0) % 1.0;
        let rhythm = (rhythm + self.rng.gen::<f64>() * 0.2) / 1.2;
        env.cosmic_alignment = (rhythm * 100.0).clamp(0.0, 100.0) as u8;
    }

    fn generate_prediction(&mut self, history: &[Outcome]) -> Option<Outcome> {
        let last = *history.last()?;
        let env = &self.environment;

        let color_factor = (env.dominant_color.r as f64 - env.dominant_color.b as f64) / 255.0;
        let time_factor = match env.time_of_day {
            TimeOfDay::Day => 0.2,
            TimeOfDay::Evening => 0.0,
            TimeOfDay::Night => -0.2,
        };
        let cosmic_factor = (env.cosmic_alignment as f64 - 50.0) / 50.0;
        let environmental = color_factor * 0.4 + time_factor * 0.2 + cosmic_factor * 0.4;

        let recent = &history[history.len().saturating_sub(5)..];
        let pattern_factor = (player_count(recent) as f64 - 2.5) / 2.5;

        let interaction_factor = if self.key_presses.is_empty() {
            0.0
        } else {
            let vowels = self
                .key_presses
                .iter()
                .filter(|k| matches!(k.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
                .count() as f64;
            let total = self.key_presses.len() as f64;
            (vowels - (total - vowels)) / total.max(1.0) * 0.5
        };

        let mut signal = environmental * 0.7 + pattern_factor * 0.2 + interaction_factor * 0.1;
        let noise = (1.0 - self.level.value() / 100.0) * self.rng.gen_range(-0.3..0.3);
        signal += noise;

        match self.phase {
            Phase::Attuned | Phase::Transcendent => {
                if signal > 0.1 {
                    Some(Outcome::Player)
                } else if signal < -0.1 {
                    Some(Outcome::Banker)
                } else {
                    Some(last.opposite())
                }
            }
            Phase::Awakening => {
                if signal.abs() > 0.3 {
                    Some(if signal > 0.0 { Outcome::Player } else { Outcome::Banker })
                } else {
                    None
                }
            }
            Phase::Dormant => None,
        }
    }

    fn generate_message(&mut self) -> String {
        let pool = match self.phase {
            Phase::Dormant => FUSION_DORMANT,
            Phase::Awakening => FUSION_AWAKENING,
            Phase::Attuned => FUSION_ATTUNED,
            Phase::Transcendent => FUSION_TRANSCENDENT,
        };
        let mut template = pool.choose(&mut self.rng).copied().unwrap_or_default().to_string();

        if self.rng.gen::<f64>() < self.level.value() / 200.0 {
            if let Some(prompt) = RITUAL_PROMPTS.choose(&mut self.rng) {
                template.push(' ');
                template.push_str(prompt);
            }
        }

        let env = &self.environment;
        render(&template, &[
            ("color", env.dominant_color.describe().to_string()),
            ("time_of_day", env.time_of_day.describe().to_string()),
            ("cosmic", cosmic_description(env.cosmic_alignment).to_string()),
            ("rgb", env.dominant_color.hex()),
        ])
    }

    /// First code present anywhere in the last `CODE_WINDOW` keys. A code keeps
    /// firing on every key until it scrolls out of the window.
    fn completed_code(&self) -> Option<&'static str> {
        let start = self.key_presses.len().saturating_sub(CODE_WINDOW);
        let recent: String = self
            .key_presses
            .iter()
            .skip(start)
            .map(|c| c.to_ascii_lowercase())
            .collect();
        COSMIC_CODES
            .iter()
            .find(|(code, _)| recent.contains(code))
            .map(|(_, message)| *message)
    }
}

impl Predictor for FusionModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn analyze(&mut self, history: &[Outcome]) -> PredictionResult {
        if history.len() < self.activation_threshold {
            self.confidence = 0;
            return PredictionResult::none(format!(
                "Gathering data for reality fusion ({}/{})",
                history.len(),
                self.activation_threshold
            ));
        }

        self.update_level(history);
        self.simulate_environment();
        let prediction = self.generate_prediction(history);
        let message = self.generate_message();

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
        self.phase = Phase::Dormant;
        self.environment = Environment::default();
        self.key_presses.clear();
        self.confidence = 0;
    }

    fn record_keystrokes(&mut self, text: &str) -> Option<String> {
        let mut event = None;
        for key in text.chars().filter(|c| !c.is_control()) {
            if self.key_presses.len() == MAX_KEY_PRESSES {
                self.key_presses.pop_front();
            }
            self.key_presses.push_back(key);
            self.level.raise(0.5);

            if self.key_presses.len() >= 4 {
                if let Some(message) = self.completed_code() {
                    info!("Cosmic code recognised: {}", message);
                    self.level.raise(15.0);
                    event = Some(message.to_string());
                }
            }
        }
        self.phase = Phase::from_level(self.level.value());
        event
    }

    fn level(&self) -> Option<u8> {
        Some(self.level.as_percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FixedClock;
    use chrono::{Local, TimeZone};
    use rand::rngs::mock::StepRng;

    fn model_at_noon() -> FusionModel {
        let clock = FixedClock(Local.with_ymd_and_hms(2024, 3, 14, 12, 0, 0).unwrap());
        FusionModel::new(Box::new(StepRng::new(0, 0)), Box::new(clock))
    }

    fn seq(s: &str) -> Vec<Outcome> {
        Outcome::parse_sequence(s).unwrap()
    }

    #[test]
    fn test_waits_for_activation() {
        let mut model = model_at_noon();
        let result = model.analyze(&seq("PBPBPBPBP"));
        assert_eq!(result.prediction, None);
        assert_eq!(result.status, "Gathering data for reality fusion (9/10)");
    }

    #[test]
    fn test_dormant_phase_withholds_prediction() {
        let mut model = model_at_noon();
        let result = model.analyze(&seq("PBPBPBPBPB"));
        assert_eq!(model.phase, Phase::Dormant);
        assert_eq!(result.prediction, None);
        assert_eq!(result.confidence, 50);
        assert_eq!(model.environment.time_of_day, TimeOfDay::Day);
        assert!(model.environment.dominant_color.b >= 100);
    }

    #[test]
    fn test_cosmic_code_boosts_level() {
        let mut model = model_at_noon();
        assert!(model.record_keystrokes("hjk").is_none());
        let event = model.record_keystrokes("l");
        assert!(event.is_some());
        assert_eq!(model.level(), Some(17));
    }

    #[test]
    fn test_cosmic_code_refires_while_in_window() {
        let mut model = model_at_noon();
        model.record_keystrokes("hjkl");
        assert!(model.record_keystrokes("x").is_some());
        assert_eq!(model.level(), Some(32));

        // one more key pushes "hjkl" out of the last ten
        let mut model = model_at_noon();
        model.key_presses.extend("hjklxxxxxx".chars());
        assert!(model.record_keystrokes("yy").is_none());
        assert_eq!(model.level(), Some(1));
    }

    #[test]
    fn test_key_buffer_is_bounded() {
        let mut model = model_at_noon();
        model.record_keystrokes("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(model.key_presses.len(), MAX_KEY_PRESSES);
        assert_eq!(model.key_presses.front(), Some(&'g'));
    }

    #[test]
    fn test_attuned_phase_predicts() {
        let mut model = model_at_noon();
        model.key_presses.extend("hjklcosmosmatrix".chars());
        model.level.raise(53.0);

        let result = model.analyze(&seq("PBPBPBPBBBBB"));
        assert_eq!(model.phase, Phase::Attuned);
        assert_eq!(result.prediction, Some(Outcome::Banker));
        assert_eq!(result.confidence, 76);
        assert_eq!(model.environment.user_activity_level, 80);
    }

    #[test]
    fn test_reset_restores_environment() {
        let mut model = model_at_noon();
        model.record_keystrokes("fusion");
        model.analyze(&seq("PBPBPBPBPBPB"));
        model.reset();
        assert_eq!(model.level(), Some(0));
        assert_eq!(model.environment, Environment::default());
        assert!(model.key_presses.is_empty());
    }

    #[test]
    fn test_color_descriptions() {
        assert_eq!(Rgb { r: 200, g: 10, b: 10 }.describe(), "reddish");
        assert_eq!(Rgb { r: 210, g: 210, b: 10 }.describe(), "yellowish");
        assert_eq!(Rgb { r: 0, g: 0, b: 0 }.describe(), "neutral");
        assert_eq!(Rgb { r: 0, g: 0, b: 100 }.hex(), "#000064");
    }
}
