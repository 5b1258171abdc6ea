//! Narrative models.
//!
//! Both variants carry a level in `0..=100` that only grows. The level picks a
//! flavour-text pool, scales how much randomness goes into the prediction and
//! sets the confidence as `min(50 + level / 2, 95)`. Their text is theatre, the
//! predictions still take part in aggregation.

pub mod awakening;
pub mod fusion;
mod messages;

pub use awakening::AwakeningModel;
pub use fusion::FusionModel;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::history::run_lengths;
use crate::types::Outcome;

/// Level bands shared by both narrative variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    Dormant,
    Awakening,
    Attuned,
    Transcendent,
}

impl Phase {
    pub fn from_level(level: f64) -> Self {
        if level < 25.0 {
            Phase::Dormant
        } else if level < 50.0 {
            Phase::Awakening
        } else if level < 75.0 {
            Phase::Attuned
        } else {
            Phase::Transcendent
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Dormant => "dormant",
            Phase::Awakening => "awakening",
            Phase::Attuned => "attuned",
            Phase::Transcendent => "transcendent",
        }
    }
}

/// Saturating, monotonically growing level plus the time of the last update.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Level {
    value: f64,
    last_update: DateTime<Local>,
}

impl Level {
    pub(crate) fn new(now: DateTime<Local>) -> Self {
        Self { value: 0.0, last_update: now }
    }

    pub(crate) fn value(&self) -> f64 {
        self.value
    }

    pub(crate) fn as_percent(&self) -> u8 {
        self.value.floor().clamp(0.0, 100.0) as u8
    }

    pub(crate) fn raise(&mut self, amount: f64) {
        if amount > 0.0 {
            self.value = (self.value + amount).min(100.0);
        }
    }

    /// Fraction of an hour since the previous update, capped at 1. Moves the mark to `now`.
    pub(crate) fn hours_since_update(&mut self, now: DateTime<Local>) -> f64 {
        let elapsed_ms = (now - self.last_update).num_milliseconds().max(0) as f64;
        self.last_update = now;
        (elapsed_ms / 1000.0 / 3600.0).min(1.0)
    }

    pub(crate) fn confidence(&self) -> u8 {
        (50 + self.as_percent() / 2).min(95)
    }

    pub(crate) fn reset(&mut self, now: DateTime<Local>) {
        self.value = 0.0;
        self.last_update = now;
    }
}

/// History length contribution, saturating at 100 hands.
pub(crate) fn games_factor(len: usize) -> f64 {
    (len as f64 / 100.0).min(1.0)
}

/// Blend of run-length variance and alternation rate, normalised to `[0, 1]`.
pub fn pattern_complexity(window: &[Outcome]) -> f64 {
    if window.len() < 2 {
        return 0.0;
    }

    let alternations = window.windows(2).filter(|w| w[0] != w[1]).count();
    let alternation_rate = alternations as f64 / (window.len() - 1) as f64;

    let runs = run_lengths(window);
    let mean = runs.iter().sum::<usize>() as f64 / runs.len() as f64;
    let variance = runs
        .iter()
        .map(|&r| {
            let diff = r as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / runs.len() as f64;

    ((variance * 0.7 + alternation_rate * 0.3) / 5.0).min(1.0)
}

/// Replace every `{key}` placeholder present in the template.
pub(crate) fn render(template: &str, replacements: &[(&str, String)]) -> String {
    let mut message = template.to_string();
    for (key, value) in replacements {
        let placeholder = format!("{{{}}}", key);
        if message.contains(&placeholder) {
            message = message.replace(&placeholder, value);
        }
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn seq(s: &str) -> Vec<Outcome> {
        Outcome::parse_sequence(s).unwrap()
    }

    #[test]
    fn test_phase_bands() {
        assert_eq!(Phase::from_level(0.0), Phase::Dormant);
        assert_eq!(Phase::from_level(24.9), Phase::Dormant);
        assert_eq!(Phase::from_level(25.0), Phase::Awakening);
        assert_eq!(Phase::from_level(74.0), Phase::Attuned);
        assert_eq!(Phase::from_level(100.0), Phase::Transcendent);
    }

    #[test]
    fn test_complexity_of_pure_alternation() {
        // every run has length 1: zero variance, full alternation
        let c = pattern_complexity(&seq("PBPBPBPBPB"));
        assert!((c - 0.06).abs() < 1e-9);
    }

    #[test]
    fn test_complexity_bounds() {
        assert_eq!(pattern_complexity(&seq("P")), 0.0);
        let c = pattern_complexity(&seq("PPPPPPPPPPPPPPPPPPPB"));
        assert!(c > 0.0 && c <= 1.0);
    }

    #[test]
    fn test_level_saturates_and_scales_confidence() {
        let now = Local.with_ymd_and_hms(2024, 3, 14, 21, 30, 0).unwrap();
        let mut level = Level::new(now);
        assert_eq!(level.confidence(), 50);
        level.raise(61.0);
        assert_eq!(level.confidence(), 80);
        level.raise(500.0);
        assert_eq!(level.as_percent(), 100);
        assert_eq!(level.confidence(), 95);
        level.raise(-10.0);
        assert_eq!(level.as_percent(), 100);
    }

    #[test]
    fn test_hours_since_update_caps() {
        let now = Local.with_ymd_and_hms(2024, 3, 14, 21, 30, 0).unwrap();
        let mut level = Level::new(now);
        assert!((level.hours_since_update(now + Duration::minutes(30)) - 0.5).abs() < 1e-9);
        assert_eq!(level.hours_since_update(now + Duration::hours(5)), 1.0);
    }

    #[test]
    fn test_render_placeholders() {
        let text = render("{name} saw {count} hands, {missing}", &[
            ("name", "Guest101".to_string()),
            ("count", "7".to_string()),
        ]);
        assert_eq!(text, "Guest101 saw 7 hands, {missing}");
    }
}
