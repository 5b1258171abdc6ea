use rand::Rng;
use tracing::debug;

use crate::types::Outcome;
use super::HistoryStats;

/// Player share used by `simulate`. Banker wins 50.68% once ties are folded in.
pub const SIMULATED_PLAYER_PROBABILITY: f64 = 0.4932;

/// Append-only record of hands, cleared only by `reset`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryStore {
    outcomes: Vec<Outcome>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one hand and return the new length.
    pub fn append(&mut self, outcome: Outcome) -> usize {
        self.outcomes.push(outcome);
        self.outcomes.len()
    }

    /// Read-only view handed to the prediction models.
    pub fn as_slice(&self) -> &[Outcome] {
        &self.outcomes
    }

    /// Owned copy of the full sequence.
    pub fn snapshot(&self) -> Vec<Outcome> {
        self.outcomes.clone()
    }

    pub fn tail(&self, n: usize) -> &[Outcome] {
        let len = self.outcomes.len();
        if n >= len {
            &self.outcomes[..]
        } else {
            &self.outcomes[len - n..]
        }
    }

    pub fn statistics(&self) -> HistoryStats {
        HistoryStats::compute(&self.outcomes)
    }

    pub fn reset(&mut self) {
        self.outcomes.clear();
    }

    /// Append `count` independently drawn hands, each Player with
    /// `player_probability` (house-edge default: `SIMULATED_PLAYER_PROBABILITY`).
    pub fn simulate<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        player_probability: f64,
        rng: &mut R,
    ) -> usize {
        self.outcomes.reserve(count);
        for _ in 0..count {
            let outcome = if rng.gen::<f64>() < player_probability {
                Outcome::Player
            } else {
                Outcome::Banker
            };
            self.outcomes.push(outcome);
        }
        debug!("Simulated {} hands, history length {}", count, self.outcomes.len());
        self.outcomes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_append_returns_length() {
        let mut store = HistoryStore::new();
        assert_eq!(store.append(Outcome::Player), 1);
        assert_eq!(store.append(Outcome::Banker), 2);
        assert_eq!(store.tail(1), &[Outcome::Banker]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut store = HistoryStore::new();
        store.append(Outcome::Player);
        let mut snap = store.snapshot();
        snap.push(Outcome::Banker);
        snap[0] = Outcome::Banker;
        assert_eq!(store.snapshot(), vec![Outcome::Player]);
        assert_eq!(store.snapshot(), store.snapshot());
    }

    #[test]
    fn test_tail() {
        let mut store = HistoryStore::new();
        for o in Outcome::parse_sequence("PPBPB").unwrap() {
            store.append(o);
        }
        assert_eq!(store.tail(2), &[Outcome::Player, Outcome::Banker]);
        assert_eq!(store.tail(25).len(), 5);
        assert!(HistoryStore::new().tail(3).is_empty());
    }

    #[test]
    fn test_reset_matches_fresh_store() {
        let mut store = HistoryStore::new();
        store.append(Outcome::Banker);
        store.reset();
        assert_eq!(store, HistoryStore::new());
    }

    #[test]
    fn test_simulate_draws() {
        let mut store = HistoryStore::new();
        // StepRng(0, 0) yields 0.0 for every f64 draw: always below the Player threshold
        let mut low = StepRng::new(0, 0);
        assert_eq!(store.simulate(3, SIMULATED_PLAYER_PROBABILITY, &mut low), 3);
        assert!(store.as_slice().iter().all(|o| *o == Outcome::Player));

        let mut high = StepRng::new(u64::MAX, 0);
        store.simulate(2, SIMULATED_PLAYER_PROBABILITY, &mut high);
        assert_eq!(store.tail(2), &[Outcome::Banker, Outcome::Banker]);
    }

    #[test]
    fn test_simulate_bias_is_roughly_even() {
        let mut store = HistoryStore::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        store.simulate(2000, SIMULATED_PLAYER_PROBABILITY, &mut rng);
        let stats = store.statistics();
        assert_eq!(stats.total, 2000);
        assert!(stats.player_count > 850 && stats.player_count < 1150);
    }
}
