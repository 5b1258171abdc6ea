use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakInfo {
    pub kind: Option<Outcome>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryStats {
    pub total: usize,
    pub player_count: usize,
    pub banker_count: usize,
    pub player_percentage: Decimal,
    pub banker_percentage: Decimal,
    pub longest_player_streak: usize,
    pub longest_banker_streak: usize,
    pub current_streak: StreakInfo,
}

impl HistoryStats {
    /// Single pass over the sequence: counts, closed-run maxima and the open run.
    pub fn compute(history: &[Outcome]) -> Self {
        let Some(&first) = history.first() else {
            return Self::default();
        };

        let mut stats = Self {
            total: history.len(),
            ..Self::default()
        };
        let mut run_kind = first;
        let mut run_len = 0usize;

        for &outcome in history {
            match outcome {
                Outcome::Player => stats.player_count += 1,
                Outcome::Banker => stats.banker_count += 1,
            }

            if outcome == run_kind {
                run_len += 1;
            } else {
                stats.close_run(run_kind, run_len);
                run_kind = outcome;
                run_len = 1;
            }
        }
        stats.close_run(run_kind, run_len);
        stats.current_streak = StreakInfo {
            kind: Some(run_kind),
            count: run_len,
        };

        stats.player_percentage = percentage(stats.player_count, stats.total);
        stats.banker_percentage = percentage(stats.banker_count, stats.total);
        stats
    }

    fn close_run(&mut self, kind: Outcome, len: usize) {
        match kind {
            Outcome::Player => self.longest_player_streak = self.longest_player_streak.max(len),
            Outcome::Banker => self.longest_banker_streak = self.longest_banker_streak.max(len),
        }
    }

    pub fn dominant(&self) -> Option<Outcome> {
        match self.player_count.cmp(&self.banker_count) {
            std::cmp::Ordering::Greater => Some(Outcome::Player),
            std::cmp::Ordering::Less => Some(Outcome::Banker),
            std::cmp::Ordering::Equal => None,
        }
    }
}

fn percentage(count: usize, total: usize) -> Decimal {
    if total == 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(count as u64) * Decimal::from(100) / Decimal::from(total as u64)).round_dp(1)
}

/// Lengths of the maximal runs of identical outcomes, in order.
pub fn run_lengths(window: &[Outcome]) -> Vec<usize> {
    let mut runs = Vec::new();
    let mut iter = window.iter();
    let Some(mut prev) = iter.next() else {
        return runs;
    };
    let mut current = 1usize;
    for outcome in iter {
        if outcome == prev {
            current += 1;
        } else {
            runs.push(current);
            current = 1;
        }
        prev = outcome;
    }
    runs.push(current);
    runs
}

/// Count of Player entries in the slice.
pub fn player_count(window: &[Outcome]) -> usize {
    window.iter().filter(|o| **o == Outcome::Player).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn seq(s: &str) -> Vec<Outcome> {
        Outcome::parse_sequence(s).unwrap()
    }

    #[test]
    fn test_streaks() {
        let stats = HistoryStats::compute(&seq("PPBPPP"));
        assert_eq!(stats.total, 6);
        assert_eq!(stats.player_count, 5);
        assert_eq!(stats.banker_count, 1);
        assert_eq!(stats.longest_player_streak, 3);
        assert_eq!(stats.longest_banker_streak, 1);
        assert_eq!(
            stats.current_streak,
            StreakInfo { kind: Some(Outcome::Player), count: 3 }
        );
    }

    #[test]
    fn test_percentages_rounded() {
        let stats = HistoryStats::compute(&seq("PBB"));
        assert_eq!(stats.player_percentage, dec!(33.3));
        assert_eq!(stats.banker_percentage, dec!(66.7));
        assert_eq!(stats.dominant(), Some(Outcome::Banker));
    }

    #[test]
    fn test_empty_history() {
        let stats = HistoryStats::compute(&[]);
        assert_eq!(stats, HistoryStats::default());
        assert_eq!(stats.current_streak.kind, None);
        assert_eq!(stats.player_percentage, Decimal::ZERO);
    }

    #[test]
    fn test_run_lengths() {
        assert_eq!(run_lengths(&seq("PBBPPPB")), vec![1, 2, 3, 1]);
        assert_eq!(run_lengths(&seq("B")), vec![1]);
        assert!(run_lengths(&[]).is_empty());
    }
}
