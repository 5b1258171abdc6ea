use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::types::Outcome;

/// Banker wins pay 0.95:1 after the 5% commission.
const BANKER_PAYOUT: Decimal = dec!(0.95);

/// Read-only view of the tracker for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MartingaleStatus {
    pub cash: Decimal,
    pub next_bet: Decimal,
    pub current_step: u32,
    pub max_steps: u32,
    pub prediction: Option<Outcome>,
    pub last_result: Option<Outcome>,
    /// Cash relative to the starting bankroll
    pub profit: Decimal,
    pub rounds: u32,
    pub wins: u32,
    pub losses: u32,
}

/// Martingale staking state machine.
///
/// The stake doubles after every losing bet until `max_steps` is reached; the
/// next loss (or any win) drops it back to the initial bet. Cash has no floor
/// and can go negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MartingaleTracker {
    initial_cash: Decimal,
    initial_bet: Decimal,
    max_steps: u32,
    cash: Decimal,
    next_bet: Decimal,
    current_step: u32,
    prediction: Option<Outcome>,
    last_result: Option<Outcome>,
    rounds: u32,
    wins: u32,
    losses: u32,
}

impl MartingaleTracker {
    pub fn new(initial_cash: Decimal, initial_bet: Decimal, max_steps: u32) -> Self {
        let max_steps = max_steps.max(1);
        Self {
            initial_cash,
            initial_bet,
            max_steps,
            cash: initial_cash,
            next_bet: initial_bet,
            current_step: 1,
            prediction: None,
            last_result: None,
            rounds: 0,
            wins: 0,
            losses: 0,
        }
    }

    /// Restore the constructed state.
    pub fn reset(&mut self) {
        *self = Self::new(self.initial_cash, self.initial_bet, self.max_steps);
        info!("Martingale reset: cash={}, bet={}", self.cash, self.next_bet);
    }

    /// Stake on the given side for the next hand. Cash moves only on settlement.
    pub fn place_bet(&mut self, prediction: Outcome) {
        debug!("Bet placed: {} for {}", prediction, self.next_bet);
        self.prediction = Some(prediction);
    }

    /// Symbolic variant; anything other than P/B is ignored.
    pub fn place_bet_symbol(&mut self, symbol: &str) {
        match symbol.parse::<Outcome>() {
            Ok(prediction) => self.place_bet(prediction),
            Err(e) => debug!("Bet ignored: {}", e),
        }
    }

    /// Settle the pending bet against the hand that was dealt. Returns true on a win.
    pub fn process_result(&mut self, result: Outcome) -> bool {
        self.last_result = Some(result);

        let Some(prediction) = self.prediction.take() else {
            return false;
        };

        self.rounds += 1;
        let won = result == prediction;
        if won {
            let payout = match prediction {
                Outcome::Player => self.next_bet,
                Outcome::Banker => (self.next_bet * BANKER_PAYOUT).floor(),
            };
            self.cash += payout;
            self.wins += 1;
            info!(
                "WIN on {} at step {}: +{} (cash {})",
                prediction, self.current_step, payout, self.cash
            );
            self.current_step = 1;
            self.next_bet = self.initial_bet;
        } else {
            self.cash -= self.next_bet;
            self.losses += 1;
            info!(
                "LOSS on {} at step {}: -{} (cash {})",
                prediction, self.current_step, self.next_bet, self.cash
            );
            if self.cash.is_sign_negative() && !self.cash.is_zero() {
                warn!("Bankroll below zero: {}", self.cash);
            }

            if self.current_step < self.max_steps {
                self.current_step += 1;
                self.next_bet *= Decimal::from(2);
            } else {
                debug!("Max step {} reached, ladder restarts", self.max_steps);
                self.current_step = 1;
                self.next_bet = self.initial_bet;
            }
        }

        won
    }

    pub fn status(&self) -> MartingaleStatus {
        MartingaleStatus {
            cash: self.cash,
            next_bet: self.next_bet,
            current_step: self.current_step,
            max_steps: self.max_steps,
            prediction: self.prediction,
            last_result: self.last_result,
            profit: self.cash - self.initial_cash,
            rounds: self.rounds,
            wins: self.wins,
            losses: self.losses,
        }
    }

    pub fn pending_prediction(&self) -> Option<Outcome> {
        self.prediction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(cash: i64, bet: i64, steps: u32) -> MartingaleTracker {
        MartingaleTracker::new(Decimal::from(cash), Decimal::from(bet), steps)
    }

    #[test]
    fn test_initial_state() {
        let t = tracker(100, 2, 3);
        let status = t.status();
        assert_eq!(status.cash, dec!(100));
        assert_eq!(status.next_bet, dec!(2));
        assert_eq!(status.current_step, 1);
        assert_eq!(status.max_steps, 3);
        assert_eq!(status.prediction, None);
    }

    #[test]
    fn test_loss_ladder_resets_at_max_step() {
        let mut t = tracker(100, 2, 3);

        t.place_bet(Outcome::Player);
        assert!(!t.process_result(Outcome::Banker));
        assert_eq!((t.status().cash, t.status().next_bet, t.status().current_step), (dec!(98), dec!(4), 2));

        t.place_bet(Outcome::Player);
        assert!(!t.process_result(Outcome::Banker));
        assert_eq!((t.status().cash, t.status().next_bet, t.status().current_step), (dec!(94), dec!(8), 3));

        t.place_bet(Outcome::Player);
        assert!(!t.process_result(Outcome::Banker));
        assert_eq!((t.status().cash, t.status().next_bet, t.status().current_step), (dec!(86), dec!(2), 1));
        assert_eq!(t.status().losses, 3);
    }

    #[test]
    fn test_banker_win_pays_commission() {
        let mut t = tracker(100, 10, 3);
        t.place_bet(Outcome::Banker);
        assert!(t.process_result(Outcome::Banker));
        let status = t.status();
        assert_eq!(status.cash, dec!(109));
        assert_eq!(status.current_step, 1);
        assert_eq!(status.next_bet, dec!(10));
        assert_eq!(status.prediction, None);
    }

    #[test]
    fn test_player_win_after_losses_restarts_ladder() {
        let mut t = tracker(100, 2, 8);
        t.place_bet(Outcome::Player);
        t.process_result(Outcome::Banker);
        t.place_bet(Outcome::Player);
        t.process_result(Outcome::Banker);
        assert_eq!(t.status().next_bet, dec!(8));

        t.place_bet(Outcome::Player);
        assert!(t.process_result(Outcome::Player));
        let status = t.status();
        assert_eq!(status.cash, dec!(102));
        assert_eq!(status.next_bet, dec!(2));
        assert_eq!(status.current_step, 1);
        assert_eq!(status.profit, dec!(2));
    }

    #[test]
    fn test_no_pending_bet_is_not_a_win() {
        let mut t = tracker(100, 2, 3);
        let before = t.status();
        assert!(!t.process_result(Outcome::Player));
        let after = t.status();
        assert_eq!(after.last_result, Some(Outcome::Player));
        assert_eq!(MartingaleStatus { last_result: None, ..after }, before);
    }

    #[test]
    fn test_invalid_symbol_is_ignored() {
        let mut t = tracker(100, 2, 3);
        t.place_bet_symbol("tie");
        assert_eq!(t.pending_prediction(), None);
        t.place_bet_symbol("b");
        assert_eq!(t.pending_prediction(), Some(Outcome::Banker));
        assert_eq!(t.status().cash, dec!(100));
    }

    #[test]
    fn test_cash_can_go_negative() {
        let mut t = tracker(3, 2, 4);
        t.place_bet(Outcome::Banker);
        t.process_result(Outcome::Player);
        t.place_bet(Outcome::Banker);
        t.process_result(Outcome::Player);
        assert_eq!(t.status().cash, dec!(-3));
        assert_eq!(t.status().profit, dec!(-6));
        assert_eq!(t.status().next_bet, dec!(8));
    }

    #[test]
    fn test_status_is_idempotent() {
        let mut t = tracker(100, 2, 3);
        t.place_bet(Outcome::Player);
        assert_eq!(t.status(), t.status());
    }

    #[test]
    fn test_reset_matches_fresh_tracker() {
        let mut t = tracker(100, 2, 3);
        t.place_bet(Outcome::Player);
        t.process_result(Outcome::Banker);
        t.place_bet(Outcome::Banker);
        t.reset();
        assert_eq!(t, tracker(100, 2, 3));
    }
}
