use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::error::GameError;
use crate::history::{HistoryStats, HistoryStore};
use crate::models::create_model;
use crate::risk::{MartingaleStatus, MartingaleTracker};
use crate::types::{BoxedRng, Clock, ModelReport, Outcome};
use super::{AnalysisEngine, ModelLevel};

/// Bet that was open when a hand was dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettledBet {
    pub prediction: Outcome,
    pub won: bool,
}

/// What happened when one hand was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    pub outcome: Outcome,
    pub settled: Option<SettledBet>,
    pub history_len: usize,
    pub prediction: Option<Outcome>,
    pub confidence: u8,
    pub models: Vec<ModelReport>,
}

/// Everything a front end needs to render the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub history: Vec<Outcome>,
    /// Most recent hands, at most `display.grid_size`
    pub grid: Vec<Outcome>,
    pub stats: HistoryStats,
    pub prediction: Option<Outcome>,
    pub confidence: u8,
    pub models: Vec<ModelReport>,
    pub levels: Vec<ModelLevel>,
    pub metamorphosis: bool,
    pub bankroll: MartingaleStatus,
}

/// One table: history, analysis engine and bankroll driven together.
pub struct GameSession {
    config: AppConfig,
    history: HistoryStore,
    engine: AnalysisEngine,
    bankroll: MartingaleTracker,
    rng: BoxedRng,
}

impl GameSession {
    /// Build the session from a validated configuration. Each model gets its
    /// own stream split off `rng` so a seed reproduces the whole table.
    pub fn new<C>(config: AppConfig, mut rng: BoxedRng, clock: C) -> Result<Self, GameError>
    where
        C: Clock + Clone + 'static,
    {
        let mut engine = AnalysisEngine::new();
        for name in &config.models.enabled {
            let model_rng: BoxedRng = Box::new(ChaCha8Rng::seed_from_u64(rng.next_u64()));
            let model = create_model(name, model_rng, Box::new(clock.clone()))?;
            engine.register(name, model);
        }

        let bankroll = MartingaleTracker::new(
            config.bankroll.initial_cash,
            config.bankroll.initial_bet,
            config.bankroll.max_steps,
        );

        info!(
            "Session started with models {:?}, cash {} and base bet {}",
            engine.model_names(),
            config.bankroll.initial_cash,
            config.bankroll.initial_bet
        );

        Ok(Self {
            config,
            history: HistoryStore::new(),
            engine,
            bankroll,
            rng,
        })
    }

    /// Settle the open bet against `outcome`, append it, re-analyse and stake
    /// on the new aggregate prediction.
    pub fn record(&mut self, outcome: Outcome) -> RoundReport {
        // Settle before appending: a bet is only ever judged against a hand
        // dealt after it was placed, never against the hand that produced it.
        let pending = self.bankroll.pending_prediction();
        let won = self.bankroll.process_result(outcome);
        let settled = pending.map(|prediction| SettledBet { prediction, won });

        let history_len = self.history.append(outcome);
        let models = self.analyze_and_bet();
        let (prediction, confidence) = self.engine.current_prediction();

        debug!(
            "Hand {}: {} settled={:?} next={:?} ({}%)",
            history_len, outcome, settled, prediction, confidence
        );

        RoundReport {
            outcome,
            settled,
            history_len,
            prediction,
            confidence,
            models,
        }
    }

    pub fn record_symbol(&mut self, symbol: &str) -> Result<RoundReport, GameError> {
        let outcome: Outcome = symbol.parse()?;
        Ok(self.record(outcome))
    }

    /// Append `count` simulated hands without settling bets, then re-analyse.
    pub fn simulate(&mut self, count: usize) -> usize {
        let len = self.history.simulate(
            count,
            self.config.simulation.player_probability,
            &mut self.rng,
        );
        self.analyze_and_bet();
        info!("Simulated {} hands, history length {}", count, len);
        len
    }

    /// Simulate one configured batch.
    pub fn simulate_batch(&mut self) -> usize {
        self.simulate(self.config.simulation.batch_size)
    }

    /// Clear history, models and bankroll together.
    pub fn reset(&mut self) {
        self.history.reset();
        self.engine.reset();
        self.bankroll.reset();
        info!("Session reset");
    }

    /// Forward typed text to the models; returns any event messages raised.
    pub fn keystrokes(&mut self, text: &str) -> Vec<String> {
        let events = self.engine.record_keystrokes(text);
        for event in &events {
            info!("{}", event);
        }
        events
    }

    /// Replace the open bet by hand. Unrecognised symbols leave it untouched.
    pub fn bet_symbol(&mut self, symbol: &str) -> Option<Outcome> {
        self.bankroll.place_bet_symbol(symbol);
        self.bankroll.pending_prediction()
    }

    /// Free-form reply to the narrative models.
    pub fn respond(&mut self, text: &str) {
        self.engine.record_response(text);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let (prediction, confidence) = self.engine.current_prediction();
        SessionSnapshot {
            history: self.history.snapshot(),
            grid: self.history.tail(self.config.display.grid_size).to_vec(),
            stats: self.history.statistics(),
            prediction,
            confidence,
            models: self.engine.last_results().to_vec(),
            levels: self.engine.levels(),
            metamorphosis: self.engine.metamorphosis(),
            bankroll: self.bankroll.status(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn analyze_and_bet(&mut self) -> Vec<ModelReport> {
        let reports = self.engine.analyze(self.history.as_slice());
        if let (Some(prediction), _) = self.engine.current_prediction() {
            if !reports.is_empty() {
                self.bankroll.place_bet(prediction);
            }
        }
        reports
    }
}
