mod types;
mod error;
mod history;
mod models;
mod engine;
mod risk;
mod config;

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::{load_config, to_toml, AppConfig};
use crate::engine::{GameSession, RoundReport, SessionSnapshot};
use crate::history::HistoryStore;
use crate::types::{rng_from_seed, Outcome, SystemClock};

#[derive(Parser)]
#[command(name = "baccarat-oracle")]
#[command(version = "0.1.0")]
#[command(about = "Baccarat pattern predictor with a Martingale bankroll simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "baccarat.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Seed for simulated hands and narrative models (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Print reports as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive table: enter hands one at a time
    Play,
    /// Feed a recorded shoe through the session
    Replay {
        /// Hands as a P/B string, e.g. "PBBPB"
        #[arg(short, long)]
        sequence: String,
    },
    /// Simulate hands and bet on every prediction
    Simulate {
        /// Number of hands to deal
        #[arg(short, long, default_value = "100")]
        rounds: usize,
    },
    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Baccarat Oracle v0.1.0");

    let mut config = load_config(&cli.config)?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    match cli.command {
        Commands::Play => run_interactive(config, cli.json)?,
        Commands::Replay { sequence } => run_replay(config, &sequence, cli.json)?,
        Commands::Simulate { rounds } => run_simulation(config, rounds, cli.json)?,
        Commands::Config => print!("{}", to_toml(&config)?),
    }

    Ok(())
}

fn new_session(config: AppConfig) -> Result<GameSession> {
    let rng = rng_from_seed(config.seed);
    Ok(GameSession::new(config, rng, SystemClock)?)
}

fn run_interactive(config: AppConfig, json: bool) -> Result<()> {
    let mut session = new_session(config)?;
    println!("Enter hands: p/b | s [n] simulate | bet <p/b> | k <text> keys | r <text> reply | status | reset | q");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command.to_lowercase().as_str() {
            "" => continue,
            "q" | "quit" | "exit" => break,
            "status" => print_snapshot(&session.snapshot(), json)?,
            "reset" => {
                session.reset();
                println!("Session reset.");
            }
            "s" | "sim" => {
                let len = match rest {
                    "" => session.simulate_batch(),
                    n => match n.parse::<usize>() {
                        Ok(n) => session.simulate(n),
                        Err(_) => {
                            warn!("Not a hand count: '{}'", n);
                            continue;
                        }
                    },
                };
                println!("History now holds {} hands.", len);
                print_snapshot(&session.snapshot(), json)?;
            }
            "bet" => match session.bet_symbol(rest) {
                Some(prediction) => println!("Bet on {}.", prediction.label()),
                None => println!("No bet open."),
            },
            "k" => {
                for event in session.keystrokes(rest) {
                    println!("* {}", event);
                }
            }
            "r" => {
                session.respond(rest);
                println!("The oracle listens.");
            }
            symbol => match session.record_symbol(symbol) {
                Ok(report) => print_round(&report, json)?,
                Err(e) => warn!("{}", e),
            },
        }
    }

    let snapshot = session.snapshot();
    info!(
        "Session closed after {} hands, cash {}",
        snapshot.history.len(),
        snapshot.bankroll.cash
    );
    Ok(())
}

fn run_replay(config: AppConfig, sequence: &str, json: bool) -> Result<()> {
    let outcomes = Outcome::parse_sequence(sequence)?;
    let mut session = new_session(config)?;
    info!("Replaying {} hands", outcomes.len());

    for outcome in outcomes {
        let report = session.record(outcome);
        if !json {
            print_round(&report, false)?;
        }
    }

    print_snapshot(&session.snapshot(), json)
}

fn run_simulation(config: AppConfig, rounds: usize, json: bool) -> Result<()> {
    let mut session = new_session(config)?;
    let mut scratch = rng_from_seed(session.config().seed.map(|s| s.wrapping_add(1)));
    let probability = session.config().simulation.player_probability;
    info!("Simulating {} hands (P={:.4})", rounds, probability);

    let mut dealt = HistoryStore::new();
    dealt.simulate(rounds, probability, &mut scratch);
    for &outcome in dealt.as_slice() {
        session.record(outcome);
    }

    let snapshot = session.snapshot();
    info!(
        "Simulation finished: {} bets, {} won, {} lost, cash {}",
        snapshot.bankroll.rounds,
        snapshot.bankroll.wins,
        snapshot.bankroll.losses,
        snapshot.bankroll.cash
    );
    print_snapshot(&snapshot, json)
}

fn print_round(report: &RoundReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(report)?);
        return Ok(());
    }

    let mut line = format!("#{:<4} {}", report.history_len, report.outcome.label());
    if let Some(bet) = report.settled {
        let verdict = if bet.won { "WON" } else { "LOST" };
        line.push_str(&format!(" | bet {} {}", bet.prediction, verdict));
    }
    match report.prediction {
        Some(prediction) => line.push_str(&format!(
            " | next: {} ({}%)",
            prediction.label(),
            report.confidence
        )),
        None => line.push_str(" | next: waiting"),
    }
    println!("{}", line);
    Ok(())
}

fn print_snapshot(snapshot: &SessionSnapshot, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(snapshot)?);
        return Ok(());
    }

    println!("\n=== Table ===");
    let grid: Vec<String> = snapshot
        .grid
        .chunks(5)
        .map(|row| row.iter().map(|o| o.symbol()).collect())
        .collect();
    println!("Recent: {}", if grid.is_empty() { "-".to_string() } else { grid.join(" ") });

    let stats = &snapshot.stats;
    println!(
        "Hands: {} | Player {} ({}%) | Banker {} ({}%)",
        stats.total,
        stats.player_count,
        stats.player_percentage,
        stats.banker_count,
        stats.banker_percentage
    );
    println!(
        "Longest streaks: P {} / B {}",
        stats.longest_player_streak, stats.longest_banker_streak
    );
    if let Some(kind) = stats.current_streak.kind {
        println!("Current streak: {} x{}", kind.label(), stats.current_streak.count);
    }
    if let Some(dominant) = stats.dominant() {
        println!("Dominant side: {}", dominant.label());
    }

    println!("\n=== Models ===");
    for report in &snapshot.models {
        let prediction = report.prediction.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "{:<12} {:>2} {:>4}%  {}",
            report.name, prediction, report.confidence, report.status
        );
    }
    for level in &snapshot.levels {
        println!("{:<12} level {}%", level.name, level.level);
    }
    if snapshot.metamorphosis {
        println!("Metamorphosis: the pattern has shifted.");
    }
    match snapshot.prediction {
        Some(prediction) => println!(
            "Prediction: {} ({}%)",
            prediction.label(),
            snapshot.confidence
        ),
        None => println!("Prediction: none"),
    }

    let bankroll = &snapshot.bankroll;
    println!("\n=== Bankroll ===");
    println!(
        "Cash: {} | Next bet: {} | Step {}/{}",
        bankroll.cash, bankroll.next_bet, bankroll.current_step, bankroll.max_steps
    );
    println!(
        "Bets: {} | Won: {} | Lost: {} | Profit: {}",
        bankroll.rounds, bankroll.wins, bankroll.losses, bankroll.profit
    );
    if let Some(last) = bankroll.last_result {
        println!("Last hand: {}", last.label());
    }
    println!();
    Ok(())
}
