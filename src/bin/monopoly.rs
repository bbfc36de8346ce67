//! Monopoly Strategy Simulation Binary
//!
//! Plays a batch of games between the four purchasing behaviors and reports
//! how often each one wins.
//!
//! ## Usage
//! ```bash
//! cargo run --bin monopoly --release -- --simulations 10000 --seed 42
//! RUST_LOG=debug cargo run --bin monopoly -- --simulations 5
//! ```

use anyhow::{Context, Result};
use clap::Parser;

use monopoly_simulation::board::BoardConfig;
use monopoly_simulation::runner::{default_runner, SimulationConfig};

/// Compare Monopoly purchasing strategies over many simulated games.
#[derive(Parser)]
#[command(name = "monopoly")]
#[command(about = "Simulate Monopoly games and compare purchasing strategies")]
struct Cli {
    /// Number of games to play.
    #[arg(short, long, default_value = "300")]
    simulations: usize,

    /// Turn cap per game before the richest player is declared winner.
    #[arg(long, default_value = "1000")]
    max_turns: usize,

    /// Balance every player starts with.
    #[arg(long, default_value = "300")]
    starting_balance: i64,

    /// Number of properties on the board.
    #[arg(long, default_value = "20")]
    properties: usize,

    /// Upper bound for a property's sell cost.
    #[arg(long, default_value = "300")]
    max_sell_cost: i64,

    /// Upper bound for a property's rent.
    #[arg(long, default_value = "80")]
    max_rent_cost: i64,

    /// Random seed for reproducibility.
    #[arg(long)]
    seed: Option<u64>,

    /// Shuffle seating order before every game.
    #[arg(long)]
    shuffle: bool,

    /// Log per-game results (repeat for per-turn detail).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = SimulationConfig {
        num_simulations: cli.simulations,
        max_num_turns: cli.max_turns,
        starting_balance: cli.starting_balance,
        board: BoardConfig {
            num_properties: cli.properties,
            max_sell_cost: cli.max_sell_cost,
            max_rent_cost: cli.max_rent_cost,
        },
        seed: cli.seed,
        shuffle_turn_order: cli.shuffle,
    };

    println!("=======================================================");
    println!("  Monopoly Strategy Simulation");
    println!("  Impulsive vs Demanding vs Random vs Cautious");
    println!("=======================================================");
    println!();
    println!("Parameters:");
    println!(
        "  Games: {}, Max turns: {}, Starting balance: {}",
        config.num_simulations, config.max_num_turns, config.starting_balance
    );
    println!(
        "  Properties: {}, Max sell cost: {}, Max rent: {}",
        config.board.num_properties, config.board.max_sell_cost, config.board.max_rent_cost
    );
    if let Some(seed) = config.seed {
        println!("  Seed: {}", seed);
    }
    println!();

    let mut runner = default_runner(config).context("invalid simulation parameters")?;
    runner.run().context("simulation failed")?;

    match runner.report() {
        Some(report) => report.print(),
        None => println!("  No games played."),
    }

    Ok(())
}
