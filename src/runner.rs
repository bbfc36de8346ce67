//! Repeated game simulation
//!
//! Plays many independent games, records who won each one and how long it
//! took, and derives per-strategy win rates from the recorded outcomes.
//!
//! ## Outcome resolution
//! A game ends when a single active player remains or the turn cap is hit.
//! On timeout the player with the highest balance wins, earlier seats first
//! on ties.
//!
//! ## Metrics
//! - Timed-out games (turn cap reached)
//! - Average game length in turns
//! - Share of all games won by each strategy
//! - Most successful strategy

use log::{debug, info};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::board::BoardConfig;
use crate::error::{Result, SimulationError};
use crate::game::Game;
use crate::player::{Player, PlayerId};
use crate::strategy::BuyStrategy;

/// Share of recorded games won by each strategy, in [`BuyStrategy::all`] order.
pub type WinShares = [(BuyStrategy, f64); BuyStrategy::COUNT];

#[derive(Clone, Debug)]
pub struct SimulationConfig {
    pub num_simulations: usize,
    pub max_num_turns: usize,
    /// Balance each player is seated with by [`default_runner`].
    pub starting_balance: i64,
    pub board: BoardConfig,
    /// Fixed seed for a reproducible batch; drawn from entropy when `None`.
    pub seed: Option<u64>,
    /// Shuffle seating order before every game.
    pub shuffle_turn_order: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_simulations: 300,
            max_num_turns: 1000,
            starting_balance: 300,
            board: BoardConfig::default(),
            seed: None,
            shuffle_turn_order: false,
        }
    }
}

impl SimulationConfig {
    pub fn with_simulations(num_simulations: usize) -> Self {
        Self {
            num_simulations,
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_num_turns == 0 {
            return Err(SimulationError::InvalidConfig(
                "max turns must be at least 1".into(),
            ));
        }
        if self.starting_balance < 0 {
            return Err(SimulationError::InvalidConfig(format!(
                "starting balance must not be negative, got {}",
                self.starting_balance
            )));
        }
        self.board.validate()
    }
}

/// One player per strategy, seated in [`BuyStrategy::all`] order.
pub fn default_players(starting_balance: i64) -> Vec<Player> {
    BuyStrategy::all()
        .into_iter()
        .map(|strategy| Player::new(strategy, starting_balance))
        .collect()
}

/// Runner seating [`default_players`] with `config.starting_balance` in every game.
pub fn default_runner(
    config: SimulationConfig,
) -> Result<GameRunner<impl FnMut() -> Vec<Player>>> {
    let starting_balance = config.starting_balance;
    GameRunner::new(config, move || default_players(starting_balance))
}

#[derive(Clone, Debug, PartialEq)]
pub struct GameStatus {
    pub game_id: usize,
    pub turns_played: usize,
    pub winner: PlayerId,
    pub winner_strategy: BuyStrategy,
    pub winner_balance: i64,
}

pub struct GameRunner<F, R = ChaCha8Rng> {
    config: SimulationConfig,
    factory: F,
    rng: R,
    status: Vec<GameStatus>,
}

impl<F> GameRunner<F, ChaCha8Rng>
where
    F: FnMut() -> Vec<Player>,
{
    pub fn new(config: SimulationConfig, factory: F) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, factory, rng)
    }
}

impl<F, R> GameRunner<F, R>
where
    F: FnMut() -> Vec<Player>,
    R: Rng,
{
    pub fn with_rng(config: SimulationConfig, factory: F, rng: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            factory,
            rng,
            status: Vec::new(),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn status(&self) -> &[GameStatus] {
        &self.status
    }

    /// Plays one fresh game to completion and records its outcome.
    pub fn play_game(&mut self) -> Result<&GameStatus> {
        let mut players = (self.factory)();
        if players.is_empty() {
            return Err(SimulationError::NoPlayers);
        }
        if self.config.shuffle_turn_order {
            players.shuffle(&mut self.rng);
        }

        let board = self.config.board.build(&mut self.rng)?;
        let mut game = Game::new(players, board)?;

        while game.winner().is_none() && game.turns_played() < self.config.max_num_turns {
            game.turn(&mut self.rng)?;
        }

        let winner = game.winner().unwrap_or_else(|| game.richest_player());
        let status = GameStatus {
            game_id: self.status.len(),
            turns_played: game.turns_played(),
            winner,
            winner_strategy: game.player(winner).strategy(),
            winner_balance: game.player(winner).balance(),
        };

        debug!(
            "game {} finished after {} turns, winner {} ({}) with {}",
            status.game_id,
            status.turns_played,
            winner.index(),
            status.winner_strategy.name(),
            status.winner_balance,
        );

        self.status.push(status);
        Ok(&self.status[self.status.len() - 1])
    }

    /// Plays `num_simulations` games.
    pub fn run(&mut self) -> Result<()> {
        info!(
            "running {} games (max {} turns each)",
            self.config.num_simulations, self.config.max_num_turns
        );
        for _ in 0..self.config.num_simulations {
            self.play_game()?;
        }
        info!(
            "finished {} games, {} timed out",
            self.status.len(),
            self.num_timed_out_games()
        );
        Ok(())
    }

    pub fn num_timed_out_games(&self) -> usize {
        self.status
            .iter()
            .filter(|s| s.turns_played == self.config.max_num_turns)
            .count()
    }

    /// `None` until at least one game has been recorded.
    pub fn average_num_turns(&self) -> Option<f64> {
        if self.status.is_empty() {
            return None;
        }
        let total: usize = self.status.iter().map(|s| s.turns_played).sum();
        Some(total as f64 / self.status.len() as f64)
    }

    /// Fraction of all recorded games won by each strategy.
    pub fn winning_percentage_per_behavior(&self) -> Option<WinShares> {
        if self.status.is_empty() {
            return None;
        }

        let mut wins = [0usize; BuyStrategy::COUNT];
        for status in &self.status {
            wins[status.winner_strategy.index()] += 1;
        }

        let n = self.status.len() as f64;
        Some(BuyStrategy::all().map(|s| (s, wins[s.index()] as f64 / n)))
    }

    /// Strategy with the highest win share; the earlier one in
    /// [`BuyStrategy::all`] wins ties.
    pub fn most_successful_behavior(&self) -> Option<BuyStrategy> {
        let shares = self.winning_percentage_per_behavior()?;
        let mut best = shares[0];
        for &entry in &shares[1..] {
            if entry.1 > best.1 {
                best = entry;
            }
        }
        Some(best.0)
    }

    pub fn report(&self) -> Option<SimulationReport> {
        Some(SimulationReport {
            games: self.status.len(),
            timed_out: self.num_timed_out_games(),
            average_turns: self.average_num_turns()?,
            win_shares: self.winning_percentage_per_behavior()?,
            most_successful: self.most_successful_behavior()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub games: usize,
    pub timed_out: usize,
    pub average_turns: f64,
    pub win_shares: WinShares,
    pub most_successful: BuyStrategy,
}

impl SimulationReport {
    pub fn print(&self) {
        println!("  Games played:            {}", self.games);
        println!("  Timed out:               {}", self.timed_out);
        println!("  Avg turns per game:      {:.1}", self.average_turns);
        println!();
        println!("| Behavior   | Win rate |");
        println!("|------------|----------|");
        for (strategy, share) in &self.win_shares {
            println!("| {:10} | {:7.1}% |", strategy.name(), share * 100.0);
        }
        println!();
        println!("  Most successful:         {}", self.most_successful.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(config: SimulationConfig) -> GameRunner<impl FnMut() -> Vec<Player>> {
        default_runner(config.with_seed(17)).unwrap()
    }

    #[test]
    fn test_statistics_empty_before_any_game() {
        let runner = seeded(SimulationConfig::default());

        assert_eq!(runner.num_timed_out_games(), 0);
        assert_eq!(runner.average_num_turns(), None);
        assert!(runner.winning_percentage_per_behavior().is_none());
        assert_eq!(runner.most_successful_behavior(), None);
        assert!(runner.report().is_none());
    }

    #[test]
    fn test_play_game_records_status() {
        let mut runner = seeded(SimulationConfig::default());

        let status = runner.play_game().unwrap().clone();
        assert_eq!(status.game_id, 0);
        assert!(status.turns_played >= 1 && status.turns_played <= 1000);
        assert_eq!(runner.status().len(), 1);
        assert_eq!(status.winner_strategy, BuyStrategy::all()[status.winner.index()]);
    }

    #[test]
    fn test_timeout_picks_richest_player() {
        let mut config = SimulationConfig::default();
        config.max_num_turns = 1;
        let mut runner = GameRunner::new(config.with_seed(4), || {
            vec![
                Player::new(BuyStrategy::Demanding, 10),
                Player::new(BuyStrategy::Demanding, 500),
            ]
        })
        .unwrap();

        let status = runner.play_game().unwrap().clone();
        assert_eq!(status.turns_played, 1);
        assert_eq!(status.winner, PlayerId(1));
        assert_eq!(runner.num_timed_out_games(), 1);
    }

    #[test]
    fn test_game_already_decided_plays_no_turns() {
        let mut runner = GameRunner::new(SimulationConfig::default().with_seed(4), || {
            vec![
                Player::new(BuyStrategy::Random, -1),
                Player::new(BuyStrategy::Cautious, 0),
            ]
        })
        .unwrap();

        let status = runner.play_game().unwrap().clone();
        assert_eq!(status.turns_played, 0);
        assert_eq!(status.winner_strategy, BuyStrategy::Cautious);
    }

    #[test]
    fn test_empty_factory_is_error() {
        let mut runner = GameRunner::new(SimulationConfig::default(), Vec::new).unwrap();
        assert_eq!(runner.play_game().unwrap_err(), SimulationError::NoPlayers);
    }

    #[test]
    fn test_all_bankrupt_factory_is_error() {
        let mut runner = GameRunner::new(SimulationConfig::default(), || {
            vec![
                Player::new(BuyStrategy::Random, -1),
                Player::new(BuyStrategy::Cautious, -1),
            ]
        })
        .unwrap();
        assert_eq!(
            runner.play_game().unwrap_err(),
            SimulationError::NoActivePlayers
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimulationConfig::default();
        config.max_num_turns = 0;
        assert!(default_runner(config).is_err());

        let mut config = SimulationConfig::default();
        config.board.num_properties = 0;
        assert!(default_runner(config).is_err());

        let mut config = SimulationConfig::default();
        config.starting_balance = -1;
        assert!(default_runner(config).is_err());
    }

    #[test]
    fn test_default_runner_uses_configured_starting_balance() {
        let mut config = SimulationConfig::default().with_seed(6);
        config.starting_balance = 0;
        config.max_num_turns = 1;
        let mut runner = default_runner(config).unwrap();

        // Nobody can buy or complete a lap in one turn, so every balance stays at 0.
        let status = runner.play_game().unwrap().clone();
        assert_eq!(status.turns_played, 1);
        assert_eq!(status.winner, PlayerId(0));
        assert_eq!(status.winner_balance, 0);
    }

    #[test]
    fn test_most_successful_matches_shares() {
        let mut runner = seeded(SimulationConfig::with_simulations(50));
        runner.run().unwrap();

        let shares = runner.winning_percentage_per_behavior().unwrap();
        let best = runner.most_successful_behavior().unwrap();
        let max = shares.iter().map(|(_, s)| *s).fold(0.0, f64::max);

        assert_eq!(shares[best.index()].1, max);
        assert!(shares[..best.index()].iter().all(|(_, s)| *s < max));
    }
}
