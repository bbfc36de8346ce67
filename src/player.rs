//! Player ledger
//!
//! A player is a balance plus a fixed purchasing strategy. Players are stored
//! in an arena owned by the game and referred to everywhere else by
//! [`PlayerId`], so property ownership never keeps a player alive.
//!
//! ## Rent transfer
//! The credit to the receiver is capped at what the payer actually holds,
//! while the payer is debited the full amount. This asymmetry is how rent
//! bankrupts a player.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::strategy::BuyStrategy;

pub const DIE_SIDES: u32 = 6;

/// Index of a player inside a game's player list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub usize);

impl PlayerId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    balance: i64,
    strategy: BuyStrategy,
}

impl Player {
    pub fn new(strategy: BuyStrategy, balance: i64) -> Self {
        Self { balance, strategy }
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn strategy(&self) -> BuyStrategy {
        self.strategy
    }

    /// A player stays in the game while their balance is non-negative.
    pub fn is_active(&self) -> bool {
        self.balance >= 0
    }

    pub fn increase_balance(&mut self, amount: i64) {
        debug_assert!(amount >= 0, "negative credit: {amount}");
        self.balance += amount;
    }

    /// Debits without clamping; this is the only way a balance goes negative.
    pub fn decrease_balance(&mut self, amount: i64) {
        debug_assert!(amount >= 0, "negative debit: {amount}");
        self.balance -= amount;
    }
}

/// Moves `amount` from `from` to `to` and returns what `to` was credited.
///
/// Self-transfers are a no-op and credit nothing.
pub fn transfer(players: &mut [Player], from: PlayerId, to: PlayerId, amount: i64) -> i64 {
    if from == to {
        return 0;
    }

    let credited = players[from.index()].balance().min(amount).max(0);
    players[to.index()].increase_balance(credited);
    players[from.index()].decrease_balance(amount);
    credited
}

/// Rolls a fair die with faces `1..=sides`. `sides` must be at least 1.
pub fn roll_die(sides: u32, rng: &mut impl Rng) -> u32 {
    Uniform::new_inclusive(1, sides).sample(rng)
}
