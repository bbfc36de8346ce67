//! Purchasing strategies
//!
//! Each player is assigned one behavior for the whole game. A behavior is
//! consulted only when the player lands on an unowned property; actually
//! buying it is the game's job.
//!
//! ## Behaviors
//! - Impulsive: buys everything
//! - Demanding: buys only when the rent is at least 50
//! - Random: buys with probability 1/2
//! - Cautious: buys only if 80 remains after paying for the property

use rand::Rng;

use crate::board::Property;
use crate::player::Player;

pub const DEMANDING_MIN_RENT: i64 = 50;
pub const CAUTIOUS_RESERVE: i64 = 80;
const RANDOM_BUY_PROBABILITY: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuyStrategy {
    Impulsive,
    Demanding,
    Random,
    Cautious,
}

impl BuyStrategy {
    pub const COUNT: usize = 4;

    pub fn all() -> [Self; Self::COUNT] {
        [Self::Impulsive, Self::Demanding, Self::Random, Self::Cautious]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Impulsive => "impulsive",
            Self::Demanding => "demanding",
            Self::Random => "random",
            Self::Cautious => "cautious",
        }
    }

    /// Position of this behavior in [`BuyStrategy::all`].
    pub fn index(&self) -> usize {
        match self {
            Self::Impulsive => 0,
            Self::Demanding => 1,
            Self::Random => 2,
            Self::Cautious => 3,
        }
    }

    pub fn decide_to_buy(&self, property: &Property, player: &Player, rng: &mut impl Rng) -> bool {
        match self {
            Self::Impulsive => true,
            Self::Demanding => property.rent_cost() >= DEMANDING_MIN_RENT,
            Self::Random => rng.gen_bool(RANDOM_BUY_PROBABILITY),
            Self::Cautious => player.balance() >= property.sell_cost() + CAUTIOUS_RESERVE,
        }
    }
}
