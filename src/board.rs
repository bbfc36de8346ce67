//! Board and property ownership
//!
//! The board is a fixed ring of properties, each with a purchase price and
//! a rent. Ownership is recorded as a [`PlayerId`] so it can be cleared
//! independently of the player it points at.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::{Result, SimulationError};
use crate::player::{Player, PlayerId};

#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    sell_cost: i64,
    rent_cost: i64,
    owner: Option<PlayerId>,
}

impl Property {
    pub fn new(sell_cost: i64, rent_cost: i64) -> Self {
        debug_assert!(sell_cost > 0 && rent_cost > 0);
        Self {
            sell_cost,
            rent_cost,
            owner: None,
        }
    }

    pub fn sell_cost(&self) -> i64 {
        self.sell_cost
    }

    pub fn rent_cost(&self) -> i64 {
        self.rent_cost
    }

    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// Sells the property to `buyer` if they can afford it.
    ///
    /// On success the buyer is debited the sell cost and recorded as owner.
    /// Otherwise nothing changes.
    pub fn change_ownership(&mut self, id: PlayerId, buyer: &mut Player) -> bool {
        if buyer.balance() < self.sell_cost {
            return false;
        }
        buyer.decrease_balance(self.sell_cost);
        self.owner = Some(id);
        true
    }

    pub fn reset_ownership(&mut self) {
        self.owner = None;
    }
}

#[derive(Clone, Debug)]
pub struct BoardConfig {
    pub num_properties: usize,
    pub max_sell_cost: i64,
    pub max_rent_cost: i64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            num_properties: 20,
            max_sell_cost: 300,
            max_rent_cost: 80,
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_properties == 0 {
            return Err(SimulationError::InvalidConfig(
                "board needs at least one property".into(),
            ));
        }
        if self.max_sell_cost < 1 {
            return Err(SimulationError::InvalidConfig(format!(
                "max sell cost must be positive, got {}",
                self.max_sell_cost
            )));
        }
        if self.max_rent_cost < 1 {
            return Err(SimulationError::InvalidConfig(format!(
                "max rent cost must be positive, got {}",
                self.max_rent_cost
            )));
        }
        Ok(())
    }

    pub fn build(&self, rng: &mut impl Rng) -> Result<Board> {
        Board::random(
            self.num_properties,
            self.max_sell_cost,
            self.max_rent_cost,
            rng,
        )
    }
}

#[derive(Clone, Debug)]
pub struct Board {
    properties: Vec<Property>,
}

impl Board {
    pub fn new(properties: Vec<Property>) -> Result<Self> {
        if properties.is_empty() {
            return Err(SimulationError::InvalidConfig(
                "board needs at least one property".into(),
            ));
        }
        Ok(Self { properties })
    }

    /// Generates `num_properties` properties with costs drawn uniformly from
    /// `1..=max_sell_cost` and `1..=max_rent_cost`.
    pub fn random(
        num_properties: usize,
        max_sell_cost: i64,
        max_rent_cost: i64,
        rng: &mut impl Rng,
    ) -> Result<Self> {
        BoardConfig {
            num_properties,
            max_sell_cost,
            max_rent_cost,
        }
        .validate()?;

        let sell = Uniform::new_inclusive(1, max_sell_cost);
        let rent = Uniform::new_inclusive(1, max_rent_cost);

        let properties = (0..num_properties)
            .map(|_| Property::new(sell.sample(rng), rent.sample(rng)))
            .collect();

        Self::new(properties)
    }

    // Never empty: `new` rejects an empty property list.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn property(&self, position: usize) -> &Property {
        &self.properties[position]
    }

    pub fn property_mut(&mut self, position: usize) -> &mut Property {
        &mut self.properties[position]
    }

    /// Clears every property whose owner has gone bankrupt. Returns how many
    /// properties were released.
    pub fn release_bankrupt(&mut self, players: &[Player]) -> usize {
        let mut released = 0;
        for property in &mut self.properties {
            if let Some(owner) = property.owner() {
                if !players[owner.index()].is_active() {
                    property.reset_ownership();
                    released += 1;
                }
            }
        }
        released
    }

    pub fn owned_by(&self, id: PlayerId) -> usize {
        self.properties
            .iter()
            .filter(|p| p.owner() == Some(id))
            .count()
    }
}
