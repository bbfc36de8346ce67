//! Single-game turn engine
//!
//! A game owns its board and its players and advances one turn at a time.
//!
//! ## Turn sequence
//! 1. Properties owned by bankrupt players go back on the market
//! 2. The next player is drawn from the round-based rotation
//! 3. The player rolls a die and moves, collecting the lap reward when
//!    passing the start
//! 4. The player either considers buying the property they landed on or
//!    pays rent to its owner
//!
//! ## Rotation
//! Turns are handed out in rounds. A round is the list of active players at
//! the moment it starts, in seating order. A player who goes bankrupt
//! mid-round keeps their queued slot until the round ends.

use std::collections::VecDeque;

use log::trace;
use rand::Rng;

use crate::board::Board;
use crate::error::{Result, SimulationError};
use crate::player::{roll_die, transfer, Player, PlayerId, DIE_SIDES};

pub const LAP_REWARD: i64 = 100;

/// Round-based rotation over active players.
#[derive(Clone, Debug, Default)]
pub struct TurnOrder {
    queue: VecDeque<PlayerId>,
}

impl TurnOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next player, starting a new round from the currently
    /// active players when the previous one is exhausted. `None` means a
    /// round started with nobody active.
    pub fn next(&mut self, players: &[Player]) -> Option<PlayerId> {
        if self.queue.is_empty() {
            self.queue.extend(
                players
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.is_active())
                    .map(|(i, _)| PlayerId(i)),
            );
        }
        self.queue.pop_front()
    }
}

/// What happened on the square a player landed on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Landing {
    Purchased { cost: i64 },
    /// The strategy wanted to buy but the balance fell short.
    PurchaseFailed { cost: i64 },
    Declined,
    PaidRent { owner: PlayerId, rent: i64, credited: i64 },
    OwnProperty,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurnEvent {
    pub player: PlayerId,
    pub roll: u32,
    pub position: usize,
    pub lap_completed: bool,
    pub released_properties: usize,
    pub landing: Landing,
}

#[derive(Clone, Debug)]
pub struct Game {
    players: Vec<Player>,
    board: Board,
    positions: Vec<usize>,
    order: TurnOrder,
    turns_played: usize,
}

impl Game {
    pub fn new(players: Vec<Player>, board: Board) -> Result<Self> {
        if players.is_empty() {
            return Err(SimulationError::NoPlayers);
        }

        let positions = vec![0; players.len()];
        Ok(Self {
            players,
            board,
            positions,
            order: TurnOrder::new(),
            turns_played: 0,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn position(&self, id: PlayerId) -> usize {
        self.positions[id.index()]
    }

    pub fn turns_played(&self) -> usize {
        self.turns_played
    }

    pub fn active_players(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_active())
            .map(|(i, _)| PlayerId(i))
    }

    /// The sole active player, if exactly one remains.
    pub fn winner(&self) -> Option<PlayerId> {
        let mut active = self.active_players();
        match (active.next(), active.next()) {
            (Some(id), None) => Some(id),
            _ => None,
        }
    }

    /// Player with the strictly highest balance; earlier seats win ties.
    pub fn richest_player(&self) -> PlayerId {
        let mut best = PlayerId(0);
        for (i, player) in self.players.iter().enumerate().skip(1) {
            if player.balance() > self.players[best.index()].balance() {
                best = PlayerId(i);
            }
        }
        best
    }

    pub fn turn(&mut self, rng: &mut impl Rng) -> Result<TurnEvent> {
        let released_properties = self.board.release_bankrupt(&self.players);

        let id = self
            .order
            .next(&self.players)
            .ok_or(SimulationError::NoActivePlayers)?;

        let roll = roll_die(DIE_SIDES, rng);
        let (position, lap_completed) = self.advance(id, roll as usize);
        let landing = self.land(id, position, rng);

        self.turns_played += 1;

        let event = TurnEvent {
            player: id,
            roll,
            position,
            lap_completed,
            released_properties,
            landing,
        };
        trace!("turn {}: {:?}", self.turns_played, event);
        Ok(event)
    }

    fn advance(&mut self, id: PlayerId, steps: usize) -> (usize, bool) {
        let size = self.board.len();
        let mut position = self.positions[id.index()] + steps;
        let lap_completed = position >= size;

        if lap_completed {
            self.players[id.index()].increase_balance(LAP_REWARD);
            position %= size;
        }

        self.positions[id.index()] = position;
        (position, lap_completed)
    }

    fn land(&mut self, id: PlayerId, position: usize, rng: &mut impl Rng) -> Landing {
        let property = self.board.property_mut(position);

        match property.owner() {
            None => {
                let player = &mut self.players[id.index()];
                if !player.strategy().decide_to_buy(property, player, rng) {
                    return Landing::Declined;
                }

                let cost = property.sell_cost();
                if property.change_ownership(id, player) {
                    Landing::Purchased { cost }
                } else {
                    Landing::PurchaseFailed { cost }
                }
            }
            Some(owner) if owner == id => Landing::OwnProperty,
            Some(owner) => {
                let rent = property.rent_cost();
                let credited = transfer(&mut self.players, id, owner, rent);
                Landing::PaidRent {
                    owner,
                    rent,
                    credited,
                }
            }
        }
    }
}
