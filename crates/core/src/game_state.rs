// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table state snapshots.
//!
//! A snapshot is a copy of the public table state taken after a mutation,
//! bots and front-ends read snapshots and never see the table itself.
use serde::{Deserialize, Serialize};

use crate::{
    message::{HandPayoff, PlayerAction},
    poker::{Card, Chips, Generation, Phase, PlayerCards, PlayerId},
};

/// Player data in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// This player id.
    pub player_id: PlayerId,
    /// This player name.
    pub name: String,
    /// This player chips.
    pub chips: Chips,
    /// The player bet in this betting round.
    pub bet: Chips,
    /// The last player action.
    pub action: PlayerAction,
    /// This player cards.
    pub cards: PlayerCards,
    /// The seat is played by a bot.
    pub is_bot: bool,
    /// The player is active in the hand.
    pub is_active: bool,
    /// The player acted in this betting round.
    pub has_acted: bool,
    /// The player has the button.
    pub has_button: bool,
}

/// A table state snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    /// The hand phase.
    pub phase: Phase,
    /// The table generation when the snapshot was taken.
    pub generation: Generation,
    /// The community cards.
    pub board: Vec<Card>,
    /// The chips collected from previous betting rounds.
    pub pot: Chips,
    /// The bet to match in this betting round.
    pub current_bet: Chips,
    /// The small blind.
    pub small_blind: Chips,
    /// The big blind.
    pub big_blind: Chips,
    /// The dealer seat.
    pub dealer: usize,
    /// The seat of the player to act.
    pub turn: Option<usize>,
    /// The players by seat.
    pub players: Vec<PlayerSnapshot>,
    /// The payoffs of the last hand, empty while a hand is in progress.
    pub payoffs: Vec<HandPayoff>,
}

impl TableSnapshot {
    /// Returns the player with the given id.
    pub fn player(&self, player_id: PlayerId) -> Option<&PlayerSnapshot> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    /// Returns the player to act.
    pub fn turn_player(&self) -> Option<&PlayerSnapshot> {
        self.turn.and_then(|seat| self.players.get(seat))
    }

    /// Checks if the given player has to act.
    pub fn is_turn_of(&self, player_id: PlayerId) -> bool {
        self.turn_player()
            .map(|p| p.player_id == player_id)
            .unwrap_or(false)
    }

    /// The pot plus the bets of the current round.
    pub fn total_pot(&self) -> Chips {
        self.pot + self.players.iter().map(|p| p.bet).sum()
    }

    /// The chips a player has to add to match the current bet.
    pub fn to_call(&self, player_id: PlayerId) -> Chips {
        self.player(player_id)
            .map(|p| self.current_bet - p.bet)
            .unwrap_or_default()
    }

    /// Returns a copy of this snapshot as seen by the given player.
    ///
    /// Other players cards are covered until showdown, at showdown only the
    /// cards of the players still in the hand are shown.
    pub fn covered_for(&self, viewer: PlayerId) -> TableSnapshot {
        let mut snapshot = self.clone();
        let showdown = self.phase == Phase::Showdown && self.count_active() > 1;

        for player in snapshot.players.iter_mut() {
            let visible = player.player_id == viewer || (showdown && player.is_active);
            if !visible && player.cards != PlayerCards::None {
                player.cards = PlayerCards::Covered;
            }
        }

        snapshot
    }

    /// The number of players in the hand.
    pub fn count_active(&self) -> usize {
        self.players.iter().filter(|p| p.is_active).count()
    }
}
