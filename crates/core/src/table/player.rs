// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table player types.
use std::ops;

use crate::{
    message::PlayerAction,
    poker::{Chips, PlayerCards, PlayerId},
};

/// A table player state.
#[derive(Debug, Clone)]
pub struct Player {
    /// The player id.
    pub player_id: PlayerId,
    /// This player name.
    pub name: String,
    /// This player chips.
    pub chips: Chips,
    /// The player bet in the current betting round.
    pub bet: Chips,
    /// The last player action.
    pub action: PlayerAction,
    /// This player private cards.
    pub hole_cards: PlayerCards,
    /// The seat is played by a bot.
    pub is_bot: bool,
    /// This player is active in the hand.
    pub is_active: bool,
    /// The player acted in the current betting round.
    pub has_acted: bool,
}

impl Player {
    /// Creates a new player.
    pub fn new(player_id: PlayerId, name: String, chips: Chips, is_bot: bool) -> Self {
        Self {
            player_id,
            name,
            chips,
            bet: Chips::ZERO,
            action: PlayerAction::None,
            hole_cards: PlayerCards::None,
            is_bot,
            is_active: false,
            has_acted: false,
        }
    }

    /// Updates this player bet to the given chips amount, a player that cannot
    /// cover the amount goes all in.
    pub fn bet(&mut self, action: PlayerAction, chips: Chips) {
        // How much to bet considering previous bets.
        let remainder = chips - self.bet;

        if self.chips < remainder {
            self.bet += self.chips;
            self.chips = Chips::ZERO;
        } else {
            self.bet += remainder;
            self.chips -= remainder;
        }

        self.action = action;
    }

    /// Sets this player in fold state.
    pub fn fold(&mut self) {
        self.is_active = false;
        self.action = PlayerAction::Fold;
    }

    /// Checks if this player can still act in this hand.
    pub fn can_act(&self) -> bool {
        self.is_active && self.chips > Chips::ZERO
    }

    /// Reset state for a new hand.
    fn start_hand(&mut self, hole_cards: PlayerCards) {
        self.is_active = self.chips > Chips::ZERO;
        self.hole_cards = if self.is_active {
            hole_cards
        } else {
            PlayerCards::None
        };
        self.start_round();
    }

    /// Reset state for a new betting round.
    fn start_round(&mut self) {
        self.bet = Chips::ZERO;
        self.action = PlayerAction::None;
        self.has_acted = false;
    }
}

/// The table players state, seats never move during a session.
#[derive(Debug, Default)]
pub struct PlayersState {
    players: Vec<Player>,
}

impl PlayersState {
    /// Adds a player to the next seat.
    pub fn join(&mut self, player: Player) {
        self.players.push(player);
    }

    /// Returns total number of players.
    pub fn count(&self) -> usize {
        self.players.len()
    }

    /// Returns the number of active players.
    pub fn count_active(&self) -> usize {
        self.players.iter().filter(|p| p.is_active).count()
    }

    /// Returns the number of player in the hand who have chips.
    pub fn count_active_with_chips(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    /// Returns the number of player who have chips.
    pub fn count_with_chips(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.chips > Chips::ZERO)
            .count()
    }

    /// Returns the seat of a player.
    pub fn position(&self, player_id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.player_id == player_id)
    }

    /// The highest bet amongst the active players.
    pub fn max_active_bet(&self) -> Chips {
        self.players
            .iter()
            .filter(|p| p.is_active)
            .map(|p| p.bet)
            .max()
            .unwrap_or_default()
    }

    /// The sum of all players bets.
    pub fn total_bets(&self) -> Chips {
        self.players.iter().map(|p| p.bet).sum()
    }

    /// Returns the first seat after `seat`, going around the table, whose
    /// player matches the predicate.
    pub fn next_seat<P>(&self, seat: usize, pred: P) -> Option<usize>
    where
        P: Fn(&Player) -> bool,
    {
        let n = self.players.len();
        (1..=n)
            .map(|step| (seat + step) % n)
            .find(|&idx| pred(&self.players[idx]))
    }

    /// Returns an iterator to all players.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Returns a mutable iterator to all players.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.iter_mut()
    }

    /// Set state for a new hand, each player gets the cards at its seat.
    pub fn start_hand(&mut self, cards: Vec<PlayerCards>) {
        for (player, cards) in self.players.iter_mut().zip(cards) {
            player.start_hand(cards);
        }
    }

    /// Moves all bets out of the players and resets the round state.
    pub fn collect_bets(&mut self) -> Chips {
        let bets = self.total_bets();
        self.players.iter_mut().for_each(Player::start_round);
        bets
    }

    /// After a raise every other player in the hand has to act again.
    pub fn reopen_round(&mut self, raiser: usize) {
        for (idx, player) in self.players.iter_mut().enumerate() {
            if idx != raiser && player.is_active {
                player.has_acted = false;
            }
        }
    }
}

impl ops::Index<usize> for PlayersState {
    type Output = Player;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.players[idx]
    }
}

impl ops::IndexMut<usize> for PlayersState {
    fn index_mut(&mut self, idx: usize) -> &mut Self::Output {
        &mut self.players[idx]
    }
}
