// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table errors.
use thiserror::Error;

use crate::{
    message::PlayerAction,
    poker::{Chips, DeckExhausted, Phase, PlayerId},
};

/// An error returned by a table, the table state is unchanged unless the
/// error is [EngineError::DeckExhausted].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The request is not legal in the current table state.
    #[error("invalid action: {0}")]
    InvalidAction(#[from] Rejection),
    /// No player with this id is seated at the table.
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    /// The deck ran out of cards.
    #[error(transparent)]
    DeckExhausted(#[from] DeckExhausted),
}

/// The reason a request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Actions are only accepted during a betting round.
    #[error("no betting round during {0}")]
    NoBettingRound(Phase),
    /// A new hand cannot start before the current one ends.
    #[error("a hand is already in progress")]
    HandInProgress,
    /// A hand needs two players with chips.
    #[error("at least two players with chips are needed")]
    NotEnoughPlayers,
    /// The player has folded this hand.
    #[error("player has folded")]
    Folded,
    /// Another player has to act.
    #[error("not this player's turn")]
    NotYourTurn,
    /// The player cannot check facing a bet.
    #[error("cannot check with {0} to call")]
    CallOwed(Chips),
    /// A raise must go above the current bet.
    #[error("raise to {to} is not above the current bet of {current_bet}")]
    RaiseTooSmall {
        /// The requested bet.
        to: Chips,
        /// The bet to beat.
        current_bet: Chips,
    },
    /// The player cannot afford the raise.
    #[error("raise to {to} is above the player {available} chips")]
    InsufficientChips {
        /// The requested bet.
        to: Chips,
        /// The player bet plus its chips.
        available: Chips,
    },
    /// Blinds and no action cannot be requested.
    #[error("{0:?} is not a player action")]
    NotAnAction(PlayerAction),
}
