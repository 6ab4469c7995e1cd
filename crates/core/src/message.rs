// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Player actions and the events published by a table.
use serde::{Deserialize, Serialize};

use crate::poker::{Card, Chips, Generation, HandValue, Phase, PlayerId};

/// A Player action.
///
/// The same type records a player last action and, together with an amount,
/// carries the action a player requests.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    /// No action.
    #[default]
    None,
    /// Player pays small blind.
    SmallBlind,
    /// Player pays big blind.
    BigBlind,
    /// Player calls.
    Call,
    /// Player checks.
    Check,
    /// Player raises to an absolute bet.
    Raise,
    /// Player bets all its chips.
    AllIn,
    /// Player folds.
    Fold,
}

impl PlayerAction {
    /// The action label.
    pub fn label(&self) -> &'static str {
        match self {
            PlayerAction::SmallBlind => "SB",
            PlayerAction::BigBlind => "BB",
            PlayerAction::Call => "CALL",
            PlayerAction::Check => "CHECK",
            PlayerAction::Raise => "RAISE",
            PlayerAction::AllIn => "ALL-IN",
            PlayerAction::Fold => "FOLD",
            PlayerAction::None => "",
        }
    }
}

/// The chips a player won at the end of a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandPayoff {
    /// The winning player.
    pub player_id: PlayerId,
    /// The chips won.
    pub chips: Chips,
    /// The winning hand, none when all other players folded.
    pub hand: Option<HandValue>,
}

impl HandPayoff {
    /// Describes the winning hand.
    pub fn description(&self) -> String {
        self.hand
            .map(|h| h.description())
            .unwrap_or_else(|| "Last player standing".to_string())
    }
}

/// An event published by a table after a state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableEvent {
    /// A new hand started.
    HandStarted {
        /// The table generation for the new hand.
        generation: Generation,
        /// The player with the button.
        dealer: PlayerId,
    },
    /// A player action was applied.
    PlayerActed {
        /// The player who acted.
        player_id: PlayerId,
        /// The recorded action.
        action: PlayerAction,
        /// The player bet after the action.
        bet: Chips,
        /// The player chips after the action.
        chips: Chips,
    },
    /// The betting round moved to a new phase.
    PhaseChanged {
        /// The new phase.
        phase: Phase,
        /// The board cards.
        board: Vec<Card>,
        /// The pot after collecting the previous round bets.
        pot: Chips,
    },
    /// The hand has ended and the pot has been paid.
    HandEnded {
        /// The winners payoffs.
        payoffs: Vec<HandPayoff>,
    },
}
