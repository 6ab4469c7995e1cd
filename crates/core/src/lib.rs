// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Royal Hold'em game rules engine.
//!
//! A [Table](table::Table) owns the deck, the players and the betting state
//! and is driven by two calls, [start_hand](table::Table::start_hand) and
//! [apply_action](table::Table::apply_action):
//!
//! ```
//! # use royal_core::{message::PlayerAction, poker::{Chips, Phase}, table::{Table, TableConfig}};
//! let mut table = Table::new(TableConfig::default());
//! table.start_hand().unwrap();
//!
//! let state = table.snapshot();
//! assert_eq!(state.phase, Phase::Preflop);
//!
//! // The player to act folds.
//! let player_id = state.turn_player().unwrap().player_id;
//! table.apply_action(player_id, PlayerAction::Fold, Chips::ZERO).unwrap();
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

pub mod error;
pub mod game_state;
pub mod message;
pub mod poker;
pub mod table;

pub use error::{EngineError, Rejection};
