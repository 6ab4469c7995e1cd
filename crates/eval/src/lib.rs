// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Royal Hold'em hand evaluator.
//!
//! Evaluates the best 5 cards hand out of 5, 6 or 7 cards and returns a
//! [HandValue] with a single integer score that totally orders all hands,
//! each hand category owns a band of scores that never overlaps another band.
//!
//! ```
//! # use royal_eval::*;
//! let cards = ["AS", "KS", "QS", "JS", "TS", "2D", "3C"]
//!     .iter()
//!     .map(|c| c.parse::<Card>().unwrap())
//!     .collect::<Vec<_>>();
//! let v = HandValue::eval(&cards);
//! assert_eq!(v.rank(), HandRank::StraightFlush);
//! assert_eq!(v.score(), 8_000_014);
//! assert_eq!(v.description(), "Royal Flush");
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod eval;
pub use eval::{HandRank, HandValue};

// Reexport cards types.
pub use royal_cards::{Card, Deck, Rank, Suit};
