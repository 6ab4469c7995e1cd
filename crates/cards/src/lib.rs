// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Royal Hold'em cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use royal_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! assert_eq!(ah.value(), 14);
//! assert_eq!("AH".parse::<Card>().unwrap(), ah);
//! ```
//!
//! and a [Deck] type for shuffling and dealing cards, a fresh deck is dealt from
//! the top until it runs out:
//!
//! ```
//! # use royal_cards::Deck;
//! let mut deck = Deck::new_and_shuffled(&mut rand::rng());
//! let (c1, c2) = (deck.deal().unwrap(), deck.deal().unwrap());
//! assert_ne!(c1, c2);
//! assert_eq!(deck.count(), Deck::SIZE - 2);
//! ```
//!
//! To iterate through all 5 cards hands:
//!
//! ```no_run
//! # use royal_cards::Deck;
//! let mut counter = 0;
//! Deck::default().for_each(5, |hand| {
//!     counter += 1;
//! });
//! assert_eq!(counter, 2_598_960);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Deck, DeckExhausted, ParseCardError, Rank, Suit};
