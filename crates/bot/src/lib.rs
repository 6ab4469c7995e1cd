// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Royal Hold'em bots.
//!
//! A bot is a [Strategy] that picks an action from a table snapshot. Bots can
//! play a whole game with [autoplay]:
//!
//! ```
//! # use royal_bot::{RandomStrategy, autoplay, core::table::{Table, TableConfig}};
//! let config = TableConfig {
//!     human_seat: false,
//!     ..TableConfig::default()
//! };
//!
//! let mut table = Table::new(config);
//! let mut bots = (0..5).map(RandomStrategy::with_seed).collect::<Vec<_>>();
//! let hands = autoplay(&mut table, &mut bots, 10).unwrap();
//! assert!(hands.len() <= 10);
//! ```
//!
//! or play against a human through a [ThinkScheduler] that delivers their
//! decisions after a think time.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

mod autoplay;
mod scheduler;
mod strategy;

pub use autoplay::{HandSummary, autoplay};
pub use royal_core as core;
pub use scheduler::{Decision, ThinkScheduler};
pub use strategy::{RandomStrategy, Strategy, passive_action};
