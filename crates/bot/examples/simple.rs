// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A simple example bot strategy playing against random bots.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};

use royal_bot::{
    RandomStrategy, Strategy, autoplay,
    core::{
        game_state::{PlayerSnapshot, TableSnapshot},
        message::PlayerAction,
        poker::{Chips, PlayerCards},
        table::{Table, TableConfig},
    },
};

struct AlwaysCallOrCheck;

impl Strategy for AlwaysCallOrCheck {
    fn execute(&mut self, player: &PlayerSnapshot, table: &TableSnapshot) -> (PlayerAction, Chips) {
        // Raise preflop with a pair.
        if let PlayerCards::Cards(c1, c2) = player.cards {
            let raise_to = table.current_bet * 2;
            if c1.rank() == c2.rank()
                && table.board.is_empty()
                && player.action == PlayerAction::None
                && raise_to <= player.bet + player.chips
            {
                return (PlayerAction::Raise, raise_to);
            }
        }

        if player.bet < table.current_bet {
            (PlayerAction::Call, Chips::ZERO)
        } else {
            (PlayerAction::Check, Chips::ZERO)
        }
    }
}

#[derive(Debug, Parser)]
struct Cli {
    /// Number of hands to play.
    #[clap(long, default_value_t = 100)]
    hands: usize,
    /// Number of random bots.
    #[clap(long, short, value_parser = clap::value_parser!(u8).range(1..=9), default_value_t = 3)]
    bots: u8,
    /// Seed for reproducible games.
    #[clap(long, default_value_t = 101)]
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let config = TableConfig {
        seats: cli.bots as usize + 1,
        human_seat: false,
        ..TableConfig::default()
    };

    let mut table = Table::with_rng(config, StdRng::seed_from_u64(cli.seed));

    let mut bots: Vec<Box<dyn Strategy>> = vec![Box::new(AlwaysCallOrCheck)];
    for seat in 1..=cli.bots {
        bots.push(Box::new(RandomStrategy::with_seed(cli.seed + seat as u64)));
    }

    let hands = autoplay(&mut table, &mut bots, cli.hands)?;
    if let Some(last) = hands.last() {
        println!("After {} hands:", hands.len());
        for (player_id, chips) in &last.stacks {
            println!("{:>4} {:>8}", player_id.to_string(), chips.to_string());
        }
    }

    Ok(())
}
