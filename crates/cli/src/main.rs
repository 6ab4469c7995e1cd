// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Royal Hold'em terminal game.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, bail};
use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use std::time::Duration;

use royal_bot::{HandSummary, RandomStrategy, ThinkScheduler, autoplay};
use royal_core::{
    game_state::TableSnapshot,
    poker::Chips,
    table::{Table, TableConfig, TiePolicy},
};

pub mod terminal;

#[derive(Debug, Parser)]
struct Cli {
    /// The small blind.
    #[clap(long, default_value_t = 10)]
    small_blind: u32,
    /// The big blind.
    #[clap(long, default_value_t = 20)]
    big_blind: u32,
    /// The chips each player starts with.
    #[clap(long, default_value_t = 1_000)]
    chips: u32,
    /// Number of seats at the table.
    #[clap(long, short, value_parser = clap::value_parser!(u8).range(2..=10), default_value_t = 5)]
    seats: u8,
    /// Seed for reproducible games.
    #[clap(long)]
    seed: Option<u64>,
    /// The minimum bot think time in milliseconds.
    #[clap(long, default_value_t = 1_000)]
    think_min_ms: u64,
    /// The maximum bot think time in milliseconds.
    #[clap(long, default_value_t = 2_000)]
    think_max_ms: u64,
    /// The first winner left of the dealer takes tied pots.
    #[clap(long)]
    no_split: bool,
    /// Let bots play the given number of hands and print the results.
    #[clap(long, value_name = "HANDS")]
    autoplay: Option<usize>,
    /// Print autoplay results as JSON.
    #[clap(long, requires = "autoplay")]
    json: bool,
}

impl Cli {
    fn table_config(&self) -> Result<TableConfig> {
        if self.small_blind == 0 || self.big_blind < self.small_blind {
            bail!(
                "Invalid blinds {}/{}",
                self.small_blind,
                self.big_blind
            );
        }

        if self.chips < self.big_blind {
            bail!("Starting chips must cover the big blind");
        }

        if u32::from(self.seats).checked_mul(self.chips).is_none() {
            bail!(
                "Starting chips {} are too many for {} seats",
                self.chips,
                self.seats
            );
        }

        if self.think_max_ms < self.think_min_ms {
            bail!("The maximum think time is less than the minimum");
        }

        Ok(TableConfig {
            small_blind: Chips::new(self.small_blind),
            big_blind: Chips::new(self.big_blind),
            starting_chips: Chips::new(self.chips),
            seats: self.seats as usize,
            tie_policy: if self.no_split {
                TiePolicy::FirstSeat
            } else {
                TiePolicy::Split
            },
            human_seat: self.autoplay.is_none(),
        })
    }

    /// Returns a seeded generator for the given stream if a seed was given.
    fn rng(&self, stream: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
            None => StdRng::from_os_rng(),
        }
    }

    fn bots(&self, seats: usize) -> Vec<RandomStrategy> {
        (0..seats as u64)
            .map(|seat| match self.seed {
                Some(seed) => RandomStrategy::with_seed(seed.wrapping_add(seat + 2)),
                None => RandomStrategy::new(),
            })
            .collect()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs would clobber the interactive screen.
    let level = if cli.autoplay.is_some() {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Off
    };

    env_logger::builder()
        .filter_level(level)
        .format_target(false)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    let config = cli.table_config()?;
    let seats = config.seats;
    let table = Table::with_rng(config, cli.rng(0));
    let bots = cli.bots(seats);

    if let Some(hands) = cli.autoplay {
        let mut table = table;
        let mut bots = bots;
        let summaries = autoplay(&mut table, &mut bots, hands)?;

        if cli.json {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        } else {
            let state = table.snapshot();
            for summary in &summaries {
                println!("{}", summary_line(summary, &state));
            }
        }

        return Ok(());
    }

    let (scheduler, decisions) = ThinkScheduler::new(
        Duration::from_millis(cli.think_min_ms),
        Duration::from_millis(cli.think_max_ms),
        cli.rng(1),
    );

    let session = terminal::Session::new(table, bots, scheduler);
    terminal::run(session, decisions).await
}

/// A text line for an autoplayed hand.
fn summary_line(summary: &HandSummary, state: &TableSnapshot) -> String {
    let winners = summary
        .payoffs
        .iter()
        .map(|payoff| {
            let name = state
                .player(payoff.player_id)
                .map(|p| p.name.as_str())
                .unwrap_or("?");
            format!("{name} wins {} ({})", payoff.chips, payoff.description())
        })
        .collect::<Vec<_>>()
        .join(", ");

    let board = summary
        .board
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ");

    format!("Hand {:>4} [{board:<14}] {winners}", summary.hand)
}
