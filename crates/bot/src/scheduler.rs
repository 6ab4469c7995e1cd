// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Delayed bot decisions.
use log::debug;
use rand::prelude::*;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Duration},
};

use royal_core::{
    game_state::TableSnapshot,
    message::PlayerAction,
    poker::{Chips, Generation, PlayerId},
};

use crate::Strategy;

/// A bot decision for a table state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// The table generation the decision was taken for.
    pub generation: Generation,
    /// The bot player.
    pub player_id: PlayerId,
    /// The action to apply.
    pub action: PlayerAction,
    /// The bet to raise to.
    pub amount: Chips,
}

impl Decision {
    /// Checks if the decision still applies to a table at `generation`.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.generation == generation
    }
}

/// Schedules bot decisions after a random think time.
///
/// At most one decision is pending, scheduling a new one aborts the previous.
#[derive(Debug)]
pub struct ThinkScheduler {
    min_delay: Duration,
    max_delay: Duration,
    rng: StdRng,
    tx: mpsc::Sender<Decision>,
    task: Option<JoinHandle<()>>,
}

impl ThinkScheduler {
    /// The default minimum think time.
    pub const MIN_DELAY: Duration = Duration::from_secs(1);
    /// The default maximum think time.
    pub const MAX_DELAY: Duration = Duration::from_secs(2);

    /// Creates a scheduler and the receiver where decisions are delivered.
    pub fn new(
        min_delay: Duration,
        max_delay: Duration,
        rng: StdRng,
    ) -> (Self, mpsc::Receiver<Decision>) {
        let (tx, rx) = mpsc::channel(16);
        let scheduler = Self {
            min_delay,
            max_delay: max_delay.max(min_delay),
            rng,
            tx,
            task: None,
        };

        (scheduler, rx)
    }

    /// Asks the strategy for the player to act and delivers the decision after
    /// the think time, returns false if no player has to act.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<S>(&mut self, strategy: &mut S, table: &TableSnapshot) -> bool
    where
        S: Strategy + ?Sized,
    {
        let Some(player) = table.turn_player() else {
            return false;
        };

        let view = table.covered_for(player.player_id);
        let (action, amount) = strategy.execute(player, &view);
        let decision = Decision {
            generation: table.generation,
            player_id: player.player_id,
            action,
            amount,
        };

        self.cancel();

        let delay = self.think_time();
        debug!(
            "Player {} {action:?} in {}ms at {}",
            decision.player_id,
            delay.as_millis(),
            decision.generation
        );

        let tx = self.tx.clone();
        self.task = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = tx.send(decision).await;
        }));

        true
    }

    /// Aborts the pending decision.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn think_time(&mut self) -> Duration {
        let min = self.min_delay.as_millis() as u64;
        let max = self.max_delay.as_millis() as u64;
        Duration::from_millis(self.rng.random_range(min..=max))
    }
}

impl Drop for ThinkScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
