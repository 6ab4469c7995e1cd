// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Bot strategies.
use rand::prelude::*;

use royal_core::{
    game_state::{PlayerSnapshot, TableSnapshot},
    message::PlayerAction,
    poker::{Chips, PlayerId},
};

/// A Poker bot strategy.
pub trait Strategy: Send + 'static {
    /// Execute an action given the bot player and the table state, the
    /// returned chips are the bet to raise to and are ignored for other
    /// actions.
    fn execute(&mut self, player: &PlayerSnapshot, table: &TableSnapshot) -> (PlayerAction, Chips);
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn execute(&mut self, player: &PlayerSnapshot, table: &TableSnapshot) -> (PlayerAction, Chips) {
        (**self).execute(player, table)
    }
}

/// The action that replaces a rejected decision: a check, or a fold when the
/// player has chips to call.
pub fn passive_action(table: &TableSnapshot, player_id: PlayerId) -> PlayerAction {
    if table.to_call(player_id) == Chips::ZERO {
        PlayerAction::Check
    } else {
        PlayerAction::Fold
    }
}

/// A strategy that picks actions at random.
///
/// With nothing to call it raises by a big blind 20% of the times and checks
/// otherwise, facing a bet it doubles the bet 10% of the times, calls 60% of
/// the times and folds otherwise. Raises the player cannot afford become calls
/// or checks.
#[derive(Debug)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    const RAISE_PROBABILITY: f64 = 0.2;
    const RERAISE_PROBABILITY: f64 = 0.1;
    const CALL_PROBABILITY: f64 = 0.6;

    /// Creates a strategy seeded from the OS.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a strategy with reproducible choices.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn execute(&mut self, player: &PlayerSnapshot, table: &TableSnapshot) -> (PlayerAction, Chips) {
        let to_call = table.current_bet - player.bet;
        let available = player.bet + player.chips;
        let p = self.rng.random::<f64>();

        if to_call == Chips::ZERO {
            let raise_to = table.current_bet + table.big_blind;
            if p < Self::RAISE_PROBABILITY && raise_to <= available {
                (PlayerAction::Raise, raise_to)
            } else {
                (PlayerAction::Check, Chips::ZERO)
            }
        } else if p < Self::RERAISE_PROBABILITY {
            let raise_to = table.current_bet * 2;
            if raise_to <= available {
                (PlayerAction::Raise, raise_to)
            } else {
                (PlayerAction::Call, Chips::ZERO)
            }
        } else if p < Self::RERAISE_PROBABILITY + Self::CALL_PROBABILITY {
            (PlayerAction::Call, Chips::ZERO)
        } else {
            (PlayerAction::Fold, Chips::ZERO)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use royal_core::{
        poker::Phase,
        table::{Table, TableConfig},
    };

    fn bots_table(seats: usize) -> Table {
        let config = TableConfig {
            seats,
            human_seat: false,
            ..TableConfig::default()
        };
        Table::with_rng(config, StdRng::seed_from_u64(7))
    }

    #[test]
    fn random_actions_are_legal() {
        let mut table = bots_table(6);
        let mut strategy = RandomStrategy::with_seed(42);

        for _ in 0..200 {
            if !table.can_start_hand() {
                break;
            }

            table.start_hand().unwrap();
            loop {
                let state = table.snapshot();
                let Some(player) = state.turn_player() else {
                    break;
                };

                let view = state.covered_for(player.player_id);
                let (action, amount) = strategy.execute(player, &view);
                table.apply_action(player.player_id, action, amount).unwrap();
            }

            assert_eq!(table.phase(), Phase::Showdown);
        }
    }

    #[test]
    fn raise_frequency() {
        let mut table = bots_table(3);
        table.start_hand().unwrap();

        // Everybody calls so that the big blind can check or raise.
        for _ in 0..2 {
            let state = table.snapshot();
            let player_id = state.turn_player().unwrap().player_id;
            table
                .apply_action(player_id, PlayerAction::Call, Chips::ZERO)
                .unwrap();
        }

        let state = table.snapshot();
        let player = state.turn_player().unwrap();
        assert_eq!(player.action, PlayerAction::BigBlind);

        let mut strategy = RandomStrategy::with_seed(1);
        let samples = 10_000;
        let mut raises = 0;
        for _ in 0..samples {
            match strategy.execute(player, &state) {
                (PlayerAction::Raise, amount) => {
                    assert_eq!(amount, Chips::new(40));
                    raises += 1;
                }
                (action, _) => assert_eq!(action, PlayerAction::Check),
            }
        }

        let freq = raises as f64 / samples as f64;
        assert!((0.17..0.23).contains(&freq), "raise frequency {freq}");
    }

    #[test]
    fn short_stack_never_overbets() {
        let mut table = bots_table(2);
        table.start_hand().unwrap();

        let mut state = table.snapshot();
        let seat = state.turn.unwrap();
        // The player can only cover the call.
        state.players[seat].chips = Chips::new(10);
        let player = state.players[seat].clone();

        let mut strategy = RandomStrategy::with_seed(3);
        for _ in 0..1_000 {
            let (action, _) = strategy.execute(&player, &state);
            assert!(matches!(action, PlayerAction::Call | PlayerAction::Fold));
        }
    }

    #[test]
    fn passive_action_is_legal() {
        let mut table = bots_table(3);
        table.start_hand().unwrap();

        let state = table.snapshot();
        let player_id = state.turn_player().unwrap().player_id;
        assert_eq!(passive_action(&state, player_id), PlayerAction::Fold);

        // The big blind can check after the calls.
        for _ in 0..2 {
            let state = table.snapshot();
            let player_id = state.turn_player().unwrap().player_id;
            table
                .apply_action(player_id, PlayerAction::Call, Chips::ZERO)
                .unwrap();
        }

        let state = table.snapshot();
        let player_id = state.turn_player().unwrap().player_id;
        let action = passive_action(&state, player_id);
        assert_eq!(action, PlayerAction::Check);
        table.apply_action(player_id, action, Chips::ZERO).unwrap();
    }
}
