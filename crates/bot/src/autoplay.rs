// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Bots only games.
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use royal_core::{
    EngineError,
    message::HandPayoff,
    poker::{Card, Chips, PlayerId},
    table::Table,
};

use crate::{Strategy, passive_action};

/// The outcome of a played hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandSummary {
    /// The hand number.
    pub hand: u64,
    /// The board at the end of the hand.
    pub board: Vec<Card>,
    /// The hand winners.
    pub payoffs: Vec<HandPayoff>,
    /// The players chips at the end of the hand.
    pub stacks: Vec<(PlayerId, Chips)>,
}

/// Plays up to `hands` hands with a strategy for each seat, stops early when
/// only one player has chips left.
///
/// Rejected decisions are replaced with a check, or a fold when facing a bet.
pub fn autoplay<S: Strategy>(
    table: &mut Table,
    strategies: &mut [S],
    hands: usize,
) -> Result<Vec<HandSummary>, EngineError> {
    assert_eq!(
        strategies.len(),
        table.config().seats,
        "One strategy per seat is needed"
    );

    let mut summaries = Vec::with_capacity(hands);
    for _ in 0..hands {
        if !table.can_start_hand() {
            info!("Game over after {} hands", summaries.len());
            break;
        }

        table.start_hand()?;

        loop {
            let state = table.snapshot();
            let Some(seat) = state.turn else {
                break;
            };

            let player_id = state.players[seat].player_id;
            let view = state.covered_for(player_id);
            let (action, amount) = strategies[seat].execute(&view.players[seat], &view);

            match table.apply_action(player_id, action, amount) {
                Err(EngineError::InvalidAction(rejection)) => {
                    warn!("Player {player_id} decision {action:?} {amount} rejected: {rejection}");
                    let fallback = passive_action(&state, player_id);
                    table.apply_action(player_id, fallback, Chips::ZERO)?;
                }
                res => res?,
            }
        }

        for event in table.take_events() {
            debug!("{event:?}");
        }

        let state = table.snapshot();
        summaries.push(HandSummary {
            hand: state.generation.hand,
            board: state.board,
            payoffs: state.payoffs,
            stacks: state
                .players
                .iter()
                .map(|p| (p.player_id, p.chips))
                .collect(),
        });
    }

    Ok(summaries)
}
