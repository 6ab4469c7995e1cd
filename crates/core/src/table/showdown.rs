// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Showdown pot distribution.
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    message::HandPayoff,
    poker::{Card, Chips, HandValue, PlayerCards},
};

use super::player::PlayersState;

/// How a pot is paid when more players share the best hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TiePolicy {
    /// Tied players split the pot, odd chips go to the first winner left of
    /// the dealer.
    #[default]
    Split,
    /// The first winner left of the dealer takes the whole pot.
    FirstSeat,
}

/// Evaluates the hands of the active players and pays the pot to the winners.
///
/// Players are visited starting from the seat left of the dealer, payoffs are
/// returned in that order.
pub fn resolve(
    players: &mut PlayersState,
    board: &[Card],
    pot: Chips,
    dealer: usize,
    policy: TiePolicy,
) -> Vec<HandPayoff> {
    let seats = players.count();
    let hands = (1..=seats)
        .map(|step| (dealer + step) % seats)
        .filter_map(|seat| {
            let player = &players[seat];
            match player.hole_cards {
                PlayerCards::Cards(c1, c2) if player.is_active => {
                    let mut cards = vec![c1, c2];
                    cards.extend_from_slice(board);
                    Some((seat, HandValue::eval(&cards)))
                }
                _ => None,
            }
        })
        .collect::<Vec<_>>();

    let Some(best) = hands.iter().map(|(_, hv)| *hv).max() else {
        return Vec::new();
    };

    let winners = hands
        .into_iter()
        .filter(|(_, hv)| *hv == best)
        .map(|(seat, _)| seat)
        .collect::<Vec<_>>();

    let shares = match policy {
        TiePolicy::Split => {
            let count = winners.len() as u32;
            let odd = pot % count;
            (0..winners.len())
                .map(|idx| if idx == 0 { pot / count + odd } else { pot / count })
                .collect::<Vec<_>>()
        }
        TiePolicy::FirstSeat => vec![pot],
    };

    winners
        .into_iter()
        .zip(shares)
        .map(|(seat, chips)| {
            let player = &mut players[seat];
            player.chips += chips;
            info!(
                "Player {} wins {chips} with {}",
                player.player_id,
                best.description()
            );

            HandPayoff {
                player_id: player.player_id,
                chips,
                hand: Some(best),
            }
        })
        .collect()
}
