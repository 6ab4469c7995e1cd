// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand evaluator.
//!
//! The evaluator folds 5, 6 or 7 cards into per value counts and per suit bit
//! masks and then checks categories from the strongest to the weakest, the
//! first match is the best 5 cards hand.
//!
//! Each category owns a band of scores:
//!
//! ```text
//!   Straight Flush   8,000,000 + high
//!   Four of a Kind   7,000,000 + quads * 100 + kicker
//!   Full House       6,000,000 + trips * 100 + pair
//!   Flush            5,000,000 + 5 cards packed base 15
//!   Straight         4,000,000 + high
//!   Three of a Kind  3,000,000 + trips * 1000 + 2 kickers packed base 15
//!   Two Pair         2,000,000 + high pair * 1000 + low pair * 15 + kicker
//!   One Pair         1,000,000 + pair * 10000 + 3 kickers packed base 15
//!   High Card                    5 cards packed base 15
//! ```
//!
//! A card value is at most 14 so packing values in base 15 compares kickers
//! lexicographically.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt, iter};

use royal_cards::{Card, Rank};

/// The category of a poker hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// Fewer than 5 cards, there is nothing to rank yet.
    Waiting = 0,
    /// High card.
    HighCard,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Five cards in sequence.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Five suited cards in sequence.
    StraightFlush,
}

impl HandRank {
    /// The category label.
    pub fn label(&self) -> &'static str {
        match self {
            HandRank::Waiting => "Waiting",
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        }
    }

    /// The lowest score in this category band.
    pub fn base_score(&self) -> u32 {
        match self {
            HandRank::Waiting | HandRank::HighCard => 0,
            HandRank::OnePair => 1_000_000,
            HandRank::TwoPair => 2_000_000,
            HandRank::ThreeOfAKind => 3_000_000,
            HandRank::Straight => 4_000_000,
            HandRank::Flush => 5_000_000,
            HandRank::FullHouse => 6_000_000,
            HandRank::FourOfAKind => 7_000_000,
            HandRank::StraightFlush => 8_000_000,
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The value of a poker hand.
///
/// Values compare by score, two hands with the same score are a tie.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HandValue {
    score: u32,
    rank: HandRank,
    /// The deciding card values used by the description.
    high: u8,
    low: u8,
}

impl HandValue {
    /// The value for a hand with fewer than 5 cards.
    pub const WAITING: HandValue = HandValue {
        score: 0,
        rank: HandRank::Waiting,
        high: 0,
        low: 0,
    };

    fn new(rank: HandRank, tiebreak: u32, high: u8, low: u8) -> Self {
        Self {
            score: rank.base_score() + tiebreak,
            rank,
            high,
            low,
        }
    }

    /// Evaluates the best 5 cards hand from the given cards.
    ///
    /// Hands with fewer than 5 cards evaluate to [HandValue::WAITING].
    pub fn eval(cards: &[Card]) -> HandValue {
        if cards.len() < 5 {
            return Self::WAITING;
        }

        let mut counts = [0u8; 15];
        let mut suits = [0u16; 4];
        let mut values = 0u16;
        for card in cards {
            let v = card.value();
            counts[v as usize] += 1;
            suits[card.suit() as usize] |= 1 << v;
            values |= 1 << v;
        }

        let group = |n: u8| (2..=14u8).rev().filter(move |&v| counts[v as usize] == n);
        let flush = suits.into_iter().find(|mask| mask.count_ones() >= 5);

        if let Some(high) = flush.and_then(straight_high) {
            return Self::new(HandRank::StraightFlush, high as u32, high, 0);
        }

        if let Some(quads) = group(4).next() {
            let kicker = kickers(counts, &[quads]).next().unwrap_or_default();
            let tiebreak = quads as u32 * 100 + kicker as u32;
            return Self::new(HandRank::FourOfAKind, tiebreak, quads, kicker);
        }

        let mut trips = group(3);
        let best_trips = trips.next();
        let best_pair = group(2).next();

        if let Some(t) = best_trips {
            // A second trips group plays as a pair.
            if let Some(p) = trips.next().max(best_pair) {
                let tiebreak = t as u32 * 100 + p as u32;
                return Self::new(HandRank::FullHouse, tiebreak, t, p);
            }
        }

        if let Some(mask) = flush {
            let mut top = (2..=14u8)
                .rev()
                .filter(|v| mask & (1 << v) != 0)
                .take(5)
                .peekable();
            let high = top.peek().copied().unwrap_or_default();
            return Self::new(HandRank::Flush, pack(top), high, 0);
        }

        if let Some(high) = straight_high(values) {
            return Self::new(HandRank::Straight, high as u32, high, 0);
        }

        if let Some(t) = best_trips {
            let tiebreak = t as u32 * 1000 + pack(kickers(counts, &[t]).take(2));
            return Self::new(HandRank::ThreeOfAKind, tiebreak, t, 0);
        }

        let mut pairs = group(2);
        match (pairs.next(), pairs.next()) {
            (Some(hp), Some(lp)) => {
                let kicker = kickers(counts, &[hp, lp]).next().unwrap_or_default();
                let tiebreak = hp as u32 * 1000 + pack([lp, kicker].into_iter());
                Self::new(HandRank::TwoPair, tiebreak, hp, lp)
            }
            (Some(p), None) => {
                let tiebreak = p as u32 * 10_000 + pack(kickers(counts, &[p]).take(3));
                Self::new(HandRank::OnePair, tiebreak, p, 0)
            }
            _ => {
                let mut top = kickers(counts, &[]).take(5).peekable();
                let high = top.peek().copied().unwrap_or_default();
                Self::new(HandRank::HighCard, pack(top), high, 0)
            }
        }
    }

    /// The hand score, higher is better.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// A human readable description such as "Full House, Twos full of Sevens".
    pub fn description(&self) -> String {
        let (high, low) = (self.high, self.low);
        match self.rank {
            HandRank::Waiting => "Waiting for cards".to_string(),
            HandRank::StraightFlush if high == 14 => "Royal Flush".to_string(),
            HandRank::StraightFlush => format!("Straight Flush, {} High", name(high)),
            HandRank::FourOfAKind => format!("Four {}", plural(high)),
            HandRank::FullHouse => {
                format!("Full House, {} full of {}", plural(high), plural(low))
            }
            HandRank::Flush => format!("Flush, {} High", name(high)),
            HandRank::Straight => format!("Straight, {} High", name(high)),
            HandRank::ThreeOfAKind => format!("Three {}", plural(high)),
            HandRank::TwoPair => format!("Two Pair, {} and {}", plural(high), plural(low)),
            HandRank::OnePair => format!("Pair of {}", plural(high)),
            HandRank::HighCard => format!("High Card {}", name(high)),
        }
    }
}

impl PartialEq for HandValue {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score
    }
}

impl Eq for HandValue {}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.cmp(&other.score)
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Returns the highest straight in a values bit mask, the wheel A-2-3-4-5 is
/// the only straight where the ace plays low and its high card is the five.
fn straight_high(mask: u16) -> Option<u8> {
    const WHEEL: u16 = (1 << 14) | 0b11_1100;

    (6..=14u8)
        .rev()
        .find(|high| {
            let run = 0b1_1111u16 << (high - 4);
            mask & run == run
        })
        .or_else(|| (mask & WHEEL == WHEEL).then_some(5))
}

/// Card values from the highest to the lowest, repeated for each card with
/// that value and skipping the excluded values.
fn kickers(counts: [u8; 15], exclude: &[u8]) -> impl Iterator<Item = u8> {
    (2..=14u8)
        .rev()
        .filter(move |v| !exclude.contains(v))
        .flat_map(move |v| iter::repeat_n(v, counts[v as usize] as usize))
}

/// Packs values in base 15, the first value is the most significant.
fn pack(values: impl Iterator<Item = u8>) -> u32 {
    values.fold(0, |acc, v| acc * 15 + v as u32)
}

fn name(value: u8) -> &'static str {
    Rank::from_value(value).map(|r| r.name()).unwrap_or("?")
}

fn plural(value: u8) -> &'static str {
    Rank::from_value(value).map(|r| r.plural()).unwrap_or("?")
}
