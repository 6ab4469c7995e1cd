// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// A Poker card.
///
/// A card identity is its `(rank, suit)` pair, a standard deck holds exactly
/// one card for each pair.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Create a card given a suit and rank.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// The card numeric value, from 2 for a deuce to 14 for an ace.
    pub fn value(&self) -> u8 {
        self.rank.value()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank, self.suit)
    }
}

/// Error returned when parsing a card from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid card {0:?}")]
pub struct ParseCardError(String);

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses a card from its rank and suit chars, ranks are `2-9`, `T` or `10`,
    /// `J`, `Q`, `K`, `A` and suits `C`, `D`, `H`, `S` in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCardError(s.to_string());

        let s = s.trim();
        let suit_char = s.chars().last().ok_or_else(err)?;
        let rank_str = &s[..s.len() - suit_char.len_utf8()];

        let rank = match rank_str.to_ascii_uppercase().as_str() {
            "2" => Rank::Deuce,
            "3" => Rank::Trey,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" | "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(err()),
        };

        let suit = match suit_char.to_ascii_uppercase() {
            'C' | '♣' => Suit::Clubs,
            'D' | '♦' => Suit::Diamonds,
            'H' | '♥' => Suit::Hearts,
            'S' | '♠' => Suit::Spades,
            _ => return Err(err()),
        };

        Ok(Card::new(rank, suit))
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }

    /// The rank numeric value, 2 for a deuce up to 14 for an ace.
    pub fn value(&self) -> u8 {
        *self as u8 + 2
    }

    /// Returns the rank with the given numeric value.
    pub fn from_value(value: u8) -> Option<Rank> {
        Rank::ranks().find(|r| r.value() == value)
    }

    /// The rank name in words.
    pub fn name(&self) -> &'static str {
        match self {
            Rank::Deuce => "Two",
            Rank::Trey => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            Rank::Ace => "Ace",
        }
    }

    /// The plural rank name, as in "a pair of Sixes".
    pub fn plural(&self) -> &'static str {
        match self {
            Rank::Deuce => "Twos",
            Rank::Trey => "Threes",
            Rank::Four => "Fours",
            Rank::Five => "Fives",
            Rank::Six => "Sixes",
            Rank::Seven => "Sevens",
            Rank::Eight => "Eights",
            Rank::Nine => "Nines",
            Rank::Ten => "Tens",
            Rank::Jack => "Jacks",
            Rank::Queen => "Queens",
            Rank::King => "Kings",
            Rank::Ace => "Aces",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Hearts suit.
    Hearts,
    /// Diamonds suit.
    Diamonds,
    /// Clubs suit.
    Clubs,
    /// Spades suit.
    Spades,
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades].into_iter()
    }

    /// The suit symbol.
    pub fn symbol(&self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

/// Error returned when dealing from an empty deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no cards left in the deck")]
pub struct DeckExhausted;

/// A cards Deck
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.shuffle(rng);
        deck
    }

    /// Shuffles the remaining cards with a Fisher-Yates permutation.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Deals a card from the top of the deck.
    pub fn deal(&mut self) -> Result<Card, DeckExhausted> {
        self.cards.pop().ok_or(DeckExhausted)
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Calls the `f` closure for each k-cards hand.
    ///
    /// Panics if k is not 2 <= k <= 7.
    pub fn for_each<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        assert!((2..=7).contains(&k), "2 <= k <= 7");

        let n = self.cards.len();
        if k > n {
            return;
        }

        // Indices of the current combination, always strictly increasing.
        let mut idx = [0usize; 7];
        for (i, v) in idx.iter_mut().enumerate().take(k) {
            *v = i;
        }

        let mut hand = [self.cards[0]; 7];
        loop {
            for i in 0..k {
                hand[i] = self.cards[idx[i]];
            }
            f(&hand[..k]);

            // Find the rightmost index that can still move forward.
            let Some(pos) = (0..k).rev().find(|&i| idx[i] < n - k + i) else {
                break;
            };

            idx[pos] += 1;
            for i in pos + 1..k {
                idx[i] = idx[i - 1] + 1;
            }
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Rank::ranks()
            .flat_map(|r| Suit::suits().map(move |s| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self { cards }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}
