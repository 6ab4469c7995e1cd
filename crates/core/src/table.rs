// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A Hold'em table.
//!
//! The table is a state machine that moves a hand through its phases, it
//! validates every request before changing any state so that a rejected
//! request leaves the table as it was.
use log::{debug, error, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{EngineError, Rejection},
    game_state::{PlayerSnapshot, TableSnapshot},
    message::{HandPayoff, PlayerAction, TableEvent},
    poker::{Card, Chips, Deck, DeckExhausted, Generation, Phase, PlayerCards, PlayerId},
};

pub mod player;
pub mod showdown;

use player::{Player, PlayersState};
pub use showdown::TiePolicy;

/// Names given to the bot seats.
const NICKNAMES: [&str; 10] = [
    "Alice", "Bob", "Charlie", "Dave", "Erin", "Frank", "Grace", "Heidi", "Mike", "Olivia",
];

/// The table configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// The small blind.
    pub small_blind: Chips,
    /// The big blind.
    pub big_blind: Chips,
    /// The chips each player starts with.
    pub starting_chips: Chips,
    /// The number of seats.
    pub seats: usize,
    /// How tied hands are paid.
    pub tie_policy: TiePolicy,
    /// Seat 0 is played by a human, all other seats are bots.
    pub human_seat: bool,
}

impl TableConfig {
    /// The minimum number of seats.
    pub const MIN_SEATS: usize = 2;
    /// The maximum number of seats.
    pub const MAX_SEATS: usize = 10;

    /// The chips at the table, None if they overflow a chips amount.
    pub fn total_chips(&self) -> Option<Chips> {
        u32::try_from(self.seats)
            .ok()
            .and_then(|seats| self.starting_chips.amount().checked_mul(seats))
            .map(Chips::new)
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            small_blind: Chips::new(10),
            big_blind: Chips::new(20),
            starting_chips: Chips::new(1_000),
            seats: 5,
            tie_policy: TiePolicy::Split,
            human_seat: true,
        }
    }
}

/// A Hold'em table.
#[derive(Debug)]
pub struct Table {
    config: TableConfig,
    phase: Phase,
    players: PlayersState,
    deck: Deck,
    board: Vec<Card>,
    pot: Chips,
    current_bet: Chips,
    dealer: usize,
    turn: Option<usize>,
    generation: Generation,
    events: Vec<TableEvent>,
    payoffs: Vec<HandPayoff>,
    rng: StdRng,
}

impl Table {
    /// Creates a new table.
    ///
    /// Panics if the number of seats is not in the 2..=10 range or if the
    /// chips at the table overflow a chips amount.
    pub fn new(config: TableConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates a new table with user initialized randomness.
    pub fn with_rng(config: TableConfig, rng: StdRng) -> Self {
        assert!(
            (TableConfig::MIN_SEATS..=TableConfig::MAX_SEATS).contains(&config.seats),
            "Invalid number of seats {}",
            config.seats
        );
        assert!(
            config.total_chips().is_some(),
            "Starting chips {} overflow with {} seats",
            config.starting_chips,
            config.seats
        );

        let mut players = PlayersState::default();
        for seat in 0..config.seats {
            let is_bot = !(config.human_seat && seat == 0);
            let name = if is_bot {
                // Bots are named from the first nickname after the human seat.
                let idx = if config.human_seat { seat - 1 } else { seat };
                NICKNAMES[idx % NICKNAMES.len()].to_string()
            } else {
                "You".to_string()
            };

            let player_id = PlayerId::new(seat as u32 + 1);
            players.join(Player::new(player_id, name, config.starting_chips, is_bot));
        }

        Self {
            config,
            phase: Phase::Idle,
            players,
            deck: Deck::default(),
            board: Vec::default(),
            pot: Chips::ZERO,
            current_bet: Chips::ZERO,
            dealer: 0,
            turn: None,
            generation: Generation::default(),
            events: Vec::default(),
            payoffs: Vec::default(),
            rng,
        }
    }

    /// The table configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// The hand phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The table generation, it changes with each accepted request.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Returns the events published since the last call.
    pub fn take_events(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.events)
    }

    /// Checks if at least two players have chips to play a hand.
    pub fn can_start_hand(&self) -> bool {
        !self.phase.is_betting() && self.players.count_with_chips() >= 2
    }

    /// Starts a new hand: moves the button, deals the hole cards, posts the
    /// blinds and gives the turn to the player after the big blind.
    pub fn start_hand(&mut self) -> Result<(), EngineError> {
        if self.phase.is_betting() {
            return Err(Rejection::HandInProgress.into());
        }

        if self.players.count_with_chips() < 2 {
            return Err(Rejection::NotEnoughPlayers.into());
        }

        // Deal before changing the table so that a failure leaves it as it was.
        let mut deck = Deck::new_and_shuffled(&mut self.rng);
        let mut hole_cards = Vec::with_capacity(self.players.count());
        for player in self.players.iter() {
            let cards = if player.chips > Chips::ZERO {
                let (c1, c2) = deck
                    .deal()
                    .and_then(|c1| Ok((c1, deck.deal()?)))
                    .inspect_err(|e| error!("Cannot deal the hole cards: {e}"))?;
                PlayerCards::Cards(c1, c2)
            } else {
                PlayerCards::None
            };
            hole_cards.push(cards);
        }

        self.deck = deck;
        self.board.clear();
        self.payoffs.clear();
        self.pot = Chips::ZERO;
        self.players.start_hand(hole_cards);

        self.dealer = self
            .players
            .next_seat(self.dealer, |p| p.is_active)
            .unwrap_or(self.dealer);
        let sb = self
            .players
            .next_seat(self.dealer, |p| p.is_active)
            .unwrap_or(self.dealer);
        let bb = self.players.next_seat(sb, |p| p.is_active).unwrap_or(sb);

        self.players[sb].bet(PlayerAction::SmallBlind, self.config.small_blind);
        self.players[bb].bet(PlayerAction::BigBlind, self.config.big_blind);
        self.current_bet = self.config.big_blind;

        self.generation = Generation {
            hand: self.generation.hand + 1,
            action: 0,
        };
        self.phase = Phase::Preflop;

        let dealer_id = self.players[self.dealer].player_id;
        info!(
            "Hand {} started, dealer {dealer_id} blinds {}/{}",
            self.generation.hand, self.config.small_blind, self.config.big_blind
        );

        self.events.push(TableEvent::HandStarted {
            generation: self.generation,
            dealer: dealer_id,
        });
        self.events.push(TableEvent::PhaseChanged {
            phase: Phase::Preflop,
            board: Vec::new(),
            pot: self.pot,
        });

        self.update_round(bb).inspect_err(|e| error!("Hand start failed: {e}"))
    }

    /// Applies a player action, the amount is the bet to raise to and is only
    /// used by [PlayerAction::Raise].
    pub fn apply_action(
        &mut self,
        player_id: PlayerId,
        action: PlayerAction,
        amount: Chips,
    ) -> Result<(), EngineError> {
        let seat = self
            .players
            .position(player_id)
            .ok_or(EngineError::UnknownPlayer(player_id))?;

        if let Err(rejection) = self.check_action(seat, action, amount) {
            warn!("Player {player_id} {action:?} rejected: {rejection}");
            return Err(rejection.into());
        }

        let current_bet = self.current_bet;
        let player = &mut self.players[seat];
        player.has_acted = true;

        let mut raised = false;
        match action {
            PlayerAction::Fold => player.fold(),
            PlayerAction::Check => player.action = PlayerAction::Check,
            PlayerAction::Call => player.bet(PlayerAction::Call, current_bet),
            PlayerAction::Raise => {
                player.bet(PlayerAction::Raise, amount);
                raised = true;
            }
            PlayerAction::AllIn => {
                let all_in = player.bet + player.chips;
                player.bet(PlayerAction::AllIn, all_in);
                raised = all_in > current_bet;
            }
            PlayerAction::None | PlayerAction::SmallBlind | PlayerAction::BigBlind => {}
        }

        if player.is_active && player.chips == Chips::ZERO {
            player.action = PlayerAction::AllIn;
        }

        let (bet, chips, recorded) = (player.bet, player.chips, player.action);
        if raised {
            self.current_bet = bet;
            self.players.reopen_round(seat);
        }

        self.generation.action += 1;
        debug!("Player {player_id} {recorded:?} bet {bet} chips {chips}");
        self.events.push(TableEvent::PlayerActed {
            player_id,
            action: recorded,
            bet,
            chips,
        });

        self.update_round(seat)
    }

    /// Returns a snapshot of the table state.
    pub fn snapshot(&self) -> TableSnapshot {
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(seat, p)| PlayerSnapshot {
                player_id: p.player_id,
                name: p.name.clone(),
                chips: p.chips,
                bet: p.bet,
                action: p.action,
                cards: p.hole_cards,
                is_bot: p.is_bot,
                is_active: p.is_active,
                has_acted: p.has_acted,
                has_button: self.phase != Phase::Idle && seat == self.dealer,
            })
            .collect();

        TableSnapshot {
            phase: self.phase,
            generation: self.generation,
            board: self.board.clone(),
            pot: self.pot,
            current_bet: self.current_bet,
            small_blind: self.config.small_blind,
            big_blind: self.config.big_blind,
            dealer: self.dealer,
            turn: self.turn,
            players,
            payoffs: self.payoffs.clone(),
        }
    }

    /// Checks if an action is legal for the player at the given seat.
    fn check_action(
        &self,
        seat: usize,
        action: PlayerAction,
        amount: Chips,
    ) -> Result<(), Rejection> {
        if !self.phase.is_betting() {
            return Err(Rejection::NoBettingRound(self.phase));
        }

        let player = &self.players[seat];
        if !player.is_active {
            return Err(Rejection::Folded);
        }

        if self.turn != Some(seat) {
            return Err(Rejection::NotYourTurn);
        }

        match action {
            PlayerAction::Check if player.bet < self.current_bet => {
                Err(Rejection::CallOwed(self.current_bet - player.bet))
            }
            PlayerAction::Raise if amount <= self.current_bet => Err(Rejection::RaiseTooSmall {
                to: amount,
                current_bet: self.current_bet,
            }),
            PlayerAction::Raise if amount - player.bet > player.chips => {
                Err(Rejection::InsufficientChips {
                    to: amount,
                    available: player.bet + player.chips,
                })
            }
            PlayerAction::None | PlayerAction::SmallBlind | PlayerAction::BigBlind => {
                Err(Rejection::NotAnAction(action))
            }
            _ => Ok(()),
        }
    }

    /// Ends the hand, moves to the next phase or passes the turn after the
    /// player at `seat` has acted.
    fn update_round(&mut self, seat: usize) -> Result<(), EngineError> {
        if self.players.count_active() < 2 {
            self.win_by_fold();
            return Ok(());
        }

        if self.is_round_complete() {
            self.next_round()?;
        } else {
            let max_bet = self.players.max_active_bet();
            self.turn = self
                .players
                .next_seat(seat, |p| p.can_act() && (!p.has_acted || p.bet < max_bet));
        }

        Ok(())
    }

    /// Checks if all players in the hand have acted.
    ///
    /// When all the other active players are all in and the bets are matched
    /// the round is complete even if the last player with chips has not
    /// acted, as nobody is left to respond to a raise. In heads-up a small
    /// blind short call all in skips the big blind option.
    fn is_round_complete(&self) -> bool {
        if self.players.count_active() < 2 {
            return true;
        }

        // A player who didn't match the bet and is not all in has to act.
        let max_bet = self.players.max_active_bet();
        if self.players.iter().any(|p| p.can_act() && p.bet < max_bet) {
            return false;
        }

        // Only one player has chips all others are all in.
        if self.players.count_active_with_chips() < 2 {
            return true;
        }

        self.players
            .iter()
            .filter(|p| p.can_act())
            .all(|p| p.has_acted)
    }

    /// Collects the bets and deals the next streets while betting rounds are
    /// complete, with fewer than two players able to act the board runs out.
    fn next_round(&mut self) -> Result<(), EngineError> {
        while self.is_round_complete() {
            self.pot += self.players.collect_bets();
            self.current_bet = Chips::ZERO;

            let (phase, cards) = match self.phase {
                Phase::Preflop => (Phase::Flop, 3),
                Phase::Flop => (Phase::Turn, 1),
                Phase::Turn => (Phase::River, 1),
                Phase::River => {
                    self.enter_showdown();
                    return Ok(());
                }
                Phase::Idle | Phase::Showdown => return Ok(()),
            };

            self.deal_board(cards)
                .inspect_err(|e| error!("Cannot deal the {phase}: {e}"))?;
            self.phase = phase;
            self.turn = self.players.next_seat(self.dealer, Player::can_act);

            debug!("{phase} {:?} pot {}", self.board, self.pot);
            self.events.push(TableEvent::PhaseChanged {
                phase,
                board: self.board.clone(),
                pot: self.pot,
            });
        }

        Ok(())
    }

    fn deal_board(&mut self, count: usize) -> Result<(), DeckExhausted> {
        for _ in 0..count {
            self.board.push(self.deck.deal()?);
        }

        Ok(())
    }

    /// Pays the pot to the only player left in the hand.
    fn win_by_fold(&mut self) {
        self.pot += self.players.collect_bets();

        let winner = (0..self.players.count()).find(|&seat| self.players[seat].is_active);
        let payoffs = match winner {
            Some(seat) => {
                let player = &mut self.players[seat];
                player.chips += self.pot;
                info!("Player {} wins {} uncontested", player.player_id, self.pot);

                vec![HandPayoff {
                    player_id: player.player_id,
                    chips: self.pot,
                    hand: None,
                }]
            }
            None => Vec::new(),
        };

        self.end_hand(payoffs);
    }

    /// Evaluates the active players hands and pays the winners.
    fn enter_showdown(&mut self) {
        let payoffs = showdown::resolve(
            &mut self.players,
            &self.board,
            self.pot,
            self.dealer,
            self.config.tie_policy,
        );

        self.end_hand(payoffs);
    }

    fn end_hand(&mut self, payoffs: Vec<HandPayoff>) {
        self.pot = Chips::ZERO;
        self.current_bet = Chips::ZERO;
        self.turn = None;
        self.phase = Phase::Showdown;

        self.events.push(TableEvent::PhaseChanged {
            phase: Phase::Showdown,
            board: self.board.clone(),
            pot: self.pot,
        });
        self.events.push(TableEvent::HandEnded {
            payoffs: payoffs.clone(),
        });
        self.payoffs = payoffs;

        info!("Hand {} ended", self.generation.hand);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::AHashSet;

    fn new_table(config: TableConfig) -> Table {
        Table::with_rng(config, StdRng::seed_from_u64(13))
    }

    fn id(seat: usize) -> PlayerId {
        PlayerId::new(seat as u32 + 1)
    }

    fn act(table: &mut Table, seat: usize, action: PlayerAction, amount: u32) {
        table
            .apply_action(id(seat), action, Chips::new(amount))
            .unwrap();
    }

    fn total_chips(table: &Table) -> Chips {
        table.players.iter().map(|p| p.chips + p.bet).sum::<Chips>() + table.pot
    }

    fn count_phase_changes(events: &[TableEvent], phase: Phase) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, TableEvent::PhaseChanged { phase: p, .. } if *p == phase))
            .count()
    }

    #[test]
    fn start_hand_layout() {
        let mut table = new_table(TableConfig::default());
        assert_eq!(table.phase(), Phase::Idle);
        table.start_hand().unwrap();

        let state = table.snapshot();
        assert_eq!(state.phase, Phase::Preflop);
        assert_eq!(state.dealer, 1);
        assert!(state.players[1].has_button);
        assert_eq!(state.players[2].bet, Chips::new(10));
        assert_eq!(state.players[2].action, PlayerAction::SmallBlind);
        assert_eq!(state.players[3].bet, Chips::new(20));
        assert_eq!(state.players[3].action, PlayerAction::BigBlind);
        assert_eq!(state.turn, Some(4));
        assert_eq!(state.current_bet, Chips::new(20));
        assert_eq!(state.pot, Chips::ZERO);
        assert_eq!(state.total_pot(), Chips::new(30));
        assert_eq!(state.generation, Generation { hand: 1, action: 0 });
        assert_eq!(table.deck.count(), Deck::SIZE - 10);

        assert_eq!(state.players[0].name, "You");
        assert_eq!(state.players[1].name, "Alice");
        assert_eq!(state.players[4].name, "Dave");
        assert!(!state.players[0].is_bot);
        assert!(state.players[1..].iter().all(|p| p.is_bot));
        assert!(state
            .players
            .iter()
            .all(|p| matches!(p.cards, PlayerCards::Cards(..))));

        let events = table.take_events();
        assert!(matches!(
            events[0],
            TableEvent::HandStarted { dealer, .. } if dealer == id(1)
        ));
        assert!(table.take_events().is_empty());
    }

    #[test]
    fn hand_in_progress() {
        let mut table = new_table(TableConfig::default());
        table.start_hand().unwrap();
        let state = table.snapshot();

        assert_eq!(
            table.start_hand(),
            Err(EngineError::InvalidAction(Rejection::HandInProgress))
        );
        assert_eq!(table.snapshot(), state);
    }

    #[test]
    fn rejected_actions_leave_state_unchanged() {
        let mut table = new_table(TableConfig::default());

        assert_eq!(
            table.apply_action(id(0), PlayerAction::Check, Chips::ZERO),
            Err(EngineError::InvalidAction(Rejection::NoBettingRound(
                Phase::Idle
            )))
        );

        table.start_hand().unwrap();
        let state = table.snapshot();

        let rejected = [
            (9, PlayerAction::Fold, 0, None),
            (0, PlayerAction::Call, 0, Some(Rejection::NotYourTurn)),
            (4, PlayerAction::Check, 0, Some(Rejection::CallOwed(Chips::new(20)))),
            (
                4,
                PlayerAction::Raise,
                20,
                Some(Rejection::RaiseTooSmall {
                    to: Chips::new(20),
                    current_bet: Chips::new(20),
                }),
            ),
            (
                4,
                PlayerAction::Raise,
                1001,
                Some(Rejection::InsufficientChips {
                    to: Chips::new(1001),
                    available: Chips::new(1000),
                }),
            ),
            (
                4,
                PlayerAction::BigBlind,
                0,
                Some(Rejection::NotAnAction(PlayerAction::BigBlind)),
            ),
        ];

        for (seat, action, amount, rejection) in rejected {
            let res = table.apply_action(id(seat), action, Chips::new(amount));
            match rejection {
                Some(rejection) => assert_eq!(res, Err(EngineError::InvalidAction(rejection))),
                None => assert_eq!(res, Err(EngineError::UnknownPlayer(id(seat)))),
            }
            assert_eq!(table.snapshot(), state);
        }

        // A folded player cannot act again.
        act(&mut table, 4, PlayerAction::Fold, 0);
        assert_eq!(
            table.apply_action(id(4), PlayerAction::Call, Chips::ZERO),
            Err(EngineError::InvalidAction(Rejection::Folded))
        );
    }

    #[test]
    fn raise_reopens_action() {
        let mut table = new_table(TableConfig::default());
        table.start_hand().unwrap();
        table.take_events();

        act(&mut table, 4, PlayerAction::Call, 0);
        act(&mut table, 0, PlayerAction::Call, 0);
        act(&mut table, 1, PlayerAction::Call, 0);
        act(&mut table, 2, PlayerAction::Call, 0);

        // The big blind raises, everybody has to act again.
        act(&mut table, 3, PlayerAction::Raise, 60);
        let state = table.snapshot();
        assert_eq!(state.phase, Phase::Preflop);
        assert_eq!(state.current_bet, Chips::new(60));
        assert_eq!(state.turn, Some(4));
        assert_eq!(state.players.iter().filter(|p| p.has_acted).count(), 1);

        act(&mut table, 4, PlayerAction::Call, 0);
        act(&mut table, 0, PlayerAction::Call, 0);
        act(&mut table, 1, PlayerAction::Fold, 0);
        assert_eq!(table.phase(), Phase::Preflop);
        act(&mut table, 2, PlayerAction::Call, 0);

        let state = table.snapshot();
        assert_eq!(state.phase, Phase::Flop);
        assert_eq!(state.board.len(), 3);
        assert_eq!(state.pot, Chips::new(260));
        assert_eq!(state.current_bet, Chips::ZERO);
        // First active player after the dealer.
        assert_eq!(state.turn, Some(2));
        assert_eq!(state.generation, Generation { hand: 1, action: 9 });

        let events = table.take_events();
        assert_eq!(count_phase_changes(&events, Phase::Flop), 1);
        assert_eq!(total_chips(&table), Chips::new(5_000));
    }

    #[test]
    fn fold_to_big_blind() {
        let mut table = new_table(TableConfig::default());
        table.start_hand().unwrap();

        for seat in [4, 0, 1, 2] {
            act(&mut table, seat, PlayerAction::Fold, 0);
        }

        let state = table.snapshot();
        assert_eq!(state.phase, Phase::Showdown);
        assert_eq!(state.turn, None);
        assert_eq!(state.pot, Chips::ZERO);
        assert_eq!(state.players[3].chips, Chips::new(1_010));
        assert_eq!(state.players[2].chips, Chips::new(990));
        assert_eq!(state.payoffs.len(), 1);
        assert_eq!(state.payoffs[0].player_id, id(3));
        assert_eq!(state.payoffs[0].chips, Chips::new(30));
        assert_eq!(state.payoffs[0].hand, None);

        let events = table.take_events();
        assert!(matches!(events.last(), Some(TableEvent::HandEnded { payoffs }) if payoffs.len() == 1));

        assert_eq!(
            table.apply_action(id(3), PlayerAction::Check, Chips::ZERO),
            Err(EngineError::InvalidAction(Rejection::NoBettingRound(
                Phase::Showdown
            )))
        );

        // Next hand moves the button.
        table.start_hand().unwrap();
        let state = table.snapshot();
        assert_eq!(state.dealer, 2);
        assert_eq!(state.turn, Some(0));
        assert!(state.payoffs.is_empty());
        assert_eq!(state.generation, Generation { hand: 2, action: 0 });
    }

    #[test]
    fn fold_to_bettor_after_flop() {
        let mut table = new_table(TableConfig::default());
        table.start_hand().unwrap();

        for seat in [4, 0, 1, 2] {
            act(&mut table, seat, PlayerAction::Call, 0);
        }
        act(&mut table, 3, PlayerAction::Check, 0);
        assert_eq!(table.phase(), Phase::Flop);

        act(&mut table, 2, PlayerAction::Raise, 40);
        let state = table.snapshot();
        assert_eq!(state.pot, Chips::new(100));
        assert_eq!(state.total_pot(), Chips::new(140));

        for seat in [3, 4, 0, 1] {
            act(&mut table, seat, PlayerAction::Fold, 0);
        }

        let state = table.snapshot();
        assert_eq!(state.phase, Phase::Showdown);
        assert_eq!(state.board.len(), 3);
        assert_eq!(state.pot, Chips::ZERO);
        assert_eq!(state.payoffs.len(), 1);
        assert_eq!(state.payoffs[0].player_id, id(2));
        assert_eq!(state.payoffs[0].chips, Chips::new(140));
        assert_eq!(state.players[2].chips, Chips::new(1_080));
        assert!(state.players.iter().all(|p| p.bet == Chips::ZERO));
        assert_eq!(total_chips(&table), Chips::new(5_000));
    }

    fn play_to_river_tie(tie_policy: TiePolicy) -> Table {
        let config = TableConfig {
            small_blind: Chips::new(15),
            big_blind: Chips::new(45),
            seats: 3,
            tie_policy,
            ..TableConfig::default()
        };

        let mut table = new_table(config);
        table.start_hand().unwrap();
        assert_eq!(table.snapshot().turn, Some(1));

        // Preflop.
        act(&mut table, 1, PlayerAction::Call, 0);
        act(&mut table, 2, PlayerAction::Call, 0);
        act(&mut table, 0, PlayerAction::Check, 0);

        // Flop.
        assert_eq!(table.phase(), Phase::Flop);
        act(&mut table, 2, PlayerAction::Check, 0);
        act(&mut table, 0, PlayerAction::Check, 0);
        act(&mut table, 1, PlayerAction::Fold, 0);

        // Turn.
        assert_eq!(table.phase(), Phase::Turn);
        act(&mut table, 2, PlayerAction::Check, 0);
        act(&mut table, 0, PlayerAction::Check, 0);
        assert_eq!(table.phase(), Phase::River);

        // Both seats play ace high.
        let cards = |s: &str| {
            s.split_whitespace()
                .map(|c| c.parse::<Card>().unwrap())
                .collect::<Vec<_>>()
        };
        table.board = cards("2C 7D 9H JS KC");
        let (c1, c2) = (cards("AH 3D"), cards("AD 4C"));
        table.players[0].hole_cards = PlayerCards::Cards(c1[0], c1[1]);
        table.players[2].hole_cards = PlayerCards::Cards(c2[0], c2[1]);

        act(&mut table, 2, PlayerAction::Check, 0);
        act(&mut table, 0, PlayerAction::Check, 0);
        assert_eq!(table.phase(), Phase::Showdown);
        table
    }

    #[test]
    fn split_pot_odd_chip() {
        let table = play_to_river_tie(TiePolicy::Split);
        let state = table.snapshot();

        assert_eq!(state.payoffs.len(), 2);
        assert_eq!(state.payoffs[0].player_id, id(2));
        assert_eq!(state.payoffs[0].chips, Chips::new(68));
        assert_eq!(state.payoffs[1].player_id, id(0));
        assert_eq!(state.payoffs[1].chips, Chips::new(67));
        assert_eq!(state.payoffs[0].description(), "High Card Ace");

        assert_eq!(state.players[0].chips, Chips::new(1_022));
        assert_eq!(state.players[1].chips, Chips::new(955));
        assert_eq!(state.players[2].chips, Chips::new(1_023));
        assert_eq!(total_chips(&table), Chips::new(3_000));
    }

    #[test]
    fn first_seat_takes_tie() {
        let table = play_to_river_tie(TiePolicy::FirstSeat);
        let state = table.snapshot();

        assert_eq!(state.payoffs.len(), 1);
        assert_eq!(state.payoffs[0].player_id, id(2));
        assert_eq!(state.players[2].chips, Chips::new(1_090));
        assert_eq!(state.players[0].chips, Chips::new(955));
    }

    #[test]
    fn heads_up_all_in_runs_out_board() {
        let config = TableConfig {
            seats: 2,
            ..TableConfig::default()
        };
        let mut table = new_table(config);
        table.start_hand().unwrap();
        table.take_events();

        // Dealer is seat 1, the small blind seat 0 acts first.
        let state = table.snapshot();
        assert_eq!(state.dealer, 1);
        assert_eq!(state.turn, Some(0));

        act(&mut table, 0, PlayerAction::AllIn, 0);
        let state = table.snapshot();
        assert_eq!(state.current_bet, Chips::new(1_000));
        assert_eq!(state.players[0].action, PlayerAction::AllIn);
        assert_eq!(state.turn, Some(1));

        act(&mut table, 1, PlayerAction::Call, 0);
        let state = table.snapshot();
        assert_eq!(state.phase, Phase::Showdown);
        assert_eq!(state.board.len(), 5);
        assert_eq!(state.players[1].action, PlayerAction::AllIn);
        assert!(!state.payoffs.is_empty());
        assert_eq!(total_chips(&table), Chips::new(2_000));

        let events = table.take_events();
        for phase in [Phase::Flop, Phase::Turn, Phase::River, Phase::Showdown] {
            assert_eq!(count_phase_changes(&events, phase), 1);
        }
    }

    #[test]
    fn heads_up_short_call_runs_out_board() {
        let mut table = new_table(TableConfig {
            seats: 2,
            ..TableConfig::default()
        });
        table.players[0].chips = Chips::new(15);
        table.start_hand().unwrap();

        // The small blind calls all in short of the big blind, the big blind
        // has nobody left to raise against.
        act(&mut table, 0, PlayerAction::Call, 0);
        let state = table.snapshot();
        assert_eq!(state.phase, Phase::Showdown);
        assert_eq!(state.turn, None);
        assert_eq!(state.board.len(), 5);
        assert_eq!(state.players[0].action, PlayerAction::AllIn);
        assert_eq!(state.players[1].action, PlayerAction::BigBlind);
        assert!(!state.players[1].has_acted);

        let paid = state.payoffs.iter().map(|p| p.chips).sum::<Chips>();
        assert_eq!(paid, Chips::new(35));
        assert_eq!(total_chips(&table), Chips::new(1_015));
    }

    #[test]
    fn short_call_goes_all_in() {
        let mut table = new_table(TableConfig::default());
        table.players[4].chips = Chips::new(15);
        table.start_hand().unwrap();

        act(&mut table, 4, PlayerAction::Call, 0);
        let state = table.snapshot();
        assert_eq!(state.players[4].bet, Chips::new(15));
        assert_eq!(state.players[4].chips, Chips::ZERO);
        assert_eq!(state.players[4].action, PlayerAction::AllIn);
        assert!(state.players[4].is_active);
        assert_eq!(state.turn, Some(0));
    }

    #[test]
    fn busted_players_sit_out() {
        let mut table = new_table(TableConfig::default());
        table.players[0].chips = Chips::ZERO;
        table.players[4].chips = Chips::ZERO;
        table.start_hand().unwrap();

        let state = table.snapshot();
        assert!(!state.players[0].is_active);
        assert_eq!(state.players[0].cards, PlayerCards::None);
        assert_eq!(state.dealer, 1);
        assert_eq!(state.players[2].action, PlayerAction::SmallBlind);
        assert_eq!(state.players[3].action, PlayerAction::BigBlind);
        // Seats 4 and 0 are skipped.
        assert_eq!(state.turn, Some(1));
        assert_eq!(table.deck.count(), Deck::SIZE - 6);

        assert_eq!(
            table.apply_action(id(0), PlayerAction::Fold, Chips::ZERO),
            Err(EngineError::InvalidAction(Rejection::Folded))
        );
    }

    #[test]
    fn not_enough_players() {
        let mut table = new_table(TableConfig {
            seats: 3,
            ..TableConfig::default()
        });
        table.players[0].chips = Chips::ZERO;
        table.players[1].chips = Chips::ZERO;

        assert!(!table.can_start_hand());
        assert_eq!(
            table.start_hand(),
            Err(EngineError::InvalidAction(Rejection::NotEnoughPlayers))
        );
        assert_eq!(table.phase(), Phase::Idle);
    }

    #[test]
    fn chips_are_conserved() {
        let mut table = new_table(TableConfig {
            seats: 6,
            ..TableConfig::default()
        });

        for _ in 0..50 {
            if !table.can_start_hand() {
                break;
            }

            table.start_hand().unwrap();
            while let Some(seat) = table.snapshot().turn {
                let player = &table.players[seat];
                let action = if player.bet < table.current_bet {
                    PlayerAction::Call
                } else if table.generation.hand % 3 == 0 {
                    PlayerAction::AllIn
                } else {
                    PlayerAction::Check
                };
                act(&mut table, seat, action, 0);
                assert_eq!(total_chips(&table), Chips::new(6_000));
            }

            assert_eq!(table.phase(), Phase::Showdown);
            assert_eq!(table.board.len(), 5);
            let dealt = table
                .players
                .iter()
                .filter(|p| p.hole_cards != PlayerCards::None)
                .count();
            assert_eq!(table.deck.count() + table.board.len() + 2 * dealt, Deck::SIZE);
        }
    }

    #[test]
    fn dealt_cards_are_unique() {
        let mut table = new_table(TableConfig {
            seats: 10,
            ..TableConfig::default()
        });
        table.start_hand().unwrap();

        // Everybody checks down to the river.
        while let Some(seat) = table.turn {
            let action = if table.players[seat].bet < table.current_bet {
                PlayerAction::Call
            } else {
                PlayerAction::Check
            };
            act(&mut table, seat, action, 0);
        }

        let mut cards = AHashSet::new();
        for player in table.players.iter() {
            if let PlayerCards::Cards(c1, c2) = player.hole_cards {
                assert!(cards.insert(c1));
                assert!(cards.insert(c2));
            }
        }

        for card in &table.board {
            assert!(cards.insert(*card));
        }

        assert_eq!(cards.len(), 25);
        assert_eq!(table.deck.count(), Deck::SIZE - 25);
    }

    #[test]
    fn all_in_with_table_chips_limit() {
        let config = TableConfig {
            starting_chips: Chips::new(u32::MAX / 3),
            seats: 3,
            human_seat: false,
            ..TableConfig::default()
        };
        let total = config.total_chips().unwrap();
        assert_eq!(total, Chips::new(u32::MAX));

        let mut table = new_table(config);
        table.start_hand().unwrap();

        while let Some(seat) = table.turn {
            act(&mut table, seat, PlayerAction::AllIn, 0);
        }

        let state = table.snapshot();
        assert_eq!(state.phase, Phase::Showdown);
        assert_eq!(state.board.len(), 5);
        let paid = state.payoffs.iter().map(|p| p.chips).sum::<Chips>();
        assert_eq!(paid, total);
        assert_eq!(total_chips(&table), total);
    }

    #[test]
    #[should_panic]
    fn table_chips_overflow() {
        new_table(TableConfig {
            starting_chips: Chips::new(2_000_000_000),
            seats: 3,
            ..TableConfig::default()
        });
    }

    #[test]
    #[should_panic]
    fn too_many_seats() {
        new_table(TableConfig {
            seats: 11,
            ..TableConfig::default()
        });
    }
}
