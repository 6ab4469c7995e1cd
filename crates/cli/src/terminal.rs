// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Terminal I/O.
use anyhow::Result;
use crossterm::{
    cursor,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    execute, queue,
    style::{self, Stylize},
    terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode},
};
use futures_util::StreamExt;
use log::{debug, warn};
use std::{collections::VecDeque, io};
use tokio::sync::mpsc;

use royal_bot::{Decision, RandomStrategy, ThinkScheduler, passive_action};
use royal_core::{
    game_state::TableSnapshot,
    message::{PlayerAction, TableEvent},
    poker::{Card, Chips, Generation, Phase, PlayerCards, PlayerId},
    table::Table,
};

/// Runs the terminal loop.
pub async fn run(session: Session, mut decisions: mpsc::Receiver<Decision>) -> Result<()> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;

    let res = play(&mut stdout, session, &mut decisions).await;

    execute!(
        stdout,
        Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        cursor::Show
    )?;
    disable_raw_mode()?;

    res
}

async fn play(
    w: &mut impl io::Write,
    mut session: Session,
    decisions: &mut mpsc::Receiver<Decision>,
) -> Result<()> {
    session.start_hand();

    let mut reader = EventStream::new();
    loop {
        session.render(w)?;

        tokio::select! {
            // A bot has decided.
            Some(decision) = decisions.recv() => session.decision(decision),
            // We have received an event from the terminal.
            res = reader.next() => match res {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if !session.key(key.code) {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
        };
    }

    Ok(())
}

/// A game between the human at seat 0 and the bots.
#[derive(Debug)]
pub struct Session {
    table: Table,
    bots: Vec<RandomStrategy>,
    scheduler: ThinkScheduler,
    scheduled: Option<Generation>,
    human: PlayerId,
    raise_to: Chips,
    status: String,
    log: VecDeque<String>,
}

impl Session {
    const LOG_LINES: usize = 8;

    /// Creates a session, the bot at each seat uses the strategy at the same
    /// index.
    pub fn new(table: Table, bots: Vec<RandomStrategy>, scheduler: ThinkScheduler) -> Self {
        let state = table.snapshot();
        let human = state.players[0].player_id;

        Self {
            table,
            bots,
            scheduler,
            scheduled: None,
            human,
            raise_to: min_raise(&state),
            status: String::new(),
            log: VecDeque::with_capacity(Self::LOG_LINES),
        }
    }

    fn start_hand(&mut self) {
        match self.table.start_hand() {
            Ok(()) => self.status.clear(),
            Err(err) => self.status = format!("Cannot start a hand: {err}"),
        }

        self.update();
    }

    /// Handles a key press, returns false to quit.
    fn key(&mut self, code: KeyCode) -> bool {
        let state = self.table.snapshot();

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return false,
            KeyCode::Char('n') => self.start_hand(),
            KeyCode::Char('f') => self.act(PlayerAction::Fold, Chips::ZERO),
            KeyCode::Char('c') => self.act(PlayerAction::Call, Chips::ZERO),
            KeyCode::Char('k') => self.act(PlayerAction::Check, Chips::ZERO),
            KeyCode::Char('a') => self.act(PlayerAction::AllIn, Chips::ZERO),
            KeyCode::Char('r') => self.act(PlayerAction::Raise, self.raise_to),
            KeyCode::Char('+') | KeyCode::Up => self.raise_to += state.big_blind,
            KeyCode::Char('-') | KeyCode::Down => {
                self.raise_to = (self.raise_to - state.big_blind).max(min_raise(&state));
            }
            _ => {}
        }

        true
    }

    fn act(&mut self, action: PlayerAction, amount: Chips) {
        match self.table.apply_action(self.human, action, amount) {
            Ok(()) => self.status.clear(),
            Err(err) => self.status = err.to_string(),
        }

        self.update();
    }

    fn decision(&mut self, decision: Decision) {
        if !decision.is_current(self.table.generation()) {
            debug!("Dropped stale decision {decision:?}");
            return;
        }

        let player_id = decision.player_id;
        let res = self
            .table
            .apply_action(player_id, decision.action, decision.amount)
            .or_else(|err| {
                warn!("Player {player_id} decision rejected: {err}");
                let fallback = passive_action(&self.table.snapshot(), player_id);
                self.table.apply_action(player_id, fallback, Chips::ZERO)
            });

        match res {
            Ok(()) => self.status.clear(),
            Err(err) => self.status = err.to_string(),
        }

        self.update();
    }

    /// Logs the new table events and asks the bot to act if it is its turn.
    fn update(&mut self) {
        let state = self.table.snapshot();

        for event in self.table.take_events() {
            self.log.push_back(event_line(&event, &state));
        }

        while self.log.len() > Self::LOG_LINES {
            self.log.pop_front();
        }

        self.raise_to = min_raise(&state);

        if state.phase == Phase::Showdown && self.status.is_empty() {
            self.status = if self.table.can_start_hand() {
                "Press n for the next hand".to_string()
            } else {
                "Game over, press q to quit".to_string()
            };
        }

        if let Some(seat) = state.turn {
            if state.players[seat].is_bot && self.scheduled != Some(state.generation) {
                self.scheduler.schedule(&mut self.bots[seat], &state);
                self.scheduled = Some(state.generation);
            }
        }
    }

    fn render(&self, w: &mut impl io::Write) -> Result<()> {
        let state = self.table.snapshot().covered_for(self.human);

        queue!(w, Clear(ClearType::All))?;

        let header = format!(
            "Hand {} | {} | Pot {}",
            state.generation.hand,
            state.phase,
            state.total_pot()
        );
        queue!(
            w,
            cursor::MoveTo(0, 0),
            style::PrintStyledContent(header.as_str().bold())
        )?;

        let board = format!("Board {}", cards_text(&state.board));
        queue!(
            w,
            cursor::MoveTo(0, 1),
            style::PrintStyledContent(board.as_str().white())
        )?;

        for seat in 0..state.players.len() {
            print_player(w, &state, seat, 3 + seat as u16)?;
        }

        let mut row = 4 + state.players.len() as u16;
        queue!(
            w,
            cursor::MoveTo(0, row),
            style::PrintStyledContent(self.status.as_str().yellow())
        )?;

        let help = format!(
            "[f]old [c]all [k]check [r]aise to {} (+/-) [a]ll-in [n]ext hand [q]uit",
            self.raise_to
        );
        row += 1;
        queue!(
            w,
            cursor::MoveTo(0, row),
            style::PrintStyledContent(help.as_str().dark_grey())
        )?;

        row += 1;
        for line in &self.log {
            row += 1;
            queue!(w, cursor::MoveTo(0, row), style::Print(line))?;
        }

        w.flush()?;

        Ok(())
    }
}

fn print_player(w: &mut impl io::Write, state: &TableSnapshot, seat: usize, row: u16) -> Result<()> {
    let p = &state.players[seat];
    let is_turn = state.turn == Some(seat);

    let winning_chips = state
        .payoffs
        .iter()
        .filter(|payoff| payoff.player_id == p.player_id)
        .map(|payoff| payoff.chips)
        .sum::<Chips>();

    let marker = if is_turn {
        ">"
    } else if p.has_button {
        "D"
    } else {
        ""
    };

    let action = if winning_chips > Chips::ZERO {
        "WINNER"
    } else {
        p.action.label()
    };

    let bet = if p.bet > Chips::ZERO {
        p.bet.to_string()
    } else if winning_chips > Chips::ZERO {
        winning_chips.to_string()
    } else {
        String::new()
    };

    let cards = match p.cards {
        PlayerCards::None => String::new(),
        PlayerCards::Covered => "▒▒ ▒▒".to_string(),
        PlayerCards::Cards(c1, c2) => cards_text(&[c1, c2]),
    };

    let text = format!(
        "{marker:^3}|{:<10.10}|{:>10.10}|{:<10.10}|{:>10.10}| {cards}",
        p.name,
        p.chips.to_string(),
        action,
        bet,
    );

    let text = if is_turn {
        text.as_str().yellow()
    } else if p.is_active {
        text.as_str().dark_green()
    } else {
        text.as_str().dark_grey()
    };

    queue!(w, cursor::MoveTo(0, row), style::PrintStyledContent(text))?;

    Ok(())
}

/// The smallest raise the human is offered.
fn min_raise(state: &TableSnapshot) -> Chips {
    state.current_bet + state.big_blind
}

fn cards_text(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| format!("{}{}", c.rank(), c.suit().symbol()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A log line for a table event.
fn event_line(event: &TableEvent, state: &TableSnapshot) -> String {
    let name = |player_id: PlayerId| {
        state
            .player(player_id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| player_id.to_string())
    };

    match event {
        TableEvent::HandStarted { generation, dealer } => {
            format!("Hand {} dealer {}", generation.hand, name(*dealer))
        }
        TableEvent::PlayerActed {
            player_id,
            action: action @ (PlayerAction::Fold | PlayerAction::Check),
            ..
        } => format!("{} {}", name(*player_id), action.label()),
        TableEvent::PlayerActed {
            player_id,
            action,
            bet,
            ..
        } => format!("{} {} {bet}", name(*player_id), action.label()),
        TableEvent::PhaseChanged {
            phase: Phase::Showdown,
            ..
        } => "Showdown".to_string(),
        TableEvent::PhaseChanged { phase, board, pot } if board.is_empty() => {
            format!("{phase} pot {pot}")
        }
        TableEvent::PhaseChanged { phase, board, pot } => {
            format!("{phase} {} pot {pot}", cards_text(board))
        }
        TableEvent::HandEnded { payoffs } => payoffs
            .iter()
            .map(|payoff| match payoff.hand {
                Some(hand) => format!(
                    "{} wins {} with {}",
                    name(payoff.player_id),
                    payoff.chips,
                    hand.description()
                ),
                None => format!("{} wins {}", name(payoff.player_id), payoff.chips),
            })
            .collect::<Vec<_>>()
            .join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use royal_core::table::TableConfig;

    fn new_session() -> (Session, mpsc::Receiver<Decision>) {
        let config = TableConfig {
            seats: 3,
            ..TableConfig::default()
        };
        let table = Table::with_rng(config, StdRng::seed_from_u64(3));
        let bots = (0..3).map(RandomStrategy::with_seed).collect();
        let (scheduler, rx) = ThinkScheduler::new(
            ThinkScheduler::MIN_DELAY,
            ThinkScheduler::MAX_DELAY,
            StdRng::seed_from_u64(4),
        );

        (Session::new(table, bots, scheduler), rx)
    }

    #[test]
    fn cards_text_uses_symbols() {
        let cards = ["AS", "TD"].map(|c| c.parse::<Card>().unwrap());
        assert_eq!(cards_text(&cards), "A♠ T♦");
        assert_eq!(cards_text(&[]), "");
    }

    #[tokio::test(start_paused = true)]
    async fn fold_to_bots() {
        let (mut session, mut rx) = new_session();
        session.start_hand();

        // Dealer seat 1 acts first and is a bot.
        let state = session.table.snapshot();
        assert_eq!(state.turn, Some(1));
        assert_eq!(session.scheduled, Some(state.generation));
        assert_eq!(session.log[0], "Hand 1 dealer Alice");

        // Not the human turn.
        session.act(PlayerAction::Fold, Chips::ZERO);
        assert_eq!(session.status, "invalid action: not this player's turn");

        while session.table.phase().is_betting() {
            let state = session.table.snapshot();
            if state.turn == Some(0) {
                session.act(PlayerAction::Fold, Chips::ZERO);
            } else {
                let decision = rx.recv().await.unwrap();
                session.decision(decision);
            }
        }

        assert!(session.status.starts_with("Press n") || session.status.starts_with("Game over"));
        assert!(session.log.iter().any(|line| line.contains("wins")));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_decisions_are_dropped() {
        let (mut session, mut rx) = new_session();
        session.start_hand();

        let decision = rx.recv().await.unwrap();
        let stale = Decision {
            generation: Generation::default(),
            ..decision
        };

        let state = session.table.snapshot();
        session.decision(stale);
        assert_eq!(session.table.snapshot(), state);

        session.decision(decision);
        assert_ne!(session.table.generation(), state.generation);
    }
}
