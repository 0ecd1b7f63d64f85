//! Game session controller.
//!
//! Owns the whole mutable game state and is driven exclusively by two kinds of
//! callbacks from the event loop: key presses ([`Game::handle_key`]) and frame
//! ticks ([`Game::on_frame`]). Rendering only ever reads the state between
//! those calls, so it always sees a fully applied update.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::rngs::StdRng;
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::board::{board_rows, BoardRow};
use crate::celebration::CelebrationAnimation;
use crate::chains::ChainDeck;
use crate::config::Config;
use crate::error::{GameError, Result};
use crate::record::{self, BestTime, RecordOutcome, RecordStore};
use crate::session::{GuessOutcome, SessionState};
use crate::timer::Countdown;

pub const MIN_WIDTH: u16 = 30;
pub const MIN_HEIGHT: u16 = 14;

pub const SUCCESS_TITLE: &str = "Congratulations!";
pub const TIMEOUT_TITLE: &str = "Time's up!";
pub const TIMEOUT_MESSAGE: &str = "Better luck next time.";
pub const NEW_BEST_MESSAGE: &str = "New Personal Best!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    /// Start overlay shown, countdown not running
    Idle,
    Playing,
    /// End overlay shown until the player asks for another round
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    Completed { seconds_left: u32, new_best: bool },
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndScreen {
    pub title: String,
    pub message: String,
    pub outcome: RoundEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Fails when a `width` x `height` surface cannot hold the board.
pub fn check_surface(width: u16, height: u16) -> Result<()> {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return Err(GameError::SurfaceTooSmall { width, height });
    }
    Ok(())
}

#[derive(Debug)]
pub struct Game<S: RecordStore, R: Rng = StdRng> {
    config: Config,
    deck: ChainDeck<R>,
    session: SessionState,
    phase: Phase,
    countdown: Countdown,
    input: String,
    shake_until: Option<Instant>,
    best_time: Option<BestTime>,
    record_message: Option<String>,
    end_screen: Option<EndScreen>,
    celebration: CelebrationAnimation,
    store: S,
    viewport: (u16, u16),
    surface_ok: bool,
}

impl<S: RecordStore, R: Rng> Game<S, R> {
    pub fn new(config: Config, deck: ChainDeck<R>, store: S) -> Self {
        let session = SessionState::new(deck.current().clone(), config.round_secs);
        let best_time = store.load();
        info!(
            chains = deck.len(),
            best = ?best_time.as_ref().map(|b| b.seconds_left),
            "game initialised"
        );
        Self {
            config,
            deck,
            session,
            phase: Phase::Idle,
            countdown: Countdown::default(),
            input: String::new(),
            shake_until: None,
            best_time,
            record_message: None,
            end_screen: None,
            celebration: CelebrationAnimation::new(),
            store,
            viewport: (80, 24),
            surface_ok: true,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn rows(&self) -> Vec<BoardRow> {
        board_rows(&self.session)
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_until.is_some()
    }

    pub fn is_low_time(&self) -> bool {
        self.session.time_remaining <= self.config.low_time_secs
    }

    pub fn timer_label(&self) -> String {
        format!("Time: {}s", self.session.time_remaining)
    }

    pub fn best_time(&self) -> Option<&BestTime> {
        self.best_time.as_ref()
    }

    pub fn best_time_label(&self) -> String {
        record::best_time_label(self.best_time.as_ref())
    }

    pub fn record_message(&self) -> Option<&str> {
        self.record_message.as_deref()
    }

    pub fn end_screen(&self) -> Option<&EndScreen> {
        self.end_screen.as_ref()
    }

    pub fn celebration(&self) -> &CelebrationAnimation {
        &self.celebration
    }

    pub fn countdown_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn surface_ok(&self) -> bool {
        self.surface_ok
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Idle -> Playing
    pub fn start(&mut self, now: Instant) {
        if self.phase != Phase::Idle {
            return;
        }
        info!(chain = ?self.session.chain.words(), "starting game");
        self.begin_round(now);
    }

    /// Ended -> Playing on the next chain of the shuffle order
    pub fn play_again(&mut self, now: Instant) {
        if self.phase != Phase::Ended {
            return;
        }
        let chain = self.deck.advance().clone();
        info!(chain = ?chain.words(), "playing again");
        self.session = SessionState::new(chain, self.config.round_secs);
        self.record_message = None;
        self.end_screen = None;
        self.shake_until = None;
        self.celebration.stop();
        self.begin_round(now);
    }

    fn begin_round(&mut self, now: Instant) {
        self.session.time_remaining = self.config.round_secs;
        self.session.running = true;
        self.input.clear();
        self.countdown.start(now);
        self.set_phase(Phase::Playing);
    }

    fn set_phase(&mut self, next: Phase) {
        debug!(from = %self.phase, to = %next, "phase change");
        self.phase = next;
    }

    /// Checks the current input against the target word. Only meaningful while playing.
    pub fn submit(&mut self, now: Instant) -> Option<GuessOutcome> {
        if self.phase != Phase::Playing {
            return None;
        }
        let guess = std::mem::take(&mut self.input);
        let outcome = self.session.apply_guess(&guess, self.config.penalty_secs);

        match outcome {
            GuessOutcome::Incorrect => {
                debug!(
                    guess = %guess.trim(),
                    revealed = self.session.revealed_count,
                    time_remaining = self.session.time_remaining,
                    "wrong guess"
                );
                self.shake_until = Some(now + Duration::from_millis(self.config.shake_millis));
            }
            GuessOutcome::Correct => {
                debug!(target_index = self.session.target_index, "correct guess");
            }
            GuessOutcome::ChainComplete => self.complete(now),
        }
        Some(outcome)
    }

    fn complete(&mut self, now: Instant) {
        self.countdown.stop();
        self.session.running = false;

        let seconds_left = self.session.time_remaining;
        let new_best = match record::submit_time(&mut self.store, seconds_left) {
            Ok(RecordOutcome::NewBest) => true,
            Ok(RecordOutcome::NotImproved) => false,
            Err(err) => {
                warn!(%err, "failed to persist best time");
                false
            }
        };
        if new_best {
            self.best_time = self.store.load();
            self.record_message = Some(NEW_BEST_MESSAGE.to_string());
        }
        info!(seconds_left, new_best, "chain completed");

        self.end(EndScreen {
            title: SUCCESS_TITLE.to_string(),
            message: format!("You've completed the word chain with {seconds_left}s left!"),
            outcome: RoundEnd::Completed {
                seconds_left,
                new_best,
            },
        });
        let (width, height) = self.viewport;
        self.celebration
            .start(&self.config.celebration, width, height, now);
    }

    fn time_out(&mut self) {
        self.countdown.stop();
        self.session.running = false;
        info!(target_index = self.session.target_index, "time ran out");
        self.end(EndScreen {
            title: TIMEOUT_TITLE.to_string(),
            message: TIMEOUT_MESSAGE.to_string(),
            outcome: RoundEnd::TimedOut,
        });
    }

    fn end(&mut self, screen: EndScreen) {
        self.input.clear();
        self.end_screen = Some(screen);
        self.set_phase(Phase::Ended);
    }

    /// One countdown second. Ends the round once no time is left.
    pub fn tick(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        if self.session.time_remaining == 0 {
            self.time_out();
            return;
        }
        self.session.time_remaining -= 1;
        if self.session.time_remaining == 0 {
            self.time_out();
        }
    }

    /// Applies due countdown ticks, expires the shake cue and steps the celebration.
    pub fn on_frame(&mut self, now: Instant) {
        for _ in 0..self.countdown.due_ticks(now) {
            self.tick();
        }
        if self.shake_until.is_some_and(|until| now >= until) {
            self.shake_until = None;
        }
        self.celebration.update(now);
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = (width, height);
        match check_surface(width, height) {
            Ok(()) => self.surface_ok = true,
            Err(err) => {
                warn!(%err, "board render disabled");
                self.surface_ok = false;
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> KeyAction {
        if key.kind != KeyEventKind::Press {
            return KeyAction::Continue;
        }
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return KeyAction::Quit;
        }

        match (self.phase, key.code) {
            (Phase::Idle, KeyCode::Enter) => self.start(now),
            (Phase::Playing, KeyCode::Enter) => {
                self.submit(now);
            }
            (Phase::Playing, KeyCode::Backspace) => {
                self.input.pop();
            }
            (Phase::Playing, KeyCode::Char(c))
                if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() =>
            {
                self.input.push(c)
            }
            (Phase::Ended, KeyCode::Enter) => self.play_again(now),
            _ => {}
        }
        KeyAction::Continue
    }
}
