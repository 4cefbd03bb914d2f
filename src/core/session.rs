//! Game session module - match-detection state machine
//!
//! Tracks flipped and matched tiles for one play-through. The session moves
//! Idle -> Playing -> Completed; Completed is terminal until a new
//! difficulty is selected. Invalid flips are no-ops, never errors, so the
//! caller can forward raw input without pre-filtering.
//!
//! Timing follows the millisecond tick pattern: the caller drives
//! `tick(dt_ms)` and the session counts down the mismatch flip-back delay
//! internally.

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::core::rng::SimpleRng;
use crate::types::{Difficulty, Token, FLIP_BACK_DELAY_MS};

/// Session lifecycle phase.
///
/// Completion is modeled as a terminal phase rather than a boolean flag, so
/// re-running the completion check can never re-enter or re-signal it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No board yet
    Idle,
    /// Flips accepted
    Playing,
    /// All pairs resolved; flips ignored
    Completed,
}

/// Result of a single `flip` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Invalid-state flip; nothing changed
    Ignored,
    /// First tile of a pair attempt revealed
    Flipped,
    /// Second tile matched the first
    Matched(Token),
    /// Second tile did not match; both stay revealed until the flip-back
    /// delay elapses
    Mismatched,
}

/// One-shot event consumed by observers via `take_event`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// Fired exactly once per session when the last pair resolves
    Completed,
}

/// Complete state for one play-through
#[derive(Debug, Clone)]
pub struct GameSession {
    rng: SimpleRng,
    phase: Phase,
    board: Option<Board>,
    /// Flip order matters: the first entry is compared against the second.
    flipped: ArrayVec<usize, 2>,
    matched: Vec<Token>,
    /// Counts down after a mismatch; the pair stays revealed until zero.
    flip_back_timer_ms: u32,
    /// Pending completion event (consumed by observers).
    last_event: Option<SessionEvent>,
}

impl GameSession {
    /// Create an idle session with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            phase: Phase::Idle,
            board: None,
            flipped: ArrayVec::new(),
            matched: Vec::new(),
            flip_back_timer_ms: 0,
            last_event: None,
        }
    }

    /// Create an idle session seeded from the system clock
    pub fn from_entropy() -> Self {
        Self {
            rng: SimpleRng::from_entropy(),
            phase: Phase::Idle,
            board: None,
            flipped: ArrayVec::new(),
            matched: Vec::new(),
            flip_back_timer_ms: 0,
            last_event: None,
        }
    }

    /// Start (or restart) a session at the given difficulty.
    ///
    /// Valid from any phase; generates a fresh board and resets all
    /// per-session state.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) {
        self.board = Some(Board::generate(difficulty, &mut self.rng));
        self.flipped.clear();
        self.matched.clear();
        self.flip_back_timer_ms = 0;
        self.last_event = None;
        self.phase = Phase::Playing;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Currently flipped-but-unresolved tile indices, in flip order
    pub fn flipped(&self) -> &[usize] {
        &self.flipped
    }

    /// Tokens whose pairs have been resolved
    pub fn matched_tokens(&self) -> &[Token] {
        &self.matched
    }

    /// True when the tile at `index` should be shown face up
    pub fn is_revealed(&self, index: usize) -> bool {
        if self.flipped.contains(&index) {
            return true;
        }
        self.board
            .as_ref()
            .and_then(|b| b.get(index))
            .map(|t| t.is_matched())
            .unwrap_or(false)
    }

    /// Flip the tile at `index`.
    ///
    /// No-op (`FlipOutcome::Ignored`) outside Playing, for out-of-range or
    /// already-revealed tiles, and while two unresolved tiles are pending.
    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        if self.phase != Phase::Playing {
            return FlipOutcome::Ignored;
        }
        if self.flipped.len() == 2 {
            // Two tiles pending resolution; no queuing of further flips.
            return FlipOutcome::Ignored;
        }

        let board = match self.board.as_ref() {
            Some(b) => b,
            None => return FlipOutcome::Ignored,
        };
        let tile = match board.get(index) {
            Some(t) => *t,
            None => return FlipOutcome::Ignored,
        };
        if tile.is_matched() || self.flipped.contains(&index) {
            return FlipOutcome::Ignored;
        }

        self.flipped.push(index);
        if self.flipped.len() < 2 {
            return FlipOutcome::Flipped;
        }

        let first = self
            .board
            .as_ref()
            .and_then(|b| b.get(self.flipped[0]))
            .map(|t| t.token());

        if first == Some(tile.token()) {
            let token = tile.token();
            if let Some(board) = self.board.as_mut() {
                board.mark_matched(token);
            }
            self.matched.push(token);
            self.flipped.clear();
            self.check_completion();
            FlipOutcome::Matched(token)
        } else {
            self.flip_back_timer_ms = FLIP_BACK_DELAY_MS;
            FlipOutcome::Mismatched
        }
    }

    /// Advance session timers by `dt_ms` milliseconds.
    ///
    /// Clears a mismatched pair once the flip-back delay has elapsed.
    pub fn tick(&mut self, dt_ms: u32) {
        if self.phase != Phase::Playing || self.flip_back_timer_ms == 0 {
            return;
        }
        self.flip_back_timer_ms = self.flip_back_timer_ms.saturating_sub(dt_ms);
        if self.flip_back_timer_ms == 0 {
            self.flipped.clear();
        }
    }

    /// Transition to Completed when every pair is resolved.
    ///
    /// Idempotent: only the Playing -> Completed edge queues the completion
    /// event, so redundant calls never signal twice.
    pub fn check_completion(&mut self) {
        if self.phase != Phase::Playing {
            return;
        }
        let pair_count = match self.board.as_ref() {
            Some(b) => b.difficulty().pair_count(),
            None => return,
        };
        if self.matched.len() == pair_count {
            self.phase = Phase::Completed;
            self.last_event = Some(SessionEvent::Completed);
        }
    }

    /// Consume the pending session event, if any
    pub fn take_event(&mut self) -> Option<SessionEvent> {
        self.last_event.take()
    }
}
