//! Timer module - wall-clock elapsed seconds
//!
//! Elapsed time is always a delta against the recorded start instant, never
//! accumulated tick counts, so it stays correct when the event loop stalls
//! or the process is backgrounded. `poll` reports a value only when the
//! integer-seconds reading actually changes, de-duplicating sub-second
//! polls.
//!
//! Every operation has an `*_at(now)` form taking an explicit instant;
//! the plain forms use `Instant::now()`. Tests fabricate time by offsetting
//! a base instant.

use std::time::{Duration, Instant};

/// Elapsed-seconds counter for one session; no persistence
#[derive(Debug, Clone)]
pub struct GameTimer {
    /// Set while running
    started_at: Option<Instant>,
    /// Elapsed time accumulated before the current start
    held: Duration,
    last_emitted: Option<u64>,
}

impl GameTimer {
    pub fn new() -> Self {
        Self {
            started_at: None,
            held: Duration::ZERO,
            last_emitted: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    /// Start (or resume) counting from `now`. No-op while already running.
    pub fn start_at(&mut self, now: Instant) {
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
    }

    pub fn stop(&mut self) {
        self.stop_at(Instant::now());
    }

    /// Freeze the counter at its value as of `now`
    pub fn stop_at(&mut self, now: Instant) {
        if let Some(started) = self.started_at.take() {
            self.held += now.saturating_duration_since(started);
        }
    }

    /// Return to zero and forget the last emitted value
    pub fn reset(&mut self) {
        self.started_at = None;
        self.held = Duration::ZERO;
        self.last_emitted = None;
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs_at(Instant::now())
    }

    /// Whole elapsed seconds as of `now`
    pub fn elapsed_secs_at(&self, now: Instant) -> u64 {
        let running = self
            .started_at
            .map(|started| now.saturating_duration_since(started))
            .unwrap_or(Duration::ZERO);
        (self.held + running).as_secs()
    }

    pub fn poll(&mut self) -> Option<u64> {
        self.poll_at(Instant::now())
    }

    /// Report the current reading only when the integer-seconds value
    /// changed since the last report.
    pub fn poll_at(&mut self, now: Instant) -> Option<u64> {
        let secs = self.elapsed_secs_at(now);
        if self.last_emitted == Some(secs) {
            return None;
        }
        self.last_emitted = Some(secs);
        Some(secs)
    }
}

impl Default for GameTimer {
    fn default() -> Self {
        Self::new()
    }
}
