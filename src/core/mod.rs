//! Core module - pure game logic with no external dependencies
//!
//! This module contains board generation, the match-detection state
//! machine, and the session timer. It has zero dependencies on UI or I/O.

pub mod board;
pub mod rng;
pub mod session;
pub mod timer;

// Re-export commonly used types
pub use board::{is_arrangement_valid, neighbors, Board, Tile};
pub use rng::SimpleRng;
pub use session::{FlipOutcome, GameSession, Phase, SessionEvent};
pub use timer::GameTimer;
