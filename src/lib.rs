//! tui-pairs: a terminal memory matching game.
//!
//! Players flip tiles to find matching pairs under a chosen difficulty;
//! elapsed time is tracked and best times are persisted locally per tier.
//! Game rules live in [`core`], persistence in [`ranking`], and the
//! terminal presentation in [`term`] and [`input`].

pub mod core;
pub mod input;
pub mod ranking;
pub mod term;
pub mod types;
