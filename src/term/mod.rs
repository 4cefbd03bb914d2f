//! Terminal presentation layer.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{format_time, GameView, Viewport};
pub use renderer::TerminalRenderer;
