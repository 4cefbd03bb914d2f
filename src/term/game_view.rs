//! GameView: maps game state into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSession, Phase};
use crate::ranking::RankingRecord;
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Difficulty, DIFFICULTIES};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Format whole seconds as MM:SS.
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// A lightweight terminal view for the matching game.
pub struct GameView {
    /// Card width in terminal columns (wide enough for the longest token
    /// name plus padding).
    card_w: u16,
    /// Card height in terminal rows.
    card_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            card_w: 11,
            card_h: 3,
        }
    }
}

impl GameView {
    pub fn new(card_w: u16, card_h: u16) -> Self {
        Self { card_w, card_h }
    }

    fn base_style() -> CellStyle {
        CellStyle::default()
    }

    fn title_style() -> CellStyle {
        CellStyle {
            fg: Rgb::new(180, 160, 255),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        }
    }

    fn hint_style() -> CellStyle {
        CellStyle {
            fg: Rgb::new(130, 130, 140),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: true,
        }
    }

    fn hidden_style() -> CellStyle {
        CellStyle {
            fg: Rgb::new(240, 240, 250),
            bg: Rgb::new(80, 60, 160),
            bold: false,
            dim: false,
        }
    }

    fn revealed_style() -> CellStyle {
        CellStyle {
            fg: Rgb::new(30, 30, 40),
            bg: Rgb::new(230, 230, 240),
            bold: true,
            dim: false,
        }
    }

    fn matched_style() -> CellStyle {
        CellStyle {
            fg: Rgb::new(120, 200, 120),
            bg: Rgb::new(25, 50, 25),
            bold: false,
            dim: true,
        }
    }

    fn cursor_style() -> CellStyle {
        CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(200, 120, 40),
            bold: true,
            dim: false,
        }
    }

    fn highlight_style() -> CellStyle {
        CellStyle {
            fg: Rgb::new(120, 230, 120),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        }
    }

    /// Render the difficulty selection menu.
    pub fn render_menu(&self, selected: usize, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(Self::base_style().into_cell(' '));

        let w = viewport.width;
        let top = viewport.height.saturating_sub(12) / 2;

        fb.put_str_centered(0, top, w, "T U I  P A I R S", Self::title_style());
        fb.put_str_centered(0, top + 1, w, "find the matching pairs", Self::hint_style());

        for (i, diff) in DIFFICULTIES.iter().enumerate() {
            let label = format!(
                "{:<8} {}x{}  ({} cards)",
                diff.as_str(),
                diff.rows(),
                diff.cols(),
                diff.card_count()
            );
            let style = if i == selected {
                Self::cursor_style()
            } else {
                Self::base_style()
            };
            fb.put_str_centered(0, top + 3 + i as u16, w, &label, style);
        }

        fb.put_str_centered(
            0,
            top + 10,
            w,
            "up/down select   enter start   q quit",
            Self::hint_style(),
        );
        fb
    }

    /// Render an in-progress (or just-completed) session.
    pub fn render_playing(
        &self,
        session: &GameSession,
        cursor: usize,
        elapsed_secs: u64,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(Self::base_style().into_cell(' '));

        let board = match session.board() {
            Some(b) => b,
            None => return fb,
        };

        let cols = board.cols() as u16;
        let rows = board.rows() as u16;
        let grid_w = cols * self.card_w + (cols - 1);
        let grid_h = rows * self.card_h + (rows - 1);
        let ox = viewport.width.saturating_sub(grid_w) / 2;
        let oy = viewport.height.saturating_sub(grid_h + 4) / 2 + 2;

        let header = format!(
            "{}   {}   pairs {}/{}",
            board.difficulty().as_str(),
            format_time(elapsed_secs),
            board.matched_pair_count(),
            board.difficulty().pair_count()
        );
        fb.put_str_centered(0, oy.saturating_sub(2), viewport.width, &header, Self::title_style());

        for (i, tile) in board.tiles().iter().enumerate() {
            let row = (i / board.cols()) as u16;
            let col = (i % board.cols()) as u16;
            let x = ox + col * (self.card_w + 1);
            let y = oy + row * (self.card_h + 1);

            let style = if tile.is_matched() {
                Self::matched_style()
            } else if i == cursor && session.phase() == Phase::Playing {
                Self::cursor_style()
            } else if session.is_revealed(i) {
                Self::revealed_style()
            } else {
                Self::hidden_style()
            };

            fb.fill_rect(x, y, self.card_w, self.card_h, ' ', style);
            let face = if session.is_revealed(i) {
                tile.token().as_str()
            } else {
                "?"
            };
            fb.put_str_centered(x, y + self.card_h / 2, self.card_w, face, style);
        }

        fb.put_str_centered(
            0,
            oy + grid_h + 1,
            viewport.width,
            "arrows move   enter flip   n new game   q quit",
            Self::hint_style(),
        );
        fb
    }

    /// Render the nickname prompt shown after completion.
    pub fn render_nickname(
        &self,
        final_time: u64,
        input: &str,
        error: Option<&str>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(Self::base_style().into_cell(' '));

        let w = viewport.width;
        let top = viewport.height.saturating_sub(8) / 2;

        fb.put_str_centered(0, top, w, "C L E A R E D !", Self::title_style());
        fb.put_str_centered(
            0,
            top + 1,
            w,
            &format!("your time: {}", format_time(final_time)),
            Self::base_style(),
        );
        fb.put_str_centered(0, top + 3, w, "enter a nickname for the rankings", Self::base_style());
        fb.put_str_centered(
            0,
            top + 4,
            w,
            &format!("[ {}_ ]", input),
            Self::revealed_style(),
        );
        if let Some(msg) = error {
            fb.put_str_centered(0, top + 5, w, msg, Self::cursor_style());
        }
        fb.put_str_centered(
            0,
            top + 7,
            w,
            "enter save   esc skip",
            Self::hint_style(),
        );
        fb
    }

    /// Render the top-10 standings for one difficulty.
    ///
    /// `highlight` marks the player's freshly submitted row.
    pub fn render_standings(
        &self,
        difficulty: Difficulty,
        records: &[RankingRecord],
        highlight: Option<usize>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear(Self::base_style().into_cell(' '));

        let w = viewport.width;
        let top = viewport.height.saturating_sub(16) / 2;

        fb.put_str_centered(
            0,
            top,
            w,
            &format!("BEST TIMES - {}", difficulty.as_str()),
            Self::title_style(),
        );

        if records.is_empty() {
            fb.put_str_centered(0, top + 2, w, "no records yet", Self::hint_style());
        }

        for (i, record) in records.iter().enumerate() {
            let line = format!(
                "{:>2}. {:<16} {}",
                i + 1,
                record.nickname,
                format_time(record.time)
            );
            let style = if highlight == Some(i) {
                Self::highlight_style()
            } else {
                Self::base_style()
            };
            fb.put_str_centered(0, top + 2 + i as u16, w, &line, style);
        }

        fb.put_str_centered(
            0,
            top + 14,
            w,
            "n new game   q quit",
            Self::hint_style(),
        );
        fb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameSession;

    fn contains_str(fb: &FrameBuffer, needle: &str) -> bool {
        let w = fb.width() as usize;
        let text: String = fb.cells().iter().map(|c| c.ch).collect();
        text.as_bytes()
            .chunks(w)
            .any(|row| String::from_utf8_lossy(row).contains(needle))
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(61), "01:01");
        assert_eq!(format_time(754), "12:34");
    }

    #[test]
    fn test_menu_lists_all_difficulties() {
        let view = GameView::default();
        let fb = view.render_menu(0, Viewport::new(80, 24));
        for diff in DIFFICULTIES {
            assert!(contains_str(&fb, diff.as_str()), "missing {}", diff.as_str());
        }
    }

    #[test]
    fn test_playing_view_hides_unflipped_tiles() {
        let view = GameView::default();
        let mut session = GameSession::new(1);
        session.select_difficulty(Difficulty::Casual);

        let fb = view.render_playing(&session, 0, 0, Viewport::new(100, 30));
        assert!(contains_str(&fb, "?"));
        // No token name should be visible before any flip.
        for tile in session.board().unwrap().tiles() {
            assert!(!contains_str(&fb, tile.token().as_str()));
        }
    }

    #[test]
    fn test_playing_view_shows_flipped_token() {
        let view = GameView::default();
        let mut session = GameSession::new(1);
        session.select_difficulty(Difficulty::Casual);
        session.flip(0);

        let name = session.board().unwrap().get(0).unwrap().token().as_str();
        let fb = view.render_playing(&session, 0, 0, Viewport::new(100, 30));
        assert!(contains_str(&fb, name));
    }
}
