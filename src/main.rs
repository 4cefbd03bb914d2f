//! Terminal pairs runner (default binary).
//!
//! Drives the menu -> play -> nickname -> standings flow on top of the
//! library crate. Uses crossterm for input and the framebuffer renderer
//! for output.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use tui_pairs::core::{GameSession, GameTimer, SessionEvent};
use tui_pairs::input::{handle_key_event, should_quit};
use tui_pairs::ranking::{FileStore, RankingRecord, RankingStore};
use tui_pairs::term::{GameView, TerminalRenderer, Viewport};
use tui_pairs::types::{Difficulty, GameAction, DIFFICULTIES, MAX_NICKNAME_LEN, TICK_MS};

/// Current UI screen.
enum Screen {
    Menu {
        selected: usize,
    },
    Playing,
    Nickname {
        input: String,
        error: Option<String>,
    },
    Standings {
        difficulty: Difficulty,
        records: Vec<RankingRecord>,
        highlight: Option<usize>,
    },
}

fn rankings_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tui-pairs-rankings.json")
}

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn move_cursor(cursor: usize, action: GameAction, rows: usize, cols: usize) -> usize {
    let row = cursor / cols;
    let col = cursor % cols;
    let (row, col) = match action {
        GameAction::CursorUp => ((row + rows - 1) % rows, col),
        GameAction::CursorDown => ((row + 1) % rows, col),
        GameAction::CursorLeft => (row, (col + cols - 1) % cols),
        GameAction::CursorRight => (row, (col + 1) % cols),
        _ => (row, col),
    };
    row * cols + col
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut session = GameSession::from_entropy();
    let mut timer = GameTimer::new();
    let mut rankings = RankingStore::new(FileStore::open(rankings_path())?);
    let view = GameView::default();

    let mut screen = Screen::Menu { selected: 0 };
    let mut cursor = 0usize;
    let mut elapsed = 0u64;
    let mut final_time = 0u64;

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let fb = match &screen {
            Screen::Menu { selected } => view.render_menu(*selected, viewport),
            Screen::Playing => view.render_playing(&session, cursor, elapsed, viewport),
            Screen::Nickname { input, error } => {
                view.render_nickname(final_time, input, error.as_deref(), viewport)
            }
            Screen::Standings {
                difficulty,
                records,
                highlight,
            } => view.render_standings(*difficulty, records, *highlight, viewport),
        };
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        let mut next_screen: Option<Screen> = None;

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match &mut screen {
                        Screen::Menu { selected } => {
                            if should_quit(key) {
                                return Ok(());
                            }
                            let mut start: Option<Difficulty> = None;
                            match handle_key_event(key) {
                                Some(GameAction::CursorUp) => {
                                    *selected =
                                        (*selected + DIFFICULTIES.len() - 1) % DIFFICULTIES.len();
                                }
                                Some(GameAction::CursorDown) => {
                                    *selected = (*selected + 1) % DIFFICULTIES.len();
                                }
                                Some(GameAction::Flip) => {
                                    start = Some(DIFFICULTIES[*selected]);
                                }
                                _ => {}
                            }
                            if let KeyCode::Char(c @ '1'..='5') = key.code {
                                start = Some(DIFFICULTIES[c as usize - '1' as usize]);
                            }
                            if let Some(difficulty) = start {
                                session.select_difficulty(difficulty);
                                cursor = 0;
                                elapsed = 0;
                                timer.reset();
                                timer.start();
                                next_screen = Some(Screen::Playing);
                            }
                        }
                        Screen::Playing => {
                            if should_quit(key) {
                                return Ok(());
                            }
                            let (rows, cols) = match session.board() {
                                Some(b) => (b.rows(), b.cols()),
                                None => (1, 1),
                            };
                            match handle_key_event(key) {
                                Some(GameAction::Flip) => {
                                    session.flip(cursor);
                                }
                                Some(GameAction::NewGame) => {
                                    timer.reset();
                                    next_screen = Some(Screen::Menu { selected: 0 });
                                }
                                Some(action) => {
                                    cursor = move_cursor(cursor, action, rows, cols);
                                }
                                None => {}
                            }
                        }
                        Screen::Nickname { input, error } => match key.code {
                            KeyCode::Esc => {
                                if let Some(board) = session.board() {
                                    let difficulty = board.difficulty();
                                    next_screen = Some(Screen::Standings {
                                        difficulty,
                                        records: rankings.query(difficulty),
                                        highlight: None,
                                    });
                                }
                            }
                            KeyCode::Backspace => {
                                input.pop();
                            }
                            KeyCode::Enter => {
                                if let Some(board) = session.board() {
                                    let difficulty = board.difficulty();
                                    match rankings.submit(difficulty, input, final_time) {
                                        Ok(()) => {
                                            let nickname = input.trim().to_string();
                                            let records = rankings.query(difficulty);
                                            let highlight = records.iter().position(|r| {
                                                r.nickname == nickname && r.time == final_time
                                            });
                                            next_screen = Some(Screen::Standings {
                                                difficulty,
                                                records,
                                                highlight,
                                            });
                                        }
                                        Err(err) => {
                                            // Surface and let the player retry or skip.
                                            *error = Some(err.to_string());
                                        }
                                    }
                                }
                            }
                            KeyCode::Char(c) => {
                                if input.chars().count() < MAX_NICKNAME_LEN
                                    && (c.is_alphanumeric() || c == ' ' || c == '-' || c == '_')
                                {
                                    input.push(c);
                                }
                            }
                            _ => {}
                        },
                        Screen::Standings { .. } => {
                            if should_quit(key) {
                                return Ok(());
                            }
                            if matches!(
                                handle_key_event(key),
                                Some(GameAction::NewGame) | Some(GameAction::Flip)
                            ) {
                                next_screen = Some(Screen::Menu { selected: 0 });
                            }
                        }
                    }
                }
            }
        }

        if let Some(next) = next_screen {
            screen = next;
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            session.tick(TICK_MS);
            if let Some(secs) = timer.poll() {
                elapsed = secs;
            }

            if let Some(SessionEvent::Completed) = session.take_event() {
                timer.stop();
                final_time = timer.elapsed_secs();
                screen = Screen::Nickname {
                    input: String::new(),
                    error: None,
                };
            }
        }
    }
}
