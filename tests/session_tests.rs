//! Game session tests - flip resolution and one-shot completion

use tui_pairs::core::{FlipOutcome, GameSession, Phase, SessionEvent};
use tui_pairs::types::{Difficulty, Token, FLIP_BACK_DELAY_MS};

/// Indices of both tiles carrying each token, in board order.
fn pairs_by_token(session: &GameSession) -> Vec<(Token, usize, usize)> {
    let board = session.board().expect("board");
    let mut out = Vec::new();
    let mut seen: Vec<Token> = Vec::new();
    for tile in board.tiles() {
        let token = tile.token();
        if seen.contains(&token) {
            continue;
        }
        seen.push(token);
        let mut it = board
            .tiles()
            .iter()
            .enumerate()
            .filter(|(_, t)| t.token() == token)
            .map(|(i, _)| i);
        out.push((token, it.next().unwrap(), it.next().unwrap()));
    }
    out
}

#[test]
fn test_match_clears_flipped_synchronously() {
    let mut session = GameSession::new(5);
    session.select_difficulty(Difficulty::Casual);

    let (token, a, b) = pairs_by_token(&session)[0];
    assert_eq!(session.flip(a), FlipOutcome::Flipped);
    assert_eq!(session.flip(b), FlipOutcome::Matched(token));

    assert!(session.flipped().is_empty(), "no delay on a match");
    assert!(session.board().unwrap().get(a).unwrap().is_matched());
    assert!(session.board().unwrap().get(b).unwrap().is_matched());
    assert_eq!(session.matched_tokens(), &[token]);
}

#[test]
fn test_mismatch_clears_only_after_fixed_delay() {
    let mut session = GameSession::new(5);
    session.select_difficulty(Difficulty::Casual);

    let pairs = pairs_by_token(&session);
    let (_, a, _) = pairs[0];
    let (_, b, _) = pairs[1];

    session.flip(a);
    assert_eq!(session.flip(b), FlipOutcome::Mismatched);

    // Drive the delay in uneven tick sizes, as the event loop would.
    let mut remaining = FLIP_BACK_DELAY_MS;
    for dt in [16u32, 480, 250, 253] {
        session.tick(dt);
        remaining -= dt;
        assert_eq!(session.flipped().len(), 2, "{}ms still pending", remaining);
    }
    session.tick(1);
    assert!(session.flipped().is_empty());
    // Neither tile was matched by the mismatch.
    assert!(session.matched_tokens().is_empty());
    assert!(!session.board().unwrap().get(a).unwrap().is_matched());
}

#[test]
fn test_third_flip_while_pending_is_no_op() {
    let mut session = GameSession::new(5);
    session.select_difficulty(Difficulty::Casual);

    let pairs = pairs_by_token(&session);
    let (_, a, _) = pairs[0];
    let (_, b, _) = pairs[1];
    let (_, c, _) = pairs[2];

    session.flip(a);
    session.flip(b);
    assert_eq!(session.flip(c), FlipOutcome::Ignored);
    assert_eq!(session.flipped(), &[a, b], "pending pair untouched");
}

#[test]
fn test_completion_fires_exactly_once_under_redundant_checks() {
    let mut session = GameSession::new(5);
    session.select_difficulty(Difficulty::Casual);

    let mut completions = 0;
    for (token, a, b) in pairs_by_token(&session) {
        assert_eq!(session.flip(a), FlipOutcome::Flipped);
        assert_eq!(session.flip(b), FlipOutcome::Matched(token));

        // Force redundant completion checks after every match.
        session.check_completion();
        session.check_completion();
        while let Some(SessionEvent::Completed) = session.take_event() {
            completions += 1;
        }
    }

    assert_eq!(session.phase(), Phase::Completed);
    assert_eq!(completions, 1, "completion signal must be one-shot");

    // Still exactly once after more redundant checks.
    session.check_completion();
    assert_eq!(session.take_event(), None);
}

#[test]
fn test_flips_rejected_after_completion() {
    let mut session = GameSession::new(5);
    session.select_difficulty(Difficulty::Casual);
    for (_, a, b) in pairs_by_token(&session) {
        session.flip(a);
        session.flip(b);
    }
    assert_eq!(session.phase(), Phase::Completed);
    assert_eq!(session.flip(0), FlipOutcome::Ignored);
}

#[test]
fn test_reselecting_difficulty_resets_session() {
    let mut session = GameSession::new(5);
    session.select_difficulty(Difficulty::Casual);
    for (_, a, b) in pairs_by_token(&session) {
        session.flip(a);
        session.flip(b);
    }
    session.take_event();

    // Completed -> Playing with a fresh board and cleared state.
    session.select_difficulty(Difficulty::Normal);
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.board().unwrap().len(), 16);
    assert!(session.matched_tokens().is_empty());
    assert!(session.flipped().is_empty());
    assert_eq!(session.take_event(), None);
}
