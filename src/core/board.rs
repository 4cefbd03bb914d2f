//! Board module - paired tiles over a fixed grid
//!
//! A board is an ordered sequence of tiles laid out row-major over the
//! difficulty's rows x cols grid. Every token appears exactly twice. The
//! generator rejects arrangements where two grid-adjacent (up/down/left/
//! right) tiles share a token, resampling up to a bounded number of
//! attempts; if the bound is exhausted the last arrangement is accepted
//! as-is, so the adjacency property is best-effort while pair cardinality
//! is absolute.

use arrayvec::ArrayVec;

use crate::core::rng::SimpleRng;
use crate::types::{Difficulty, Token, SHUFFLE_MAX_ATTEMPTS, TOKEN_CATALOG};

/// A single card on the board.
///
/// Tiles are created once at generation and never recreated mid-session;
/// `is_matched` flips permanently true when the tile's pair is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    id: u8,
    token: Token,
    matched: bool,
}

impl Tile {
    fn new(id: u8, token: Token) -> Self {
        Self {
            id,
            token,
            matched: false,
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn token(&self) -> Token {
        self.token
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }
}

/// The game board - row-major tile storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    difficulty: Difficulty,
    tiles: Vec<Tile>,
}

impl Board {
    /// Generate a shuffled board for the given difficulty.
    ///
    /// Draws `pair_count` distinct tokens from the catalog without
    /// replacement, duplicates them into pairs, then Fisher-Yates shuffles
    /// and validates the arrangement, resampling up to
    /// [`SHUFFLE_MAX_ATTEMPTS`] times.
    pub fn generate(difficulty: Difficulty, rng: &mut SimpleRng) -> Self {
        Self::generate_with_attempts(difficulty, rng).0
    }

    /// Like [`Board::generate`], also reporting how many shuffle attempts
    /// the arrangement took (1..=[`SHUFFLE_MAX_ATTEMPTS`]).
    pub fn generate_with_attempts(difficulty: Difficulty, rng: &mut SimpleRng) -> (Self, u32) {
        let pair_count = difficulty.pair_count();

        // Select distinct tokens by shuffling the full catalog.
        let mut catalog: Vec<Token> = (0..TOKEN_CATALOG.len() as u8).map(Token).collect();
        rng.shuffle(&mut catalog);

        let mut tokens: Vec<Token> = Vec::with_capacity(pair_count * 2);
        tokens.extend_from_slice(&catalog[..pair_count]);
        tokens.extend_from_slice(&catalog[..pair_count]);

        let mut attempts = 0;
        loop {
            rng.shuffle(&mut tokens);
            attempts += 1;
            if is_arrangement_valid(&tokens, difficulty) || attempts >= SHUFFLE_MAX_ATTEMPTS {
                // On bound exhaustion the last arrangement is kept.
                break;
            }
        }

        let tiles = tokens
            .into_iter()
            .enumerate()
            .map(|(i, token)| Tile::new(i as u8, token))
            .collect();

        (Self { difficulty, tiles }, attempts)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn rows(&self) -> usize {
        self.difficulty.rows()
    }

    pub fn cols(&self) -> usize {
        self.difficulty.cols()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Get tile at flat index
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Mark both tiles carrying `token` as matched.
    ///
    /// Returns the number of tiles marked (2 for a token on this board).
    pub(crate) fn mark_matched(&mut self, token: Token) -> usize {
        let mut marked = 0;
        for tile in &mut self.tiles {
            if tile.token == token {
                tile.matched = true;
                marked += 1;
            }
        }
        marked
    }

    /// Count of resolved pairs
    pub fn matched_pair_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.matched).count() / 2
    }

    /// True when every tile has been matched
    pub fn all_matched(&self) -> bool {
        self.tiles.iter().all(|t| t.matched)
    }
}

/// Flat indices of the up/down/left/right neighbors of `index`, bounds-checked.
pub fn neighbors(index: usize, difficulty: Difficulty) -> ArrayVec<usize, 4> {
    let rows = difficulty.rows();
    let cols = difficulty.cols();
    let row = index / cols;
    let col = index % cols;

    let mut out = ArrayVec::new();
    if row > 0 {
        out.push(index - cols);
    }
    if row + 1 < rows {
        out.push(index + cols);
    }
    if col > 0 {
        out.push(index - 1);
    }
    if col + 1 < cols {
        out.push(index + 1);
    }
    out
}

/// Check the adjacency constraint: no grid-adjacent cells share a token.
pub fn is_arrangement_valid(tokens: &[Token], difficulty: Difficulty) -> bool {
    debug_assert_eq!(tokens.len(), difficulty.card_count());
    for (i, token) in tokens.iter().enumerate() {
        for n in neighbors(i, difficulty) {
            if tokens[n] == *token {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_corner_edge_center() {
        // 4x4: index 0 is top-left corner, 1 is a top edge, 5 is interior.
        let d = Difficulty::Normal;
        let corner = neighbors(0, d);
        assert_eq!(corner.len(), 2);
        assert!(corner.contains(&4) && corner.contains(&1));

        let edge = neighbors(1, d);
        assert_eq!(edge.len(), 3);

        let center = neighbors(5, d);
        assert_eq!(center.len(), 4);
        assert!(
            center.contains(&1)
                && center.contains(&9)
                && center.contains(&4)
                && center.contains(&6)
        );
    }

    #[test]
    fn test_arrangement_validation_rejects_adjacent_pair() {
        // 2x4 board with both "slime" tiles side by side.
        let tokens: Vec<Token> = [0u8, 0, 1, 2, 1, 2, 3, 3].map(Token).to_vec();
        assert!(!is_arrangement_valid(&tokens, Difficulty::Casual));
    }

    #[test]
    fn test_arrangement_validation_accepts_spread_pairs() {
        // A B C D
        // C D A B  - no orthogonal neighbor repeats.
        let tokens: Vec<Token> = [0u8, 1, 2, 3, 2, 3, 0, 1].map(Token).to_vec();
        assert!(is_arrangement_valid(&tokens, Difficulty::Casual));
    }

    #[test]
    fn test_mark_matched_flips_exactly_the_pair() {
        let mut rng = SimpleRng::new(42);
        let mut board = Board::generate(Difficulty::Casual, &mut rng);
        let token = board.get(0).unwrap().token();

        assert_eq!(board.mark_matched(token), 2);
        let matched: Vec<_> = board.tiles().iter().filter(|t| t.is_matched()).collect();
        assert_eq!(matched.len(), 2);
        assert!(matched.iter().all(|t| t.token() == token));
        assert_eq!(board.matched_pair_count(), 1);
    }
}
