//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const FLIP_BACK_DELAY_MS: u32 = 1000;

/// Board generation retry bound for the adjacency constraint
pub const SHUFFLE_MAX_ATTEMPTS: u32 = 10;

/// Ranking store constants
pub const MAX_RANKING_ENTRIES: usize = 10;
pub const MAX_NICKNAME_LEN: usize = 16;
pub const LOCK_TIMEOUT_MS: i64 = 5000;
pub const DUPLICATE_WINDOW_MS: i64 = 3000;

/// Fixed catalog of tile faces. Each board draws `pair_count` distinct
/// entries from this set; the catalog must stay at least as large as the
/// biggest pair count (12).
pub const TOKEN_CATALOG: [&str; 32] = [
    "slime", "mushroom", "snail", "boar", "golem", "wolf", "bat", "spider",
    "ghost", "imp", "wyvern", "drake", "kobold", "lizard", "scorpion", "wisp",
    "treant", "gargoyle", "harpy", "basilisk", "minotaur", "cyclops", "hydra",
    "griffin", "phoenix", "kraken", "chimera", "wraith", "banshee", "lich",
    "djinn", "leviathan",
];

/// The symbolic identity shared by exactly two tiles forming a pair.
///
/// A `Token` is an index into [`TOKEN_CATALOG`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token(pub u8);

impl Token {
    /// Display name from the catalog
    pub fn as_str(&self) -> &'static str {
        TOKEN_CATALOG[self.0 as usize % TOKEN_CATALOG.len()]
    }

    /// Look up a token by catalog name
    pub fn from_str(s: &str) -> Option<Self> {
        TOKEN_CATALOG
            .iter()
            .position(|name| *name == s)
            .map(|i| Token(i as u8))
    }
}

/// Difficulty tiers, keyed by card count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// 8 cards, 2x4
    Casual,
    /// 12 cards, 3x4
    Easy,
    /// 16 cards, 4x4
    Normal,
    /// 20 cards, 4x5
    Hard,
    /// 24 cards, 4x6
    Expert,
}

/// All tiers in ascending card-count order
pub const DIFFICULTIES: [Difficulty; 5] = [
    Difficulty::Casual,
    Difficulty::Easy,
    Difficulty::Normal,
    Difficulty::Hard,
    Difficulty::Expert,
];

impl Difficulty {
    /// Resolve a raw card count to a tier.
    ///
    /// Unsupported counts are a hard error at this boundary (the original
    /// behavior of silently substituting the 4x4 layout is intentionally
    /// not reproduced).
    pub fn from_card_count(count: usize) -> Option<Self> {
        match count {
            8 => Some(Difficulty::Casual),
            12 => Some(Difficulty::Easy),
            16 => Some(Difficulty::Normal),
            20 => Some(Difficulty::Hard),
            24 => Some(Difficulty::Expert),
            _ => None,
        }
    }

    pub fn card_count(&self) -> usize {
        self.rows() * self.cols()
    }

    pub fn pair_count(&self) -> usize {
        self.card_count() / 2
    }

    pub fn rows(&self) -> usize {
        match self {
            Difficulty::Casual => 2,
            Difficulty::Easy => 3,
            Difficulty::Normal | Difficulty::Hard | Difficulty::Expert => 4,
        }
    }

    pub fn cols(&self) -> usize {
        match self {
            Difficulty::Casual | Difficulty::Easy | Difficulty::Normal => 4,
            Difficulty::Hard => 5,
            Difficulty::Expert => 6,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Casual => "casual",
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "casual" => Some(Difficulty::Casual),
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "expert" => Some(Difficulty::Expert),
            _ => None,
        }
    }
}

/// Player actions fed into the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Flip,
    NewGame,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_grid_shapes() {
        let shapes = [(2, 4), (3, 4), (4, 4), (4, 5), (4, 6)];
        for (diff, (rows, cols)) in DIFFICULTIES.iter().zip(shapes) {
            assert_eq!(diff.rows(), rows);
            assert_eq!(diff.cols(), cols);
            assert_eq!(diff.card_count(), rows * cols);
            assert_eq!(diff.pair_count() * 2, diff.card_count());
        }
    }

    #[test]
    fn test_difficulty_from_card_count() {
        for diff in DIFFICULTIES {
            assert_eq!(Difficulty::from_card_count(diff.card_count()), Some(diff));
        }
        assert_eq!(Difficulty::from_card_count(0), None);
        assert_eq!(Difficulty::from_card_count(10), None);
        assert_eq!(Difficulty::from_card_count(26), None);
    }

    #[test]
    fn test_difficulty_str_roundtrip() {
        for diff in DIFFICULTIES {
            assert_eq!(Difficulty::from_str(diff.as_str()), Some(diff));
        }
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }

    #[test]
    fn test_token_catalog_unique_names() {
        for (i, a) in TOKEN_CATALOG.iter().enumerate() {
            for b in &TOKEN_CATALOG[i + 1..] {
                assert_ne!(a, b, "duplicate catalog entry: {}", a);
            }
        }
        // Catalog must cover the largest pair count.
        assert!(TOKEN_CATALOG.len() >= Difficulty::Expert.pair_count());
    }

    #[test]
    fn test_token_str_roundtrip() {
        let token = Token(7);
        assert_eq!(Token::from_str(token.as_str()), Some(token));
        assert_eq!(Token::from_str("not-a-creature"), None);
    }
}
