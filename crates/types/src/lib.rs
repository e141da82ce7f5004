//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, move search, runtime records).
//!
//! # Board Dimensions
//!
//! Default playfield dimensions:
//!
//! - **Width**: 6 columns (indexed 0-5)
//! - **Height**: 8 rows (indexed 0-7)
//! - Row 0 is the top row; gravity pulls tokens toward the highest row index.
//!
//! # Pacing Constants
//!
//! Minimum suspension between cascade steps, in milliseconds. These are ordering
//! barriers: no board mutation happens before the previous step's delay elapses.
//!
//! | Constant | Value | Step |
//! |----------|-------|------|
//! | `SWAP_SETTLE_MS` | 350 | Swap (or rollback) animation |
//! | `MATCH_EXPLODE_MS` | 500 | Matched cells marked, before removal |
//! | `GRAVITY_FALL_MS` | 400 | Tokens falling after refill |
//! | `WEAPON_TELEGRAPH_MS` | 600 | Weapon effect shown before marking |
//! | `WEAPON_DETONATE_MS` | 600 | Weapon targets marked, before removal |
//! | `COMBO_RESET_MS` | 300 | Combo display reset after the last round |
//!
//! # Examples
//!
//! ```
//! use honey_match_types::{TokenKind, WeaponKind, Position, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let token = TokenKind::from_str("Honey").unwrap();
//! assert_eq!(token, TokenKind::Honey);
//! assert_eq!(WeaponKind::from_str("dynamite"), Some(WeaponKind::Dynamite));
//!
//! assert!(Position::new(0, 0).is_adjacent(Position::new(0, 1)));
//! assert!(!Position::new(0, 0).is_adjacent(Position::new(1, 1)));
//!
//! assert_eq!(BOARD_WIDTH, 6);
//! assert_eq!(BOARD_HEIGHT, 8);
//! ```

/// Board width in cells (6 columns)
pub const BOARD_WIDTH: usize = 6;

/// Board height in cells (8 rows)
pub const BOARD_HEIGHT: usize = 8;

/// Shortest run that counts as a match
pub const MIN_MATCH: usize = 3;

/// Match length that marks an area-clear special
pub const AREA_CLEAR_MIN_MATCH: usize = 4;

/// Match length that marks a line-clear special
pub const LINE_CLEAR_MIN_MATCH: usize = 5;

/// Moves granted at the start of a session
pub const INITIAL_MOVES: u32 = 30;

/// Redraw cap per cell when generating a board without initial matches
pub const GENERATOR_RETRY_CAP: u32 = 100;

/// Swap (and rollback) animation settle time
pub const SWAP_SETTLE_MS: u32 = 350;

/// Explosion time between marking matched cells and removing them
pub const MATCH_EXPLODE_MS: u32 = 500;

/// Fall time after gravity and refill
pub const GRAVITY_FALL_MS: u32 = 400;

/// Weapon effect display time before its targets are marked
pub const WEAPON_TELEGRAPH_MS: u32 = 600;

/// Time between marking weapon targets and removing them
pub const WEAPON_DETONATE_MS: u32 = 600;

/// Delay before combo depth and the active bonus reset once a cascade ends
pub const COMBO_RESET_MS: u32 = 300;

/// Points per token in a match
pub const POINTS_PER_TOKEN: u32 = 10;

/// Flat bonus per combo depth
pub const POINTS_PER_COMBO: u32 = 50;

/// Combo multiplier (as numerator, denominator is `COMBO_MULTIPLIER_DENOMINATOR`)
///
/// Each combo depth adds `1/2` to the round multiplier.
pub const COMBO_MULTIPLIER_NUMERATOR: u32 = 1;
pub const COMBO_MULTIPLIER_DENOMINATOR: u32 = 2;

/// Primary currency credited per full 100 points
pub const CURRENCY_PER_100_POINTS: u32 = 1;

/// Primary currency units per withdrawal unit
pub const EXCHANGE_RATE: u64 = 10_000;

/// Withdrawal balances are tracked in thousandths of a unit
pub const WITHDRAWAL_MILLIS_PER_UNIT: u64 = 1_000;

/// Cumulative primary currency required for each player level (level = index + 1)
pub const LEVEL_THRESHOLDS: [u64; 8] = [0, 1_000, 5_000, 15_000, 50_000, 100_000, 250_000, 500_000];

/// Chance per cascade round of a crypto bonus
pub const CRYPTO_BONUS_CHANCE: f64 = 0.01;

/// Chance per cascade round of a gold bonus (rolled when crypto misses)
pub const GOLD_BONUS_CHANCE: f64 = 0.08;

/// Chance per cascade round of a weapon grant (rolled when gold misses)
pub const WEAPON_BONUS_CHANCE: f64 = 0.03;

/// Cells destroyed by a bee swarm
pub const SWARM_SIZE: usize = 12;

/// Weapon kills score `POINTS_PER_TOKEN * WEAPON_SCORE_FACTOR` each
pub const WEAPON_SCORE_FACTOR: u32 = 2;

/// The six token kinds
///
/// Equality of kind is what makes two cells matchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    Honey,
    Flower,
    Bee,
    Comb,
    Sun,
    Water,
}

impl TokenKind {
    /// All kinds in draw order
    pub const ALL: [TokenKind; 6] = [
        TokenKind::Honey,
        TokenKind::Flower,
        TokenKind::Bee,
        TokenKind::Comb,
        TokenKind::Sun,
        TokenKind::Water,
    ];

    /// Parse token kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "honey" => Some(TokenKind::Honey),
            "flower" => Some(TokenKind::Flower),
            "bee" => Some(TokenKind::Bee),
            "comb" => Some(TokenKind::Comb),
            "sun" => Some(TokenKind::Sun),
            "water" => Some(TokenKind::Water),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Honey => "honey",
            TokenKind::Flower => "flower",
            TokenKind::Bee => "bee",
            TokenKind::Comb => "comb",
            TokenKind::Sun => "sun",
            TokenKind::Water => "water",
        }
    }

    /// Single-letter code used by board fixtures and debug dumps
    pub fn code(&self) -> char {
        match self {
            TokenKind::Honey => 'H',
            TokenKind::Flower => 'F',
            TokenKind::Bee => 'B',
            TokenKind::Comb => 'C',
            TokenKind::Sun => 'S',
            TokenKind::Water => 'W',
        }
    }

    pub fn from_code(c: char) -> Option<Self> {
        TokenKind::ALL
            .into_iter()
            .find(|k| k.code() == c.to_ascii_uppercase())
    }
}

/// Special marker attached to a match of sufficient length
///
/// Markers are informational: nothing in the engine detonates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Special {
    #[default]
    None,
    AreaClear,
    LineClear,
    Wildcard,
}

impl Special {
    /// Marker earned by a run of `length` tokens
    pub fn for_length(length: usize) -> Self {
        if length >= LINE_CLEAR_MIN_MATCH {
            Special::LineClear
        } else if length >= AREA_CLEAR_MIN_MATCH {
            Special::AreaClear
        } else {
            Special::None
        }
    }

    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            Special::None => None,
            Special::AreaClear => Some("area_clear"),
            Special::LineClear => Some("line_clear"),
            Special::Wildcard => Some("wildcard"),
        }
    }
}

/// Weapon kinds
///
/// - **Lightning**: clears the full row and column through the target
/// - **Dynamite**: clears the 3x3 block centered on the target
/// - **HoneyBlast**: clears every cell holding the target's token kind
/// - **BeeSwarm**: clears `SWARM_SIZE` random populated cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WeaponKind {
    Lightning,
    Dynamite,
    HoneyBlast,
    BeeSwarm,
}

impl WeaponKind {
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::Lightning,
        WeaponKind::Dynamite,
        WeaponKind::HoneyBlast,
        WeaponKind::BeeSwarm,
    ];

    /// Parse weapon kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "lightning" => Some(WeaponKind::Lightning),
            "dynamite" => Some(WeaponKind::Dynamite),
            "honeyblast" | "honey_blast" => Some(WeaponKind::HoneyBlast),
            "beeswarm" | "bee_swarm" => Some(WeaponKind::BeeSwarm),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponKind::Lightning => "lightning",
            WeaponKind::Dynamite => "dynamite",
            WeaponKind::HoneyBlast => "honeyblast",
            WeaponKind::BeeSwarm => "beeswarm",
        }
    }
}

/// Cell position, 0-indexed from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Manhattan distance between two positions
    pub fn distance(&self, other: Position) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// True when exactly one axis differs, by exactly one
    pub fn is_adjacent(&self, other: Position) -> bool {
        self.distance(other) == 1
    }
}

/// Cell on the board (None = empty, Some = token kind)
pub type Cell = Option<TokenKind>;
