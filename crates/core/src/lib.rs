//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the match-3 rules and the cascade resolver. It has **zero
//! dependencies** on rendering, networking, or I/O:
//!
//! - **Deterministic**: Same seed produces the same boards and the same cascades
//! - **Testable**: Every rule is a plain function over a [`Grid`]
//! - **Portable**: Runs behind any presentation layer, or headless
//!
//! # Module Structure
//!
//! - [`board`]: rectangular grid of optional tokens
//! - [`generator`]: random boards with no pre-existing match
//! - [`matcher`]: maximal horizontal and vertical runs
//! - [`swap`]: swap legality (structure, then "does it produce a match")
//! - [`gravity`]: removal, column compaction and refill
//! - [`scoring`]: integer round scoring, currency and player level
//! - [`terminal`]: valid-move search and the "no moves left" check
//! - [`weapons`]: target sets for the four weapon kinds
//! - [`bonus`]: per-round bonus rolls
//! - [`inventory`] / [`wallet`]: weapon stock and player balances
//! - [`session`]: the timed cascade state machine
//! - [`snapshot`]: settled state and the end-of-session summary
//! - [`rng`]: small seedable generator for reproducible play
//!
//! # Example
//!
//! ```
//! use honey_match_core::{GameConfig, Session, SimpleRng};
//!
//! let mut session = Session::new(GameConfig::default(), SimpleRng::new(12345)).unwrap();
//!
//! if let Some((a, b)) = honey_match_core::terminal::find_valid_swap(session.grid()) {
//!     session.request_swap(a, b).unwrap();
//!     session.run_until_settled();
//!     assert!(session.score() > 0);
//! }
//! ```
//!
//! # Timing
//!
//! Every cascade step waits a minimum delay (swap 350ms, explode 500ms, fall 400ms,
//! combo reset 300ms, weapon telegraph and detonation 600ms each). Call
//! [`Session::tick`](session::Session::tick) with elapsed time, or
//! [`Session::advance`](session::Session::advance) to skip delays when headless.

pub mod board;
pub mod bonus;
pub mod config;
pub mod generator;
pub mod gravity;
pub mod inventory;
pub mod matcher;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod swap;
pub mod terminal;
pub mod wallet;
pub mod weapons;

pub use honey_match_types as types;

// Re-export commonly used types for convenience
pub use board::Grid;
pub use bonus::BonusGrant;
pub use config::{ConfigError, GameConfig};
pub use generator::generate_board;
pub use matcher::{find_matches, Axis, Match};
pub use rng::SimpleRng;
pub use scoring::{RoundScore, ScoreRules};
pub use session::{Phase, RequestError, ResolveStep, RoundReport, Session, SessionEvent};
pub use snapshot::{SessionSnapshot, SessionSummary};
pub use swap::{validate_swap, SwapRejection};
pub use terminal::has_any_valid_move;
pub use inventory::{Inventory, WeaponError};
pub use wallet::{ExchangeReceipt, Wallet, WalletError};
