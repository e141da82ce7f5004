//! Honey Match (workspace facade crate).
//!
//! Exposes `honey_match::{core,engine,runtime,types}` while the implementation lives in
//! dedicated crates under `crates/`.

pub use honey_match_core as core;
pub use honey_match_engine as engine;
pub use honey_match_runtime as runtime;
pub use honey_match_types as types;
