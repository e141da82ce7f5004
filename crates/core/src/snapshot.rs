use crate::board::Grid;
use crate::inventory::Inventory;

/// End-of-session summary handed to persistence collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    pub final_score: u64,
    pub currency_earned: u64,
    pub max_combo_reached: u32,
    pub moves_used: u32,
    pub match_count: u32,
    pub bonus_count: u32,
    pub duration_ms: u64,
    pub gold_earned: u64,
    pub crypto_earned_millis: u64,
}

/// Settled session state - the only state collaborators may persist
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub grid: Grid,
    pub score: u64,
    pub currency: u64,
    pub moves: u32,
    pub max_combo: u32,
    pub gold_earned: u64,
    pub crypto_earned_millis: u64,
    pub inventory: Inventory,
    pub game_over: bool,
}

impl SessionSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && self.moves > 0
    }
}
