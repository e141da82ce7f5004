//! Scoring module - points per match, round totals, currency and levels
//!
//! - `match_score = floor((len * POINTS_PER_TOKEN + combo * POINTS_PER_COMBO) * (1 + combo * 1/2))`
//! - All matches resolved in one cascade round share that round's combo depth.
//! - An active score multiplier scales the round total after summing.
//! - Currency is `floor(score / 100) * CURRENCY_PER_100_POINTS`.
//!
//! The fractional combo multiplier is kept as a numerator/denominator pair so every
//! formula stays in integer arithmetic.

use crate::config::GameConfig;
use crate::matcher::Match;
use crate::types::*;

/// Integer scoring rules, derived from a [`GameConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRules {
    pub points_per_token: u32,
    pub points_per_combo: u32,
    pub combo_multiplier_numerator: u32,
    pub combo_multiplier_denominator: u32,
    pub currency_per_100_points: u32,
    pub weapon_score_factor: u32,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self::from(&GameConfig::default())
    }
}

impl From<&GameConfig> for ScoreRules {
    fn from(config: &GameConfig) -> Self {
        Self {
            points_per_token: config.points_per_token,
            points_per_combo: config.points_per_combo,
            combo_multiplier_numerator: config.combo_multiplier_numerator,
            combo_multiplier_denominator: config.combo_multiplier_denominator.max(1),
            currency_per_100_points: config.currency_per_100_points,
            weapon_score_factor: config.weapon_score_factor,
        }
    }
}

/// Round score breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundScore {
    /// Sum of match scores before any bonus multiplier
    pub base: u64,
    /// Bonus multiplier applied (1 when none is active)
    pub multiplier: u32,
    pub total: u64,
    /// Primary currency derived from `total`
    pub currency: u64,
}

impl ScoreRules {
    /// Score for a single run of `length` tokens at `combo_depth`
    pub fn match_score(&self, length: usize, combo_depth: u32) -> u64 {
        let base = length as u64 * self.points_per_token as u64
            + combo_depth as u64 * self.points_per_combo as u64;
        let den = self.combo_multiplier_denominator as u64;
        let factor = den + combo_depth as u64 * self.combo_multiplier_numerator as u64;
        base.saturating_mul(factor) / den
    }

    /// Sum of match scores for one round, before multipliers
    pub fn score_round(&self, matches: &[Match], combo_depth: u32) -> u64 {
        matches
            .iter()
            .map(|m| self.match_score(m.len(), combo_depth))
            .sum()
    }

    pub fn currency_from_score(&self, score: u64) -> u64 {
        (score / 100) * self.currency_per_100_points as u64
    }

    /// Full round breakdown with an optional active multiplier
    pub fn round(&self, matches: &[Match], combo_depth: u32, multiplier: Option<u32>) -> RoundScore {
        let base = self.score_round(matches, combo_depth);
        let multiplier = multiplier.unwrap_or(1).max(1);
        let total = base.saturating_mul(multiplier as u64);
        RoundScore {
            base,
            multiplier,
            total,
            currency: self.currency_from_score(total),
        }
    }

    /// Score for cells destroyed by a weapon
    pub fn weapon_score(&self, destroyed: usize) -> u64 {
        destroyed as u64 * self.points_per_token as u64 * self.weapon_score_factor as u64
    }
}

/// `match_score` with the default rules
pub fn match_score(length: usize, combo_depth: u32) -> u64 {
    ScoreRules::default().match_score(length, combo_depth)
}

/// `score_round` with the default rules
pub fn score_round(matches: &[Match], combo_depth: u32) -> u64 {
    ScoreRules::default().score_round(matches, combo_depth)
}

/// `currency_from_score` with the default rules
pub fn currency_from_score(score: u64) -> u64 {
    ScoreRules::default().currency_from_score(score)
}

/// Player level for a cumulative currency total (1-based)
pub fn player_level(total_earned: u64) -> u32 {
    LEVEL_THRESHOLDS
        .iter()
        .rposition(|&threshold| total_earned >= threshold)
        .map(|idx| idx as u32 + 1)
        .unwrap_or(1)
}
