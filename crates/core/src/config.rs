//! Game configuration - board size, scoring constants, bonus chances
//!
//! `GameConfig::default()` carries the standard rules; every field can be overridden
//! per session (smaller boards in tests, fewer moves, disabled bonuses).

use thiserror::Error;

use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("board must be at least {min}x{min}, got {width}x{height}")]
    BoardTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },
    #[error("minimum match length {min_match} must lie within {lower}..={upper}")]
    MinMatchOutOfRange {
        min_match: usize,
        lower: usize,
        upper: usize,
    },
    #[error("combo multiplier denominator must be non-zero")]
    ZeroDenominator,
    #[error("bonus chance {0} is outside 0.0..=1.0")]
    ChanceOutOfRange(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub initial_moves: u32,
    pub min_match: usize,
    pub generator_retry_cap: u32,
    pub points_per_token: u32,
    pub points_per_combo: u32,
    pub combo_multiplier_numerator: u32,
    pub combo_multiplier_denominator: u32,
    pub currency_per_100_points: u32,
    pub crypto_bonus_chance: f64,
    pub gold_bonus_chance: f64,
    pub weapon_bonus_chance: f64,
    pub swarm_size: usize,
    pub weapon_score_factor: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            initial_moves: INITIAL_MOVES,
            min_match: MIN_MATCH,
            generator_retry_cap: GENERATOR_RETRY_CAP,
            points_per_token: POINTS_PER_TOKEN,
            points_per_combo: POINTS_PER_COMBO,
            combo_multiplier_numerator: COMBO_MULTIPLIER_NUMERATOR,
            combo_multiplier_denominator: COMBO_MULTIPLIER_DENOMINATOR,
            currency_per_100_points: CURRENCY_PER_100_POINTS,
            crypto_bonus_chance: CRYPTO_BONUS_CHANCE,
            gold_bonus_chance: GOLD_BONUS_CHANCE,
            weapon_bonus_chance: WEAPON_BONUS_CHANCE,
            swarm_size: SWARM_SIZE,
            weapon_score_factor: WEAPON_SCORE_FACTOR,
        }
    }
}

impl GameConfig {
    /// Same rules with every bonus chance set to zero
    pub fn without_bonuses(mut self) -> Self {
        self.crypto_bonus_chance = 0.0;
        self.gold_bonus_chance = 0.0;
        self.weapon_bonus_chance = 0.0;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_MATCH || self.height < MIN_MATCH {
            return Err(ConfigError::BoardTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_MATCH,
            });
        }
        // Below 3 every refill can match itself; above the longest line nothing matches.
        let upper = self.width.max(self.height);
        if !(MIN_MATCH..=upper).contains(&self.min_match) {
            return Err(ConfigError::MinMatchOutOfRange {
                min_match: self.min_match,
                lower: MIN_MATCH,
                upper,
            });
        }
        if self.combo_multiplier_denominator == 0 {
            return Err(ConfigError::ZeroDenominator);
        }
        for chance in [
            self.crypto_bonus_chance,
            self.gold_bonus_chance,
            self.weapon_bonus_chance,
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::ChanceOutOfRange(chance));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.width, 6);
        assert_eq!(config.height, 8);
        assert_eq!(config.initial_moves, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_tiny_board() {
        let config = GameConfig {
            width: 2,
            ..GameConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::BoardTooSmall {
                width: 2,
                height: 8,
                min: 3
            })
        );
    }

    #[test]
    fn test_min_match_bounds() {
        for min_match in [0, 1, 2, 9] {
            let config = GameConfig {
                min_match,
                ..GameConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(ConfigError::MinMatchOutOfRange {
                    min_match,
                    lower: 3,
                    upper: 8
                })
            );
        }
        for min_match in [3, 5, 8] {
            let config = GameConfig {
                min_match,
                ..GameConfig::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_rejects_bad_chance() {
        let config = GameConfig {
            gold_bonus_chance: 1.5,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ChanceOutOfRange(1.5)));
    }

    #[test]
    fn test_without_bonuses() {
        let config = GameConfig::default().without_bonuses();
        assert_eq!(config.crypto_bonus_chance, 0.0);
        assert_eq!(config.gold_bonus_chance, 0.0);
        assert_eq!(config.weapon_bonus_chance, 0.0);
    }
}
