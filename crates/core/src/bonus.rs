//! Bonus grants - side rewards rolled once per cascade round
//!
//! The roll walks a fixed priority chain with an independent draw per step:
//! crypto, else gold, else a weapon, else nothing. At most one grant fires per round.

use rand::Rng;

use crate::config::GameConfig;
use crate::types::WeaponKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BonusGrant {
    /// Withdrawal currency, in thousandths of a unit
    Crypto { millis: u64 },
    Gold { amount: u64 },
    Weapon(WeaponKind),
    /// Score multiplier for the remaining rounds of the current cascade
    Multiplier(u32),
    ExtraMoves(u32),
}

impl BonusGrant {
    pub fn kind_str(&self) -> &'static str {
        match self {
            BonusGrant::Crypto { .. } => "crypto",
            BonusGrant::Gold { .. } => "gold",
            BonusGrant::Weapon(_) => "weapon",
            BonusGrant::Multiplier(_) => "multiplier",
            BonusGrant::ExtraMoves(_) => "extra_moves",
        }
    }
}

/// Roll this round's bonus (if any)
pub fn roll_bonus<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Option<BonusGrant> {
    if rng.gen_bool(config.crypto_bonus_chance) {
        Some(BonusGrant::Crypto {
            millis: rng.gen_range(1..=11),
        })
    } else if rng.gen_bool(config.gold_bonus_chance) {
        Some(BonusGrant::Gold {
            amount: rng.gen_range(10..=59),
        })
    } else if rng.gen_bool(config.weapon_bonus_chance) {
        let kind = WeaponKind::ALL[rng.gen_range(0..WeaponKind::ALL.len())];
        Some(BonusGrant::Weapon(kind))
    } else {
        None
    }
}
