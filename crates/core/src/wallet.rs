//! Wallet - player balances fed by session results
//!
//! Holds the primary collected currency, its lifetime total (which drives the player
//! level), soft gold, and the withdrawal currency in thousandths of a unit. Every
//! operation validates first and mutates second, so a refused operation leaves all
//! balances untouched.

use thiserror::Error;

use crate::scoring::player_level;
use crate::snapshot::SessionSummary;
use crate::types::{EXCHANGE_RATE, WITHDRAWAL_MILLIS_PER_UNIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WalletError {
    #[error("exchange of {requested} is below the minimum of {minimum}")]
    BelowMinimum { requested: u64, minimum: u64 },
    #[error("requested {requested} but only {available} is available")]
    InsufficientBalance { requested: u64, available: u64 },
    #[error("requested {requested} gold but only {available} is available")]
    InsufficientGold { requested: u64, available: u64 },
}

/// Result of a completed exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeReceipt {
    /// Primary currency debited
    pub spent: u64,
    /// Whole withdrawal units credited
    pub units: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wallet {
    balance: u64,
    total_earned: u64,
    gold: u64,
    withdrawal_millis: u64,
    total_withdrawn_millis: u64,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wallet with an existing primary balance (also counted as earned)
    pub fn with_balance(balance: u64) -> Self {
        Self {
            balance,
            total_earned: balance,
            ..Self::default()
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn total_earned(&self) -> u64 {
        self.total_earned
    }

    pub fn gold(&self) -> u64 {
        self.gold
    }

    /// Withdrawal balance in thousandths of a unit
    pub fn withdrawal_millis(&self) -> u64 {
        self.withdrawal_millis
    }

    pub fn total_withdrawn_millis(&self) -> u64 {
        self.total_withdrawn_millis
    }

    pub fn level(&self) -> u32 {
        player_level(self.total_earned)
    }

    pub fn credit_currency(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
        self.total_earned = self.total_earned.saturating_add(amount);
    }

    /// Fold a finished session's deltas into the wallet
    pub fn credit_session(&mut self, summary: &SessionSummary) {
        self.credit_currency(summary.currency_earned);
        self.add_gold(summary.gold_earned);
        self.withdrawal_millis = self
            .withdrawal_millis
            .saturating_add(summary.crypto_earned_millis);
    }

    /// Convert primary currency into whole withdrawal units
    ///
    /// `amount` must be at least `EXCHANGE_RATE` and at most the balance. Only whole
    /// units are converted: the debit is `floor(amount / EXCHANGE_RATE) * EXCHANGE_RATE`.
    pub fn exchange(&mut self, amount: u64) -> Result<ExchangeReceipt, WalletError> {
        if amount < EXCHANGE_RATE {
            return Err(WalletError::BelowMinimum {
                requested: amount,
                minimum: EXCHANGE_RATE,
            });
        }
        if amount > self.balance {
            return Err(WalletError::InsufficientBalance {
                requested: amount,
                available: self.balance,
            });
        }

        let units = amount / EXCHANGE_RATE;
        let spent = units * EXCHANGE_RATE;
        let credited = units * WITHDRAWAL_MILLIS_PER_UNIT;

        self.balance -= spent;
        self.withdrawal_millis += credited;
        self.total_withdrawn_millis += credited;

        Ok(ExchangeReceipt { spent, units })
    }

    pub fn add_gold(&mut self, amount: u64) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn spend_gold(&mut self, amount: u64) -> Result<(), WalletError> {
        if amount > self.gold {
            return Err(WalletError::InsufficientGold {
                requested: amount,
                available: self.gold,
            });
        }
        self.gold -= amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_success_and_below_minimum() {
        let mut wallet = Wallet::with_balance(25_000);

        let receipt = wallet.exchange(10_000).unwrap();
        assert_eq!(receipt, ExchangeReceipt { spent: 10_000, units: 1 });
        assert_eq!(wallet.balance(), 15_000);
        assert_eq!(wallet.withdrawal_millis(), 1_000);

        let before = wallet.clone();
        assert_eq!(
            wallet.exchange(9_999),
            Err(WalletError::BelowMinimum {
                requested: 9_999,
                minimum: 10_000
            })
        );
        assert_eq!(wallet, before);
    }

    #[test]
    fn test_exchange_above_balance_is_refused() {
        let mut wallet = Wallet::with_balance(15_000);
        let before = wallet.clone();
        assert_eq!(
            wallet.exchange(20_000),
            Err(WalletError::InsufficientBalance {
                requested: 20_000,
                available: 15_000
            })
        );
        assert_eq!(wallet, before);
    }

    #[test]
    fn test_exchange_converts_whole_units_only() {
        let mut wallet = Wallet::with_balance(30_000);
        let receipt = wallet.exchange(25_000).unwrap();
        assert_eq!(receipt.units, 2);
        assert_eq!(receipt.spent, 20_000);
        assert_eq!(wallet.balance(), 10_000);
        // Exchange never lowers the lifetime total.
        assert_eq!(wallet.total_earned(), 30_000);
        assert_eq!(wallet.total_withdrawn_millis(), 2_000);
    }

    #[test]
    fn test_spend_gold() {
        let mut wallet = Wallet::new();
        wallet.add_gold(50);
        assert!(wallet.spend_gold(30).is_ok());
        assert_eq!(wallet.gold(), 20);
        assert_eq!(
            wallet.spend_gold(21),
            Err(WalletError::InsufficientGold {
                requested: 21,
                available: 20
            })
        );
        assert_eq!(wallet.gold(), 20);
    }

    #[test]
    fn test_level_tracks_total_earned() {
        let mut wallet = Wallet::new();
        assert_eq!(wallet.level(), 1);
        wallet.credit_currency(5_000);
        assert_eq!(wallet.level(), 3);
    }
}
