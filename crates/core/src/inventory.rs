//! Weapon inventory - quantity per weapon kind

use std::collections::BTreeMap;

use thiserror::Error;

use crate::types::WeaponKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WeaponError {
    #[error("no {} left in inventory", .0.as_str())]
    NotInInventory(WeaponKind),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: BTreeMap<WeaponKind, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// One of each weapon kind
    pub fn starter() -> Self {
        let mut inv = Self::new();
        for kind in WeaponKind::ALL {
            inv.add(kind, 1);
        }
        inv
    }

    pub fn quantity(&self, kind: WeaponKind) -> u32 {
        self.items.get(&kind).copied().unwrap_or(0)
    }

    pub fn add(&mut self, kind: WeaponKind, quantity: u32) {
        if quantity == 0 {
            return;
        }
        *self.items.entry(kind).or_insert(0) += quantity;
    }

    /// Consume exactly one; refused when none remain
    pub fn take_one(&mut self, kind: WeaponKind) -> Result<u32, WeaponError> {
        let Some(qty) = self.items.get_mut(&kind) else {
            return Err(WeaponError::NotInInventory(kind));
        };
        *qty -= 1;
        let left = *qty;
        if left == 0 {
            self.items.remove(&kind);
        }
        Ok(left)
    }

    /// Kinds with a non-zero quantity
    pub fn iter(&self) -> impl Iterator<Item = (WeaponKind, u32)> + '_ {
        self.items.iter().map(|(k, q)| (*k, *q))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
