use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Единый банк (сайд-потов в heads-up движке нет).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub total: Chips,
}

impl Pot {
    pub fn new() -> Self {
        Self {
            total: Chips::ZERO,
        }
    }

    pub fn add(&mut self, amount: Chips) {
        self.total += amount;
    }

    /// Забрать из банка не больше `amount` (возврат неуравненной ставки).
    pub fn remove(&mut self, amount: Chips) -> Chips {
        let taken = amount.min(self.total);
        self.total -= taken;
        taken
    }

    /// Опустошить банк целиком.
    pub fn take_all(&mut self) -> Chips {
        core::mem::take(&mut self.total)
    }
}
