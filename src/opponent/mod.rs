//! Политика соперника за местом бота.
//!
//! Движок о политике ничего не знает: контроллер собирает `DecisionView`,
//! спрашивает политику и применяет ответ как обычное действие.

use serde::{Deserialize, Serialize};

use crate::domain::hand::Street;
use crate::domain::table::OpponentConfig;
use crate::domain::{Chips, SeatIndex};
use crate::engine::{PlayerActionKind, RandomSource};

/// Что видит политика в момент решения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecisionView {
    pub seat: SeatIndex,
    /// Сколько нужно доплатить до текущей ставки.
    pub call_amount: Chips,
    pub stack: Chips,
    pub street: Street,
    pub pot: Chips,
}

/// Источник решений для места без живого игрока.
pub trait OpponentPolicy {
    fn decide<R: RandomSource>(&mut self, view: &DecisionView, rng: &mut R) -> PlayerActionKind;
}

/// Простой скриптовый соперник.
///
/// Ставить нечего: изредка блефует рейзом, иначе чек.
/// Есть ставка: коллирует, пока она по карману, иначе фолд.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScriptedOpponent {
    /// Блеф с вероятностью 1/N.
    pub bluff_one_in: u32,
    pub raise_cap: Chips,
}

impl ScriptedOpponent {
    pub fn new(bluff_one_in: u32, raise_cap: Chips) -> Self {
        Self {
            bluff_one_in: bluff_one_in.max(1),
            raise_cap,
        }
    }

    pub fn from_config(config: &OpponentConfig) -> Self {
        Self::new(config.bluff_one_in, config.raise_cap)
    }

    /// Порог "по карману": размер рейза, но не больше стека.
    fn affordable(&self, stack: Chips) -> Chips {
        self.raise_cap.min(stack)
    }
}

impl Default for ScriptedOpponent {
    fn default() -> Self {
        Self::from_config(&OpponentConfig::default())
    }
}

impl OpponentPolicy for ScriptedOpponent {
    fn decide<R: RandomSource>(&mut self, view: &DecisionView, rng: &mut R) -> PlayerActionKind {
        let limit = self.affordable(view.stack);

        if view.call_amount.is_zero() {
            if !view.stack.is_zero() && rng.roll(self.bluff_one_in) == 0 {
                return PlayerActionKind::Raise(limit);
            }
            return PlayerActionKind::Check;
        }

        if view.call_amount <= limit {
            PlayerActionKind::Call
        } else {
            PlayerActionKind::Fold
        }
    }
}
