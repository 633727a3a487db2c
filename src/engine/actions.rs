use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, SeatIndex};

/// Тип действия игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    /// Только когда доплачивать нечего.
    Check,
    /// Уравнять ставку (не больше стека).
    Call,
    /// Добавить указанную сумму к своей ставке.
    Raise(Chips),
    /// Поставить весь стек.
    AllIn,
}

impl fmt::Display for PlayerActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerActionKind::Fold => f.write_str("fold"),
            PlayerActionKind::Check => f.write_str("check"),
            PlayerActionKind::Call => f.write_str("call"),
            PlayerActionKind::Raise(amount) => write!(f, "raise {amount}"),
            PlayerActionKind::AllIn => f.write_str("all-in"),
        }
    }
}

/// Конкретное действие игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// Кто действует.
    pub seat: SeatIndex,
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(seat: SeatIndex, kind: PlayerActionKind) -> Self {
        Self { seat, kind }
    }
}
