use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::table::SeatIndex;

/// Статус игрока в текущей раздаче.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок в раздаче и может делать ставки.
    Active,
    /// Игрок сфолдил и больше не претендует на банк.
    Folded,
    /// Игрок поставил весь стек – ходов у него больше нет.
    AllIn,
}

/// Игрок за heads-up столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub seat: SeatIndex,
    pub name: String,
    /// Текущий стек (без того, что уже в банке).
    pub stack: Chips,
    /// Ставка в текущем раунде; обнуляется на каждой улице.
    pub current_bet: Chips,
    pub status: PlayerStatus,
    /// Карманные карты: 0 или 2.
    pub hole_cards: Vec<Card>,
}

impl Player {
    pub fn new(seat: SeatIndex, name: impl Into<String>, stack: Chips) -> Self {
        Self {
            seat,
            name: name.into(),
            stack,
            current_bet: Chips::ZERO,
            status: PlayerStatus::Active,
            hole_cards: Vec::new(),
        }
    }

    /// Подготовка к новой раздаче: карты, ставки и флаги сбрасываются.
    pub fn reset_for_new_hand(&mut self) {
        self.hole_cards.clear();
        self.current_bet = Chips::ZERO;
        self.status = PlayerStatus::Active;
    }

    pub fn is_folded(&self) -> bool {
        self.status == PlayerStatus::Folded
    }

    pub fn is_all_in(&self) -> bool {
        self.status == PlayerStatus::AllIn
    }

    /// Может ли игрок ещё делать ставки.
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Претендует ли игрок на банк.
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Переложить до `amount` фишек из стека в текущую ставку.
    ///
    /// Возвращает реально внесённую сумму (не больше стека).
    /// Обнулившийся стек переводит игрока в all-in.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.current_bet += paid;
        if self.stack.is_zero() && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        paid
    }

    /// Зачислить фишки в стек (выигрыш банка, возврат брошенной раздачи).
    /// All-in снимается: фишки снова есть.
    pub fn collect(&mut self, amount: Chips) {
        self.stack += amount;
        if !self.stack.is_zero() && self.status == PlayerStatus::AllIn {
            self.status = PlayerStatus::Active;
        }
    }

    /// Вернуть фишки из текущей ставки обратно в стек (неуравненная ставка).
    pub fn refund(&mut self, amount: Chips) {
        let back = amount.min(self.current_bet);
        self.current_bet -= back;
        self.stack += back;
        if !back.is_zero() && self.status == PlayerStatus::AllIn {
            self.status = PlayerStatus::Active;
        }
    }
}
