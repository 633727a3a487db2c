use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{HandId, SeatIndex};
use crate::engine::actions::PlayerActionKind;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted { hand_id: HandId, button: SeatIndex },

    /// Блайнды (фактически внесённые суммы, с учётом короткого стека).
    BlindsPosted {
        small_blind: (SeatIndex, Chips),
        big_blind: (SeatIndex, Chips),
    },

    /// Игрок получил карманные карты.
    HoleCardsDealt { seat: SeatIndex, cards: Vec<Card> },

    /// Действие игрока.
    PlayerActed {
        seat: SeatIndex,
        action: PlayerActionKind,
        committed: Chips,
        new_stack: Chips,
        pot_after: Chips,
    },

    /// Неуравненная часть ставки вернулась владельцу.
    UncalledBetReturned { seat: SeatIndex, amount: Chips },

    /// Открыты новые карты борда.
    BoardDealt { street: Street, cards: Vec<Card> },

    /// Переход на новую улицу.
    StreetChanged { street: Street },

    /// Торги закрыты, борд докладывается без ставок.
    RunoutStarted { from: Street },

    /// Шоудаун – открытие карт.
    ShowdownReveal {
        seat: SeatIndex,
        hole_cards: Vec<Card>,
        rank_value: u32,
    },

    /// Выплата банка.
    PotAwarded { seat: SeatIndex, amount: Chips },

    /// Раздача завершена.
    HandFinished { hand_id: HandId },

    /// Раздача брошена до конца (началась новая), фишки вернулись.
    HandAbandoned { hand_id: HandId },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Все действия игроков по порядку.
    pub fn actions(&self) -> impl Iterator<Item = (SeatIndex, PlayerActionKind)> + '_ {
        self.events.iter().filter_map(|e| match e.kind {
            HandEventKind::PlayerActed { seat, action, .. } => Some((seat, action)),
            _ => None,
        })
    }
}
