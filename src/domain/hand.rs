use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::table::SeatIndex;
use crate::domain::HandId;

/// Улица раздачи. Порядок строгий, движемся только вперёд.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Следующая улица (`None` после шоудауна).
    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => Some(Street::Showdown),
            Street::Showdown => None,
        }
    }

    /// Сколько карт борда открыто на этой улице.
    pub fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River | Street::Showdown => 5,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
        };
        f.write_str(name)
    }
}

/// Сила руки, упакованная в u32 (категория + тай-брейк ранги).
/// Больше = сильнее. Кодирование живёт в `eval::hand_rank`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

/// Чем закончилась раздача.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandOutcome {
    /// Банк забрал один игрок; `by_fold` – соперник сбросил карты.
    Winner { seat: SeatIndex, by_fold: bool },
    /// Равные руки – банк делится.
    Split,
}

/// Результат конкретного игрока в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerHandResult {
    pub seat: SeatIndex,
    /// Сила руки (если дошёл до шоудауна).
    pub rank: Option<HandRank>,
    /// Название лучшей комбинации ("Two pair" и т.п.).
    pub label: Option<String>,
    /// Пять карт лучшей комбинации.
    pub best_cards: Vec<Card>,
    /// Сколько фишек получил из банка.
    pub won: Chips,
    pub is_winner: bool,
}

/// Краткое описание завершённой раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_id: HandId,
    pub street_reached: Street,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    pub outcome: HandOutcome,
    pub results: Vec<PlayerHandResult>,
}

impl HandSummary {
    pub fn result_for(&self, seat: SeatIndex) -> Option<&PlayerHandResult> {
        self.results.iter().find(|r| r.seat == seat)
    }

    /// Карты победителя для подсветки. Пусто при сплите и при выигрыше фолдом.
    pub fn winning_cards(&self) -> &[Card] {
        match self.outcome {
            HandOutcome::Winner { seat, by_fold: false } => self
                .result_for(seat)
                .map(|r| r.best_cards.as_slice())
                .unwrap_or(&[]),
            _ => &[],
        }
    }
}
