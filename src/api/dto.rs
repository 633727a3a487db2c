use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandOutcome, Street};
use crate::domain::player::PlayerStatus;
use crate::domain::{HandId, SeatIndex};

/// Место за столом глазами наблюдателя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatView {
    pub seat: SeatIndex,
    pub name: String,
    pub stack: Chips,
    pub current_bet: Chips,
    pub status: PlayerStatus,
    pub is_button: bool,
    pub is_to_act: bool,
    /// Карманные карты – только свои, либо после вскрытия соперника.
    pub hole_cards: Option<Vec<Card>>,
    /// Текущая лучшая комбинация (если карты видны и открыт хотя бы флоп).
    pub best_hand_label: Option<String>,
}

/// Итог раздачи для показа.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowdownView {
    pub outcome: HandOutcome,
    /// "You wins", "Split pot", "CPU wins (opponent folded)".
    pub result_text: String,
    /// Названия комбинаций по местам (при выигрыше фолдом – пусто).
    pub labels: Vec<Option<String>>,
    /// Пять карт победителя для подсветки; пусто при сплите и фолде.
    pub highlighted_cards: Vec<Card>,
    /// Выигрыш по местам.
    pub won: Vec<Chips>,
}

/// Снимок стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSnapshot {
    pub hand_id: Option<HandId>,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub street: Street,
    pub board: Vec<Card>,
    pub pot: Chips,
    pub seats: Vec<SeatView>,
    pub button: Option<SeatIndex>,
    /// Чей ход (если идут торги).
    pub current_actor: Option<SeatIndex>,
    /// Сколько доплатить месту, чей ход.
    pub call_amount: Chips,
    pub hand_in_progress: bool,
    pub is_showdown: bool,
    /// Торги закрыты, борд докладывается.
    pub runout: bool,
    pub opponent_revealed: bool,
    /// Следующая улица, пока раздача идёт.
    pub next_street: Option<Street>,
    /// Остались ли закрытые карты борда.
    pub can_reveal_more: bool,
    pub showdown: Option<ShowdownView>,
}
