use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::Player;

/// Индекс места за столом: 0 или 1.
pub type SeatIndex = u8;

/// Мест за heads-up столом.
pub const SEATS: usize = 2;

/// Место "героя" (живой игрок).
pub const HERO_SEAT: SeatIndex = 0;

/// Место соперника-бота.
pub const OPPONENT_SEAT: SeatIndex = 1;

/// Соседнее место.
pub fn other_seat(seat: SeatIndex) -> SeatIndex {
    1 - (seat & 1)
}

/// Блайнды.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableStakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
        }
    }
}

impl Default for TableStakes {
    fn default() -> Self {
        Self::new(Chips(10), Chips(20))
    }
}

/// Что делать со стеками между раздачами.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum StackPolicy {
    /// Каждая раздача начинается со `starting_stack` у обоих (демо-режим).
    #[default]
    ResetEachHand,
    /// Стеки переносятся из раздачи в раздачу.
    CarryOver,
}

/// Косметические задержки (мс от момента планирования).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PacingConfig {
    /// Пауза перед ходом бота.
    pub opponent_delay_ms: u64,
    /// Смещения шагов all-in ранаута: флоп, тёрн, ривер, шоудаун.
    pub runout_steps_ms: [u64; 4],
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            opponent_delay_ms: 600,
            runout_steps_ms: [500, 1200, 1900, 2600],
        }
    }
}

/// Параметры скриптового соперника.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OpponentConfig {
    /// Блеф-рейз с вероятностью 1/N, когда ставить ничего не нужно.
    pub bluff_one_in: u32,
    /// Размер блеф-рейза и порог "по карману" для колла.
    pub raise_cap: Chips,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        Self {
            bluff_one_in: 10,
            raise_cap: Chips(60),
        }
    }
}

/// Конфиг стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    pub stakes: TableStakes,
    pub starting_stack: Chips,
    pub stack_policy: StackPolicy,
    /// Имена по местам; место 1 – соперник.
    pub seat_names: [String; SEATS],
    pub pacing: PacingConfig,
    pub opponent: OpponentConfig,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            stakes: TableStakes::default(),
            starting_stack: Chips(1000),
            stack_policy: StackPolicy::ResetEachHand,
            seat_names: ["You".to_string(), "CPU".to_string()],
            pacing: PacingConfig::default(),
            opponent: OpponentConfig::default(),
        }
    }
}

/// Состояние heads-up стола. Мутирует его только движок.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub config: TableConfig,
    pub seats: [Player; SEATS],
    /// Открытые карты борда: 0, 3, 4 или 5.
    pub board: Vec<Card>,
    /// Кнопка; `None`, пока не было ни одной раздачи.
    pub button: Option<SeatIndex>,
    pub street: Street,
    pub hand_in_progress: bool,
    /// Можно ли показывать карты соперника (шоудаун или all-in).
    pub opponent_revealed: bool,
}

impl Table {
    pub fn new(config: TableConfig) -> Self {
        let stack = config.starting_stack;
        let seats = [
            Player::new(0, config.seat_names[0].clone(), stack),
            Player::new(1, config.seat_names[1].clone(), stack),
        ];
        Self {
            config,
            seats,
            board: Vec::new(),
            button: None,
            street: Street::Preflop,
            hand_in_progress: false,
            opponent_revealed: false,
        }
    }

    pub fn seat(&self, index: SeatIndex) -> Option<&Player> {
        self.seats.get(index as usize)
    }

    /// Сумма всех стеков (без банка).
    pub fn total_stacks(&self) -> Chips {
        self.seats.iter().map(|p| p.stack).sum()
    }

    /// Игроки, претендующие на банк.
    pub fn players_in_hand(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter().filter(|p| p.is_in_hand())
    }

    /// Максимальная ставка раунда среди игроков.
    pub fn max_bet(&self) -> Chips {
        self.seats
            .iter()
            .map(|p| p.current_bet)
            .max()
            .unwrap_or(Chips::ZERO)
    }
}
