use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};
use crate::domain::hand::HandRank;

/// Категория покерной руки по силе.
///
/// Роял-флеш – единственный стрит-флеш с тузом наверху, поэтому отдельная
/// категория над `StraightFlush` не ломает порядок.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandCategory {
    /// Все категории от слабой к сильной.
    pub const ALL: [HandCategory; 10] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
        HandCategory::RoyalFlush,
    ];

    /// Человеческое название категории.
    pub fn label(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High card",
            HandCategory::OnePair => "One pair",
            HandCategory::TwoPair => "Two pair",
            HandCategory::ThreeOfAKind => "Three of a kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full house",
            HandCategory::FourOfAKind => "Four of a kind",
            HandCategory::StraightFlush => "Straight flush",
            HandCategory::RoyalFlush => "Royal flush",
        }
    }

    fn from_id(id: u8) -> HandCategory {
        HandCategory::ALL
            .get(id as usize)
            .copied()
            .unwrap_or(HandCategory::HighCard)
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Оценка лучшей пятёрки: категория, тай-брейк ранги и сами пять карт.
///
/// Сравнение и равенство – только по (категория, ранги). Карты нужны для
/// подсветки и на силу руки не влияют: разные пятёрки с одинаковой силой
/// равны, и банк делится.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HandScore {
    pub category: HandCategory,
    /// Тай-брейк ранги от старшего к младшему; состав зависит от категории.
    pub ranks: Vec<Rank>,
    /// Пять карт, реализующих комбинацию.
    pub cards: Vec<Card>,
}

impl HandScore {
    pub fn new(category: HandCategory, ranks: Vec<Rank>, cards: Vec<Card>) -> Self {
        debug_assert!(ranks.len() <= 5);
        debug_assert_eq!(cards.len(), 5);
        Self {
            category,
            ranks,
            cards,
        }
    }

    /// Упакованная сила руки.
    pub fn rank(&self) -> HandRank {
        HandRank::from_category_and_ranks(self.category, &self.ranks)
    }

    pub fn label(&self) -> &'static str {
        self.category.label()
    }

    /// Тай-брейк в числах (туз = 14).
    pub fn tiebreak_values(&self) -> Vec<u8> {
        self.ranks.iter().map(|r| r.value()).collect()
    }
}

impl PartialEq for HandScore {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank()
    }
}

impl Eq for HandScore {}

impl PartialOrd for HandScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl HandRank {
    /// Собрать HandRank из категории и до 5 тай-брейк рангов.
    ///
    /// Схема кодирования (u32):
    ///   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
    /// Незанятые позиции – нули. Длина тай-брейка фиксирована для категории,
    /// так что сравнение u32 совпадает с лексикографическим сравнением.
    pub fn from_category_and_ranks(category: HandCategory, ranks: &[Rank]) -> Self {
        let mut value = (category as u32) & 0x0F;
        for i in 0..5 {
            let nibble = ranks.get(i).map(|r| r.value() as u32).unwrap_or(0);
            value = (value << 4) | nibble;
        }
        HandRank(value)
    }

    /// Вытащить категорию из HandRank.
    pub fn category(&self) -> HandCategory {
        HandCategory::from_id(((self.0 >> 20) & 0x0F) as u8)
    }

    /// Достать тай-брейк ранги (без пустых позиций).
    pub fn tiebreak(&self) -> Vec<Rank> {
        (0..5)
            .rev()
            .map(|i| ((self.0 >> (i * 4)) & 0x0F) as u8)
            .filter_map(Rank::from_value)
            .collect()
    }
}

/// Человеческое описание руки по упакованной силе.
pub fn describe_hand(rank: HandRank) -> &'static str {
    rank.category().label()
}
