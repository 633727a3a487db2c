use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Масть карты. Масти между собой не упорядочены.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,    // ♣
    Diamonds, // ♦
    Hearts,   // ♥
    Spades,   // ♠
}

impl Suit {
    /// Канонический порядок мастей (он же порядок в новой колоде).
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

/// Ранг карты: 2..14, туз = 14.
///
/// Туз в колесе (A-2-3-4-5) играет как 1 – это решает оценщик,
/// сам ранг всегда остаётся `Ace`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Все ранги по возрастанию.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Числовое значение 2..14.
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Rank> {
        match value {
            2..=14 => Some(Rank::ALL[(value - 2) as usize]),
            _ => None,
        }
    }
}

/// Карта – неизменяемая пара (ранг, масть).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Разобрать список карт через пробел: `"As Kd 7c"`.
    pub fn parse_many(s: &str) -> Result<Vec<Card>, ParseCardError> {
        s.split_whitespace().map(str::parse).collect()
    }
}

/// Ошибка разбора строки карты.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseCardError {
    #[error("card string must have exactly 2 characters, got {0:?}")]
    BadLength(String),

    #[error("invalid rank: {0}")]
    InvalidRank(char),

    #[error("invalid suit: {0}")]
    InvalidSuit(char),
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Card {
    /// Формат вида `Ah`, `Td`, `7c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Парсинг строки вида "Ah", "Td", "7c".
impl FromStr for Card {
    type Err = ParseCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (r_ch, s_ch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(su), None) => (r, su),
            _ => return Err(ParseCardError::BadLength(s.to_string())),
        };

        let rank = match r_ch {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' | 't' => Rank::Ten,
            'J' | 'j' => Rank::Jack,
            'Q' | 'q' => Rank::Queen,
            'K' | 'k' => Rank::King,
            'A' | 'a' => Rank::Ace,
            _ => return Err(ParseCardError::InvalidRank(r_ch)),
        };

        let suit = match s_ch {
            'c' | 'C' | '♣' => Suit::Clubs,
            'd' | 'D' | '♦' => Suit::Diamonds,
            'h' | 'H' | '♥' => Suit::Hearts,
            's' | 'S' | '♠' => Suit::Spades,
            _ => return Err(ParseCardError::InvalidSuit(s_ch)),
        };

        Ok(Card { rank, suit })
    }
}
