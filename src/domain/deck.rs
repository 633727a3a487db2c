use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};
use crate::engine::RandomSource;

/// Колода карт: упорядоченная очередь, тянем всегда с начала.
///
/// Карты никогда не создаются заново и не возвращаются обратно –
/// вытянутая карта покидает колоду навсегда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в каноническом порядке:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let cards = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
            .collect();
        Deck { cards }
    }

    /// Колода с заранее заданным порядком (подложенная колода для тестов).
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Deck {
            cards: cards.into(),
        }
    }

    /// Один честный случайный шаффл. Движок зовёт его ровно раз за раздачу.
    pub fn shuffle<R: RandomSource>(&mut self, rng: &mut R) {
        rng.shuffle(self.cards.make_contiguous());
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Оставшиеся карты (сверху вниз).
    pub fn remaining(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Взять верхнюю карту. `None`, если колода пуста.
    pub fn draw_one(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Взять до n карт сверху; при нехватке молча останавливаемся.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let take = n.min(self.cards.len());
        self.cards.drain(..take).collect()
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard_52()
    }
}
