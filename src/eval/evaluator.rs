use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};

use super::hand_rank::{HandCategory, HandScore};
use super::straights::{detect_straight, mask_of, straight_window};

/// Исход сравнения двух рук heads-up.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HeadsUpResult {
    FirstWins,
    SecondWins,
    Split,
}

impl HeadsUpResult {
    /// Тот же исход с переставленными аргументами.
    pub fn reversed(self) -> Self {
        match self {
            HeadsUpResult::FirstWins => HeadsUpResult::SecondWins,
            HeadsUpResult::SecondWins => HeadsUpResult::FirstWins,
            HeadsUpResult::Split => HeadsUpResult::Split,
        }
    }
}

/// Группа карт одного ранга.
#[derive(Clone, Copy, Debug)]
struct RankGroup {
    rank: Rank,
    count: u8,
}

/// Лучшая пятёрка из hole + board.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> HandScore {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);
    evaluate_best5(&all_cards)
}

/// Главная функция: лучшая 5-карточная комбинация из 5–7 карт.
///
/// Категории проверяются от сильной к слабой, возвращается первая
/// выполнимая. Меньше 5 или больше 7 карт – ошибка вызывающего кода (panic).
pub fn evaluate_best5(cards: &[Card]) -> HandScore {
    assert!(
        (5..=7).contains(&cards.len()),
        "evaluate_best5 expects 5 to 7 cards, got {}",
        cards.len()
    );

    let groups = rank_groups(cards);
    let flush = flush_suit(cards).map(|suit| {
        let mut suited: Vec<Card> = cards.iter().filter(|c| c.suit == suit).copied().collect();
        sort_desc(&mut suited);
        suited
    });

    // Стрит-флеш (и роял).
    if let Some(suited) = &flush {
        if let Some((top, five)) = best_straight(suited) {
            let category = if top == Rank::Ace {
                HandCategory::RoyalFlush
            } else {
                HandCategory::StraightFlush
            };
            return HandScore::new(category, vec![top], five);
        }
    }

    // Каре.
    if let Some(quad) = groups.first().filter(|g| g.count == 4) {
        let mut five = of_rank(cards, quad.rank, 4);
        let kicker = kickers(cards, &[quad.rank], 1);
        let ranks = vec![quad.rank, kicker[0].rank];
        five.extend(kicker);
        return HandScore::new(HandCategory::FourOfAKind, ranks, five);
    }

    // Фулл-хаус: тройка + другая группа из 2+ карт (ту же тройку повторно не берём).
    let trips = groups.iter().find(|g| g.count == 3).copied();
    if let Some(t) = trips {
        if let Some(p) = groups.iter().find(|g| g.count >= 2 && g.rank != t.rank) {
            let mut five = of_rank(cards, t.rank, 3);
            five.extend(of_rank(cards, p.rank, 2));
            return HandScore::new(HandCategory::FullHouse, vec![t.rank, p.rank], five);
        }
    }

    // Флеш.
    if let Some(suited) = flush {
        let five: Vec<Card> = suited.into_iter().take(5).collect();
        let ranks = five.iter().map(|c| c.rank).collect();
        return HandScore::new(HandCategory::Flush, ranks, five);
    }

    // Стрит.
    if let Some((top, five)) = best_straight(cards) {
        return HandScore::new(HandCategory::Straight, vec![top], five);
    }

    // Сет / трипс.
    if let Some(t) = trips {
        let mut five = of_rank(cards, t.rank, 3);
        let kick = kickers(cards, &[t.rank], 2);
        let mut ranks = vec![t.rank];
        ranks.extend(kick.iter().map(|c| c.rank));
        five.extend(kick);
        return HandScore::new(HandCategory::ThreeOfAKind, ranks, five);
    }

    // Группы ровно из двух карт, старшие первыми.
    let pairs: Vec<Rank> = groups
        .iter()
        .filter(|g| g.count == 2)
        .map(|g| g.rank)
        .collect();

    // Две пары.
    if pairs.len() >= 2 {
        let (high, low) = (pairs[0], pairs[1]);
        let mut five = of_rank(cards, high, 2);
        five.extend(of_rank(cards, low, 2));
        let kick = kickers(cards, &[high, low], 1);
        let ranks = vec![high, low, kick[0].rank];
        five.extend(kick);
        return HandScore::new(HandCategory::TwoPair, ranks, five);
    }

    // Пара.
    if let Some(&pair) = pairs.first() {
        let mut five = of_rank(cards, pair, 2);
        let kick = kickers(cards, &[pair], 3);
        let mut ranks = vec![pair];
        ranks.extend(kick.iter().map(|c| c.rank));
        five.extend(kick);
        return HandScore::new(HandCategory::OnePair, ranks, five);
    }

    // Старшая карта.
    let five = kickers(cards, &[], 5);
    let ranks = five.iter().map(|c| c.rank).collect();
    HandScore::new(HandCategory::HighCard, ranks, five)
}

/// Сравнить две руки на общем борде.
///
/// Сплит – когда оценки равны по силе; совпадение самих карт не требуется.
pub fn compare_heads_up(hole_a: &[Card], hole_b: &[Card], board: &[Card]) -> HeadsUpResult {
    let a = evaluate_best_hand(hole_a, board);
    let b = evaluate_best_hand(hole_b, board);
    compare_scores(&a, &b)
}

/// Сравнить две готовые оценки.
pub fn compare_scores(a: &HandScore, b: &HandScore) -> HeadsUpResult {
    use core::cmp::Ordering::*;

    match a.cmp(b) {
        Greater => HeadsUpResult::FirstWins,
        Less => HeadsUpResult::SecondWins,
        Equal => HeadsUpResult::Split,
    }
}

/// Подсчёт карт по рангам, группы упорядочены по (кол-во desc, ранг desc).
fn rank_groups(cards: &[Card]) -> Vec<RankGroup> {
    let mut counts = [0u8; 15];
    for card in cards {
        counts[card.rank.value() as usize] += 1;
    }

    let mut groups: Vec<RankGroup> = Rank::ALL
        .iter()
        .rev()
        .filter(|r| counts[r.value() as usize] > 0)
        .map(|&rank| RankGroup {
            rank,
            count: counts[rank.value() as usize],
        })
        .collect();

    groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| b.rank.cmp(&a.rank)));
    groups
}

/// Масть, в которой 5+ карт.
fn flush_suit(cards: &[Card]) -> Option<Suit> {
    Suit::ALL
        .into_iter()
        .find(|&suit| cards.iter().filter(|c| c.suit == suit).count() >= 5)
}

fn sort_desc(cards: &mut [Card]) {
    cards.sort_by(|a, b| b.rank.cmp(&a.rank));
}

/// Первые `n` карт заданного ранга.
fn of_rank(cards: &[Card], rank: Rank, n: usize) -> Vec<Card> {
    cards.iter().filter(|c| c.rank == rank).take(n).copied().collect()
}

/// Старшие `n` карт, не входящие в `exclude`.
fn kickers(cards: &[Card], exclude: &[Rank], n: usize) -> Vec<Card> {
    let mut rest: Vec<Card> = cards
        .iter()
        .filter(|c| !exclude.contains(&c.rank))
        .copied()
        .collect();
    sort_desc(&mut rest);
    rest.truncate(n);
    rest
}

/// Старший стрит среди карт и по одной карте на каждый его ранг
/// (туз колеса – как единица).
fn best_straight(cards: &[Card]) -> Option<(Rank, Vec<Card>)> {
    let top = detect_straight(mask_of(cards))?;
    let five = straight_window(top)?
        .iter()
        .map(|&rank| cards.iter().find(|c| c.rank == rank).copied())
        .collect::<Option<Vec<Card>>>()?;
    Some((top, five))
}
