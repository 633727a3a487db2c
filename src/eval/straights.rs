use crate::domain::card::{Card, Rank};

/// Битовая маска рангов.
///
/// Используем 13 бит (от 2 до A):
/// бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

/// Маски всех стритов, индекс = старшая карта минус 5.
///
///   0: A2345 (колесо, туз играет как 1)
///   1: 23456
///   ...
///   9: TJQKA (бродвей)
pub const STRAIGHT_MASKS: [RankMask; 10] = [
    mask_from_ranks(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]),
    mask_from_ranks(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six]),
    mask_from_ranks(&[Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven]),
    mask_from_ranks(&[Rank::Four, Rank::Five, Rank::Six, Rank::Seven, Rank::Eight]),
    mask_from_ranks(&[Rank::Five, Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine]),
    mask_from_ranks(&[Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten]),
    mask_from_ranks(&[Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack]),
    mask_from_ranks(&[Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen]),
    mask_from_ranks(&[Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King]),
    mask_from_ranks(&[Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace]),
];

/// Получить битовую маску для одного ранга.
pub fn rank_to_bit(rank: Rank) -> RankMask {
    1u16 << (rank.value() - 2)
}

/// Построить маску из списка рангов.
pub const fn mask_from_ranks(ranks: &[Rank]) -> RankMask {
    let mut mask: RankMask = 0;
    let mut i = 0;
    while i < ranks.len() {
        let idx = (ranks[i] as u8).saturating_sub(2);
        mask |= 1 << idx;
        i += 1;
    }
    mask
}

/// Маска различных рангов набора карт.
pub fn mask_of(cards: &[Card]) -> RankMask {
    cards.iter().fold(0, |m, c| m | rank_to_bit(c.rank))
}

/// Найти старший стрит в маске рангов.
///
/// Туз участвует и сверху (14), и снизу (1). Колесо A2345 → `Rank::Five`.
/// Если стритов несколько (6–7 подряд), выигрывает старший.
pub fn detect_straight(rank_mask: RankMask) -> Option<Rank> {
    STRAIGHT_MASKS
        .iter()
        .enumerate()
        .rev()
        .find(|(_, sm)| rank_mask & **sm == **sm)
        .and_then(|(i, _)| Rank::from_value(i as u8 + 5))
}

/// Ранги стрита с заданной старшей картой, от старшего к младшему.
/// Для колеса туз стоит последним – он здесь младший.
/// `None`, если стрита с такой старшей картой не бывает (ниже пятёрки).
pub fn straight_window(high: Rank) -> Option<[Rank; 5]> {
    if high == Rank::Five {
        return Some([Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace]);
    }
    let top = high.value();
    let low = top.checked_sub(4)?;
    let mut window = [high; 5];
    for (slot, value) in window.iter_mut().zip((low..=top).rev()) {
        *slot = Rank::from_value(value)?;
    }
    Some(window)
}
