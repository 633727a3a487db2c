// tests/eval_test.rs

use heads_up_poker::domain::card::{Card, Rank};
use heads_up_poker::domain::deck::Deck;
use heads_up_poker::domain::hand::HandRank;
use heads_up_poker::eval::straights::{
    detect_straight, mask_from_ranks, mask_of, rank_to_bit, straight_window, RankMask,
    STRAIGHT_MASKS,
};
use heads_up_poker::eval::{
    compare_heads_up, describe_hand, evaluate_best5, evaluate_best_hand, HandCategory,
    HeadsUpResult,
};
use heads_up_poker::infra::DeterministicRng;

fn cards(s: &str) -> Vec<Card> {
    Card::parse_many(s).unwrap()
}

fn values(ranks: &[u8]) -> Vec<u8> {
    ranks.to_vec()
}

//
// ---- straights ----
//

#[test]
fn rank_to_bit_basic() {
    assert_eq!(rank_to_bit(Rank::Two), 1u16 << 0);
    assert_eq!(rank_to_bit(Rank::Ace), 1u16 << 12);

    let mask: RankMask = mask_from_ranks(&[Rank::Two, Rank::Four, Rank::Ace]);
    assert_eq!(
        mask,
        rank_to_bit(Rank::Two) | rank_to_bit(Rank::Four) | rank_to_bit(Rank::Ace)
    );
}

#[test]
fn detect_straight_wheel_broadway_and_highest_run() {
    assert_eq!(detect_straight(STRAIGHT_MASKS[0]), Some(Rank::Five));
    assert_eq!(detect_straight(STRAIGHT_MASKS[9]), Some(Rank::Ace));

    // 2..7 подряд: побеждает старший стрит.
    let six_run = mask_of(&cards("2c 3d 4h 5s 6c 7d"));
    assert_eq!(detect_straight(six_run), Some(Rank::Seven));

    // A2345 + 6: стрит до шестёрки, а не колесо.
    let wheel_and_six = mask_of(&cards("Ac 2d 3h 4s 5c 6d"));
    assert_eq!(detect_straight(wheel_and_six), Some(Rank::Six));

    assert_eq!(detect_straight(mask_of(&cards("Ac Kd Qh Js 9c"))), None);
}

//
// ---- сценарии ----
//

#[test]
fn two_pair_with_queen_kicker() {
    let score = evaluate_best5(&cards("As Ah Kc Kd Qs 2c 3h"));
    assert_eq!(score.category, HandCategory::TwoPair);
    assert_eq!(score.tiebreak_values(), values(&[14, 13, 12]));
    assert_eq!(score.cards.len(), 5);
    assert_eq!(score.label(), "Two pair");
}

#[test]
fn royal_flush_from_seven_cards() {
    let score = evaluate_best5(&cards("As Ks Qs Js Ts 2c 3h"));
    assert_eq!(score.category, HandCategory::RoyalFlush);
    assert_eq!(score.tiebreak_values(), values(&[14]));
    assert_eq!(score.cards, cards("As Ks Qs Js Ts"));
}

#[test]
fn wheel_beats_pair_of_nines() {
    let score = evaluate_best5(&cards("As 2h 3c 4d 5s 9c 9h"));
    assert_eq!(score.category, HandCategory::Straight);
    assert_eq!(score.tiebreak_values(), values(&[5]));
    // Туз колеса – последняя (младшая) карта.
    assert_eq!(score.cards, cards("5s 4d 3c 2h As"));
}

#[test]
fn wheel_is_weaker_than_six_high_straight() {
    let wheel = evaluate_best5(&cards("As 2h 3c 4d 5s"));
    let six_high = evaluate_best5(&cards("2h 3c 4d 5s 6h"));
    assert_eq!(wheel.category, HandCategory::Straight);
    assert_eq!(six_high.tiebreak_values(), values(&[6]));
    assert!(six_high > wheel);

    let steel_wheel = evaluate_best5(&cards("Ah 2h 3h 4h 5h Kc Kd"));
    assert_eq!(steel_wheel.category, HandCategory::StraightFlush);
    assert_eq!(steel_wheel.tiebreak_values(), values(&[5]));
}

#[test]
fn highest_straight_is_chosen_from_six_consecutive() {
    let score = evaluate_best5(&cards("2c 3d 4h 5s 6c 7d Kh"));
    assert_eq!(score.category, HandCategory::Straight);
    assert_eq!(score.tiebreak_values(), values(&[7]));
}

#[test]
fn two_trips_make_a_full_house() {
    let score = evaluate_best5(&cards("Ah Ad Ac Kh Kd Kc 2s"));
    assert_eq!(score.category, HandCategory::FullHouse);
    assert_eq!(score.tiebreak_values(), values(&[14, 13]));
}

#[test]
fn full_house_takes_the_best_pair() {
    let score = evaluate_best5(&cards("9h 9d 9c 5h 5d 7c 7s"));
    assert_eq!(score.category, HandCategory::FullHouse);
    assert_eq!(score.tiebreak_values(), values(&[9, 7]));
}

#[test]
fn three_pairs_use_top_two_and_best_kicker() {
    let score = evaluate_best5(&cards("Ah Ad Kh Kd Qh Qd 2c"));
    assert_eq!(score.category, HandCategory::TwoPair);
    assert_eq!(score.tiebreak_values(), values(&[14, 13, 12]));
}

#[test]
fn quads_with_kicker() {
    let score = evaluate_best5(&cards("7h 7d 7c 7s Ah 2c 3d"));
    assert_eq!(score.category, HandCategory::FourOfAKind);
    assert_eq!(score.tiebreak_values(), values(&[7, 14]));
}

#[test]
fn flush_uses_top_five_suited_cards() {
    let score = evaluate_best5(&cards("Ah Jh 9h 6h 3h 2h Kd"));
    assert_eq!(score.category, HandCategory::Flush);
    assert_eq!(score.tiebreak_values(), values(&[14, 11, 9, 6, 3]));
}

#[test]
fn straight_flush_beats_trips_on_the_same_cards() {
    let score = evaluate_best5(&cards("5h 6h 7h 8h 9h 9c 9d"));
    assert_eq!(score.category, HandCategory::StraightFlush);
    assert_eq!(score.tiebreak_values(), values(&[9]));
}

#[test]
fn pair_and_high_card_kickers() {
    let pair = evaluate_best5(&cards("Jh Jd 9c 6s 4h 3d 2c"));
    assert_eq!(pair.category, HandCategory::OnePair);
    assert_eq!(pair.tiebreak_values(), values(&[11, 9, 6, 4]));

    let high = evaluate_best5(&cards("Ah Jd 9c 6s 4h 3d 2c"));
    assert_eq!(high.category, HandCategory::HighCard);
    assert_eq!(high.tiebreak_values(), values(&[14, 11, 9, 6, 4]));

    let trips = evaluate_best5(&cards("Qh Qd Qc 8s 4h 3d 2c"));
    assert_eq!(trips.category, HandCategory::ThreeOfAKind);
    assert_eq!(trips.tiebreak_values(), values(&[12, 8, 4]));
}

#[test]
#[should_panic]
fn fewer_than_five_cards_is_a_programmer_error() {
    evaluate_best5(&cards("Ah Kd Qc Js"));
}

#[test]
#[should_panic]
fn more_than_seven_cards_is_a_programmer_error() {
    evaluate_best5(&cards("Ah Kd Qc Js 9h 8d 7c 6s"));
}

//
// ---- сравнение ----
//

#[test]
fn board_plays_for_both_is_a_split() {
    let board = cards("As Ks Qd Jc Th");
    let result = compare_heads_up(&cards("2c 3d"), &cards("4h 5c"), &board);
    assert_eq!(result, HeadsUpResult::Split);
}

#[test]
fn different_cards_with_equal_strength_split() {
    let board = cards("Ah Kd 8c 5s 2h");
    let a = cards("Qc 3d");
    let b = cards("Qd 4c");
    assert_eq!(compare_heads_up(&a, &b, &board), HeadsUpResult::Split);

    let sa = evaluate_best_hand(&a, &board);
    let sb = evaluate_best_hand(&b, &board);
    assert_eq!(sa, sb);
    assert_ne!(sa.cards, sb.cards);
}

#[test]
fn kicker_decides_and_swapping_swaps_the_winner() {
    let board = cards("Ah 9d 8c 5s 2h");
    let a = cards("Ad Kc");
    let b = cards("As Qc");
    assert_eq!(compare_heads_up(&a, &b, &board), HeadsUpResult::FirstWins);
    assert_eq!(compare_heads_up(&b, &a, &board), HeadsUpResult::SecondWins);
}

#[test]
fn category_order_is_total() {
    let ordered = HandCategory::ALL;
    for pair in ordered.windows(2) {
        assert!(pair[0] < pair[1]);
    }
    assert!(HandCategory::RoyalFlush > HandCategory::StraightFlush);
    assert!(HandCategory::OnePair > HandCategory::HighCard);
}

#[test]
fn packed_rank_orders_by_category_first() {
    let best_pair =
        HandRank::from_category_and_ranks(HandCategory::OnePair, &[Rank::Ace, Rank::King, Rank::Queen, Rank::Jack]);
    let worst_two_pair =
        HandRank::from_category_and_ranks(HandCategory::TwoPair, &[Rank::Three, Rank::Two, Rank::Four]);
    assert!(worst_two_pair > best_pair);

    assert_eq!(best_pair.category(), HandCategory::OnePair);
    assert_eq!(
        best_pair.tiebreak(),
        vec![Rank::Ace, Rank::King, Rank::Queen, Rank::Jack]
    );
    assert_eq!(describe_hand(worst_two_pair), "Two pair");
}

//
// ---- свойства на случайных раздачах ----
//

#[test]
fn best_five_is_drawn_from_input_and_reproduces_its_score() {
    let mut rng = DeterministicRng::from_seed(2024);

    for _ in 0..2000 {
        let mut deck = Deck::standard_52();
        deck.shuffle(&mut rng);
        let seven = deck.draw_n(7);

        let score = evaluate_best5(&seven);
        assert_eq!(score.cards.len(), 5);
        for card in &score.cards {
            assert!(seven.contains(card), "{card} is not in {seven:?}");
        }

        // Выбранная пятёрка сама по себе даёт ту же силу.
        let again = evaluate_best5(&score.cards);
        assert_eq!(again.category, score.category);
        assert_eq!(again.rank(), score.rank());

        // И не слабее любой другой пятёрки, например первых пяти карт.
        assert!(score >= evaluate_best5(&seven[..5]));
        assert!(score >= evaluate_best5(&seven[2..]));
    }
}

#[test]
fn compare_heads_up_is_antisymmetric() {
    let mut rng = DeterministicRng::from_seed(99);

    for _ in 0..500 {
        let mut deck = Deck::standard_52();
        deck.shuffle(&mut rng);
        let a = deck.draw_n(2);
        let b = deck.draw_n(2);
        let board = deck.draw_n(5);

        let ab = compare_heads_up(&a, &b, &board);
        let ba = compare_heads_up(&b, &a, &board);
        assert_eq!(ab, ba.reversed());
    }
}

#[test]
fn straight_window_lists_ranks_from_the_top() {
    assert_eq!(
        straight_window(Rank::Nine),
        Some([Rank::Nine, Rank::Eight, Rank::Seven, Rank::Six, Rank::Five])
    );
    assert_eq!(
        straight_window(Rank::Five),
        Some([Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace])
    );
    assert_eq!(straight_window(Rank::Ace).map(|w| w[4]), Some(Rank::Ten));
    // Ниже пятёрки стрита не бывает.
    assert_eq!(straight_window(Rank::Four), None);
    assert_eq!(straight_window(Rank::Two), None);
}
