//! Оценка силы покерных рук (Texas Hold'em).
//!
//! Основные функции:
//!   `evaluate_best5(cards) -> HandScore` – лучшая пятёрка из 5–7 карт;
//!   `compare_heads_up(hole_a, hole_b, board) -> HeadsUpResult`.

pub mod evaluator;
pub mod hand_rank;
pub mod straights;

pub use evaluator::{compare_heads_up, compare_scores, evaluate_best5, evaluate_best_hand, HeadsUpResult};
pub use hand_rank::{describe_hand, HandCategory, HandScore};
