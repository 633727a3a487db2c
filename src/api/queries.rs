use crate::domain::card::Card;
use crate::domain::hand::{HandOutcome, HandSummary, Street};
use crate::domain::table::{Table, SEATS};
use crate::domain::{Chips, SeatIndex};
use crate::engine::HandEngine;
use crate::eval::evaluate_best_hand;

use super::dto::{SeatView, ShowdownView, TableSnapshot};

/// Сформировать снимок стола на основе `Table` + опционального `HandEngine`.
///
/// Чужие карманные карты видны только после вскрытия (`opponent_revealed`).
/// Оценщик при этом всегда работает с настоящими картами.
pub fn build_snapshot(table: &Table, engine: Option<&HandEngine>, viewer: SeatIndex) -> TableSnapshot {
    let current_actor = engine.and_then(|e| e.current_actor);
    let seats = table
        .seats
        .iter()
        .map(|p| {
            let visible = p.seat == viewer || table.opponent_revealed;
            SeatView {
                seat: p.seat,
                name: p.name.clone(),
                stack: p.stack,
                current_bet: p.current_bet,
                status: p.status,
                is_button: table.button == Some(p.seat),
                is_to_act: current_actor == Some(p.seat),
                hole_cards: visible.then(|| p.hole_cards.clone()),
                best_hand_label: if visible {
                    live_hand_label(table, p.seat).map(str::to_string)
                } else {
                    None
                },
            }
        })
        .collect();

    let summary = engine.and_then(|e| e.summary.as_ref());

    TableSnapshot {
        hand_id: engine.map(|e| e.hand_id),
        small_blind: table.config.stakes.small_blind,
        big_blind: table.config.stakes.big_blind,
        street: table.street,
        board: table.board.clone(),
        pot: engine.map(|e| e.pot.total).unwrap_or(Chips::ZERO),
        seats,
        button: table.button,
        current_actor,
        call_amount: engine.map(|e| e.call_amount(table)).unwrap_or(Chips::ZERO),
        hand_in_progress: table.hand_in_progress,
        is_showdown: table.street == Street::Showdown,
        runout: engine.map(|e| e.runout).unwrap_or(false),
        opponent_revealed: table.opponent_revealed,
        next_street: table
            .hand_in_progress
            .then(|| table.street.next())
            .flatten(),
        can_reveal_more: table.hand_in_progress && table.board.len() < Street::River.board_len(),
        showdown: summary.map(|s| build_showdown_view(table, s)),
    }
}

/// Название лучшей комбинации места по открытым картам.
/// `None`, пока видно меньше пяти карт.
pub fn live_hand_label(table: &Table, seat: SeatIndex) -> Option<&'static str> {
    let player = table.seat(seat)?;
    if player.hole_cards.len() + table.board.len() < 5 {
        return None;
    }
    Some(evaluate_best_hand(&player.hole_cards, &table.board).label())
}

/// Итог раздачи: текст результата, названия рук, подсветка карт победителя.
pub fn build_showdown_view(table: &Table, summary: &HandSummary) -> ShowdownView {
    let name_of = |seat: SeatIndex| {
        table
            .seat(seat)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("Seat {seat}"))
    };

    let result_text = match summary.outcome {
        HandOutcome::Winner { seat, by_fold: true } => {
            format!("{} wins (opponent folded)", name_of(seat))
        }
        HandOutcome::Winner { seat, by_fold: false } => format!("{} wins", name_of(seat)),
        HandOutcome::Split => "Split pot".to_string(),
    };

    let mut labels = vec![None; SEATS];
    let mut won = vec![Chips::ZERO; SEATS];
    for result in &summary.results {
        let idx = result.seat as usize;
        if idx < SEATS {
            labels[idx] = result.label.clone();
            won[idx] = result.won;
        }
    }

    let highlighted_cards: Vec<Card> = summary.winning_cards().to_vec();

    ShowdownView {
        outcome: summary.outcome,
        result_text,
        labels,
        highlighted_cards,
        won,
    }
}
