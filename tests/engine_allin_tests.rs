use heads_up_poker::domain::{
    chips::Chips,
    hand::{HandOutcome, Street},
    player::PlayerStatus,
    table::{SeatIndex, StackPolicy, Table, TableConfig},
};
use heads_up_poker::engine::{
    actions::{PlayerAction, PlayerActionKind},
    errors::EngineError,
    game_loop::{abandon_hand, apply_action, reveal_next_street, run_out, start_hand, HandEngine, HandStatus},
    hand_history::HandEventKind,
    RandomSource,
};

/// Детерминированный RNG: колода не перемешивается.
#[derive(Default)]
struct DummyRng;

impl RandomSource for DummyRng {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}

    fn roll(&mut self, _sides: u32) -> u32 {
        0
    }
}

/// Стол с переносом стеков и заданными стартовыми стеками по местам.
fn table_with_stacks(stacks: [u64; 2]) -> Table {
    let mut table = Table::new(TableConfig {
        stack_policy: StackPolicy::CarryOver,
        ..TableConfig::default()
    });
    for (player, stack) in table.seats.iter_mut().zip(stacks) {
        player.stack = Chips(stack);
    }
    table
}

fn act(table: &mut Table, engine: &mut HandEngine, seat: SeatIndex, kind: PlayerActionKind) -> HandStatus {
    apply_action(table, engine, PlayerAction::new(seat, kind)).unwrap()
}

#[test]
fn both_all_in_preflop_reveals_every_street_step_by_step() {
    let mut table = Table::new(TableConfig::default());
    let mut engine = start_hand(&mut table, &mut DummyRng, 1).unwrap();

    assert_eq!(act(&mut table, &mut engine, 0, PlayerActionKind::AllIn), HandStatus::Ongoing);
    assert_eq!(engine.current_actor, Some(1));
    assert_eq!(engine.call_amount(&table), Chips(980));

    assert_eq!(act(&mut table, &mut engine, 1, PlayerActionKind::AllIn), HandStatus::Runout);
    assert!(engine.runout);
    assert_eq!(engine.current_actor, None);
    assert!(table.opponent_revealed);
    assert!(table.seats.iter().all(|p| p.status == PlayerStatus::AllIn));
    assert_eq!(engine.pot.total, Chips(2000));
    assert!(table.board.is_empty());

    // Во время ранаута ставки закрыты.
    let err = apply_action(&mut table, &mut engine, PlayerAction::new(0, PlayerActionKind::Check)).unwrap_err();
    assert_eq!(err, EngineError::RunoutInProgress);

    for (street, board_len) in [(Street::Flop, 3), (Street::Turn, 4), (Street::River, 5)] {
        assert_eq!(reveal_next_street(&mut table, &mut engine), Ok(HandStatus::Runout));
        assert_eq!(table.street, street);
        assert_eq!(table.board.len(), board_len);
        assert!(table.hand_in_progress);
        let err = apply_action(&mut table, &mut engine, PlayerAction::new(0, PlayerActionKind::Fold)).unwrap_err();
        assert_eq!(err, EngineError::RunoutInProgress);
    }

    let status = reveal_next_street(&mut table, &mut engine).unwrap();
    let HandStatus::Finished(summary) = status else {
        panic!("expected showdown after the river");
    };
    // Канонический порядок колоды: на борде стрит-флеш, банк делится.
    assert_eq!(summary.outcome, HandOutcome::Split);
    assert_eq!(table.street, Street::Showdown);
    assert!(!table.hand_in_progress);
    assert_eq!(table.total_stacks(), Chips(2000));

    assert!(engine
        .history
        .events
        .iter()
        .any(|e| e.kind == HandEventKind::RunoutStarted { from: Street::Preflop }));

    let err = reveal_next_street(&mut table, &mut engine).unwrap_err();
    assert_eq!(err, EngineError::NoActiveHand);
}

#[test]
fn calling_an_all_in_also_starts_the_runout() {
    let mut table = Table::new(TableConfig::default());
    let mut engine = start_hand(&mut table, &mut DummyRng, 1).unwrap();

    act(&mut table, &mut engine, 0, PlayerActionKind::AllIn);
    assert_eq!(act(&mut table, &mut engine, 1, PlayerActionKind::Call), HandStatus::Runout);

    let summary = run_out(&mut table, &mut engine).unwrap();
    assert_eq!(summary.board.len(), 5);
    assert_eq!(summary.total_pot, Chips(2000));
}

#[test]
fn uncalled_part_of_an_all_in_goes_back() {
    // Кнопка (место 0) с 1000, соперник с 500.
    let mut table = table_with_stacks([1000, 500]);
    let total = table.total_stacks();
    let mut engine = start_hand(&mut table, &mut DummyRng, 1).unwrap();

    act(&mut table, &mut engine, 0, PlayerActionKind::AllIn);
    let status = act(&mut table, &mut engine, 1, PlayerActionKind::Call);
    assert_eq!(status, HandStatus::Runout);

    // Соперник покрыл только 500: лишние 500 вернулись кнопке.
    assert_eq!(table.seats[1].status, PlayerStatus::AllIn);
    assert_eq!(table.seats[0].stack, Chips(500));
    assert_eq!(table.seats[0].current_bet, Chips(500));
    assert_eq!(engine.pot.total, Chips(1000));
    assert_eq!(engine.contributions, [Chips(500), Chips(500)]);
    assert!(engine
        .history
        .events
        .iter()
        .any(|e| e.kind == HandEventKind::UncalledBetReturned { seat: 0, amount: Chips(500) }));
    assert_eq!(table.total_stacks() + engine.pot.total, total);

    let summary = run_out(&mut table, &mut engine).unwrap();
    assert_eq!(summary.total_pot, Chips(1000));
    assert_eq!(table.total_stacks(), total);
}

#[test]
fn lone_active_player_still_has_to_answer_an_all_in() {
    let mut table = table_with_stacks([1000, 100]);
    let mut engine = start_hand(&mut table, &mut DummyRng, 1).unwrap();

    act(&mut table, &mut engine, 0, PlayerActionKind::Call);
    let status = act(&mut table, &mut engine, 1, PlayerActionKind::AllIn);

    // Ставить может только кнопка, но она должна 80 – раунд не закрыт.
    assert_eq!(status, HandStatus::Ongoing);
    assert_eq!(engine.current_actor, Some(0));
    assert_eq!(engine.call_amount(&table), Chips(80));
    assert!(!engine.runout);

    let status = act(&mut table, &mut engine, 0, PlayerActionKind::Fold);
    let HandStatus::Finished(summary) = status else {
        panic!("fold must end the hand");
    };
    assert_eq!(summary.outcome, HandOutcome::Winner { seat: 1, by_fold: true });
    assert_eq!(table.seats[1].stack, Chips(120));
    assert_eq!(table.seats[0].stack, Chips(980));
}

#[test]
fn calling_a_short_all_in_runs_out_from_the_same_street() {
    let mut table = table_with_stacks([1000, 100]);
    let mut engine = start_hand(&mut table, &mut DummyRng, 1).unwrap();

    act(&mut table, &mut engine, 0, PlayerActionKind::Call);
    act(&mut table, &mut engine, 1, PlayerActionKind::AllIn);
    assert_eq!(act(&mut table, &mut engine, 0, PlayerActionKind::Call), HandStatus::Runout);

    assert_eq!(table.seats[0].status, PlayerStatus::Active);
    assert_eq!(engine.pot.total, Chips(200));
    let summary = run_out(&mut table, &mut engine).unwrap();
    assert_eq!(summary.total_pot, Chips(200));
    assert_eq!(table.total_stacks(), Chips(1100));
}

#[test]
fn short_big_blind_goes_all_in_posting() {
    let mut table = table_with_stacks([1000, 15]);
    let mut engine = start_hand(&mut table, &mut DummyRng, 1).unwrap();

    assert_eq!(table.seats[1].current_bet, Chips(15));
    assert_eq!(table.seats[1].status, PlayerStatus::AllIn);
    assert_eq!(engine.betting.current_bet, Chips(15));
    assert_eq!(engine.current_actor, Some(0));
    assert_eq!(engine.call_amount(&table), Chips(5));

    assert_eq!(act(&mut table, &mut engine, 0, PlayerActionKind::Call), HandStatus::Runout);
    assert_eq!(engine.pot.total, Chips(30));
}

#[test]
fn short_small_blind_all_in_starts_runout_at_once() {
    let mut table = table_with_stacks([5, 1000]);
    let engine = start_hand(&mut table, &mut DummyRng, 1).unwrap();

    // Большой блайнд получает обратно то, что никто не может уравнять.
    assert!(engine.runout);
    assert_eq!(engine.current_actor, None);
    assert_eq!(table.seats[0].current_bet, Chips(5));
    assert_eq!(table.seats[1].current_bet, Chips(5));
    assert_eq!(table.seats[1].stack, Chips(995));
    assert_eq!(engine.pot.total, Chips(10));
}

#[test]
fn all_in_on_the_flop_reveals_only_the_remaining_streets() {
    let mut table = Table::new(TableConfig::default());
    let mut engine = start_hand(&mut table, &mut DummyRng, 1).unwrap();

    act(&mut table, &mut engine, 0, PlayerActionKind::Call);
    act(&mut table, &mut engine, 1, PlayerActionKind::Check);
    assert_eq!(table.street, Street::Flop);

    act(&mut table, &mut engine, 0, PlayerActionKind::AllIn);
    assert_eq!(act(&mut table, &mut engine, 1, PlayerActionKind::Call), HandStatus::Runout);

    assert_eq!(reveal_next_street(&mut table, &mut engine), Ok(HandStatus::Runout));
    assert_eq!(table.street, Street::Turn);
    assert_eq!(reveal_next_street(&mut table, &mut engine), Ok(HandStatus::Runout));
    assert_eq!(table.street, Street::River);
    assert!(matches!(
        reveal_next_street(&mut table, &mut engine),
        Ok(HandStatus::Finished(_))
    ));
}

#[test]
fn abandoning_a_hand_refunds_every_contribution() {
    let mut table = table_with_stacks([700, 1300]);
    let mut engine = start_hand(&mut table, &mut DummyRng, 1).unwrap();
    act(&mut table, &mut engine, 0, PlayerActionKind::Raise(Chips(90)));
    act(&mut table, &mut engine, 1, PlayerActionKind::Call);
    assert_eq!(engine.pot.total, Chips(200));

    abandon_hand(&mut table, &mut engine);

    assert!(!table.hand_in_progress);
    assert_eq!(table.seats[0].stack, Chips(700));
    assert_eq!(table.seats[1].stack, Chips(1300));
    assert!(engine.pot.total.is_zero());
    assert_eq!(
        engine.history.events.last().map(|e| &e.kind),
        Some(&HandEventKind::HandAbandoned { hand_id: 1 })
    );

    // Новая раздача на том же столе стартует как обычно.
    let engine = start_hand(&mut table, &mut DummyRng, 2).unwrap();
    assert_eq!(table.button, Some(1));
    assert_eq!(engine.pot.total, Chips(30));
}

/// All-in только при пустом стеке (сфолдившие не в счёт).
fn assert_all_in_means_empty_stack(table: &Table) {
    for p in &table.seats {
        assert_eq!(p.is_all_in(), p.stack.is_zero() && !p.is_folded(), "{p:?}");
    }
}

#[test]
fn payout_clears_the_all_in_flag() {
    // Короткий стек идёт all-in и делит банк: у обоих снова есть фишки.
    let mut table = table_with_stacks([1000, 45]);
    let mut engine = start_hand(&mut table, &mut DummyRng, 1).unwrap();
    act(&mut table, &mut engine, 0, PlayerActionKind::Call);
    act(&mut table, &mut engine, 1, PlayerActionKind::AllIn);
    act(&mut table, &mut engine, 0, PlayerActionKind::Call);
    assert_eq!(table.seats[1].status, PlayerStatus::AllIn);

    let summary = run_out(&mut table, &mut engine).unwrap();
    assert_eq!(summary.outcome, HandOutcome::Split);
    assert_eq!(table.seats[1].stack, Chips(45));
    assert_eq!(table.seats[1].status, PlayerStatus::Active);
    assert_all_in_means_empty_stack(&table);
}

#[test]
fn fold_win_clears_the_all_in_flag() {
    let mut table = table_with_stacks([1000, 100]);
    let mut engine = start_hand(&mut table, &mut DummyRng, 1).unwrap();
    act(&mut table, &mut engine, 0, PlayerActionKind::Call);
    act(&mut table, &mut engine, 1, PlayerActionKind::AllIn);
    act(&mut table, &mut engine, 0, PlayerActionKind::Fold);

    assert_eq!(table.seats[1].stack, Chips(120));
    assert_all_in_means_empty_stack(&table);
}

#[test]
fn abandon_clears_the_all_in_flag() {
    let mut table = table_with_stacks([1000, 100]);
    let mut engine = start_hand(&mut table, &mut DummyRng, 1).unwrap();
    act(&mut table, &mut engine, 0, PlayerActionKind::Call);
    act(&mut table, &mut engine, 1, PlayerActionKind::AllIn);

    abandon_hand(&mut table, &mut engine);
    assert_eq!(table.seats[1].stack, Chips(100));
    assert_all_in_means_empty_stack(&table);
}

#[test]
fn all_in_flag_matches_empty_stack_over_random_hands() {
    use heads_up_poker::infra::DeterministicRng;

    let mut rng = DeterministicRng::from_seed(45);
    let mut table = table_with_stacks([45, 45]);
    let kinds = [
        PlayerActionKind::Fold,
        PlayerActionKind::Check,
        PlayerActionKind::Call,
        PlayerActionKind::Raise(Chips(20)),
        PlayerActionKind::AllIn,
    ];

    for hand_id in 1..=3000 {
        if table.seats.iter().any(|p| p.stack.is_zero()) {
            table = table_with_stacks([45, 45]);
        }
        let mut engine = start_hand(&mut table, &mut rng, hand_id).unwrap();
        assert_all_in_means_empty_stack(&table);

        while table.hand_in_progress {
            if engine.runout {
                reveal_next_street(&mut table, &mut engine).unwrap();
            } else {
                let seat = engine.current_actor.unwrap();
                let kind = kinds[rng.roll(kinds.len() as u32) as usize];
                // Нелегальные ходы отклоняются без изменений – пробуем дальше.
                let _ = apply_action(&mut table, &mut engine, PlayerAction::new(seat, kind));
            }
            if table.hand_in_progress {
                for p in &table.seats {
                    if !p.is_folded() && p.stack.is_zero() {
                        assert!(p.is_all_in(), "{p:?}");
                    }
                }
            }
        }
        assert_all_in_means_empty_stack(&table);
        assert!(engine.pot.total.is_zero());
        assert_eq!(table.total_stacks(), Chips(90));
    }
}
