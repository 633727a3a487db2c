use log::{debug, info};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{HandOutcome, HandSummary, PlayerHandResult, Street};
use crate::domain::player::PlayerStatus;
use crate::domain::table::{other_seat, StackPolicy, Table, SEATS};
use crate::domain::{HandId, SeatIndex};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{first_to_act, next_button, next_to_act};
use crate::engine::pot::Pot;
use crate::engine::validation::validate_action;
use crate::engine::RandomSource;
use crate::eval::{compare_scores, describe_hand, evaluate_best_hand, HandScore, HeadsUpResult};

/// Карт на борде к риверу.
const BOARD_CARDS: usize = 5;

/// Статус раздачи после очередного перехода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStatus {
    /// Идут торги, `current_actor` ждёт хода.
    Ongoing,
    /// Торги закрыты (all-in), борд докладывается шагами через `reveal_next_street`.
    Runout,
    Finished(HandSummary),
}

/// Внутреннее состояние раздачи.
#[derive(Clone, Debug)]
pub struct HandEngine {
    pub hand_id: HandId,
    /// Остаток колоды после раздачи карманных карт и борда.
    pub deck: Deck,
    /// Пять карт борда, отложенные в начале раздачи; открываются по улицам.
    pub reserved_board: Vec<Card>,
    pub betting: BettingState,
    pub pot: Pot,
    /// Сколько всего фишек внёс каждый seat за раздачу.
    pub contributions: [Chips; SEATS],
    /// Чей сейчас ход (seat).
    pub current_actor: Option<SeatIndex>,
    /// Идёт all-in ранаут: ставки закрыты.
    pub runout: bool,
    /// Счётчик принятых действий (штамп для отложенных ходов бота).
    pub actions_applied: u64,
    /// Итог, когда раздача завершена.
    pub summary: Option<HandSummary>,
    pub history: HandHistory,
}

impl HandEngine {
    fn new(hand_id: HandId, deck: Deck, reserved_board: Vec<Card>) -> Self {
        Self {
            hand_id,
            deck,
            reserved_board,
            betting: BettingState::new(Street::Preflop),
            pot: Pot::new(),
            contributions: [Chips::ZERO; SEATS],
            current_actor: None,
            runout: false,
            actions_applied: 0,
            summary: None,
            history: HandHistory::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.summary.is_some()
    }

    /// Сумма колла для игрока, чей сейчас ход (0, если хода нет).
    pub fn call_amount(&self, table: &Table) -> Chips {
        self.current_actor
            .and_then(|seat| table.seat(seat))
            .map(|p| self.betting.to_call(p).min(p.stack))
            .unwrap_or(Chips::ZERO)
    }
}

/// Старт новой раздачи со свежей перемешанной колодой.
pub fn start_hand<R: RandomSource>(
    table: &mut Table,
    rng: &mut R,
    hand_id: HandId,
) -> Result<HandEngine, EngineError> {
    let mut deck = Deck::standard_52();
    deck.shuffle(rng);
    start_hand_with_deck(table, deck, hand_id)
}

/// Старт раздачи с уже подготовленной колодой:
/// - переводит кнопку;
/// - раздаёт по 2 карты и откладывает 5 карт борда;
/// - постит блайнды и определяет, кто ходит первым.
pub fn start_hand_with_deck(
    table: &mut Table,
    mut deck: Deck,
    hand_id: HandId,
) -> Result<HandEngine, EngineError> {
    if table.hand_in_progress {
        return Err(EngineError::HandAlreadyInProgress);
    }
    if table.config.stack_policy == StackPolicy::CarryOver {
        if let Some(busted) = table.seats.iter().find(|p| p.stack.is_zero()) {
            return Err(EngineError::PlayerBusted(busted.seat));
        }
    }

    let button = next_button(table);

    // Сначала тянем все карты в локальные переменные: при нехватке стол не трогаем.
    let mut hole: [Vec<Card>; SEATS] = [Vec::with_capacity(2), Vec::with_capacity(2)];
    for _round in 0..2 {
        for seat in [other_seat(button), button] {
            let card = deck.draw_one().ok_or(EngineError::DeckExhausted)?;
            hole[seat as usize].push(card);
        }
    }
    let reserved_board = deck.draw_n(BOARD_CARDS);
    if reserved_board.len() < BOARD_CARDS {
        return Err(EngineError::DeckExhausted);
    }

    let starting_stack = table.config.starting_stack;
    let reset_stacks = table.config.stack_policy == StackPolicy::ResetEachHand;
    for (player, cards) in table.seats.iter_mut().zip(hole) {
        if reset_stacks {
            player.stack = starting_stack;
        }
        player.reset_for_new_hand();
        player.hole_cards = cards;
    }
    table.button = Some(button);
    table.board.clear();
    table.street = Street::Preflop;
    table.hand_in_progress = true;
    table.opponent_revealed = false;

    let mut engine = HandEngine::new(hand_id, deck, reserved_board);
    engine
        .history
        .push(HandEventKind::HandStarted { hand_id, button });
    for player in &table.seats {
        engine.history.push(HandEventKind::HoleCardsDealt {
            seat: player.seat,
            cards: player.hole_cards.clone(),
        });
    }

    post_blinds(table, &mut engine, button);
    info!("hand {hand_id} started, button on seat {button}");

    // Короткие стеки могли уйти в all-in ещё на блайндах.
    progress(table, &mut engine, None)?;
    Ok(engine)
}

/// Кнопка ставит малый блайнд, соперник – большой (не больше стека).
fn post_blinds(table: &mut Table, engine: &mut HandEngine, button: SeatIndex) {
    let stakes = table.config.stakes.clone();
    let bb_seat = other_seat(button);

    let sb_paid = table.seats[button as usize].commit(stakes.small_blind);
    add_contribution(engine, button, sb_paid);

    let bb_paid = table.seats[bb_seat as usize].commit(stakes.big_blind);
    add_contribution(engine, bb_seat, bb_paid);

    engine.betting.raise_to(table.max_bet());
    engine.history.push(HandEventKind::BlindsPosted {
        small_blind: (button, sb_paid),
        big_blind: (bb_seat, bb_paid),
    });
}

/// Обновить общий pot и contributions.
fn add_contribution(engine: &mut HandEngine, seat: SeatIndex, amount: Chips) {
    if amount.is_zero() {
        return;
    }
    engine.pot.add(amount);
    engine.contributions[seat as usize] += amount;
}

/// Применить действие игрока. Возвращает статус раздачи.
///
/// При любой ошибке состояние стола и движка не меняется.
pub fn apply_action(
    table: &mut Table,
    engine: &mut HandEngine,
    action: PlayerAction,
) -> Result<HandStatus, EngineError> {
    if !table.hand_in_progress || engine.is_finished() || table.street == Street::Showdown {
        return Err(EngineError::NoActiveHand);
    }
    if engine.runout {
        return Err(EngineError::RunoutInProgress);
    }

    let seat = action.seat;
    let player = table.seat(seat).ok_or(EngineError::InvalidSeat(seat))?;
    if engine.current_actor != Some(seat) {
        return Err(EngineError::NotPlayersTurn(seat));
    }
    validate_action(player, &action.kind, &engine.betting)?;
    let to_call = engine.betting.to_call(player);

    // Дальше – только мутации.
    let player = &mut table.seats[seat as usize];
    let committed = match action.kind {
        PlayerActionKind::Fold => {
            player.status = PlayerStatus::Folded;
            Chips::ZERO
        }
        PlayerActionKind::Check => Chips::ZERO,
        PlayerActionKind::Call => player.commit(to_call),
        PlayerActionKind::Raise(amount) => player.commit(amount),
        PlayerActionKind::AllIn => {
            let stack = player.stack;
            player.commit(stack)
        }
    };
    let (new_stack, new_bet) = (player.stack, player.current_bet);

    add_contribution(engine, seat, committed);
    engine.betting.raise_to(new_bet);
    engine.betting.mark_acted(seat);
    engine.actions_applied += 1;
    engine.history.push(HandEventKind::PlayerActed {
        seat,
        action: action.kind,
        committed,
        new_stack,
        pot_after: engine.pot.total,
    });
    debug!(
        "hand {}: seat {seat} {} (committed {committed}, pot {})",
        engine.hand_id, action.kind, engine.pot.total
    );

    progress(table, engine, Some(seat))
}

/// Что происходит после изменения ставок:
/// остался один игрок → конец; раунд не закрыт → ход дальше;
/// кто-то в all-in → ранаут; иначе следующая улица или шоудаун.
fn progress(
    table: &mut Table,
    engine: &mut HandEngine,
    last_actor: Option<SeatIndex>,
) -> Result<HandStatus, EngineError> {
    if table.players_in_hand().count() <= 1 {
        return finish_without_showdown(table, engine);
    }

    if !engine.betting.is_round_complete(&table.seats) {
        engine.current_actor = match last_actor {
            Some(seat) => next_to_act(table, seat),
            None => first_to_act(table),
        };
        return Ok(HandStatus::Ongoing);
    }

    return_uncalled_bet(table, engine);

    if table.seats.iter().any(|p| !p.can_act()) {
        begin_runout(table, engine);
        return Ok(HandStatus::Runout);
    }

    if table.street == Street::River {
        return finish_with_showdown(table, engine);
    }

    let next = table
        .street
        .next()
        .ok_or(EngineError::Internal("no street after showdown"))?;
    deal_street(table, engine, next)?;
    engine.current_actor = first_to_act(table);
    Ok(HandStatus::Ongoing)
}

/// Вернуть неуравненную часть ставки, если соперник в all-in на меньшую сумму.
fn return_uncalled_bet(table: &mut Table, engine: &mut HandEngine) {
    let (hi, lo) = if table.seats[0].current_bet >= table.seats[1].current_bet {
        (0, 1)
    } else {
        (1, 0)
    };
    let excess = table.seats[hi]
        .current_bet
        .saturating_sub(table.seats[lo].current_bet);
    if excess.is_zero() || !table.seats[lo].is_in_hand() {
        return;
    }

    table.seats[hi].refund(excess);
    let back = engine.pot.remove(excess);
    engine.contributions[hi] -= back;
    engine.betting.current_bet = table.seats[lo].current_bet;
    engine.history.push(HandEventKind::UncalledBetReturned {
        seat: hi as SeatIndex,
        amount: back,
    });
}

/// Закрыть торги: дальше борд открывается шагами без ставок.
fn begin_runout(table: &mut Table, engine: &mut HandEngine) {
    engine.runout = true;
    engine.current_actor = None;
    table.opponent_revealed = true;
    engine
        .history
        .push(HandEventKind::RunoutStarted { from: table.street });
    debug!("hand {}: all-in runout from {}", engine.hand_id, table.street);
}

/// Один шаг ранаута: следующая улица, а после ривера – шоудаун.
pub fn reveal_next_street(
    table: &mut Table,
    engine: &mut HandEngine,
) -> Result<HandStatus, EngineError> {
    if !table.hand_in_progress || engine.is_finished() {
        return Err(EngineError::NoActiveHand);
    }
    if !engine.runout {
        return Err(EngineError::NoRunout);
    }

    match table.street.next() {
        Some(Street::Showdown) | None => finish_with_showdown(table, engine),
        Some(next) => {
            deal_street(table, engine, next)?;
            Ok(HandStatus::Runout)
        }
    }
}

/// Доиграть ранаут до конца без пауз.
pub fn run_out(table: &mut Table, engine: &mut HandEngine) -> Result<HandSummary, EngineError> {
    loop {
        if let HandStatus::Finished(summary) = reveal_next_street(table, engine)? {
            return Ok(summary);
        }
    }
}

/// Открыть карты новой улицы и сбросить ставки раунда.
fn deal_street(table: &mut Table, engine: &mut HandEngine, street: Street) -> Result<(), EngineError> {
    let target = street.board_len();
    if engine.reserved_board.len() < target || table.board.len() > target {
        return Err(EngineError::DeckExhausted);
    }

    let cards = engine.reserved_board[table.board.len()..target].to_vec();
    table.board.extend_from_slice(&cards);
    table.street = street;
    for player in table.seats.iter_mut() {
        player.current_bet = Chips::ZERO;
    }
    engine.betting.reset_for_street(street);

    engine.history.push(HandEventKind::BoardDealt { street, cards });
    engine.history.push(HandEventKind::StreetChanged { street });
    debug!("hand {}: {} {:?}", engine.hand_id, street, table.board);
    Ok(())
}

/// Завершение раздачи без шоудауна (соперник сфолдил).
fn finish_without_showdown(
    table: &mut Table,
    engine: &mut HandEngine,
) -> Result<HandStatus, EngineError> {
    let winner = table
        .players_in_hand()
        .next()
        .map(|p| p.seat)
        .ok_or(EngineError::Internal("no player left in hand"))?;

    table.street = Street::Showdown;
    table.opponent_revealed = true;
    engine.current_actor = None;

    let total_pot = engine.pot.total;
    let won = award_pot(table, engine, &[winner]);
    let results = table
        .seats
        .iter()
        .map(|p| PlayerHandResult {
            seat: p.seat,
            rank: None,
            label: None,
            best_cards: Vec::new(),
            won: won[p.seat as usize],
            is_winner: p.seat == winner,
        })
        .collect();

    let summary = HandSummary {
        hand_id: engine.hand_id,
        street_reached: Street::Showdown,
        board: table.board.clone(),
        total_pot,
        outcome: HandOutcome::Winner {
            seat: winner,
            by_fold: true,
        },
        results,
    };
    Ok(close_hand(table, engine, summary))
}

/// Шоудаун: оцениваем обе руки и отдаём банк (или делим).
fn finish_with_showdown(
    table: &mut Table,
    engine: &mut HandEngine,
) -> Result<HandStatus, EngineError> {
    if table.board.len() != BOARD_CARDS {
        return Err(EngineError::Internal("showdown requires a full board"));
    }

    table.street = Street::Showdown;
    table.opponent_revealed = true;
    engine.current_actor = None;

    let scores: Vec<HandScore> = table
        .seats
        .iter()
        .map(|p| evaluate_best_hand(&p.hole_cards, &table.board))
        .collect();
    for (player, score) in table.seats.iter().zip(&scores) {
        let rank = score.rank();
        debug!(
            "hand {}: seat {} shows {} {:?}",
            engine.hand_id,
            player.seat,
            describe_hand(rank),
            rank.tiebreak()
        );
        engine.history.push(HandEventKind::ShowdownReveal {
            seat: player.seat,
            hole_cards: player.hole_cards.clone(),
            rank_value: rank.0,
        });
    }

    let (outcome, winners): (HandOutcome, Vec<SeatIndex>) = match compare_scores(&scores[0], &scores[1]) {
        HeadsUpResult::FirstWins => (HandOutcome::Winner { seat: 0, by_fold: false }, vec![0]),
        HeadsUpResult::SecondWins => (HandOutcome::Winner { seat: 1, by_fold: false }, vec![1]),
        HeadsUpResult::Split => (HandOutcome::Split, vec![0, 1]),
    };

    let total_pot = engine.pot.total;
    let won = award_pot(table, engine, &winners);
    let results = table
        .seats
        .iter()
        .zip(scores)
        .map(|(p, score)| PlayerHandResult {
            seat: p.seat,
            rank: Some(score.rank()),
            label: Some(score.label().to_string()),
            best_cards: score.cards,
            won: won[p.seat as usize],
            is_winner: winners.contains(&p.seat),
        })
        .collect();

    let summary = HandSummary {
        hand_id: engine.hand_id,
        street_reached: Street::Showdown,
        board: table.board.clone(),
        total_pot,
        outcome,
        results,
    };
    Ok(close_hand(table, engine, summary))
}

/// Отдать банк победителям. При сплите нечётная фишка уходит месту без кнопки.
fn award_pot(table: &mut Table, engine: &mut HandEngine, winners: &[SeatIndex]) -> [Chips; SEATS] {
    let total = engine.pot.take_all();
    let mut won = [Chips::ZERO; SEATS];

    match winners {
        [seat] => won[*seat as usize] = total,
        _ => {
            let half = Chips(total.0 / 2);
            won = [half; SEATS];
            let out_of_position = other_seat(table.button.unwrap_or(0));
            won[out_of_position as usize] += Chips(total.0 % 2);
        }
    }

    for (player, amount) in table.seats.iter_mut().zip(won) {
        if amount.is_zero() {
            continue;
        }
        player.collect(amount);
        engine.history.push(HandEventKind::PotAwarded {
            seat: player.seat,
            amount,
        });
    }
    won
}

fn close_hand(table: &mut Table, engine: &mut HandEngine, summary: HandSummary) -> HandStatus {
    table.hand_in_progress = false;
    engine.runout = false;
    engine.history.push(HandEventKind::HandFinished {
        hand_id: engine.hand_id,
    });
    info!(
        "hand {} finished: {:?}, pot {}",
        engine.hand_id, summary.outcome, summary.total_pot
    );
    engine.summary = Some(summary.clone());
    HandStatus::Finished(summary)
}

/// Бросить незавершённую раздачу: внесённые фишки возвращаются владельцам.
pub fn abandon_hand(table: &mut Table, engine: &mut HandEngine) {
    if !table.hand_in_progress || engine.is_finished() {
        return;
    }

    for (player, paid) in table.seats.iter_mut().zip(engine.contributions) {
        player.collect(paid);
        player.current_bet = Chips::ZERO;
    }
    engine.pot.take_all();
    engine.contributions = [Chips::ZERO; SEATS];
    engine.runout = false;
    engine.current_actor = None;
    table.hand_in_progress = false;
    engine.history.push(HandEventKind::HandAbandoned {
        hand_id: engine.hand_id,
    });
    debug!("hand {} abandoned", engine.hand_id);
}
