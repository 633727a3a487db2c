use crate::domain::SeatIndex;

use thiserror::Error;

/// Ошибки движка.
///
/// Любая ошибка из `apply_action` означает, что состояние стола
/// не изменилось: отклонённое действие – это no-op.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("seat {0} does not exist at a heads-up table")]
    InvalidSeat(SeatIndex),

    #[error("a hand is already in progress")]
    HandAlreadyInProgress,

    #[error("no hand is in progress")]
    NoActiveHand,

    #[error("it is not seat {0}'s turn")]
    NotPlayersTurn(SeatIndex),

    #[error("seat {0} cannot act (folded or all-in)")]
    CannotAct(SeatIndex),

    #[error("all-in runout in progress, betting is closed")]
    RunoutInProgress,

    #[error("no runout is in progress")]
    NoRunout,

    #[error("cannot check: there is a bet to call")]
    CannotCheck,

    #[error("raise must exceed the call amount")]
    RaiseTooSmall,

    #[error("nothing left to commit")]
    NothingToCommit,

    #[error("deck exhausted while dealing")]
    DeckExhausted,

    #[error("seat {0} has no chips left")]
    PlayerBusted(SeatIndex),

    #[error("internal error: {0}")]
    Internal(&'static str),
}
