//! Движок heads-up раздачи: блайнды, очередь хода, ставки, улицы,
//! all-in ранаут и шоудаун.
//!
//! Высокоуровневый объект: `GameController`
//! Основные операции:
//!   - `start_hand` – запустить новую раздачу
//!   - `apply_action` – применить действие игрока
//!   - `reveal_next_street` – один шаг all-in ранаута

pub mod actions;
pub mod betting;
pub mod controller;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod pot;
pub mod scheduler;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use controller::{ControllerEvent, GameController};
pub use errors::EngineError;
pub use game_loop::{abandon_hand, apply_action, reveal_next_street, run_out, start_hand, HandEngine, HandStatus};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use pot::Pot;
pub use scheduler::{Scheduler, Stamp, TaskKind};

/// Источник случайности для движка и бота.
/// Реализации – в infra (обёртки над `rand`), в тестах – свои заглушки.
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Равномерное число из `0..sides` (`sides > 0`).
    fn roll(&mut self, sides: u32) -> u32;
}
