use crate::domain::player::Player;
use crate::engine::actions::PlayerActionKind;
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;

/// Проверка, может ли игрок выполнить это действие при текущем состоянии ставок.
///
/// Рейз – это сумма, добавляемая к своей ставке. Она должна быть строго больше
/// суммы колла; исключение – рейз на весь стек (это тот же all-in).
pub fn validate_action(
    player: &Player,
    action: &PlayerActionKind,
    betting: &BettingState,
) -> Result<(), EngineError> {
    if !player.can_act() {
        return Err(EngineError::CannotAct(player.seat));
    }

    let to_call = betting.to_call(player);

    match action {
        PlayerActionKind::Fold => Ok(()),

        PlayerActionKind::Check => {
            if to_call.is_zero() {
                Ok(())
            } else {
                Err(EngineError::CannotCheck)
            }
        }

        // Колл на ноль равносилен чеку, колл больше стека – all-in колл.
        PlayerActionKind::Call => Ok(()),

        PlayerActionKind::Raise(amount) => {
            if amount.is_zero() {
                return Err(EngineError::RaiseTooSmall);
            }
            if *amount >= player.stack {
                return Ok(());
            }
            if *amount <= to_call {
                return Err(EngineError::RaiseTooSmall);
            }
            Ok(())
        }

        PlayerActionKind::AllIn => {
            if player.stack.is_zero() {
                return Err(EngineError::NothingToCommit);
            }
            Ok(())
        }
    }
}
