use serde::{Deserialize, Serialize};

use crate::engine::actions::PlayerAction;

/// Команда верхнего уровня.
///
/// Команды сериализуются, так что сессию можно описать JSON-скриптом
/// и проиграть через `GameController::execute`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Раздать новую руку (незавершённая бросается).
    StartNewHand,

    /// Действие конкретного места.
    PerformAction(PlayerAction),

    /// Продвинуть часы стола на `millis` миллисекунд.
    Tick { millis: u64 },

    /// Выполнить все отложенные задачи.
    Settle,
}

/// Разобрать скрипт: JSON-массив команд.
pub fn parse_script(json: &str) -> Result<Vec<Command>, serde_json::Error> {
    serde_json::from_str(json)
}
