//! Отложенные задачи стола: ход бота с паузой и шаги all-in ранаута.
//!
//! Часы виртуальные: время двигает только `GameController::tick`.
//! Каждая задача несёт штамп раздачи, устаревшие задачи контроллер выбрасывает.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::SeatIndex;

/// Штамп, с которым задача была поставлена в очередь.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Stamp {
    /// Поколение: растёт при каждом старте новой раздачи.
    pub generation: u64,
    /// Сколько действий было принято движком на момент планирования.
    pub step: u64,
}

/// Что сделать, когда подойдёт срок.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskKind {
    /// Спросить политику соперника и применить её ход.
    OpponentAction(SeatIndex),
    /// Открыть следующую улицу ранаута (или шоудаун после ривера).
    RevealStep,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledTask {
    pub due: Duration,
    /// Порядок постановки: при равных сроках раньше поставленная идёт первой.
    pub seq: u64,
    pub stamp: Stamp,
    pub kind: TaskKind,
}

/// Очередь задач, отсортированная по (срок, порядок постановки).
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_seq: u64,
    queue: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Текущее виртуальное время.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Поставить задачу через `delay` от текущего момента.
    pub fn schedule(&mut self, delay: Duration, stamp: Stamp, kind: TaskKind) {
        let task = ScheduledTask {
            due: self.now + delay,
            seq: self.next_seq,
            stamp,
            kind,
        };
        self.next_seq += 1;

        let at = self
            .queue
            .partition_point(|t| (t.due, t.seq) <= (task.due, task.seq));
        self.queue.insert(at, task);
    }

    /// Срок ближайшей задачи.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.first().map(|t| t.due)
    }

    /// Снять ближайшую задачу, если её срок не позже `until`.
    /// Часы переводятся на срок задачи: новые задачи планируются от него.
    pub fn pop_due(&mut self, until: Duration) -> Option<ScheduledTask> {
        if self.queue.first()?.due > until {
            return None;
        }
        let task = self.queue.remove(0);
        self.now = self.now.max(task.due);
        Some(task)
    }

    /// Перевести часы вперёд (назад они не ходят).
    pub fn advance_to(&mut self, at: Duration) {
        self.now = self.now.max(at);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
