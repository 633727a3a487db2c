use std::iter::successors;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::commands::Command;
use crate::api::dto::TableSnapshot;
use crate::api::queries::{build_snapshot, live_hand_label};
use crate::domain::hand::{HandSummary, Street};
use crate::domain::table::{Table, TableConfig, HERO_SEAT, OPPONENT_SEAT, SEATS};
use crate::domain::{Chips, HandId, SeatIndex};
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{
    abandon_hand, apply_action, reveal_next_street, start_hand, HandEngine, HandStatus,
};
use crate::engine::scheduler::{ScheduledTask, Scheduler, Stamp, TaskKind};
use crate::engine::RandomSource;
use crate::opponent::{DecisionView, OpponentPolicy};

/// Что произошло за `tick`: то, что стоит показать пользователю.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Место на автопилоте сделало ход.
    OpponentActed {
        seat: SeatIndex,
        kind: PlayerActionKind,
    },
    /// Открыта новая улица (после хода бота или шагом ранаута).
    StreetRevealed(Street),
    HandFinished(HandSummary),
}

/// Владелец стола:
/// - хранит Table и текущий HandEngine;
/// - даёт start_new_hand / perform_action поверх game_loop;
/// - ведёт отложенные задачи (ход бота, шаги ранаута) через `Scheduler`.
///
/// Всё состояние мутирует только он, в одном потоке.
pub struct GameController<R: RandomSource, P: OpponentPolicy> {
    table: Table,
    engine: Option<HandEngine>,
    rng: R,
    policy: P,
    scheduler: Scheduler,
    /// Поколение раздачи для штампов отложенных задач.
    generation: u64,
    next_hand_id: HandId,
    /// Места, за которые ходит политика.
    autopilot: [bool; SEATS],
}

impl<R: RandomSource, P: OpponentPolicy> GameController<R, P> {
    /// Стол с героем на месте 0 и ботом на месте 1.
    pub fn new(config: TableConfig, rng: R, policy: P) -> Self {
        let mut autopilot = [false; SEATS];
        autopilot[OPPONENT_SEAT as usize] = true;
        Self {
            table: Table::new(config),
            engine: None,
            rng,
            policy,
            scheduler: Scheduler::new(),
            generation: 0,
            next_hand_id: 1,
            autopilot,
        }
    }

    /// Переназначить места на автопилоте (например, бот против бота).
    pub fn with_autopilot(mut self, autopilot: [bool; SEATS]) -> Self {
        self.autopilot = autopilot;
        self
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn engine(&self) -> Option<&HandEngine> {
        self.engine.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Итог последней завершённой раздачи.
    pub fn last_summary(&self) -> Option<&HandSummary> {
        self.engine.as_ref().and_then(|e| e.summary.as_ref())
    }

    /// Новая раздача. Незавершённая раздача бросается (фишки возвращаются),
    /// все отложенные задачи старой раздачи становятся недействительными.
    pub fn start_new_hand(&mut self) -> Result<(), EngineError> {
        if let Some(engine) = self.engine.as_mut() {
            abandon_hand(&mut self.table, engine);
        }
        self.scheduler.clear();
        self.generation += 1;

        let engine = start_hand(&mut self.table, &mut self.rng, self.next_hand_id)?;
        self.next_hand_id += 1;
        self.engine = Some(engine);
        self.schedule_follow_up();
        Ok(())
    }

    /// Применить действие любого места. Отклонённое действие ничего не меняет.
    pub fn perform_action(&mut self, action: PlayerAction) -> Result<HandStatus, EngineError> {
        let engine = self.engine.as_mut().ok_or(EngineError::NoActiveHand)?;

        match apply_action(&mut self.table, engine, action) {
            Ok(status) => {
                self.schedule_follow_up();
                Ok(status)
            }
            Err(err) => {
                debug!("rejected {:?} from seat {}: {err}", action.kind, action.seat);
                Err(err)
            }
        }
    }

    /// Ход героя (место 0).
    pub fn act(&mut self, kind: PlayerActionKind) -> Result<HandStatus, EngineError> {
        self.perform_action(PlayerAction::new(HERO_SEAT, kind))
    }

    /// Продвинуть виртуальные часы на `elapsed` и выполнить созревшие задачи.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<ControllerEvent> {
        let until = self.scheduler.now() + elapsed;
        let mut events = Vec::new();

        while let Some(task) = self.scheduler.pop_due(until) {
            self.run_task(task, &mut events);
        }
        self.scheduler.advance_to(until);
        events
    }

    /// Выполнить все отложенные задачи, сколько бы времени они ни заняли.
    pub fn settle(&mut self) -> Vec<ControllerEvent> {
        let mut events = Vec::new();
        while let Some(delay) = self.next_deadline() {
            events.extend(self.tick(delay));
        }
        events
    }

    /// Через сколько сработает ближайшая задача.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler
            .next_due()
            .map(|due| due.saturating_sub(self.scheduler.now()))
    }

    /// Снимок стола глазами `viewer`.
    pub fn snapshot(&self, viewer: SeatIndex) -> TableSnapshot {
        build_snapshot(&self.table, self.engine.as_ref(), viewer)
    }

    /// Сумма колла для места, чей сейчас ход.
    pub fn call_amount(&self) -> Chips {
        self.engine
            .as_ref()
            .map(|e| e.call_amount(&self.table))
            .unwrap_or(Chips::ZERO)
    }

    /// Лучшая комбинация места по открытым картам (от флопа).
    pub fn best_hand_label(&self, seat: SeatIndex) -> Option<&'static str> {
        live_hand_label(&self.table, seat)
    }

    /// Выполнить команду из скрипта / внешнего слоя.
    pub fn execute(&mut self, command: Command) -> Result<Vec<ControllerEvent>, EngineError> {
        match command {
            Command::StartNewHand => {
                self.start_new_hand()?;
                Ok(Vec::new())
            }
            Command::PerformAction(action) => {
                self.perform_action(action)?;
                Ok(Vec::new())
            }
            Command::Tick { millis } => Ok(self.tick(Duration::from_millis(millis))),
            Command::Settle => Ok(self.settle()),
        }
    }

    /// После каждого перехода: поставить ход бота или шаги ранаута.
    fn schedule_follow_up(&mut self) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };
        if engine.is_finished() {
            return;
        }

        let stamp = Stamp {
            generation: self.generation,
            step: engine.actions_applied,
        };
        let pacing = &self.table.config.pacing;

        if engine.runout {
            // По шагу на каждую оставшуюся улицу, последний – шоудаун.
            let steps = successors(self.table.street.next(), |s| s.next()).count();
            for &offset in pacing.runout_steps_ms.iter().take(steps) {
                self.scheduler
                    .schedule(Duration::from_millis(offset), stamp, TaskKind::RevealStep);
            }
            return;
        }

        if let Some(seat) = engine.current_actor {
            if self.autopilot[seat as usize] {
                self.scheduler.schedule(
                    Duration::from_millis(pacing.opponent_delay_ms),
                    stamp,
                    TaskKind::OpponentAction(seat),
                );
            }
        }
    }

    fn run_task(&mut self, task: ScheduledTask, events: &mut Vec<ControllerEvent>) {
        if task.stamp.generation != self.generation {
            debug!("dropping {:?} from generation {}", task.kind, task.stamp.generation);
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        if engine.is_finished() || task.stamp.step != engine.actions_applied {
            debug!("dropping stale {:?} (step {})", task.kind, task.stamp.step);
            return;
        }

        let street_before = self.table.street;
        let result = match task.kind {
            TaskKind::OpponentAction(seat) => {
                if engine.current_actor != Some(seat) {
                    debug!("dropping opponent task: seat {seat} is not to act");
                    return;
                }
                let Some(player) = self.table.seat(seat) else {
                    return;
                };
                let view = DecisionView {
                    seat,
                    call_amount: engine.betting.to_call(player),
                    stack: player.stack,
                    street: self.table.street,
                    pot: engine.pot.total,
                };
                let wanted = self.policy.decide(&view, &mut self.rng);

                let owes = !view.call_amount.is_zero();
                let applied = apply_action(&mut self.table, engine, PlayerAction::new(seat, wanted))
                    .map(|status| (wanted, status))
                    .or_else(|err| {
                        // Нелегальный ответ политики: чек, а если нельзя – фолд.
                        debug!("policy chose illegal {wanted} for seat {seat}: {err}");
                        let fallback = if owes {
                            PlayerActionKind::Fold
                        } else {
                            PlayerActionKind::Check
                        };
                        apply_action(&mut self.table, engine, PlayerAction::new(seat, fallback))
                            .map(|status| (fallback, status))
                    });

                applied.map(|(kind, status)| {
                    events.push(ControllerEvent::OpponentActed { seat, kind });
                    status
                })
            }
            TaskKind::RevealStep => reveal_next_street(&mut self.table, engine),
        };

        match result {
            Ok(HandStatus::Finished(summary)) => events.push(ControllerEvent::HandFinished(summary)),
            Ok(_) => {
                if self.table.street != street_before {
                    events.push(ControllerEvent::StreetRevealed(self.table.street));
                }
                if task.kind != TaskKind::RevealStep {
                    self.schedule_follow_up();
                }
            }
            Err(err) => debug!("task {:?} failed: {err}", task.kind),
        }
    }
}
