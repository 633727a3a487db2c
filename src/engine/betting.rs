use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::Player;
use crate::domain::table::{SeatIndex, SEATS};

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Улица, к которой относится этот раунд.
    pub street: Street,
    /// Максимальная ставка раунда среди игроков – её надо уравнять.
    pub current_bet: Chips,
    /// Походил ли seat хотя бы раз на этой улице.
    pub acted: [bool; SEATS],
}

impl BettingState {
    pub fn new(street: Street) -> Self {
        Self {
            street,
            current_bet: Chips::ZERO,
            acted: [false; SEATS],
        }
    }

    pub fn mark_acted(&mut self, seat: SeatIndex) {
        if let Some(flag) = self.acted.get_mut(seat as usize) {
            *flag = true;
        }
    }

    pub fn has_acted(&self, seat: SeatIndex) -> bool {
        self.acted.get(seat as usize).copied().unwrap_or(false)
    }

    /// Поднять планку раунда до ставки игрока (если она выше).
    pub fn raise_to(&mut self, bet: Chips) {
        self.current_bet = self.current_bet.max(bet);
    }

    /// Новая улица: планка 0, флаги "походил" сброшены.
    pub fn reset_for_street(&mut self, street: Street) {
        *self = BettingState::new(street);
    }

    /// Сколько игроку нужно доплатить до планки.
    pub fn to_call(&self, player: &Player) -> Chips {
        self.current_bet.saturating_sub(player.current_bet)
    }

    /// Завершён ли раунд ставок.
    ///
    /// (а) ставить может не больше одного игрока, и ему нечего доплачивать;
    /// (б) каждый, кто может ставить, уже ходил, и их ставки равны.
    pub fn is_round_complete(&self, seats: &[Player; SEATS]) -> bool {
        let active: Vec<&Player> = seats.iter().filter(|p| p.can_act()).collect();

        if active.len() <= 1 {
            return active.iter().all(|p| self.to_call(p).is_zero());
        }

        let everyone_acted = active.iter().all(|p| self.has_acted(p.seat));
        everyone_acted && active.iter().all(|p| p.current_bet == active[0].current_bet)
    }
}
