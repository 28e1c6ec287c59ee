//! Patrol enemy компоненты

use bevy::prelude::*;
use crate::components::{Animator, SpriteState};
use crate::physics::{Body2D, Hitbox2D};
use crate::timers::TimerHandle;

/// Враг (patrol AI + stomp target)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(PatrolAI, Body2D, Hitbox2D, SpriteState, Animator)]
pub struct Enemy;

/// Состояние patrol AI
///
/// Два кооперирующих механизма:
/// - think таймер (2–5 s) выбирает `next_move` ∈ {-1, 0, 1}
/// - каждый fixed tick edge probe разворачивает врага на краю платформы
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PatrolAI {
    /// Текущее направление: -1 влево, 0 стоит, 1 вправо
    pub next_move: i32,
    /// Pending think (None пока не запланирован)
    pub think_timer: Option<TimerHandle>,
}

impl PatrolAI {
    /// Разворот на краю: направление инвертируется (0 остаётся 0)
    pub fn turn(&mut self) {
        self.next_move *= -1;
    }

    /// Спрайт атласа смотрит влево, flip_x = движение вправо
    pub fn faces_right(&self) -> bool {
        self.next_move == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_inverts_direction() {
        let mut patrol = PatrolAI { next_move: 1, think_timer: None };
        patrol.turn();
        assert_eq!(patrol.next_move, -1);
        assert!(!patrol.faces_right());

        patrol.turn();
        assert_eq!(patrol.next_move, 1);
        assert!(patrol.faces_right());
    }

    #[test]
    fn test_turn_idle_stays_idle() {
        let mut patrol = PatrolAI::default();
        patrol.turn();
        assert_eq!(patrol.next_move, 0);
    }
}
