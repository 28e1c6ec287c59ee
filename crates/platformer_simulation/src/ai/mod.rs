//! AI module: patrol враги
//!
//! Think/turn/deactivate: через TimerQueue (cancellable handles),
//! смерть: через EnemyDamaged событие от player combat.

use bevy::prelude::*;
use crate::SimulationSet;

pub mod patrol;

// Re-export основных типов
pub use patrol::{
    deactivate_dead_enemies, enemy_think, on_enemy_damaged, patrol_edge_check, probe_origin,
    roll_next_move, roll_think_delay,
};

/// Событие: враг получил stomp от игрока
#[derive(Event, Debug, Clone, Copy)]
pub struct EnemyDamaged {
    pub enemy: Entity,
}

/// AI Plugin
///
/// Порядок в FixedUpdate:
/// 1. enemy_think, deactivate_dead_enemies (Ai, после tick_timers)
/// 2. patrol_edge_check (Ai)
/// 3. on_enemy_damaged (Death)
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EnemyDamaged>().add_systems(
            FixedUpdate,
            (
                (enemy_think, deactivate_dead_enemies, patrol_edge_check)
                    .chain() // Последовательное выполнение для детерминизма
                    .in_set(SimulationSet::Ai),
                on_enemy_damaged.in_set(SimulationSet::Death),
            ),
        );
    }
}
