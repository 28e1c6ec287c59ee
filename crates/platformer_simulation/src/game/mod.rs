//! Game module: прогрессия, здоровье, стадии, HUD, restart
//!
//! ECS ответственность:
//! - GameProgress resource (очки, health, stage index)
//! - HudState resource (строки/tint'ы для UI хоста)
//! - Реакция на запросы от игрока: HealthDownRequested, NextStageRequested
//!
//! Хост ответственность:
//! - Отрисовка HUD, нажатие кнопки restart → RestartRequested

use bevy::prelude::*;
use crate::SimulationSet;

pub mod events;
pub mod health;
pub mod hud;
pub mod progress;
pub mod restart;
pub mod stage;

// Re-export основных типов
pub use events::{
    GameCleared, HealthDownRequested, NextStageRequested, PlayerDied, PlayerRepositioned,
    RestartRequested,
};
pub use health::{apply_health_down, resolve_hazard_triggers};
pub use hud::{refresh_point_text, stage_label, HudState, IconTint};
pub use progress::{GameProgress, HealthOutcome, StageOutcome};
pub use restart::handle_restart;
pub use stage::advance_stage;

/// Game Plugin
///
/// FixedUpdate:
/// - resolve_hazard_triggers (Resolution)
/// - advance_stage (Progress)
/// - apply_health_down (Damage)
///
/// Update:
/// - refresh_point_text, handle_restart
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameProgress>()
            .init_resource::<HudState>()
            .add_event::<HealthDownRequested>()
            .add_event::<NextStageRequested>()
            .add_event::<PlayerDied>()
            .add_event::<PlayerRepositioned>()
            .add_event::<RestartRequested>()
            .add_event::<GameCleared>();

        app.add_systems(
            FixedUpdate,
            (
                resolve_hazard_triggers
                    .in_set(SimulationSet::Resolution)
                    .after(crate::player::resolve_enemy_contacts),
                advance_stage.in_set(SimulationSet::Progress),
                apply_health_down.in_set(SimulationSet::Damage),
            ),
        );

        app.add_systems(Update, (handle_restart, refresh_point_text).chain());
    }
}
