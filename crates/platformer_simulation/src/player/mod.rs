//! Player module: управление, бой, подбор предметов
//!
//! Архитектура:
//! - Хост пишет `PlayerInput` (ось + edge-флаги) каждый кадр
//! - Update: прыжок, тормоз, facing, walking flag (реакция на edge'и ввода)
//! - FixedUpdate: импульс движения, grounded latch, resolution контактов
//!
//! С менеджером игры общается только через события
//! (HealthDownRequested, NextStageRequested ↔ PlayerRepositioned, PlayerDied).

use bevy::prelude::*;
use crate::SimulationSet;

pub mod combat;
pub mod input;
pub mod movement;
pub mod pickups;

// Re-export основных типов
pub use combat::{
    on_player_died, recover_player, reposition_player, resolve_enemy_contact,
    resolve_enemy_contacts, ContactResolution,
};
pub use input::{clear_input_edges, PlayerInput};
pub use movement::{
    braked_horizontal, player_brake, player_facing, player_jump, player_landing_probe,
    player_move, player_walk_flag,
};
pub use pickups::{item_reward, resolve_pickup_triggers, ItemGrade};

/// Player Plugin
///
/// Update: jump → brake → facing → walk flag
/// PostUpdate: clear_input_edges
/// FixedUpdate:
/// - recover_player (Ai, после тика таймеров)
/// - player_move, player_landing_probe (PlayerControl)
/// - resolve_enemy_contacts, resolve_pickup_triggers (Resolution)
/// - reposition_player (Respawn)
/// - on_player_died (Death)
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>();

        app.add_systems(
            Update,
            (player_jump, player_brake, player_facing, player_walk_flag).chain(),
        )
        .add_systems(PostUpdate, clear_input_edges);

        app.add_systems(
            FixedUpdate,
            (
                recover_player.in_set(SimulationSet::Ai),
                (player_move, player_landing_probe)
                    .chain()
                    .in_set(SimulationSet::PlayerControl),
                (resolve_enemy_contacts, resolve_pickup_triggers)
                    .chain()
                    .in_set(SimulationSet::Resolution),
                reposition_player.in_set(SimulationSet::Respawn),
                on_player_died.in_set(SimulationSet::Death),
            ),
        );
    }
}
