//! Restart: возобновить время и пересоздать сцену
//!
//! Никакого по-полевого reset: всё состояние сцены (entity, таймеры,
//! прогрессия, HUD) строится заново из LevelLayout.

use bevy::prelude::*;
use crate::components::SceneMember;
use crate::config::PlatformerConfig;
use crate::game::{GameProgress, HudState, RestartRequested};
use crate::logger;
use crate::physics::{ContactMemory, PlatformSurfaces};
use crate::player::PlayerInput;
use crate::scene::{spawn_level, LevelLayout};
use crate::timers::TimerQueue;

/// Система: RestartRequested → reload сцены (Update, работает и на паузе)
pub fn handle_restart(
    mut commands: Commands,
    mut requests: EventReader<RestartRequested>,
    scene_entities: Query<Entity, With<SceneMember>>,
    layout: Res<LevelLayout>,
    config: Res<PlatformerConfig>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut timers: ResMut<TimerQueue>,
    mut surfaces: ResMut<PlatformSurfaces>,
    mut contacts: ResMut<ContactMemory>,
    mut progress: ResMut<GameProgress>,
    mut hud: ResMut<HudState>,
    mut input: ResMut<PlayerInput>,
) {
    // Несколько запросов за кадр = один reload
    if requests.read().count() == 0 {
        return;
    }

    virtual_time.unpause();

    for entity in scene_entities.iter() {
        commands.entity(entity).despawn();
    }

    timers.clear();
    contacts.touching.clear();
    *input = PlayerInput::default();
    *surfaces = layout.surfaces();
    *progress = GameProgress::from_config(&config, layout.stage_count());
    *hud = HudState::new(&config);

    let spawned = spawn_level(&mut commands, &layout, &config, &mut timers);

    logger::log_info(&format!(
        "Scene restarted: player {:?}, {} enemies",
        spawned.player,
        spawned.enemies.len()
    ));
}
