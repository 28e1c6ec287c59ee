//! Platformer Simulation Core
//!
//! Headless ECS-симуляция 2D платформера на Bevy 0.16
//!
//! HYBRID ARCHITECTURE:
//! - ECS = game state (movement, patrol AI, combat rules, progression)
//! - Хост = рендер, анимации, звук, UI, чтение клавиатуры
//!
//! Хост пишет `PlayerInput`, читает `HudState`, `SpriteState`, `Animator`,
//! `AudioEmitter` и события (`GameCleared`, `PlayerDied`).

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod audio;
pub mod components;
pub mod config;
pub mod game;
pub mod logger;
pub mod physics;
pub mod player;
pub mod scene;
pub mod timers;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, EnemyDamaged};
pub use audio::{AudioClips, AudioCuePlugin, PlaySound, SoundCue};
pub use components::*;
pub use config::{ConfigError, PlatformerConfig};
pub use game::{
    GameCleared, GamePlugin, GameProgress, HealthDownRequested, HudState, NextStageRequested,
    PlayerDied, PlayerRepositioned, RestartRequested,
};
pub use logger::init_logger;
pub use physics::{Body2D, Hitbox2D, PhysicsPlugin, PlatformSurfaces};
pub use player::{PlayerInput, PlayerPlugin};
pub use scene::{LevelLayout, ScenePlugin};
pub use timers::{TimerAction, TimerFired, TimerHandle, TimerQueue};

/// Частота fixed tick (физика + AI)
pub const FIXED_HZ: f64 = 60.0;

/// Фазы одного fixed tick (выполняются строго по порядку)
///
/// Respawn идёт ДО Damage: переживаемый hazard сначала переносит игрока,
/// потом снимает жизнь.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// TimerQueue → TimerFired
    Timers,
    Gravity,
    /// Patrol think/edge, recover игрока
    Ai,
    /// Импульс ввода, grounded latch
    PlayerControl,
    Integrate,
    /// Collision/trigger enter события
    Contacts,
    /// Attack/damage, pickup, finish, hazard
    Resolution,
    /// Переход стадии / game clear
    Progress,
    Respawn,
    /// Health countdown
    Damage,
    /// Death pose (игрок и враги)
    Death,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
            // Детерминистичный RNG (seed по умолчанию)
            .init_resource::<DeterministicRng>()
            .init_resource::<PlatformerConfig>()
            .init_resource::<TimerQueue>()
            .add_event::<TimerFired>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Timers,
                    SimulationSet::Gravity,
                    SimulationSet::Ai,
                    SimulationSet::PlayerControl,
                    SimulationSet::Integrate,
                    SimulationSet::Contacts,
                    SimulationSet::Resolution,
                    SimulationSet::Progress,
                    SimulationSet::Respawn,
                    SimulationSet::Damage,
                    SimulationSet::Death,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, timers::tick_timers.in_set(SimulationSet::Timers))
            // Подсистемы
            .add_plugins((
                PhysicsPlugin,
                GamePlugin,
                PlayerPlugin,
                AIPlugin,
                AudioCuePlugin,
                ScenePlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Создаёт Bevy App для headless симуляции
///
/// Время идёт ручными шагами по 1/60 s: один `app.update()` = один fixed tick
/// (кроме самого первого update, у которого delta = 0).
pub fn create_headless_app(seed: u64) -> App {
    create_headless_app_with(seed, PlatformerConfig::default(), LevelLayout::demo())
}

/// То же, но с явным config и level layout (до Startup)
pub fn create_headless_app_with(seed: u64, config: PlatformerConfig, layout: LevelLayout) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SimulationPlugin)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(config)
        .insert_resource(layout)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / FIXED_HZ,
        )));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
