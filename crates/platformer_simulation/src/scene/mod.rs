//! Scene: level layout + spawn
//!
//! # Архитектура
//!
//! **LevelLayout**: статическое описание уровня (RON или `LevelLayout::demo()`):
//! - упорядоченный список стадий (платформы, враги, предметы, finish)
//! - общие hazard зоны (пропасть под всеми стадиями)
//!
//! **spawn_level**: создаёт entity сцены (все помечены `SceneMember`).
//! Restart = despawn всех `SceneMember` + повторный spawn_level.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::components::{
    Enemy, FinishZone, HazardZone, Inactive, Item, PatrolAI, Player, SceneMember, StageMember,
    StageRegion,
};
use crate::config::{ConfigError, PlatformerConfig};
use crate::game::{GameProgress, HudState};
use crate::logger;
use crate::physics::collision::{enemy_groups, player_groups, trigger_groups};
use crate::physics::{ContactMemory, Hitbox2D, PlatformSurfaces, Surface};
use crate::timers::{TimerAction, TimerQueue};

/// Half extents подбираемого предмета
const ITEM_HALF_EXTENTS: Vec2 = Vec2::new(0.3, 0.3);
/// Half extents finish флага
const FINISH_HALF_EXTENTS: Vec2 = Vec2::new(0.5, 1.0);

/// Горизонтальная платформа
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformLayout {
    pub min_x: f32,
    pub max_x: f32,
    pub top_y: f32,
}

/// Предмет (награда определяется подстрокой имени: Bronze / Silver / Gold)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemLayout {
    pub name: String,
    pub position: [f32; 2],
}

/// Прямоугольная trigger зона
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneLayout {
    pub center: [f32; 2],
    pub half_extents: [f32; 2],
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StageLayout {
    pub platforms: Vec<PlatformLayout>,
    pub enemies: Vec<[f32; 2]>,
    pub items: Vec<ItemLayout>,
    pub finish: [f32; 2],
}

/// Описание уровня
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    pub stages: Vec<StageLayout>,
    /// Hazard зоны, общие для всех стадий
    pub hazards: Vec<ZoneLayout>,
}

impl LevelLayout {
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let layout: Self = ron::from_str(source)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stages.is_empty() {
            return Err(ConfigError::Invalid("level has no stages".into()));
        }
        for (index, stage) in self.stages.iter().enumerate() {
            if let Some(platform) = stage.platforms.iter().find(|p| p.min_x > p.max_x) {
                return Err(ConfigError::Invalid(format!(
                    "stage {}: platform min_x {} > max_x {}",
                    index, platform.min_x, platform.max_x
                )));
            }
        }
        Ok(())
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Поверхности всех стадий (каждая помечена своей стадией)
    pub fn surfaces(&self) -> PlatformSurfaces {
        let surfaces = self
            .stages
            .iter()
            .enumerate()
            .flat_map(|(index, stage)| {
                stage
                    .platforms
                    .iter()
                    .map(move |p| Surface::platform(p.min_x, p.max_x, p.top_y, Some(index)))
            })
            .collect();
        PlatformSurfaces::new(surfaces)
    }

    /// Встроенный уровень из трёх стадий
    pub fn demo() -> Self {
        let ground = |min_x: f32, max_x: f32| PlatformLayout { min_x, max_x, top_y: -0.5 };
        let item = |name: &str, x: f32, y: f32| ItemLayout {
            name: name.to_string(),
            position: [x, y],
        };

        Self {
            stages: vec![
                StageLayout {
                    platforms: vec![
                        ground(-2.0, 12.0),
                        PlatformLayout { min_x: 6.0, max_x: 9.0, top_y: 1.5 },
                    ],
                    enemies: vec![[7.5, 2.0]],
                    items: vec![
                        item("Item_Bronze_01", 3.0, 0.0),
                        item("Item_Silver_01", 8.5, 2.5),
                    ],
                    finish: [11.0, 0.5],
                },
                StageLayout {
                    platforms: vec![ground(-2.0, 6.0), ground(8.0, 16.0)],
                    enemies: vec![[12.0, 0.0]],
                    items: vec![
                        item("Item_Bronze_02", 4.0, 0.0),
                        item("Item_Gold_01", 10.0, 0.0),
                    ],
                    finish: [15.0, 0.5],
                },
                StageLayout {
                    platforms: vec![ground(-2.0, 10.0)],
                    enemies: vec![[5.0, 0.0]],
                    items: vec![item("Item_Silver_02", 2.0, 0.0)],
                    finish: [9.0, 0.5],
                },
            ],
            hazards: vec![ZoneLayout {
                center: [7.0, -6.0],
                half_extents: [100.0, 1.0],
            }],
        }
    }
}

/// Что создал spawn_level
#[derive(Debug, Clone)]
pub struct SpawnedLevel {
    pub player: Entity,
    pub stage_regions: Vec<Entity>,
    pub enemies: Vec<Entity>,
}

/// Создать все entity уровня
///
/// Активна только стадия 0. Первый think планируется только врагам стадии 0;
/// враги остальных стадий получают его при активации стадии (`advance_stage`).
pub fn spawn_level(
    commands: &mut Commands,
    layout: &LevelLayout,
    config: &PlatformerConfig,
    timers: &mut TimerQueue,
) -> SpawnedLevel {
    let respawn = config.game.respawn();

    let player = commands
        .spawn((
            Player,
            Name::new("Player"),
            Transform::from_xyz(respawn.x, respawn.y, 0.0),
            Hitbox2D::new(Vec2::from(config.player.half_extents)),
            player_groups(),
            SceneMember,
        ))
        .id();

    let mut stage_regions = Vec::with_capacity(layout.stages.len());
    let mut enemies = Vec::new();

    for (index, stage) in layout.stages.iter().enumerate() {
        let region = commands
            .spawn((
                StageRegion { index },
                Name::new(format!("Stage_{}", index + 1)),
                SceneMember,
            ))
            .id();
        if index != 0 {
            commands.entity(region).insert(Inactive);
        }
        stage_regions.push(region);

        let member = StageMember { stage: index };

        for position in &stage.enemies {
            let enemy = commands
                .spawn((
                    Enemy,
                    Name::new("Enemy"),
                    Transform::from_xyz(position[0], position[1], 0.0),
                    Hitbox2D::new(Vec2::from(config.enemy.half_extents)),
                    enemy_groups(),
                    member,
                    SceneMember,
                ))
                .id();
            let think_timer = (index == 0)
                .then(|| timers.schedule(enemy, TimerAction::EnemyThink, config.enemy.first_think_delay));
            commands.entity(enemy).insert(PatrolAI {
                next_move: 0,
                think_timer,
            });
            enemies.push(enemy);
        }

        for item in &stage.items {
            commands.spawn((
                Item,
                Name::new(item.name.clone()),
                Transform::from_xyz(item.position[0], item.position[1], 0.0),
                Hitbox2D::new(ITEM_HALF_EXTENTS),
                trigger_groups(),
                member,
                SceneMember,
            ));
        }

        commands.spawn((
            FinishZone,
            Name::new("Finish"),
            Transform::from_xyz(stage.finish[0], stage.finish[1], 0.0),
            Hitbox2D::new(FINISH_HALF_EXTENTS),
            trigger_groups(),
            member,
            SceneMember,
        ));
    }

    for zone in &layout.hazards {
        commands.spawn((
            HazardZone,
            Name::new("Hazard"),
            Transform::from_xyz(zone.center[0], zone.center[1], 0.0),
            Hitbox2D::new(Vec2::from(zone.half_extents)),
            trigger_groups(),
            SceneMember,
        ));
    }

    SpawnedLevel {
        player,
        stage_regions,
        enemies,
    }
}

/// Startup система: загрузить уровень из LevelLayout resource
pub fn setup_level(
    mut commands: Commands,
    layout: Res<LevelLayout>,
    config: Res<PlatformerConfig>,
    mut timers: ResMut<TimerQueue>,
    mut surfaces: ResMut<PlatformSurfaces>,
    mut progress: ResMut<GameProgress>,
    mut hud: ResMut<HudState>,
    mut contacts: ResMut<ContactMemory>,
) {
    timers.clear();
    contacts.touching.clear();
    *surfaces = layout.surfaces();
    *progress = GameProgress::from_config(&config, layout.stage_count());
    *hud = HudState::new(&config);

    let spawned = spawn_level(&mut commands, &layout, &config, &mut timers);

    logger::log_info(&format!(
        "Level loaded: {} stages, {} enemies",
        spawned.stage_regions.len(),
        spawned.enemies.len()
    ));
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        // Без явного layout: встроенный демо уровень
        if !app.world().contains_resource::<LevelLayout>() {
            app.insert_resource(LevelLayout::demo());
        }
        app.add_systems(Startup, setup_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_layout_is_valid() {
        let layout = LevelLayout::demo();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.stage_count(), 3);
    }

    #[test]
    fn test_surfaces_tagged_by_stage() {
        let surfaces = LevelLayout::demo().surfaces();
        assert!(surfaces.surfaces.iter().all(|s| s.stage.is_some()));
        assert_eq!(surfaces.surfaces.iter().filter(|s| s.stage == Some(1)).count(), 2);
    }

    #[test]
    fn test_spawn_level_reports_entities_and_first_thinks() {
        let mut world = World::new();
        let mut timers = TimerQueue::default();
        let layout = LevelLayout::demo();
        let config = PlatformerConfig::default();

        let spawned = {
            let mut commands = world.commands();
            spawn_level(&mut commands, &layout, &config, &mut timers)
        };
        world.flush();

        assert_eq!(spawned.stage_regions.len(), 3);
        assert_eq!(spawned.enemies.len(), 3);
        assert!(world.get::<Player>(spawned.player).is_some());

        // Первый think только у врага активной стадии
        assert_eq!(timers.len(), 1);
        for enemy in &spawned.enemies {
            let stage = world.get::<StageMember>(*enemy).unwrap().stage;
            let patrol = world.get::<PatrolAI>(*enemy).unwrap();
            assert_eq!(patrol.think_timer.is_some(), stage == 0, "stage {}", stage);
        }
        assert!(world.get::<Inactive>(spawned.stage_regions[0]).is_none());
        assert!(world.get::<Inactive>(spawned.stage_regions[2]).is_some());
    }

    #[test]
    fn test_empty_layout_is_invalid() {
        let result = LevelLayout::from_ron_str("(stages: [])");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_layout_from_ron() {
        let layout = LevelLayout::from_ron_str(
            r#"(
                stages: [
                    (
                        platforms: [(min_x: -1.0, max_x: 4.0, top_y: -0.5)],
                        enemies: [(2.0, 0.0)],
                        items: [(name: "Item_Gold_07", position: (1.0, 0.0))],
                        finish: (3.5, 0.5),
                    ),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(layout.stage_count(), 1);
        assert_eq!(layout.stages[0].items[0].name, "Item_Gold_07");
        assert!(layout.hazards.is_empty());
    }

    #[test]
    fn test_inverted_platform_is_invalid() {
        let mut layout = LevelLayout::demo();
        layout.stages[1].platforms[0] = PlatformLayout { min_x: 5.0, max_x: 1.0, top_y: 0.0 };
        assert!(matches!(layout.validate(), Err(ConfigError::Invalid(_))));
    }
}
