//! Переходы между стадиями
//!
//! NextStage:
//! - есть следующая стадия → выключить текущий регион, включить следующий,
//!   respawn игрока, обновить "STAGE N"
//! - последняя стадия → пауза времени + "Game Clear!" на кнопке restart
//! - в обоих случаях очки стадии сворачиваются в total_point
//!
//! Think таймеры врагов живут только на активной стадии: уходящая стадия
//! их теряет, новая получает первый think через `first_think_delay`.

use bevy::prelude::*;
use crate::components::{Dead, Enemy, Inactive, PatrolAI, StageMember, StageRegion};
use crate::config::PlatformerConfig;
use crate::game::{
    stage_label, GameCleared, GameProgress, HudState, NextStageRequested, PlayerRepositioned,
    StageOutcome,
};
use crate::logger;
use crate::timers::{TimerAction, TimerQueue};

/// Система: обработка NextStageRequested (FixedUpdate, SimulationSet::Progress)
pub fn advance_stage(
    mut commands: Commands,
    mut requests: EventReader<NextStageRequested>,
    mut progress: ResMut<GameProgress>,
    mut hud: ResMut<HudState>,
    mut virtual_time: ResMut<Time<Virtual>>,
    regions: Query<(Entity, &StageRegion)>,
    mut enemies: Query<(Entity, &StageMember, &mut PatrolAI), (With<Enemy>, Without<Dead>)>,
    config: Res<PlatformerConfig>,
    mut timers: ResMut<TimerQueue>,
    mut reposition_events: EventWriter<PlayerRepositioned>,
    mut cleared_events: EventWriter<GameCleared>,
) {
    for _ in requests.read() {
        match progress.next_stage() {
            StageOutcome::Advanced { from, to } => {
                for (entity, region) in regions.iter() {
                    if region.index == from {
                        commands.entity(entity).insert(Inactive);
                    } else if region.index == to {
                        commands.entity(entity).remove::<Inactive>();
                    }
                }

                for (entity, member, mut patrol) in enemies.iter_mut() {
                    if member.stage != from && member.stage != to {
                        continue;
                    }
                    if let Some(handle) = patrol.think_timer.take() {
                        timers.cancel(handle);
                    }
                    if member.stage == to {
                        patrol.think_timer = Some(timers.schedule(
                            entity,
                            TimerAction::EnemyThink,
                            config.enemy.first_think_delay,
                        ));
                    }
                }

                reposition_events.write(PlayerRepositioned);
                hud.stage_text = stage_label(to);

                logger::log_info(&format!("Stage {} → {}", from + 1, to + 1));
            }
            StageOutcome::Cleared => {
                virtual_time.pause();

                hud.restart_label = config.game.clear_label.clone();
                hud.restart_visible = true;

                cleared_events.write(GameCleared {
                    total_point: progress.total_point,
                });
                logger::log_info(&format!("Game clear! Total points: {}", progress.total_point));
            }
        }
    }
}
