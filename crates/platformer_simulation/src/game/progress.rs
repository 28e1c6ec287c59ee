//! Прогрессия: очки, здоровье, индекс стадии
//!
//! Чистая логика без ECS: системы в health.rs / stage.rs применяют
//! результат (`HealthOutcome`, `StageOutcome`) к миру.

use bevy::prelude::*;
use crate::config::PlatformerConfig;

/// Состояние прогрессии игрока
///
/// Инварианты:
/// - health уменьшается ровно на 1 за удар, пока health > 1
/// - при health == 1 удар = смерть, health больше не уменьшается
/// - stage_index < stage_count (если стадии есть)
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GameProgress {
    /// Очки за пройденные стадии
    pub total_point: u32,
    /// Очки текущей стадии (сворачиваются в total_point на NextStage)
    pub stage_point: u32,
    pub stage_index: usize,
    pub health: u32,
    pub stage_count: usize,
    /// Удары, запрошенные в текущем тике, но ещё не применённые (Damage set)
    pub pending_hits: u32,
}

impl Default for GameProgress {
    fn default() -> Self {
        Self::new(3, 1)
    }
}

/// Результат HealthDown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthOutcome {
    /// health уменьшен, `remaining`: новое значение
    Decremented { remaining: u32 },
    /// Последняя жизнь: death signal
    Died,
}

/// Результат NextStage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Advanced { from: usize, to: usize },
    /// Последняя стадия пройдена
    Cleared,
}

impl GameProgress {
    pub fn new(starting_health: u32, stage_count: usize) -> Self {
        Self {
            total_point: 0,
            stage_point: 0,
            stage_index: 0,
            health: starting_health,
            stage_count,
            pending_hits: 0,
        }
    }

    pub fn from_config(config: &PlatformerConfig, stage_count: usize) -> Self {
        Self::new(config.game.starting_health, stage_count)
    }

    /// Число на HUD
    pub fn displayed_points(&self) -> u32 {
        self.total_point + self.stage_point
    }

    pub fn add_stage_points(&mut self, points: u32) {
        self.stage_point += points;
    }

    /// Переживёт ли игрок ещё один удар (с учётом уже запрошенных в этом тике)
    pub fn survives_hit(&self) -> bool {
        self.health > self.pending_hits + 1
    }

    /// Удар запрошен, HealthDown применится позже в этом тике
    pub fn queue_hit(&mut self) {
        self.pending_hits += 1;
    }

    pub fn is_last_stage(&self) -> bool {
        self.stage_index + 1 >= self.stage_count
    }

    /// HealthDown: декремент или смерть (взаимоисключающе)
    pub fn health_down(&mut self) -> HealthOutcome {
        if self.health > 1 {
            self.health -= 1;
            HealthOutcome::Decremented {
                remaining: self.health,
            }
        } else {
            HealthOutcome::Died
        }
    }

    /// NextStage: переход или clear; очки стадии сворачиваются в обоих случаях
    pub fn next_stage(&mut self) -> StageOutcome {
        let outcome = if !self.is_last_stage() {
            let from = self.stage_index;
            self.stage_index += 1;
            StageOutcome::Advanced {
                from,
                to: self.stage_index,
            }
        } else {
            StageOutcome::Cleared
        };

        self.fold_stage_points();
        outcome
    }

    pub fn fold_stage_points(&mut self) {
        self.total_point += self.stage_point;
        self.stage_point = 0;
    }
}
