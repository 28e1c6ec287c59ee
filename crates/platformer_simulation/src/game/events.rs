//! Game events: интерфейс между игроком и прогрессией
//!
//! Игрок не держит ссылку на менеджер (и наоборот):
//! - player/trigger системы пишут `*Requested`
//! - game системы отвечают `PlayerDied` / `PlayerRepositioned`

use bevy::prelude::*;

/// Запрос: снять одну жизнь
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct HealthDownRequested;

/// Запрос: перейти на следующую стадию (finish trigger)
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct NextStageRequested;

/// Сигнал: игрок умер (death pose, restart control)
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct PlayerDied;

/// Сигнал: игрок переносится в respawn point, velocity обнуляется
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct PlayerRepositioned;

/// Запрос: перезагрузить сцену с нуля
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RestartRequested;

/// Сигнал: последняя стадия пройдена (время заморожено)
#[derive(Event, Debug, Clone, Copy)]
pub struct GameCleared {
    pub total_point: u32,
}
