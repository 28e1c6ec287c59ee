//! Жизненный цикл entity: активность, смерть, принадлежность сцене

use bevy::prelude::*;

/// Entity деактивирован (скрыт, но не уничтожен)
///
/// Inactive entity не участвует в AI, физике и контактах.
/// Снимается только пересозданием сцены (restart) или активацией стадии.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Inactive;

/// Маркер: актор мёртв (death pose проиграна)
///
/// Для игрока: только визуал, entity остаётся активным.
/// Для врага: через `deactivate_delay` секунд добавится Inactive.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;

/// Entity принадлежит загруженной сцене (удаляется при restart)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct SceneMember;
