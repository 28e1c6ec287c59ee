//! World компоненты: стадии, предметы, trigger зоны

use bevy::prelude::*;
use crate::physics::Hitbox2D;

/// Регион стадии (активен ровно один)
///
/// Деактивация региона = Inactive на entity региона. Содержимое стадии
/// (враги, предметы, finish) помечено `StageMember` и живо только пока
/// его регион активен.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct StageRegion {
    pub index: usize,
}

/// Принадлежность entity к стадии
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct StageMember {
    pub stage: usize,
}

/// Подбираемый предмет (награда определяется по `Name`)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Hitbox2D)]
pub struct Item;

/// Finish trigger стадии
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Hitbox2D)]
pub struct FinishZone;

/// Hazard trigger (пропасть, шипы): respawn + урон
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Hitbox2D)]
pub struct HazardZone;
