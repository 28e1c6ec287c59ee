//! Kinematic body для headless режима
//!
//! Архитектура:
//! - Body2D хранит velocity (unit mass: импульс = изменение скорости)
//! - apply_gravity идёт ДО скриптов (AI/player видят отрицательную velocity.y в покое)
//! - integrate_bodies идёт ПОСЛЕ скриптов: position += velocity * dt + посадка на платформу
//!
//! Детерминизм: fixed timestep (60Hz)

use bevy::prelude::*;
use bevy_rapier2d::prelude::ColliderDisabled;
use crate::components::{Inactive, StageMember};
use crate::config::PlatformerConfig;
use crate::game::GameProgress;
use crate::physics::PlatformSurfaces;

/// Физическое тело актора
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Body2D {
    pub velocity: Vec2,
    /// Множитель гравитации (0 = парит)
    pub gravity_scale: f32,
}

impl Default for Body2D {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
        }
    }
}

impl Body2D {
    /// Мгновенный импульс (unit mass)
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse;
    }

    /// Жёсткий clamp горизонтальной скорости в [-max, max]
    pub fn clamp_horizontal(&mut self, max_speed: f32) {
        if self.velocity.x > max_speed {
            self.velocity.x = max_speed;
        } else if self.velocity.x < -max_speed {
            self.velocity.x = -max_speed;
        }
    }

    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
    }
}

/// AABB актора/триггера (half extents относительно Transform)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Hitbox2D {
    pub half_extents: Vec2,
}

impl Default for Hitbox2D {
    fn default() -> Self {
        Self {
            half_extents: Vec2::splat(0.45),
        }
    }
}

impl Hitbox2D {
    pub fn new(half_extents: Vec2) -> Self {
        Self { half_extents }
    }

    /// AABB overlap двух hitbox'ов
    pub fn overlaps(&self, position: Vec2, other: &Hitbox2D, other_position: Vec2) -> bool {
        let delta = (position - other_position).abs();
        let reach = self.half_extents + other.half_extents;
        delta.x < reach.x && delta.y < reach.y
    }
}

/// Entity участвует в симуляции текущей стадии
pub fn is_live(member: Option<&StageMember>, active_stage: usize) -> bool {
    member.map_or(true, |member| member.stage == active_stage)
}

/// Трение о платформу: |vx| уменьшается на `amount`, знак не меняется
pub fn apply_friction(velocity_x: f32, amount: f32) -> f32 {
    if velocity_x.abs() <= amount {
        0.0
    } else {
        velocity_x - amount * velocity_x.signum()
    }
}

/// Система: gravity → velocity
pub fn apply_gravity(
    mut query: Query<(&mut Body2D, Option<&StageMember>), Without<Inactive>>,
    config: Res<PlatformerConfig>,
    progress: Res<GameProgress>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut body, member) in query.iter_mut() {
        if !is_live(member, progress.stage_index) {
            continue;
        }
        body.velocity.y += config.game.gravity * body.gravity_scale * delta;
    }
}

/// Система: velocity → Transform + посадка на платформы
///
/// Тело с отключённым коллайдером (death pose) проваливается сквозь платформы.
pub fn integrate_bodies(
    mut query: Query<
        (
            &mut Transform,
            &mut Body2D,
            &Hitbox2D,
            Option<&StageMember>,
            Has<ColliderDisabled>,
        ),
        Without<Inactive>,
    >,
    surfaces: Res<PlatformSurfaces>,
    config: Res<PlatformerConfig>,
    progress: Res<GameProgress>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    let friction = config.game.ground_friction * delta;

    for (mut transform, mut body, hitbox, member, collider_disabled) in query.iter_mut() {
        if !is_live(member, progress.stage_index) {
            continue;
        }

        let previous_bottom = transform.translation.y - hitbox.half_extents.y;
        transform.translation.x += body.velocity.x * delta;
        transform.translation.y += body.velocity.y * delta;

        if collider_disabled || body.velocity.y > 0.0 {
            continue;
        }

        let new_bottom = transform.translation.y - hitbox.half_extents.y;
        if let Some(top) = surfaces.landing_height(
            transform.translation.x,
            previous_bottom,
            new_bottom,
            progress.stage_index,
        ) {
            transform.translation.y = top + hitbox.half_extents.y;
            body.velocity.y = 0.0;
            body.velocity.x = apply_friction(body.velocity.x, friction);
        }
    }
}
