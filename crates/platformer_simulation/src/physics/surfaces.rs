//! Платформы и ray-surface запросы
//!
//! Платформы: горизонтальные отрезки (top_y, [min_x, max_x]).
//! Для платформера этого достаточно: все лучи симуляции направлены вниз
//! (edge probe врага, grounded latch игрока).

use bevy::prelude::*;
use bevy_rapier2d::prelude::Group;
use crate::physics::collision::GROUP_PLATFORM;

/// Горизонтальная поверхность
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub min_x: f32,
    pub max_x: f32,
    pub top_y: f32,
    /// Слой поверхности (для layer mask фильтра)
    pub layer: Group,
    /// Стадия-владелец (None = общая для всех стадий)
    pub stage: Option<usize>,
}

impl Surface {
    pub fn platform(min_x: f32, max_x: f32, top_y: f32, stage: Option<usize>) -> Self {
        Self {
            min_x,
            max_x,
            top_y,
            layer: GROUP_PLATFORM,
            stage,
        }
    }

    fn covers(&self, x: f32) -> bool {
        x >= self.min_x && x <= self.max_x
    }

    fn belongs_to(&self, active_stage: usize) -> bool {
        self.stage.map_or(true, |stage| stage == active_stage)
    }
}

/// Результат raycast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Расстояние от origin до точки попадания
    pub distance: f32,
    pub point: Vec2,
}

/// Все поверхности загруженной сцены
#[derive(Resource, Debug, Clone, Default)]
pub struct PlatformSurfaces {
    pub surfaces: Vec<Surface>,
}

impl PlatformSurfaces {
    pub fn new(surfaces: Vec<Surface>) -> Self {
        Self { surfaces }
    }

    /// Луч из `origin` строго вниз длиной `max_distance`
    ///
    /// Возвращает ближайшее попадание по поверхностям из `layer_mask`.
    /// None = под точкой пусто (край платформы / в воздухе), это не ошибка.
    pub fn raycast_down(
        &self,
        origin: Vec2,
        max_distance: f32,
        layer_mask: Group,
        active_stage: usize,
    ) -> Option<RayHit> {
        self.surfaces
            .iter()
            .filter(|surface| surface.layer.intersects(layer_mask))
            .filter(|surface| surface.belongs_to(active_stage))
            .filter(|surface| surface.covers(origin.x))
            .filter_map(|surface| {
                let distance = origin.y - surface.top_y;
                (distance >= 0.0 && distance <= max_distance).then_some(RayHit {
                    distance,
                    point: Vec2::new(origin.x, surface.top_y),
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Самая высокая платформа, которую нижняя грань тела пересекла за тик
    pub fn landing_height(
        &self,
        x: f32,
        previous_bottom: f32,
        new_bottom: f32,
        active_stage: usize,
    ) -> Option<f32> {
        const EPSILON: f32 = 1e-4;

        self.surfaces
            .iter()
            .filter(|surface| surface.layer.intersects(GROUP_PLATFORM))
            .filter(|surface| surface.belongs_to(active_stage))
            .filter(|surface| surface.covers(x))
            .map(|surface| surface.top_y)
            .filter(|top| *top <= previous_bottom + EPSILON && *top >= new_bottom)
            .max_by(|a, b| a.total_cmp(b))
    }
}
