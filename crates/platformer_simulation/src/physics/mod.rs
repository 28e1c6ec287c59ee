//! Physics module (headless stand-in физического движка)
//!
//! Что даёт остальной симуляции:
//! - Body2D: velocity + импульсы (unit mass)
//! - PlatformSurfaces: raycast вниз с layer mask
//! - detect_contacts: collision/trigger enter события
//!
//! Хост с настоящим физическим движком может заменить этот plugin,
//! сохранив те же компоненты и события.

use bevy::prelude::*;
use crate::SimulationSet;

pub mod body;
pub mod collision;
pub mod surfaces;

// Re-export основных типов
pub use body::{apply_friction, apply_gravity, integrate_bodies, is_live, Body2D, Hitbox2D};
pub use collision::{
    detect_contacts, groups_interact, CollisionEntered, ContactMemory, TriggerEntered, TriggerKind,
};
pub use surfaces::{PlatformSurfaces, RayHit, Surface};

/// Physics Plugin
///
/// Порядок в FixedUpdate:
/// 1. apply_gravity (SimulationSet::Gravity)
/// 2. ... AI / player скрипты ...
/// 3. integrate_bodies (SimulationSet::Integrate)
/// 4. detect_contacts (SimulationSet::Contacts)
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlatformSurfaces>()
            .init_resource::<ContactMemory>()
            .add_event::<CollisionEntered>()
            .add_event::<TriggerEntered>()
            .add_systems(FixedUpdate, apply_gravity.in_set(SimulationSet::Gravity))
            .add_systems(FixedUpdate, integrate_bodies.in_set(SimulationSet::Integrate))
            .add_systems(FixedUpdate, detect_contacts.in_set(SimulationSet::Contacts));
    }
}
