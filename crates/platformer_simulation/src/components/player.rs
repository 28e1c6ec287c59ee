//! Player control marker component
//!
//! Отмечает entity которым управляет игрок через `PlayerInput`.

use bevy::prelude::*;
use crate::components::{Animator, AudioEmitter, SpriteState};
use crate::physics::{Body2D, Hitbox2D};

/// Marker component для player-controlled entity
///
/// Автоматически добавляет Body2D, Hitbox2D, SpriteState, Animator, AudioEmitter
/// через Required Components.
///
/// # Single-player
/// В сцене ровно один entity с этим компонентом. Системы, которым нужен игрок,
/// берут первый из query и молча выходят, если его нет (между restart'ами).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Body2D, Hitbox2D, SpriteState, Animator, AudioEmitter)]
pub struct Player;
