//! HUD state: строки и tint'ы, которые хост выводит как есть

use bevy::prelude::*;
use crate::config::PlatformerConfig;
use crate::game::GameProgress;

/// Цвет иконки здоровья (RGBA 0..1)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconTint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl IconTint {
    pub const FULL: IconTint = IconTint { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
    /// Потерянная жизнь: красный, полупрозрачный
    pub const LOST: IconTint = IconTint { r: 1.0, g: 0.0, b: 0.0, a: 0.4 };
}

/// Всё, что показывает HUD
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HudState {
    pub point_text: String,
    pub stage_text: String,
    pub restart_label: String,
    pub restart_visible: bool,
    /// По иконке на каждую стартовую жизнь
    pub health_icons: Vec<IconTint>,
}

impl Default for HudState {
    fn default() -> Self {
        Self::new(&PlatformerConfig::default())
    }
}

impl HudState {
    pub fn new(config: &PlatformerConfig) -> Self {
        Self {
            point_text: "0".to_string(),
            stage_text: stage_label(0),
            restart_label: config.game.restart_label.clone(),
            restart_visible: false,
            health_icons: vec![IconTint::FULL; config.game.starting_health as usize],
        }
    }

    /// Иконка жизни `index` потеряна (индекс за пределами: игнор)
    pub fn mark_health_lost(&mut self, index: usize) {
        if let Some(icon) = self.health_icons.get_mut(index) {
            *icon = IconTint::LOST;
        }
    }
}

/// "STAGE N" (N с единицы)
pub fn stage_label(stage_index: usize) -> String {
    format!("STAGE {}", stage_index + 1)
}

/// Система: обновление счёта каждый кадр (Update)
pub fn refresh_point_text(progress: Res<GameProgress>, mut hud: ResMut<HudState>) {
    let text = progress.displayed_points().to_string();
    if hud.point_text != text {
        hud.point_text = text;
    }
}
