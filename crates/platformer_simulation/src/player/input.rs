//! Player input snapshot
//!
//! Binding клавиш/геймпада: у хоста. Хост каждый кадр пишет сюда
//! raw ось и edge-флаги; edge-флаги сбрасываются в PostUpdate.

use bevy::prelude::*;

/// Ввод игрока за текущий кадр
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// Raw горизонтальная ось: -1, 0, 1
    pub horizontal: f32,
    /// Jump нажат в этом кадре (edge)
    pub jump_just_pressed: bool,
    /// Horizontal отпущен в этом кадре (edge)
    pub horizontal_just_released: bool,
}

impl PlayerInput {
    /// Выставить ось; переход ≠0 → 0 даёт release edge
    pub fn set_horizontal(&mut self, axis: f32) {
        let axis = axis.clamp(-1.0, 1.0);
        if self.horizontal != 0.0 && axis == 0.0 {
            self.horizontal_just_released = true;
        }
        self.horizontal = axis;
    }

    pub fn press_jump(&mut self) {
        self.jump_just_pressed = true;
    }

    pub fn horizontal_held(&self) -> bool {
        self.horizontal != 0.0
    }
}

/// Система: сброс edge-флагов в конце кадра (PostUpdate)
pub fn clear_input_edges(mut input: ResMut<PlayerInput>) {
    input.jump_just_pressed = false;
    input.horizontal_just_released = false;
}
