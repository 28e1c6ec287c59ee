//! Presentation state: то, что хост рендерит / проигрывает
//!
//! Симуляция только выставляет значения. Рендер, blending анимаций и
//! микширование звука: ответственность хоста.

use bevy::prelude::*;

/// Alpha для полупрозрачного (damaged / dead) спрайта
pub const FADED_ALPHA: f32 = 0.4;

/// Состояние спрайта (flip + прозрачность)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SpriteState {
    /// true = смотрит вправо для врага / влево для игрока (как нарисован атлас)
    pub flip_x: bool,
    /// Death pose (перевёрнут вверх ногами)
    pub flip_y: bool,
    pub alpha: f32,
}

impl Default for SpriteState {
    fn default() -> Self {
        Self {
            flip_x: false,
            flip_y: false,
            alpha: 1.0,
        }
    }
}

impl SpriteState {
    pub fn fade(&mut self) {
        self.alpha = FADED_ALPHA;
    }

    pub fn restore(&mut self) {
        self.alpha = 1.0;
    }

    pub fn is_faded(&self) -> bool {
        self.alpha < 1.0
    }
}

/// Параметры animator'а
///
/// Типизированные поля вместо строковых имён параметров.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Animator {
    /// Patrol направление врага (-1, 0, 1)
    pub walk_speed: i32,
    pub is_jumping: bool,
    pub is_walking: bool,
    /// One-shot trigger; хост сбрасывает после запуска анимации
    pub damaged: bool,
}

/// Handle аудио-клипа (путь ассета у хоста)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub struct ClipHandle(pub String);

impl From<&str> for ClipHandle {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

/// Аудио источник актора (последний выбранный клип)
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AudioEmitter {
    pub clip: Option<ClipHandle>,
}
