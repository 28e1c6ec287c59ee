//! Tuning параметры платформера (RON)
//!
//! Все числа, которые в редакторе были бы инспектор-полями, собраны здесь.
//! Любое поле можно опустить в RON: подставится default.
//!
//! ```ron
//! (
//!     player: (max_speed: 4.0, jump_power: 18.0),
//!     game: (starting_health: 5),
//! )
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ошибка загрузки конфигурации / level layout
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Файл не прочитан
    Io(String),
    /// RON не распарсился
    Parse(String),
    /// Значения не прошли validate()
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "I/O error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e.to_string())
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Параметры игрока (movement + combat)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Жёсткий clamp горизонтальной скорости
    pub max_speed: f32,
    /// Импульс прыжка
    pub jump_power: f32,
    /// Snap-brake при отпускании horizontal: velocity.x = sign * brake_factor
    pub brake_factor: f32,
    /// |velocity.x| ниже порога → isWalking = false
    pub walk_threshold: f32,
    /// Длина луча вниз для grounded latch
    pub landing_probe_distance: f32,
    /// Hit ближе порога → isJumping = false
    pub landing_threshold: f32,
    /// Отскок вверх после удачного stomp
    pub attack_bounce: f32,
    /// Сила knockback при получении урона
    pub knockback_power: f32,
    /// Через сколько секунд снимается damaged layer/tint
    pub recover_delay: f32,
    pub death_impulse: f32,
    /// Очки за убитого врага
    pub attack_reward: u32,
    pub half_extents: [f32; 2],
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_speed: 3.0,
            jump_power: 15.0,
            brake_factor: 0.5,
            walk_threshold: 0.3,
            landing_probe_distance: 1.0,
            landing_threshold: 0.5,
            attack_bounce: 5.0,
            knockback_power: 7.0,
            recover_delay: 3.0,
            death_impulse: 5.0,
            attack_reward: 100,
            half_extents: [0.45, 0.45],
        }
    }
}

/// Параметры patrol AI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// Первый think после spawn
    pub first_think_delay: f32,
    pub think_interval_min: f32,
    pub think_interval_max: f32,
    /// Think после разворота на краю платформы
    pub edge_turn_delay: f32,
    /// Смещение точки probe вперёд по направлению движения
    pub probe_offset: f32,
    pub probe_distance: f32,
    /// Скорость ходьбы (velocity.x = next_move * move_speed)
    pub move_speed: f32,
    pub death_impulse: f32,
    /// Через сколько секунд мёртвый враг деактивируется
    pub deactivate_delay: f32,
    pub half_extents: [f32; 2],
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            first_think_delay: 5.0,
            think_interval_min: 2.0,
            think_interval_max: 5.0,
            edge_turn_delay: 2.0,
            probe_offset: 0.2,
            probe_distance: 1.0,
            move_speed: 1.0,
            death_impulse: 5.0,
            deactivate_delay: 5.0,
            half_extents: [0.45, 0.45],
        }
    }
}

/// Награды за предметы (по подстроке в имени)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemRewards {
    pub bronze: u32,
    pub silver: u32,
    pub gold: u32,
}

impl Default for ItemRewards {
    fn default() -> Self {
        Self {
            bronze: 50,
            silver: 100,
            gold: 200,
        }
    }
}

/// Параметры прогрессии (health, respawn, UI строки)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    pub starting_health: u32,
    /// Точка respawn игрока (world coordinates)
    pub respawn_point: [f32; 2],
    /// Гравитация (units/s²), отрицательная = вниз
    pub gravity: f32,
    /// Торможение тела, стоящего на платформе (units/s²)
    pub ground_friction: f32,
    pub item_rewards: ItemRewards,
    /// Текст кнопки restart по умолчанию
    pub restart_label: String,
    /// Текст кнопки restart после прохождения последней стадии
    pub clear_label: String,
}

impl Default for GameTuning {
    fn default() -> Self {
        Self {
            starting_health: 3,
            respawn_point: [0.0, 0.0],
            gravity: -30.0,
            ground_friction: 10.0,
            item_rewards: ItemRewards::default(),
            restart_label: "Retry".to_string(),
            clear_label: "Game Clear!".to_string(),
        }
    }
}

impl GameTuning {
    pub fn respawn(&self) -> Vec2 {
        Vec2::from(self.respawn_point)
    }
}

/// Корневой config resource
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerConfig {
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub game: GameTuning,
}

impl PlatformerConfig {
    /// Парсит RON + validate()
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Проверка согласованности значений
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.starting_health == 0 {
            return Err(ConfigError::Invalid("starting_health must be at least 1".into()));
        }
        if self.player.max_speed <= 0.0 {
            return Err(ConfigError::Invalid("player.max_speed must be positive".into()));
        }
        if self.enemy.think_interval_min > self.enemy.think_interval_max {
            return Err(ConfigError::Invalid(format!(
                "enemy think interval is empty: {} > {}",
                self.enemy.think_interval_min, self.enemy.think_interval_max
            )));
        }
        if self.enemy.think_interval_min <= 0.0 {
            return Err(ConfigError::Invalid("enemy.think_interval_min must be positive".into()));
        }
        if self.player.landing_probe_distance <= 0.0 || self.enemy.probe_distance <= 0.0 {
            return Err(ConfigError::Invalid("probe distances must be positive".into()));
        }
        if self.game.ground_friction < 0.0 {
            return Err(ConfigError::Invalid("game.ground_friction must not be negative".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_tuning() {
        let config = PlatformerConfig::default();
        assert_eq!(config.game.starting_health, 3);
        assert_eq!(config.game.item_rewards.bronze, 50);
        assert_eq!(config.game.item_rewards.silver, 100);
        assert_eq!(config.game.item_rewards.gold, 200);
        assert_eq!(config.enemy.edge_turn_delay, 2.0);
        assert_eq!(config.player.recover_delay, 3.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let config = PlatformerConfig::from_ron_str(
            "(player: (max_speed: 4.5), game: (starting_health: 5))",
        )
        .unwrap();

        assert_eq!(config.player.max_speed, 4.5);
        assert_eq!(config.player.jump_power, 15.0);
        assert_eq!(config.game.starting_health, 5);
        assert_eq!(config.enemy, EnemyTuning::default());
    }

    #[test]
    fn test_parse_error() {
        let result = PlatformerConfig::from_ron_str("(player: (max_speed: \"fast\"))");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_rejects_zero_health() {
        let result = PlatformerConfig::from_ron_str("(game: (starting_health: 0))");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validation_rejects_inverted_think_interval() {
        let mut config = PlatformerConfig::default();
        config.enemy.think_interval_min = 6.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_pretty_ron_reparses() {
        let config = PlatformerConfig::default();
        let text = config.to_ron_string().unwrap();
        assert_eq!(PlatformerConfig::from_ron_str(&text).unwrap(), config);
    }
}
