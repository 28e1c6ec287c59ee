//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: жизненный цикл (Inactive, Dead, SceneMember)
//! - presentation: данные для рендера/аудио хоста (SpriteState, Animator, AudioEmitter)
//! - player: player marker (Player)
//! - enemy: patrol AI (Enemy, PatrolAI)
//! - world: стадии, предметы, finish/hazard зоны

pub mod actor;
pub mod presentation;
pub mod player;
pub mod enemy;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use presentation::*;
pub use player::*;
pub use enemy::*;
pub use world::*;
