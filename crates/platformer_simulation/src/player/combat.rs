//! Player ↔ Enemy combat resolution
//!
//! Столкновение с врагом даёт РОВНО один исход:
//! - Attack: игрок падает (velocity.y < 0) и выше origin врага → stomp
//! - Damaged: всё остальное → урон, knockback, временная неуязвимость к врагам
//!
//! Неуязвимость: это смена collision group на PlayerDamaged на 3 секунды
//! (one-shot timer), а не отдельный invulnerability компонент.

use bevy::prelude::*;
use bevy_rapier2d::prelude::{ColliderDisabled, CollisionGroups};
use crate::ai::EnemyDamaged;
use crate::audio::{PlaySound, SoundCue};
use crate::components::{Animator, Dead, Enemy, Player, SpriteState};
use crate::config::PlatformerConfig;
use crate::game::{GameProgress, HealthDownRequested, PlayerDied, PlayerRepositioned};
use crate::logger;
use crate::physics::collision::{get_layer_name, player_damaged_groups, player_groups, GROUP_ENEMY};
use crate::physics::{Body2D, CollisionEntered};
use crate::timers::{TimerAction, TimerFired, TimerQueue};

/// Исход столкновения игрока с врагом
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactResolution {
    /// Stomp сверху
    Attack,
    /// Урон; direction = знак knockback по X (+1 вправо, -1 влево)
    Damaged { direction: f32 },
}

/// Классификация контакта (чистая функция)
pub fn resolve_enemy_contact(player_pos: Vec2, player_velocity: Vec2, enemy_pos: Vec2) -> ContactResolution {
    if player_velocity.y < 0.0 && player_pos.y > enemy_pos.y {
        return ContactResolution::Attack;
    }

    // Отталкивает от врага; при равных x: влево
    let direction = if player_pos.x - enemy_pos.x > 0.0 { 1.0 } else { -1.0 };
    ContactResolution::Damaged { direction }
}

/// Система: CollisionEntered (player ↔ enemy) → attack или damage (SimulationSet::Resolution)
pub fn resolve_enemy_contacts(
    mut collisions: EventReader<CollisionEntered>,
    mut players: Query<
        (
            &Transform,
            &mut Body2D,
            &mut SpriteState,
            &mut Animator,
            &mut CollisionGroups,
        ),
        With<Player>,
    >,
    enemies: Query<&Transform, (With<Enemy>, Without<Player>)>,
    config: Res<PlatformerConfig>,
    mut progress: ResMut<GameProgress>,
    mut timers: ResMut<TimerQueue>,
    mut enemy_damaged: EventWriter<EnemyDamaged>,
    mut health_events: EventWriter<HealthDownRequested>,
    mut sounds: EventWriter<PlaySound>,
) {
    for collision in collisions.read() {
        let Ok((transform, mut body, mut sprite, mut animator, mut groups)) =
            players.get_mut(collision.player)
        else {
            continue;
        };
        let Ok(enemy_transform) = enemies.get(collision.other) else {
            logger::log_warning(&format!("Collision with missing enemy {:?}", collision.other));
            continue;
        };

        // Уже получил урон в этом тике → враги больше не задевают
        if !groups.filters.intersects(GROUP_ENEMY) {
            continue;
        }

        let player_pos = transform.translation.truncate();
        let enemy_pos = enemy_transform.translation.truncate();

        match resolve_enemy_contact(player_pos, body.velocity, enemy_pos) {
            ContactResolution::Attack => {
                progress.add_stage_points(config.player.attack_reward);
                body.apply_impulse(Vec2::Y * config.player.attack_bounce);
                enemy_damaged.write(EnemyDamaged {
                    enemy: collision.other,
                });
                sounds.write(PlaySound { cue: SoundCue::Attack });

                logger::log(&format!("Stomp {:?}: +{}", collision.other, config.player.attack_reward));
            }
            ContactResolution::Damaged { direction } => {
                progress.queue_hit();
                health_events.write(HealthDownRequested);

                let previous_layer = get_layer_name(groups.memberships);
                *groups = player_damaged_groups();
                sprite.fade();
                body.apply_impulse(Vec2::new(direction, 1.0) * config.player.knockback_power);
                animator.damaged = true;
                timers.schedule(collision.player, TimerAction::PlayerRecover, config.player.recover_delay);
                sounds.write(PlaySound { cue: SoundCue::Damaged });

                logger::log(&format!(
                    "Player hit by {:?}: layer {} → {}",
                    collision.other,
                    previous_layer,
                    get_layer_name(groups.memberships)
                ));
            }
        }
    }
}

/// Система: PlayerRecover timer → обычный layer + полная alpha (SimulationSet::Ai)
pub fn recover_player(
    mut fired: EventReader<TimerFired>,
    mut players: Query<(&mut CollisionGroups, &mut SpriteState), With<Player>>,
) {
    for timer in fired.read() {
        if timer.action != TimerAction::PlayerRecover {
            continue;
        }
        if let Ok((mut groups, mut sprite)) = players.get_mut(timer.owner) {
            let previous_layer = get_layer_name(groups.memberships);
            *groups = player_groups();
            sprite.restore();

            logger::log(&format!(
                "Player recovered: layer {} → {}",
                previous_layer,
                get_layer_name(groups.memberships)
            ));
        }
    }
}

/// Система: PlayerRepositioned → respawn point, velocity = 0 (SimulationSet::Respawn)
pub fn reposition_player(
    mut events: EventReader<PlayerRepositioned>,
    config: Res<PlatformerConfig>,
    mut players: Query<(&mut Transform, &mut Body2D), With<Player>>,
) {
    if events.read().count() == 0 {
        return;
    }

    let respawn = config.game.respawn();
    for (mut transform, mut body) in players.iter_mut() {
        transform.translation.x = respawn.x;
        transform.translation.y = respawn.y;
        body.stop();
    }
}

/// Система: PlayerDied → death pose (SimulationSet::Death)
///
/// Input не блокируется: мёртвый игрок продолжает принимать ось/прыжок,
/// но без коллайдера просто падает.
pub fn on_player_died(
    mut commands: Commands,
    mut events: EventReader<PlayerDied>,
    config: Res<PlatformerConfig>,
    mut players: Query<(Entity, &mut Body2D, &mut SpriteState), With<Player>>,
    mut sounds: EventWriter<PlaySound>,
) {
    if events.read().count() == 0 {
        return;
    }

    for (entity, mut body, mut sprite) in players.iter_mut() {
        sprite.fade();
        sprite.flip_y = true;
        body.apply_impulse(Vec2::Y * config.player.death_impulse);
        commands.entity(entity).insert((ColliderDisabled, Dead));
        sounds.write(PlaySound { cue: SoundCue::Die });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_falling_from_above_is_attack() {
        let resolution = resolve_enemy_contact(Vec2::new(0.0, 1.0), Vec2::new(0.5, -2.0), Vec2::ZERO);
        assert_eq!(resolution, ContactResolution::Attack);
    }

    #[test]
    fn test_rising_from_above_is_damage() {
        let resolution = resolve_enemy_contact(Vec2::new(0.0, 1.0), Vec2::new(0.0, 3.0), Vec2::ZERO);
        assert!(matches!(resolution, ContactResolution::Damaged { .. }));
    }

    #[test]
    fn test_falling_from_below_is_damage() {
        let resolution =
            resolve_enemy_contact(Vec2::new(-0.5, -0.2), Vec2::new(0.0, -1.0), Vec2::ZERO);
        assert_eq!(resolution, ContactResolution::Damaged { direction: -1.0 });
    }

    #[test]
    fn test_damage_and_recovery_layers() {
        assert_eq!(get_layer_name(player_damaged_groups().memberships), "PlayerDamaged");
        assert_eq!(get_layer_name(player_groups().memberships), "Player");
    }

    #[test]
    fn test_knockback_points_away_from_enemy() {
        let right = resolve_enemy_contact(Vec2::new(1.0, 0.0), Vec2::ZERO, Vec2::ZERO);
        assert_eq!(right, ContactResolution::Damaged { direction: 1.0 });

        let same_x = resolve_enemy_contact(Vec2::ZERO, Vec2::ZERO, Vec2::ZERO);
        assert_eq!(same_x, ContactResolution::Damaged { direction: -1.0 });
    }
}
