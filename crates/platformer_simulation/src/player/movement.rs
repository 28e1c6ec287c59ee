//! Player movement
//!
//! Per-frame (Update): jump, snap-brake, facing, walking flag.
//! Per-tick (FixedUpdate): input impulse + hard clamp, grounded latch.
//!
//! Grounded latch единственный сигнал приземления. Пока velocity.y < 0,
//! луч вниз на 1 unit; hit ближе 0.5 снимает isJumping. Отдельного
//! landing события нет (возможна задержка в один тик).

use bevy::prelude::*;
use crate::audio::{PlaySound, SoundCue};
use crate::components::{Animator, Player, SpriteState};
use crate::config::PlatformerConfig;
use crate::game::GameProgress;
use crate::physics::collision::GROUP_PLATFORM;
use crate::physics::{Body2D, PlatformSurfaces};
use crate::player::PlayerInput;

/// Система: прыжок по edge нажатия (Update)
///
/// Единственная защита от double jump: флаг isJumping.
pub fn player_jump(
    input: Res<PlayerInput>,
    config: Res<PlatformerConfig>,
    mut query: Query<(&mut Body2D, &mut Animator), With<Player>>,
    mut sounds: EventWriter<PlaySound>,
) {
    if !input.jump_just_pressed {
        return;
    }

    for (mut body, mut animator) in query.iter_mut() {
        if animator.is_jumping {
            continue;
        }
        body.apply_impulse(Vec2::Y * config.player.jump_power);
        animator.is_jumping = true;
        sounds.write(PlaySound { cue: SoundCue::Jump });
    }
}

/// Snap-brake: velocity.x = sign(velocity).x * factor
///
/// Нормализуется весь вектор скорости, поэтому в прыжке тормоз сильнее.
pub fn braked_horizontal(velocity: Vec2, brake_factor: f32) -> f32 {
    velocity.normalize_or_zero().x * brake_factor
}

/// Система: тормоз при отпускании horizontal (Update)
pub fn player_brake(
    input: Res<PlayerInput>,
    config: Res<PlatformerConfig>,
    mut query: Query<&mut Body2D, With<Player>>,
) {
    if !input.horizontal_just_released {
        return;
    }

    for mut body in query.iter_mut() {
        body.velocity.x = braked_horizontal(body.velocity, config.player.brake_factor);
    }
}

/// Система: спрайт смотрит по направлению ввода (Update)
pub fn player_facing(input: Res<PlayerInput>, mut query: Query<&mut SpriteState, With<Player>>) {
    if !input.horizontal_held() {
        return;
    }

    for mut sprite in query.iter_mut() {
        sprite.flip_x = input.horizontal == -1.0;
    }
}

/// Система: isWalking по порогу |velocity.x| (Update)
pub fn player_walk_flag(
    config: Res<PlatformerConfig>,
    mut query: Query<(&Body2D, &mut Animator), With<Player>>,
) {
    for (body, mut animator) in query.iter_mut() {
        animator.is_walking = body.velocity.x.abs() >= config.player.walk_threshold;
    }
}

/// Система: импульс от оси + hard clamp (FixedUpdate, PlayerControl)
pub fn player_move(
    input: Res<PlayerInput>,
    config: Res<PlatformerConfig>,
    mut query: Query<&mut Body2D, With<Player>>,
) {
    for mut body in query.iter_mut() {
        body.apply_impulse(Vec2::X * input.horizontal);
        body.clamp_horizontal(config.player.max_speed);
    }
}

/// Система: grounded latch через raycast (FixedUpdate, PlayerControl)
pub fn player_landing_probe(
    config: Res<PlatformerConfig>,
    surfaces: Res<PlatformSurfaces>,
    progress: Res<GameProgress>,
    mut query: Query<(&Transform, &Body2D, &mut Animator), With<Player>>,
) {
    for (transform, body, mut animator) in query.iter_mut() {
        if body.velocity.y >= 0.0 {
            continue;
        }

        let hit = surfaces.raycast_down(
            transform.translation.truncate(),
            config.player.landing_probe_distance,
            GROUP_PLATFORM,
            progress.stage_index,
        );

        if let Some(hit) = hit {
            if hit.distance < config.player.landing_threshold {
                animator.is_jumping = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::physics::Surface;

    /// App только с grounded latch; платформа с верхом на y = 0
    fn latch_app() -> App {
        let mut app = App::new();
        app.insert_resource(PlatformerConfig::default())
            .insert_resource(PlatformSurfaces::new(vec![Surface::platform(-5.0, 5.0, 0.0, None)]))
            .insert_resource(GameProgress::new(3, 1))
            .add_systems(Update, player_landing_probe);
        app
    }

    fn spawn_airborne_player(app: &mut App, height: f32, velocity_y: f32) -> Entity {
        app.world_mut()
            .spawn((
                Player,
                Transform::from_xyz(0.0, height, 0.0),
                Body2D {
                    velocity: Vec2::new(0.0, velocity_y),
                    ..default()
                },
                Animator {
                    is_jumping: true,
                    ..default()
                },
            ))
            .id()
    }

    fn is_jumping(app: &App, player: Entity) -> bool {
        app.world().get::<Animator>(player).unwrap().is_jumping
    }

    #[test]
    fn test_hit_beyond_threshold_keeps_jumping() {
        let mut app = latch_app();
        // Луч (1.0) достаёт платформу, но 0.7 ≥ 0.5
        let player = spawn_airborne_player(&mut app, 0.7, -1.0);

        app.update();
        assert!(is_jumping(&app, player));

        app.world_mut().get_mut::<Transform>(player).unwrap().translation.y = 0.4;
        app.update();
        assert!(!is_jumping(&app, player));
    }

    #[test]
    fn test_rising_player_is_not_latched() {
        let mut app = latch_app();
        let player = spawn_airborne_player(&mut app, 0.2, 3.0);

        app.update();
        assert!(is_jumping(&app, player));
    }

    #[test]
    fn test_brake_on_ground_halves_to_sign() {
        assert_eq!(braked_horizontal(Vec2::new(3.0, 0.0), 0.5), 0.5);
        assert_eq!(braked_horizontal(Vec2::new(-2.2, 0.0), 0.5), -0.5);
    }

    #[test]
    fn test_brake_at_rest_is_zero() {
        assert_eq!(braked_horizontal(Vec2::ZERO, 0.5), 0.0);
    }

    #[test]
    fn test_brake_in_air_uses_full_vector() {
        // (3, 4) → normalized (0.6, 0.8) → 0.3
        let braked = braked_horizontal(Vec2::new(3.0, 4.0), 0.5);
        assert!((braked - 0.3).abs() < 1e-5, "braked = {}", braked);
    }
}
