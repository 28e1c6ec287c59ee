//! Patrol AI: think таймер + edge probe
//!
//! # Цикл
//! ```text
//! стадия активна ──5s──▶ think ──2..5s──▶ think ──▶ ...
//!                 ▲
//!   edge probe miss: turn + cancel think + think через 2s
//! ```
//!
//! Stomp (EnemyDamaged) → death pose, think снимается,
//! через 5s враг получает Inactive.

use bevy::prelude::*;
use bevy_rapier2d::prelude::ColliderDisabled;
use rand::Rng;
use crate::ai::EnemyDamaged;
use crate::components::{Animator, Dead, Enemy, Inactive, PatrolAI, SpriteState, StageMember};
use crate::config::{EnemyTuning, PlatformerConfig};
use crate::game::GameProgress;
use crate::logger;
use crate::physics::collision::GROUP_PLATFORM;
use crate::physics::{is_live, Body2D, PlatformSurfaces};
use crate::timers::{TimerAction, TimerFired, TimerQueue};
use crate::DeterministicRng;

/// Случайное направление ∈ {-1, 0, 1}
pub fn roll_next_move(rng: &mut impl Rng) -> i32 {
    rng.gen_range(-1..=1)
}

/// Случайная задержка до следующего think ∈ [min, max)
pub fn roll_think_delay(rng: &mut impl Rng, tuning: &EnemyTuning) -> f32 {
    if tuning.think_interval_max <= tuning.think_interval_min {
        return tuning.think_interval_min;
    }
    rng.gen_range(tuning.think_interval_min..tuning.think_interval_max)
}

/// Точка начала edge probe: чуть впереди по направлению движения
pub fn probe_origin(position: Vec2, next_move: i32, probe_offset: f32) -> Vec2 {
    Vec2::new(position.x + next_move as f32 * probe_offset, position.y)
}

/// Система: EnemyThink timer → новое направление + следующий think (SimulationSet::Ai)
///
/// Враги неактивных стадий не думают: think для них молча пропускается.
pub fn enemy_think(
    mut fired: EventReader<TimerFired>,
    mut enemies: Query<
        (&mut PatrolAI, &mut Animator, &mut SpriteState, Option<&StageMember>),
        (With<Enemy>, Without<Dead>, Without<Inactive>),
    >,
    progress: Res<GameProgress>,
    config: Res<PlatformerConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut timers: ResMut<TimerQueue>,
) {
    for timer in fired.read() {
        if timer.action != TimerAction::EnemyThink {
            continue;
        }
        let Ok((mut patrol, mut animator, mut sprite, member)) = enemies.get_mut(timer.owner) else {
            continue;
        };
        if !is_live(member, progress.stage_index) {
            continue;
        }
        // Устаревший think (уже заменён разворотом)
        if patrol.think_timer != Some(timer.handle) {
            continue;
        }

        patrol.next_move = roll_next_move(&mut rng.rng);
        animator.walk_speed = patrol.next_move;
        if patrol.next_move != 0 {
            sprite.flip_x = patrol.faces_right();
        }

        let delay = roll_think_delay(&mut rng.rng, &config.enemy);
        patrol.think_timer = Some(timers.schedule(timer.owner, TimerAction::EnemyThink, delay));
    }
}

/// Система: движение + разворот на краю платформы (SimulationSet::Ai)
///
/// Probe без попадания = впереди пусто → разворот. Think переносится на 2s.
pub fn patrol_edge_check(
    mut enemies: Query<
        (
            Entity,
            &Transform,
            &mut Body2D,
            &mut PatrolAI,
            &mut SpriteState,
            Option<&StageMember>,
        ),
        (With<Enemy>, Without<Dead>, Without<Inactive>),
    >,
    surfaces: Res<PlatformSurfaces>,
    progress: Res<GameProgress>,
    config: Res<PlatformerConfig>,
    mut timers: ResMut<TimerQueue>,
) {
    let tuning = &config.enemy;

    for (entity, transform, mut body, mut patrol, mut sprite, member) in enemies.iter_mut() {
        if !is_live(member, progress.stage_index) {
            continue;
        }

        body.velocity.x = patrol.next_move as f32 * tuning.move_speed;

        let origin = probe_origin(transform.translation.truncate(), patrol.next_move, tuning.probe_offset);
        let hit = surfaces.raycast_down(origin, tuning.probe_distance, GROUP_PLATFORM, progress.stage_index);
        if hit.is_some() {
            continue;
        }

        patrol.turn();
        sprite.flip_x = patrol.faces_right();

        if let Some(handle) = patrol.think_timer.take() {
            timers.cancel(handle);
        }
        patrol.think_timer = Some(timers.schedule(entity, TimerAction::EnemyThink, tuning.edge_turn_delay));
    }
}

/// Система: EnemyDamaged → death pose (SimulationSet::Death)
pub fn on_enemy_damaged(
    mut commands: Commands,
    mut events: EventReader<EnemyDamaged>,
    mut enemies: Query<(&mut Body2D, &mut PatrolAI, &mut SpriteState), (With<Enemy>, Without<Dead>)>,
    config: Res<PlatformerConfig>,
    mut timers: ResMut<TimerQueue>,
) {
    for event in events.read() {
        let Ok((mut body, mut patrol, mut sprite)) = enemies.get_mut(event.enemy) else {
            continue;
        };

        sprite.fade();
        sprite.flip_y = true;
        body.apply_impulse(Vec2::Y * config.enemy.death_impulse);

        if let Some(handle) = patrol.think_timer.take() {
            timers.cancel(handle);
        }
        timers.schedule(event.enemy, TimerAction::EnemyDeactivate, config.enemy.deactivate_delay);

        commands.entity(event.enemy).insert((ColliderDisabled, Dead));

        logger::log(&format!("Enemy {:?} defeated", event.enemy));
    }
}

/// Система: EnemyDeactivate timer → Inactive (SimulationSet::Ai)
pub fn deactivate_dead_enemies(mut commands: Commands, mut fired: EventReader<TimerFired>) {
    for timer in fired.read() {
        if timer.action != TimerAction::EnemyDeactivate {
            continue;
        }
        if let Ok(mut entity) = commands.get_entity(timer.owner) {
            entity.insert(Inactive);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timers::TimerHandle;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_next_move_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let next = roll_next_move(&mut rng);
            assert!((-1..=1).contains(&next));
            seen[(next + 1) as usize] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_think_delay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let tuning = EnemyTuning::default();
        for _ in 0..200 {
            let delay = roll_think_delay(&mut rng, &tuning);
            assert!(delay >= 2.0 && delay < 5.0, "delay = {}", delay);
        }
    }

    #[test]
    fn test_degenerate_think_interval() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let tuning = EnemyTuning {
            think_interval_min: 3.0,
            think_interval_max: 3.0,
            ..EnemyTuning::default()
        };
        assert_eq!(roll_think_delay(&mut rng, &tuning), 3.0);
    }

    // ------------------------------------------------------------------
    // enemy_think в минимальном App
    // ------------------------------------------------------------------

    fn think_app(seed: u64) -> App {
        let mut app = App::new();
        app.add_event::<TimerFired>()
            .insert_resource(PlatformerConfig::default())
            .insert_resource(DeterministicRng::new(seed))
            .insert_resource(GameProgress::new(3, 2))
            .init_resource::<TimerQueue>()
            .add_systems(Update, enemy_think);
        app
    }

    /// Враг с запланированным think; спрайт изначально смотрит вправо
    fn spawn_thinking_enemy(app: &mut App, stage: usize) -> (Entity, TimerHandle) {
        let enemy = app
            .world_mut()
            .spawn((
                Enemy,
                StageMember { stage },
                SpriteState { flip_x: true, ..default() },
            ))
            .id();
        let handle = app
            .world_mut()
            .resource_mut::<TimerQueue>()
            .schedule(enemy, TimerAction::EnemyThink, 5.0);
        app.world_mut().get_mut::<PatrolAI>(enemy).unwrap().think_timer = Some(handle);
        (enemy, handle)
    }

    /// Таймер сработал: уходит из очереди, TimerFired уходит в систему
    fn fire_think(app: &mut App, owner: Entity, handle: TimerHandle) {
        app.world_mut().resource_mut::<TimerQueue>().cancel(handle);
        app.world_mut().send_event(TimerFired {
            handle,
            owner,
            action: TimerAction::EnemyThink,
        });
        app.update();
    }

    #[test]
    fn test_think_picks_move_and_reschedules() {
        let mut seen = [false; 3];

        for seed in 0..40 {
            let mut app = think_app(seed);
            let (enemy, handle) = spawn_thinking_enemy(&mut app, 0);
            fire_think(&mut app, enemy, handle);

            let patrol = *app.world().get::<PatrolAI>(enemy).unwrap();
            let animator = *app.world().get::<Animator>(enemy).unwrap();
            let sprite = *app.world().get::<SpriteState>(enemy).unwrap();

            assert!((-1..=1).contains(&patrol.next_move));
            seen[(patrol.next_move + 1) as usize] = true;
            assert_eq!(animator.walk_speed, patrol.next_move, "seed {}", seed);

            // Стоять на месте: спрайт не трогаем
            if patrol.next_move == 0 {
                assert!(sprite.flip_x, "seed {}: idle think must keep facing", seed);
            } else {
                assert_eq!(sprite.flip_x, patrol.next_move == 1, "seed {}", seed);
            }

            let next = patrol.think_timer.expect("think rescheduled");
            assert_ne!(next, handle);
            let timers = app.world().resource::<TimerQueue>();
            assert_eq!(timers.len(), 1);
            let remaining = timers.remaining(next).unwrap();
            assert!((2.0..5.0).contains(&remaining), "seed {}: delay = {}", seed, remaining);
        }

        assert_eq!(seen, [true, true, true]);
    }

    #[test]
    fn test_stale_think_is_ignored() {
        let mut app = think_app(3);
        let (enemy, stale) = spawn_thinking_enemy(&mut app, 0);

        // Разворот на краю уже заменил think
        let current = app
            .world_mut()
            .resource_mut::<TimerQueue>()
            .schedule(enemy, TimerAction::EnemyThink, 2.0);
        {
            let mut patrol = app.world_mut().get_mut::<PatrolAI>(enemy).unwrap();
            patrol.next_move = -1;
            patrol.think_timer = Some(current);
        }

        fire_think(&mut app, enemy, stale);

        let patrol = *app.world().get::<PatrolAI>(enemy).unwrap();
        assert_eq!(patrol.next_move, -1);
        assert_eq!(patrol.think_timer, Some(current));
        assert_eq!(app.world().get::<Animator>(enemy).unwrap().walk_speed, 0);
        assert!(app.world().get::<SpriteState>(enemy).unwrap().flip_x);

        let timers = app.world().resource::<TimerQueue>();
        assert_eq!(timers.len(), 1);
        assert!(timers.is_pending(current));
    }

    #[test]
    fn test_think_skipped_for_inactive_stage() {
        let mut app = think_app(3);
        let (enemy, handle) = spawn_thinking_enemy(&mut app, 1);

        fire_think(&mut app, enemy, handle);

        let patrol = *app.world().get::<PatrolAI>(enemy).unwrap();
        assert_eq!(patrol.next_move, 0);
        assert_eq!(patrol.think_timer, Some(handle), "no reschedule while stage is inactive");
        assert!(app.world().resource::<TimerQueue>().is_empty());
    }

    #[test]
    fn test_edge_check_origin_leads_movement() {
        assert_eq!(probe_origin(Vec2::new(1.0, 2.0), 1, 0.2), Vec2::new(1.2, 2.0));
        assert_eq!(probe_origin(Vec2::new(1.0, 2.0), -1, 0.2), Vec2::new(0.8, 2.0));
        assert_eq!(probe_origin(Vec2::new(1.0, 2.0), 0, 0.2), Vec2::new(1.0, 2.0));
    }
}
