//! Delayed actions с cancellable handles
//!
//! Замена engine-managed "вызови метод через N секунд":
//! - `TimerQueue::schedule` возвращает `TimerHandle`
//! - `TimerQueue::cancel` снимает конкретный таймер (edge-turn снимает think)
//! - `tick_timers` в FixedUpdate → `TimerFired` события
//!
//! Таймеры идут по fixed (scaled) времени: пока `Time<Virtual>` на паузе,
//! FixedUpdate не тикает и таймеры замирают.

use bevy::prelude::*;

/// Что сделать по истечении таймера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum TimerAction {
    /// Patrol AI выбирает новое направление
    EnemyThink,
    /// Мёртвый враг скрывается (Inactive)
    EnemyDeactivate,
    /// Игрок выходит из damaged состояния (layer + tint)
    PlayerRecover,
}

/// Handle запланированного таймера (уникален в пределах TimerQueue)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct TimerHandle(pub u64);

#[derive(Debug, Clone)]
struct PendingTimer {
    handle: TimerHandle,
    owner: Entity,
    action: TimerAction,
    remaining: f32,
}

/// Сработавший таймер (результат `TimerQueue::tick`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub owner: Entity,
    pub action: TimerAction,
}

/// Очередь delayed actions
#[derive(Resource, Debug, Default)]
pub struct TimerQueue {
    pending: Vec<PendingTimer>,
    next_id: u64,
}

impl TimerQueue {
    /// Запланировать action для owner через `delay` секунд
    pub fn schedule(&mut self, owner: Entity, action: TimerAction, delay: f32) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTimer {
            handle,
            owner,
            action,
            remaining: delay.max(0.0),
        });
        handle
    }

    /// Снять таймер. false если он уже сработал или снят.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.handle != handle);
        self.pending.len() != before
    }

    /// Снять все таймеры owner (возвращает количество)
    pub fn cancel_owner(&mut self, owner: Entity) -> usize {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.owner != owner);
        before - self.pending.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|timer| timer.handle == handle)
    }

    /// Сколько секунд осталось до срабатывания
    pub fn remaining(&self, handle: TimerHandle) -> Option<f32> {
        self.pending
            .iter()
            .find(|timer| timer.handle == handle)
            .map(|timer| timer.remaining)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Продвинуть время. Возвращает сработавшие таймеры в порядке истечения
    /// (при равенстве: в порядке планирования).
    pub fn tick(&mut self, delta: f32) -> Vec<FiredTimer> {
        let mut expired: Vec<(f32, PendingTimer)> = Vec::new();

        self.pending.retain_mut(|timer| {
            timer.remaining -= delta;
            if timer.remaining <= 0.0 {
                expired.push((timer.remaining, timer.clone()));
                false
            } else {
                true
            }
        });

        // Чем меньше remaining, тем раньше истёк внутри тика
        expired.sort_by(|(a_left, a), (b_left, b)| {
            a_left
                .total_cmp(b_left)
                .then(a.handle.0.cmp(&b.handle.0))
        });

        expired
            .into_iter()
            .map(|(_, timer)| FiredTimer {
                handle: timer.handle,
                owner: timer.owner,
                action: timer.action,
            })
            .collect()
    }
}

/// Событие: таймер сработал
#[derive(Event, Debug, Clone, Copy)]
pub struct TimerFired {
    pub handle: TimerHandle,
    pub owner: Entity,
    pub action: TimerAction,
}

/// Система: tick всех таймеров (FixedUpdate, самая первая)
pub fn tick_timers(
    mut queue: ResMut<TimerQueue>,
    mut fired_events: EventWriter<TimerFired>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    for fired in queue.tick(delta) {
        fired_events.write(TimerFired {
            handle: fired.handle,
            owner: fired.owner,
            action: fired.action,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(index: u32) -> Entity {
        Entity::from_raw(index)
    }

    #[test]
    fn test_timer_fires_after_delay() {
        let mut queue = TimerQueue::default();
        let handle = queue.schedule(owner(1), TimerAction::EnemyThink, 2.0);

        assert!(queue.tick(1.5).is_empty());
        assert!(queue.is_pending(handle));

        let fired = queue.tick(0.5);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].handle, handle);
        assert_eq!(fired[0].action, TimerAction::EnemyThink);
        assert!(!queue.is_pending(handle));
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut queue = TimerQueue::default();
        let handle = queue.schedule(owner(1), TimerAction::EnemyThink, 1.0);

        assert!(queue.cancel(handle));
        assert!(!queue.cancel(handle)); // Повторный cancel: no-op
        assert!(queue.tick(5.0).is_empty());
    }

    #[test]
    fn test_fire_order_by_expiry_then_schedule_order() {
        let mut queue = TimerQueue::default();
        let late = queue.schedule(owner(1), TimerAction::EnemyDeactivate, 0.9);
        let early = queue.schedule(owner(2), TimerAction::PlayerRecover, 0.2);
        let tie = queue.schedule(owner(3), TimerAction::EnemyThink, 0.2);

        let fired: Vec<_> = queue.tick(1.0).into_iter().map(|t| t.handle).collect();
        assert_eq!(fired, vec![early, tie, late]);
    }

    #[test]
    fn test_cancel_owner_keeps_other_timers() {
        let mut queue = TimerQueue::default();
        queue.schedule(owner(1), TimerAction::EnemyThink, 1.0);
        queue.schedule(owner(1), TimerAction::EnemyDeactivate, 1.0);
        let other = queue.schedule(owner(2), TimerAction::EnemyThink, 1.0);

        assert_eq!(queue.cancel_owner(owner(1)), 2);
        assert_eq!(queue.len(), 1);
        assert!(queue.is_pending(other));
    }

    #[test]
    fn test_remaining_counts_down() {
        let mut queue = TimerQueue::default();
        let handle = queue.schedule(owner(1), TimerAction::PlayerRecover, 3.0);
        queue.tick(1.0);
        let left = queue.remaining(handle).unwrap();
        assert!((left - 2.0).abs() < 1e-5, "remaining = {}", left);
    }
}
