//! Collision layers + headless contact detection
//!
//! ## Слои (rapier Group):
//! - GROUP_8: Platform (поверхности для raycast/посадки)
//! - GROUP_9: Enemy
//! - GROUP_10: Player (обычное состояние)
//! - GROUP_11: PlayerDamaged (после удара враги сквозь игрока проходят)
//! - GROUP_12: Trigger (предметы, finish, hazard)
//!
//! ## Контакты:
//! `detect_contacts` проверяет AABB overlap игрока с врагами и триггерами
//! и генерирует события только на ПЕРВОМ тике пересечения (enter semantics).

use bevy::prelude::*;
use bevy_rapier2d::prelude::{ColliderDisabled, CollisionGroups, Group};
use std::collections::HashSet;
use crate::components::{Enemy, FinishZone, HazardZone, Inactive, Item, Player, StageMember};
use crate::game::GameProgress;
use crate::physics::{is_live, Hitbox2D};

pub const GROUP_PLATFORM: Group = Group::GROUP_8;
pub const GROUP_ENEMY: Group = Group::GROUP_9;
pub const GROUP_PLAYER: Group = Group::GROUP_10;
pub const GROUP_PLAYER_DAMAGED: Group = Group::GROUP_11;
pub const GROUP_TRIGGER: Group = Group::GROUP_12;

/// Игрок: коллайдит с платформами, врагами, триггерами
pub fn player_groups() -> CollisionGroups {
    CollisionGroups::new(GROUP_PLAYER, GROUP_PLATFORM | GROUP_ENEMY | GROUP_TRIGGER)
}

/// Игрок после удара: враги игнорируются, предметы подбираются
pub fn player_damaged_groups() -> CollisionGroups {
    CollisionGroups::new(GROUP_PLAYER_DAMAGED, GROUP_PLATFORM | GROUP_TRIGGER)
}

pub fn enemy_groups() -> CollisionGroups {
    CollisionGroups::new(GROUP_ENEMY, GROUP_PLATFORM | GROUP_PLAYER)
}

pub fn trigger_groups() -> CollisionGroups {
    CollisionGroups::new(GROUP_TRIGGER, GROUP_PLAYER | GROUP_PLAYER_DAMAGED)
}

/// Взаимодействуют ли два объекта (симметричная проверка, как в rapier)
pub fn groups_interact(a: Option<&CollisionGroups>, b: Option<&CollisionGroups>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => {
            a.memberships.intersects(b.filters) && b.memberships.intersects(a.filters)
        }
        // Без CollisionGroups: "всё со всем"
        _ => true,
    }
}

/// Название слоя для debug логов
pub fn get_layer_name(layer: Group) -> &'static str {
    if layer == GROUP_PLATFORM {
        "Platform"
    } else if layer == GROUP_ENEMY {
        "Enemy"
    } else if layer == GROUP_PLAYER {
        "Player"
    } else if layer == GROUP_PLAYER_DAMAGED {
        "PlayerDamaged"
    } else if layer == GROUP_TRIGGER {
        "Trigger"
    } else {
        "Unknown"
    }
}

/// Вид trigger объекта
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    Item,
    Finish,
    Hazard,
}

/// Событие: игрок столкнулся с телом (враг)
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEntered {
    pub player: Entity,
    pub other: Entity,
}

/// Событие: игрок вошёл в trigger
#[derive(Event, Debug, Clone, Copy)]
pub struct TriggerEntered {
    pub player: Entity,
    pub other: Entity,
    pub kind: TriggerKind,
}

/// Пары (player, other), пересекавшиеся на прошлом тике
#[derive(Resource, Debug, Default)]
pub struct ContactMemory {
    pub touching: HashSet<(Entity, Entity)>,
}

/// Система: поиск новых контактов игрока
pub fn detect_contacts(
    players: Query<
        (Entity, &Transform, &Hitbox2D, Option<&CollisionGroups>),
        (With<Player>, Without<Inactive>, Without<ColliderDisabled>),
    >,
    enemies: Query<
        (Entity, &Transform, &Hitbox2D, Option<&CollisionGroups>, Option<&StageMember>),
        (With<Enemy>, Without<Inactive>, Without<ColliderDisabled>),
    >,
    triggers: Query<
        (
            Entity,
            &Transform,
            &Hitbox2D,
            Option<&CollisionGroups>,
            Option<&StageMember>,
            Has<Item>,
            Has<FinishZone>,
        ),
        (Or<(With<Item>, With<FinishZone>, With<HazardZone>)>, Without<Inactive>),
    >,
    progress: Res<GameProgress>,
    mut memory: ResMut<ContactMemory>,
    mut collision_events: EventWriter<CollisionEntered>,
    mut trigger_events: EventWriter<TriggerEntered>,
) {
    let mut touching = HashSet::new();

    for (player, player_transform, player_box, player_groups) in players.iter() {
        let player_pos = player_transform.translation.truncate();

        for (enemy, transform, hitbox, groups, member) in enemies.iter() {
            if !is_live(member, progress.stage_index) || !groups_interact(player_groups, groups) {
                continue;
            }
            if player_box.overlaps(player_pos, hitbox, transform.translation.truncate()) {
                touching.insert((player, enemy));
                if !memory.touching.contains(&(player, enemy)) {
                    collision_events.write(CollisionEntered { player, other: enemy });
                }
            }
        }

        for (trigger, transform, hitbox, groups, member, is_item, is_finish) in triggers.iter() {
            if !is_live(member, progress.stage_index) || !groups_interact(player_groups, groups) {
                continue;
            }
            if player_box.overlaps(player_pos, hitbox, transform.translation.truncate()) {
                touching.insert((player, trigger));
                if !memory.touching.contains(&(player, trigger)) {
                    let kind = if is_item {
                        TriggerKind::Item
                    } else if is_finish {
                        TriggerKind::Finish
                    } else {
                        TriggerKind::Hazard
                    };
                    trigger_events.write(TriggerEntered { player, other: trigger, kind });
                }
            }
        }
    }

    memory.touching = touching;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_touches_enemy() {
        let player = player_groups();
        let enemy = enemy_groups();
        assert!(groups_interact(Some(&player), Some(&enemy)));
    }

    #[test]
    fn test_damaged_player_ignores_enemy() {
        let damaged = player_damaged_groups();
        let enemy = enemy_groups();
        assert!(!groups_interact(Some(&damaged), Some(&enemy)));
    }

    #[test]
    fn test_damaged_player_still_hits_triggers() {
        let damaged = player_damaged_groups();
        let trigger = trigger_groups();
        assert!(groups_interact(Some(&damaged), Some(&trigger)));
    }

    #[test]
    fn test_missing_groups_interact() {
        assert!(groups_interact(None, Some(&enemy_groups())));
    }

    #[test]
    fn test_layer_names() {
        assert_eq!(get_layer_name(GROUP_PLAYER_DAMAGED), "PlayerDamaged");
        assert_eq!(get_layer_name(Group::GROUP_1), "Unknown");
    }
}
