//! Item pickup + finish trigger

use bevy::prelude::*;
use crate::audio::{PlaySound, SoundCue};
use crate::components::Inactive;
use crate::config::{ItemRewards, PlatformerConfig};
use crate::game::{GameProgress, NextStageRequested};
use crate::logger;
use crate::physics::{TriggerEntered, TriggerKind};

/// Грейд предмета по подстроке имени
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemGrade {
    Bronze,
    Silver,
    Gold,
}

impl ItemGrade {
    /// Первое совпадение в порядке Bronze → Silver → Gold
    pub fn classify(name: &str) -> Option<Self> {
        if name.contains("Bronze") {
            Some(ItemGrade::Bronze)
        } else if name.contains("Silver") {
            Some(ItemGrade::Silver)
        } else if name.contains("Gold") {
            Some(ItemGrade::Gold)
        } else {
            None
        }
    }

    pub fn reward(&self, rewards: &ItemRewards) -> u32 {
        match self {
            ItemGrade::Bronze => rewards.bronze,
            ItemGrade::Silver => rewards.silver,
            ItemGrade::Gold => rewards.gold,
        }
    }
}

/// Очки за предмет с именем `name` (0 если грейд не распознан)
pub fn item_reward(name: &str, rewards: &ItemRewards) -> u32 {
    ItemGrade::classify(name).map_or(0, |grade| grade.reward(rewards))
}

/// Система: Item / Finish триггеры (SimulationSet::Resolution)
pub fn resolve_pickup_triggers(
    mut commands: Commands,
    mut triggers: EventReader<TriggerEntered>,
    names: Query<&Name>,
    config: Res<PlatformerConfig>,
    mut progress: ResMut<GameProgress>,
    mut next_stage: EventWriter<NextStageRequested>,
    mut sounds: EventWriter<PlaySound>,
) {
    for trigger in triggers.read() {
        match trigger.kind {
            TriggerKind::Item => {
                let name = names.get(trigger.other).map(|n| n.as_str()).unwrap_or("");
                let points = item_reward(name, &config.game.item_rewards);
                progress.add_stage_points(points);

                commands.entity(trigger.other).insert(Inactive);
                sounds.write(PlaySound { cue: SoundCue::Item });

                logger::log(&format!("Picked up '{}': +{}", name, points));
            }
            TriggerKind::Finish => {
                next_stage.write(NextStageRequested);
                sounds.write(PlaySound { cue: SoundCue::Finish });
            }
            TriggerKind::Hazard => {}
        }
    }
}
