//! Health countdown + hazard зоны

use bevy::prelude::*;
use crate::game::{
    GameProgress, HealthDownRequested, HealthOutcome, HudState, PlayerDied, PlayerRepositioned,
};
use crate::logger;
use crate::physics::{TriggerEntered, TriggerKind};

/// Система: HealthDownRequested → декремент или смерть (SimulationSet::Damage)
///
/// - health > 1: health -= 1, иконка `health` становится LOST
/// - health == 1: PlayerDied + показать restart control
pub fn apply_health_down(
    mut requests: EventReader<HealthDownRequested>,
    mut progress: ResMut<GameProgress>,
    mut hud: ResMut<HudState>,
    mut died_events: EventWriter<PlayerDied>,
) {
    for _ in requests.read() {
        match progress.health_down() {
            HealthOutcome::Decremented { remaining } => {
                hud.mark_health_lost(remaining as usize);
                logger::log(&format!("Health down: {} left", remaining));
            }
            HealthOutcome::Died => {
                died_events.write(PlayerDied);
                hud.restart_visible = true;
                logger::log_info("Player died");
            }
        }
    }

    // Все запросы тика применены
    if progress.pending_hits > 0 {
        progress.pending_hits = 0;
    }
}

/// Система: игрок вошёл в hazard зону (SimulationSet::Resolution, после resolve_enemy_contacts)
///
/// Удары врагов в этом же тике уже учтены в `pending_hits`.
///
/// Переживаемый удар: сначала respawn, потом урон.
/// Смертельный удар: только урон, без respawn.
pub fn resolve_hazard_triggers(
    mut triggers: EventReader<TriggerEntered>,
    mut progress: ResMut<GameProgress>,
    mut reposition_events: EventWriter<PlayerRepositioned>,
    mut health_events: EventWriter<HealthDownRequested>,
) {
    for trigger in triggers.read() {
        if trigger.kind != TriggerKind::Hazard {
            continue;
        }

        if progress.survives_hit() {
            reposition_events.write(PlayerRepositioned);
        }
        progress.queue_hit();
        health_events.write(HealthDownRequested);
    }
}
