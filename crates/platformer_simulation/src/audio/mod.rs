//! Audio cues
//!
//! Закрытый набор действий → заранее назначенный клип.
//! Симуляция только выбирает клип (`AudioEmitter.clip`), воспроизведение: у хоста.

use bevy::prelude::*;
use std::collections::HashMap;
use crate::components::{AudioEmitter, ClipHandle, Player};

/// Именованные звуковые действия игрока
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum SoundCue {
    Jump,
    Attack,
    Damaged,
    Item,
    Die,
    Finish,
}

impl SoundCue {
    pub const ALL: [SoundCue; 6] = [
        SoundCue::Jump,
        SoundCue::Attack,
        SoundCue::Damaged,
        SoundCue::Item,
        SoundCue::Die,
        SoundCue::Finish,
    ];

    /// Legacy имя действия ("JUMP", "ATTACK", ...). Неизвестное → None.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "JUMP" => Some(SoundCue::Jump),
            "ATTACK" => Some(SoundCue::Attack),
            "DAMAGED" => Some(SoundCue::Damaged),
            "ITEM" => Some(SoundCue::Item),
            "DIE" => Some(SoundCue::Die),
            "FINISH" => Some(SoundCue::Finish),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::Jump => "JUMP",
            SoundCue::Attack => "ATTACK",
            SoundCue::Damaged => "DAMAGED",
            SoundCue::Item => "ITEM",
            SoundCue::Die => "DIE",
            SoundCue::Finish => "FINISH",
        }
    }
}

/// Назначенные клипы (cue → handle)
#[derive(Resource, Debug, Clone, Default)]
pub struct AudioClips {
    clips: HashMap<SoundCue, ClipHandle>,
}

impl AudioClips {
    pub fn assign(&mut self, cue: SoundCue, clip: impl Into<ClipHandle>) {
        self.clips.insert(cue, clip.into());
    }

    /// Клип для cue (None если не назначен: тихий no-op)
    pub fn clip_for(&self, cue: SoundCue) -> Option<&ClipHandle> {
        self.clips.get(&cue)
    }

    /// Стандартная раскладка `audio/<cue>.wav`
    pub fn with_default_paths() -> Self {
        let mut clips = Self::default();
        for cue in SoundCue::ALL {
            clips.assign(cue, ClipHandle(format!("audio/{}.wav", cue.name().to_lowercase())));
        }
        clips
    }
}

/// Событие: проиграть cue игрока
#[derive(Event, Debug, Clone, Copy)]
pub struct PlaySound {
    pub cue: SoundCue,
}

/// Система: PlaySound → AudioEmitter.clip
pub fn select_player_clip(
    mut events: EventReader<PlaySound>,
    clips: Res<AudioClips>,
    mut emitters: Query<&mut AudioEmitter, With<Player>>,
) {
    for event in events.read() {
        let Some(clip) = clips.clip_for(event.cue) else {
            continue;
        };
        for mut emitter in emitters.iter_mut() {
            emitter.clip = Some(clip.clone());
        }
    }
}

pub struct AudioCuePlugin;

impl Plugin for AudioCuePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<AudioClips>() {
            app.insert_resource(AudioClips::with_default_paths());
        }
        app.add_event::<PlaySound>()
            .add_systems(Update, select_player_clip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_from_legacy_name() {
        assert_eq!(SoundCue::from_name("JUMP"), Some(SoundCue::Jump));
        assert_eq!(SoundCue::from_name("FINISH"), Some(SoundCue::Finish));
        assert_eq!(SoundCue::from_name("jump"), None);
        assert_eq!(SoundCue::from_name("EXPLODE"), None);
    }

    #[test]
    fn test_names_are_inverse_of_from_name() {
        for cue in SoundCue::ALL {
            assert_eq!(SoundCue::from_name(cue.name()), Some(cue));
        }
    }

    #[test]
    fn test_unassigned_clip_is_none() {
        let mut clips = AudioClips::default();
        clips.assign(SoundCue::Jump, "sfx/jump.ogg");

        assert_eq!(clips.clip_for(SoundCue::Jump), Some(&ClipHandle::from("sfx/jump.ogg")));
        assert!(clips.clip_for(SoundCue::Die).is_none());
    }

    #[test]
    fn test_select_clip_updates_player_emitter() {
        let mut app = App::new();
        app.add_plugins(AudioCuePlugin);
        app.insert_resource(AudioClips::with_default_paths());
        let player = app.world_mut().spawn((Player, AudioEmitter::default())).id();

        app.world_mut().send_event(PlaySound { cue: SoundCue::Item });
        app.update();

        let emitter = app.world().get::<AudioEmitter>(player).unwrap();
        assert_eq!(emitter.clip, Some(ClipHandle::from("audio/item.wav")));
    }
}
