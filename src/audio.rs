//! Audio cue mapping
//!
//! The core never synthesizes sound. It maps gameplay events to abstract
//! cues and hands them to whatever [`AudioTrigger`] the frontend provides.

use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSound {
    /// Charges fired, tower coming down
    Explosion,
    /// Debris block collected
    Collect,
    /// Item placed on the lot
    Build,
    /// Fresh structure spawned
    LevelStart,
    /// Session wiped back to level 1
    Reset,
}

/// Playback sink implemented by the frontend
pub trait AudioTrigger {
    fn play(&mut self, sound: GameSound);
}

/// Sink that discards every cue, for headless runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioTrigger for NullAudio {
    fn play(&mut self, _sound: GameSound) {}
}

/// Cue to play for a gameplay event
pub fn sound_for(event: &GameEvent) -> GameSound {
    match event {
        GameEvent::LevelStarted { .. } => GameSound::LevelStart,
        GameEvent::Detonated { .. } => GameSound::Explosion,
        GameEvent::BlockCollected { .. } => GameSound::Collect,
        GameEvent::ItemBuilt { .. } => GameSound::Build,
        GameEvent::GameReset => GameSound::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::DebrisWorld;
    use crate::sim::GameState;
    use glam::Vec3;

    #[derive(Default)]
    struct Recorder {
        played: Vec<GameSound>,
    }

    impl AudioTrigger for Recorder {
        fn play(&mut self, sound: GameSound) {
            self.played.push(sound);
        }
    }

    #[test]
    fn test_session_events_map_to_cues() {
        let mut world = DebrisWorld::new();
        let mut state = GameState::new(7, &mut world);
        state.begin_blast_prep().unwrap();
        state.place_blast_point(Vec3::new(0.0, 0.5, 0.0)).unwrap();
        state.detonate(&mut world).unwrap();

        let mut sink = Recorder::default();
        for event in state.take_events() {
            sink.play(sound_for(&event));
        }
        assert_eq!(sink.played, vec![GameSound::LevelStart, GameSound::Explosion]);
    }

    #[test]
    fn test_null_audio_accepts_everything() {
        let mut sink = NullAudio;
        sink.play(GameSound::Explosion);
        sink.play(GameSound::Reset);
    }
}
