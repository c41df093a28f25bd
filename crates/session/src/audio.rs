//! Audio port
//!
//! The engine emits [`GameEvent`]s; the session forwards them to an
//! [`AudioSink`]. Playback is fire-and-forget: errors are logged by the
//! caller and never reach game logic.

use thiserror::Error;

use crate::types::GameEvent;

#[derive(Debug, Error)]
pub enum AudioError {
    /// Output device missing or refusing playback
    #[error("Audio unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that can play the sound for an engine event
pub trait AudioSink {
    fn play(&mut self, event: GameEvent) -> Result<(), AudioError>;
}

impl<T: AudioSink + ?Sized> AudioSink for Box<T> {
    fn play(&mut self, event: GameEvent) -> Result<(), AudioError> {
        (**self).play(event)
    }
}

/// Discards every sound
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _event: GameEvent) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Remembers what was played, in order
#[derive(Debug, Clone, Default)]
pub struct RecordingAudio {
    pub played: Vec<GameEvent>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the played sounds, e.g. `["move", "drop"]`
    pub fn names(&self) -> Vec<&'static str> {
        self.played.iter().map(|e| e.as_str()).collect()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, event: GameEvent) -> Result<(), AudioError> {
        self.played.push(event);
        Ok(())
    }
}
