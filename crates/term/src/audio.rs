//! Terminal bell audio sink
//!
//! A terminal has no mixer, so only the events worth interrupting for ring
//! the bell: line clears, level ups and game over. Movement is silent.

use std::io::{self, Write};

use blockfall_session::{AudioError, AudioSink};

use crate::types::GameEvent;

const BEL: &[u8] = b"\x07";

pub struct BellAudio<W: Write = io::Stdout> {
    out: W,
}

impl BellAudio<io::Stdout> {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for BellAudio<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> BellAudio<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn rings_for(event: GameEvent) -> bool {
        matches!(
            event,
            GameEvent::Clear | GameEvent::LevelUp | GameEvent::GameOver
        )
    }
}

impl<W: Write> AudioSink for BellAudio<W> {
    fn play(&mut self, event: GameEvent) -> Result<(), AudioError> {
        if !Self::rings_for(event) {
            return Ok(());
        }
        self.out.write_all(BEL)?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_only_for_notable_events() {
        let mut audio = BellAudio::with_writer(Vec::new());
        for event in [
            GameEvent::Move,
            GameEvent::Rotate,
            GameEvent::Drop,
            GameEvent::Clear,
            GameEvent::LevelUp,
            GameEvent::GameOver,
        ] {
            audio.play(event).unwrap();
        }
        assert_eq!(audio.into_inner(), b"\x07\x07\x07".to_vec());
    }
}
