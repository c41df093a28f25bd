//! Persistence for game sessions and the high score
//!
//! The engine never touches storage. The session driver owns a
//! [`Persistence`] over some [`KvBackend`] and calls it after each update.
//!
//! Two records are kept, independently:
//!
//! - `tetris-game-state`: the JSON-serialized [`GameState`] of the game in progress
//! - `tetris-high-score`: a single non-negative integer
//!
//! Reads are forgiving. A missing, unparsable or inconsistent session record
//! loads as "no saved game", and a bad high score reads as 0.

pub mod backend;

use blockfall_core::GameState;
use thiserror::Error;
use tracing::warn;

pub use backend::{FileBackend, KvBackend, MemoryBackend};

/// Key of the saved session record
pub const GAME_STATE_KEY: &str = "tetris-game-state";

/// Key of the high score record
pub const HIGH_SCORE_KEY: &str = "tetris-high-score";

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record could not be encoded
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key cannot be mapped to a storage location
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Typed access to the session and high-score records
#[derive(Debug, Clone)]
pub struct Persistence<B> {
    backend: B,
}

impl<B: KvBackend> Persistence<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_inner(self) -> B {
        self.backend
    }

    /// Saved game, if one exists and passes validation
    pub fn load_game(&self) -> Option<GameState> {
        let raw = match self.backend.get(GAME_STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(error = %err, "failed to read saved game");
                return None;
            }
        };

        let state: GameState = match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                warn!(error = %err, "discarding unparsable saved game");
                return None;
            }
        };

        if let Err(err) = state.validate() {
            warn!(error = %err, "discarding inconsistent saved game");
            return None;
        }

        Some(state)
    }

    pub fn save_game(&mut self, state: &GameState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.backend.set(GAME_STATE_KEY, &json)
    }

    pub fn clear_game(&mut self) -> Result<()> {
        self.backend.remove(GAME_STATE_KEY)
    }

    /// Stored high score; 0 if absent or unreadable
    pub fn high_score(&self) -> u32 {
        match self.backend.get(HIGH_SCORE_KEY) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "ignoring unparsable high score");
                0
            }),
            Ok(None) => 0,
            Err(err) => {
                warn!(error = %err, "failed to read high score");
                0
            }
        }
    }

    /// Record `score` if it beats the stored high score.
    ///
    /// Returns the high score after the update.
    pub fn update_high_score(&mut self, score: u32) -> Result<u32> {
        let current = self.high_score();
        if score <= current {
            return Ok(current);
        }
        self.backend.set(HIGH_SCORE_KEY, &score.to_string())?;
        Ok(score)
    }
}
