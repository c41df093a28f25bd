//! Session driver - runs the engine against real collaborators
//!
//! [`Session`] is the single owner of the running game. Hosts feed it
//! input actions and elapsed time; it applies the engine operations,
//! plays sounds through an [`AudioSink`], persists through a
//! [`Persistence`](blockfall_store::Persistence) store and keeps the gravity
//! timer in step with the level.
//!
//! # Example
//!
//! ```
//! use blockfall_core::Bag;
//! use blockfall_session::{RecordingAudio, Session};
//! use blockfall_store::{MemoryBackend, Persistence};
//! use blockfall_session::types::GameAction;
//!
//! let store = Persistence::new(MemoryBackend::new());
//! let mut session = Session::open(store, RecordingAudio::new(), Bag::seeded(1));
//!
//! session.apply(GameAction::HardDrop);
//! assert_eq!(session.audio().names(), vec!["drop"]);
//! assert!(session.store().load_game().is_some());
//! ```

pub mod audio;
pub mod session;

pub use blockfall_core::types;

pub use audio::{AudioError, AudioSink, NullAudio, RecordingAudio};
pub use session::{Session, LEVEL_UP_BANNER_MS};
