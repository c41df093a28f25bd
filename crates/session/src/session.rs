//! Session driver
//!
//! Owns the game state and the bag, serializes every engine call through
//! `&mut self`, and threads each step through the audio and storage ports.
//!
//! After each update:
//! 1. events are played (unless muted)
//! 2. a running game is saved; the first game-over state instead raises the
//!    high score and clears the saved session
//! 3. gravity is stopped while paused or over, and rescheduled when the
//!    level changes

use blockfall_core::{reducer, Bag, GameState, GravityTimer, Step};
use blockfall_store::{KvBackend, Persistence};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::audio::AudioSink;
use crate::types::{GameAction, GameEvent};

/// How long the level-up banner stays visible
pub const LEVEL_UP_BANNER_MS: u32 = 1500;

pub struct Session<B, A, R = StdRng> {
    state: GameState,
    bag: Bag<R>,
    store: Persistence<B>,
    audio: A,
    muted: bool,
    high_score: u32,
    new_high_score: bool,
    level_up_ms: u32,
    gravity: GravityTimer,
}

impl<B: KvBackend, A: AudioSink, R: Rng> Session<B, A, R> {
    /// Resume the saved game if there is one in progress, else start fresh
    pub fn open(store: Persistence<B>, audio: A, bag: Bag<R>) -> Self {
        let saved = store.load_game();
        if saved.is_some() {
            info!("resuming saved game");
        }
        Self::start(saved, store, audio, bag)
    }

    /// Start a fresh game, ignoring any saved one
    pub fn open_fresh(store: Persistence<B>, audio: A, bag: Bag<R>) -> Self {
        Self::start(None, store, audio, bag)
    }

    fn start(saved: Option<GameState>, store: Persistence<B>, audio: A, mut bag: Bag<R>) -> Self {
        let state = reducer::initial_state(saved, &mut bag);
        let high_score = store.high_score();
        let mut session = Self {
            gravity: GravityTimer::stopped(state.level),
            state,
            bag,
            store,
            audio,
            muted: false,
            high_score,
            new_high_score: false,
            level_up_ms: 0,
        };
        session.persist();
        session.sync_gravity();
        info!(
            level = session.state.level,
            score = session.state.score,
            high_score,
            "session started"
        );
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Whether the game just finished with a new record
    pub fn is_new_high_score(&self) -> bool {
        self.new_high_score
    }

    /// Whether the level-up banner should be shown
    pub fn show_level_up(&self) -> bool {
        self.level_up_ms > 0
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn gravity(&self) -> &GravityTimer {
        &self.gravity
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn store(&self) -> &Persistence<B> {
        &self.store
    }

    /// Feed one input action. Returns the events it produced.
    pub fn apply(&mut self, action: GameAction) -> Vec<GameEvent> {
        if action == GameAction::Restart {
            self.restart();
            return Vec::new();
        }
        let step = reducer::apply(&self.state, action, &mut self.bag);
        let events = step.events.clone();
        self.commit(step);
        events
    }

    /// Advance the clock by `elapsed_ms`, running a gravity soft drop if due
    pub fn tick(&mut self, elapsed_ms: u32) -> Vec<GameEvent> {
        self.level_up_ms = self.level_up_ms.saturating_sub(elapsed_ms);

        if !self.gravity.advance(elapsed_ms) {
            return Vec::new();
        }
        let step = reducer::soft_drop(&self.state, &mut self.bag);
        let events = step.events.clone();
        self.commit(step);
        events
    }

    /// Throw away the current game and the saved record, start a new one
    pub fn restart(&mut self) {
        if let Err(err) = self.store.clear_game() {
            warn!(error = %err, "failed to clear saved game");
        }
        self.new_high_score = false;
        self.level_up_ms = 0;
        self.gravity.stop();

        let fresh = reducer::restart(&mut self.bag);
        info!("game restarted");
        self.commit(Step {
            state: fresh,
            events: Vec::new(),
        });
    }

    fn commit(&mut self, step: Step) {
        let Step { state, events } = step;
        let was_over = self.state.is_game_over;
        let changed = state != self.state;
        self.state = state;

        self.play(&events);
        if events.contains(&GameEvent::LevelUp) {
            self.level_up_ms = LEVEL_UP_BANNER_MS;
            info!(level = self.state.level, "level up");
        }

        if self.state.is_game_over {
            if !was_over {
                self.finish_game();
            }
        } else if changed {
            self.persist();
        }

        self.sync_gravity();
    }

    fn play(&mut self, events: &[GameEvent]) {
        if self.muted {
            return;
        }
        for &event in events {
            if let Err(err) = self.audio.play(event) {
                debug!(sound = event.as_str(), error = %err, "audio playback failed");
            }
        }
    }

    fn persist(&mut self) {
        if self.state.is_game_over {
            return;
        }
        if let Err(err) = self.store.save_game(&self.state) {
            warn!(error = %err, "failed to save game");
        }
    }

    fn finish_game(&mut self) {
        let score = self.state.score;
        self.new_high_score = score > self.high_score;
        match self.store.update_high_score(score) {
            Ok(high) => self.high_score = high,
            Err(err) => {
                warn!(error = %err, "failed to store high score");
                self.high_score = self.high_score.max(score);
            }
        }
        if let Err(err) = self.store.clear_game() {
            warn!(error = %err, "failed to clear saved game");
        }
        info!(
            score,
            lines = self.state.lines_cleared,
            level = self.state.level,
            new_high_score = self.new_high_score,
            "game over"
        );
    }

    fn sync_gravity(&mut self) {
        if self.state.is_paused || self.state.is_game_over {
            self.gravity.stop();
            return;
        }
        let interval = blockfall_core::drop_interval_ms(self.state.level);
        if !self.gravity.is_running() || self.gravity.interval_ms() != interval {
            debug!(interval_ms = interval, "gravity rescheduled");
            self.gravity.reschedule(interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioError, NullAudio, RecordingAudio};
    use blockfall_core::types::{Color, TetrominoType, GRID_WIDTH};
    use blockfall_core::{tetromino, ActivePiece, Cell, Position};
    use blockfall_store::{MemoryBackend, StoreError, GAME_STATE_KEY, HIGH_SCORE_KEY};

    struct BrokenAudio;

    impl AudioSink for BrokenAudio {
        fn play(&mut self, _event: GameEvent) -> Result<(), AudioError> {
            Err(AudioError::Unavailable("no device".into()))
        }
    }

    struct BrokenBackend;

    impl KvBackend for BrokenBackend {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(std::io::Error::other("disk gone").into())
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(std::io::Error::other("disk gone").into())
        }
        fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
            Err(std::io::Error::other("disk gone").into())
        }
    }

    type TestSession = Session<MemoryBackend, RecordingAudio>;

    fn session() -> TestSession {
        Session::open(
            Persistence::new(MemoryBackend::new()),
            RecordingAudio::new(),
            Bag::seeded(77),
        )
    }

    fn saved(session: &TestSession) -> Option<GameState> {
        session.store().load_game()
    }

    /// Resumed session whose current piece is an O at (x, y)
    fn session_with(
        store: Persistence<MemoryBackend>,
        x: i32,
        y: i32,
        setup: impl FnOnce(&mut GameState),
    ) -> TestSession {
        let mut state = GameState::fresh(&mut Bag::seeded(1));
        state.current_piece = Some(ActivePiece {
            tetromino: tetromino(TetrominoType::O),
            position: Position::new(x, y),
            rotation: 0,
        });
        setup(&mut state);
        let mut store = store;
        store.save_game(&state).unwrap();
        Session::open(store, RecordingAudio::new(), Bag::seeded(2))
    }

    #[test]
    fn test_open_saves_fresh_game() {
        let session = session();
        assert_eq!(saved(&session).as_ref(), Some(session.state()));
        assert!(session.gravity().is_running());
        assert_eq!(session.gravity().interval_ms(), 1000);
    }

    #[test]
    fn test_open_resumes_saved_game() {
        let mut store = Persistence::new(MemoryBackend::new());
        let mut state = GameState::fresh(&mut Bag::seeded(4));
        state.score = 880;
        state.level = 3;
        state.lines_cleared = 33;
        store.save_game(&state).unwrap();

        let session = Session::open(store, NullAudio, Bag::seeded(5));
        assert_eq!(session.state(), &state);
        assert_eq!(session.gravity().interval_ms(), 700);
    }

    #[test]
    fn test_open_fresh_ignores_saved_game() {
        let mut store = Persistence::new(MemoryBackend::new());
        let mut state = GameState::fresh(&mut Bag::seeded(4));
        state.score = 880;
        store.save_game(&state).unwrap();

        let session = Session::open_fresh(store, NullAudio, Bag::seeded(5));
        assert_eq!(session.state().score, 0);
    }

    #[test]
    fn test_every_update_is_saved() {
        let mut session = session();
        session.apply(GameAction::MoveLeft);
        assert_eq!(saved(&session).as_ref(), Some(session.state()));
        session.apply(GameAction::HardDrop);
        assert_eq!(saved(&session).as_ref(), Some(session.state()));
        assert_eq!(session.audio().names(), vec!["move", "drop"]);
    }

    #[test]
    fn test_game_over_updates_high_score_and_clears_save() {
        let session = session_with(Persistence::new(MemoryBackend::new()), 4, -1, |state| {
            state.score = 720;
            for y in 1..20 {
                state.grid.set(4, y, Cell::filled(Color::Blue));
            }
        });
        let mut session = session;
        assert!(saved(&session).is_some());

        let events = session.apply(GameAction::SoftDrop);
        assert_eq!(events, vec![GameEvent::GameOver]);
        assert!(session.state().is_game_over);
        assert_eq!(saved(&session), None);
        assert_eq!(session.high_score(), 720);
        assert!(session.is_new_high_score());
        assert_eq!(
            session.store().backend().get(HIGH_SCORE_KEY).unwrap().as_deref(),
            Some("720")
        );
        assert!(!session.gravity().is_running());
        assert_eq!(session.audio().names(), vec!["gameOver"]);

        // Further input after game over writes nothing
        session.apply(GameAction::TogglePause);
        assert_eq!(saved(&session), None);
    }

    #[test]
    fn test_lower_score_keeps_high_score() {
        let mut store = Persistence::new(MemoryBackend::new());
        store.update_high_score(5000).unwrap();
        let mut session = session_with(store, 4, -1, |state| {
            state.score = 100;
            for y in 1..20 {
                state.grid.set(4, y, Cell::filled(Color::Blue));
            }
        });
        session.apply(GameAction::HardDrop);
        assert!(session.state().is_game_over);
        assert_eq!(session.high_score(), 5000);
        assert!(!session.is_new_high_score());
    }

    #[test]
    fn test_pause_stops_gravity() {
        let mut session = session();
        session.apply(GameAction::TogglePause);
        assert!(session.state().is_paused);
        assert!(!session.gravity().is_running());

        let before = session.state().clone();
        assert!(session.tick(5000).is_empty());
        assert_eq!(session.state(), &before);

        session.apply(GameAction::TogglePause);
        assert!(session.gravity().is_running());
    }

    #[test]
    fn test_tick_runs_gravity() {
        let mut session = session();
        let y = session.state().current_piece.unwrap().position.y;
        session.tick(999);
        assert_eq!(session.state().current_piece.unwrap().position.y, y);
        session.tick(1);
        assert_eq!(session.state().current_piece.unwrap().position.y, y + 1);
        assert_eq!(saved(&session).as_ref(), Some(session.state()));
    }

    #[test]
    fn test_level_up_reschedules_and_shows_banner() {
        let mut session = session_with(Persistence::new(MemoryBackend::new()), 8, 0, |state| {
            state.lines_cleared = 9;
            for x in 0..(GRID_WIDTH as i32 - 2) {
                state.grid.set(x, 19, Cell::filled(Color::Red));
                state.grid.set(x, 18, Cell::filled(Color::Red));
            }
        });
        assert_eq!(session.gravity().interval_ms(), 1000);

        let events = session.apply(GameAction::HardDrop);
        assert!(events.contains(&GameEvent::LevelUp));
        assert_eq!(session.state().level, 1);
        assert_eq!(session.state().lines_cleared, 11);
        assert_eq!(session.gravity().interval_ms(), 900);
        assert!(session.show_level_up());

        session.tick(LEVEL_UP_BANNER_MS);
        assert!(!session.show_level_up());
    }

    #[test]
    fn test_muted_session_plays_nothing() {
        let mut session = session();
        assert!(session.toggle_mute());
        session.apply(GameAction::MoveRight);
        session.apply(GameAction::HardDrop);
        assert!(session.audio().played.is_empty());
    }

    #[test]
    fn test_audio_failures_are_swallowed() {
        let mut session = Session::open(
            Persistence::new(MemoryBackend::new()),
            BrokenAudio,
            Bag::seeded(9),
        );
        let events = session.apply(GameAction::HardDrop);
        assert_eq!(events[0], GameEvent::Drop);
        assert!(!session.state().grid.is_empty());
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let mut session = Session::open(Persistence::new(BrokenBackend), NullAudio, Bag::seeded(9));
        assert_eq!(session.high_score(), 0);
        session.apply(GameAction::HardDrop);
        session.restart();
        assert_eq!(session.state().score, 0);
    }

    #[test]
    fn test_restart_clears_and_starts_over() {
        let mut session = session();
        session.apply(GameAction::HardDrop);
        session.apply(GameAction::TogglePause);

        session.apply(GameAction::Restart);
        let state = session.state();
        assert!(state.grid.is_empty());
        assert_eq!(state.score, 0);
        assert!(!state.is_paused);
        assert!(session.gravity().is_running());
        assert_eq!(saved(&session).as_ref(), Some(session.state()));
        assert!(session
            .store()
            .backend()
            .get(GAME_STATE_KEY)
            .unwrap()
            .is_some());
    }
}
