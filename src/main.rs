//! Terminal Blockfall runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer for output. The
//! session is saved to the data directory after every move, so quitting
//! and relaunching resumes the game.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use blockfall::config::Config;
use blockfall::core::Bag;
use blockfall::input::{handle_key_event, host_command, HostCommand};
use blockfall::session::{AudioSink, Session};
use blockfall::store::{FileBackend, KvBackend, Persistence};
use blockfall::term::{BellAudio, FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};
use blockfall::types::GameAction;

/// Target frame time (~60 FPS)
const FRAME: Duration = Duration::from_millis(16);

/// Blockfall - falling-block puzzle game for the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory for the saved game, high score and log
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Start with sound off
    #[arg(short, long)]
    mute: bool,

    /// Randomizer seed for a reproducible piece sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Start a new game even if one is saved
    #[arg(long)]
    fresh: bool,
}

impl Args {
    fn apply(self, mut config: Config) -> Config {
        if let Some(dir) = self.data_dir {
            config = config.with_data_dir(dir);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        let muted = config.muted || self.mute;
        config.with_muted(muted).with_fresh(self.fresh)
    }
}

fn main() -> Result<()> {
    let config = Args::parse().apply(Config::from_env());

    fs::create_dir_all(&config.data_dir)
        .with_context(|| format!("cannot create data directory {}", config.data_dir.display()))?;
    init_logging(&config)?;

    let store = Persistence::new(FileBackend::new(&config.data_dir));
    let bag = match config.seed {
        Some(seed) => Bag::seeded(seed),
        None => Bag::new(),
    };
    let audio = BellAudio::new();
    let mut session = if config.fresh {
        Session::open_fresh(store, audio, bag)
    } else {
        Session::open(store, audio, bag)
    };
    session.set_muted(config.muted);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(
        score = session.state().score,
        high_score = session.high_score(),
        "exiting"
    );
    result
}

/// Log to `<data_dir>/blockfall.log`; the terminal itself is in raw mode.
fn init_logging(config: &Config) -> Result<()> {
    let path = config.log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run<B: KvBackend, A: AudioSink>(term: &mut TerminalRenderer, session: &mut Session<B, A>) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let hud = Hud {
            high_score: session.high_score(),
            new_high_score: session.is_new_high_score(),
            level_up: session.show_level_up(),
            muted: session.is_muted(),
        };
        view.render_into(session.state(), &hud, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input, waiting at most until the next frame.
        let timeout = FRAME.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    match host_command(key) {
                        Some(HostCommand::Quit) => return Ok(()),
                        Some(HostCommand::ToggleMute) => {
                            let muted = session.toggle_mute();
                            info!(muted, "sound toggled");
                        }
                        None => {}
                    }

                    match handle_key_event(key) {
                        // Restart is only offered on the game-over screen
                        Some(GameAction::Restart) if !session.state().is_game_over => {
                            debug!("restart ignored while a game is running");
                        }
                        Some(action) => {
                            session.apply(action);
                        }
                        None => {}
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Gravity.
        let elapsed = last_tick.elapsed();
        let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
        if elapsed_ms > 0 {
            last_tick += Duration::from_millis(elapsed_ms as u64);
            session.tick(elapsed_ms);
        }
    }
}
