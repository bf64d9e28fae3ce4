//! Asteroids entry point
//!
//! Native builds run the state machine headless at the configured frame
//! rate, driven by a scripted pilot, and log what happens. The browser
//! build is driven from JavaScript through `asteroids_arcade::web`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::thread;
    use std::time::{Duration, Instant};

    use anyhow::{Context, Result};
    use clap::Parser;

    use asteroids_arcade::game::{GameOverPhase, GameStateMachine};
    use asteroids_arcade::highscores::{MemoryScoreStore, ScoreStore};
    use asteroids_arcade::persistence::LocalScoreStore;
    use asteroids_arcade::platform::input::InputEvent;
    use asteroids_arcade::platform::storage::FileStorage;
    use asteroids_arcade::service::{InlineScoreService, ScoreService, ThreadedScoreService};
    use asteroids_arcade::{Settings, StateKind, StoreBackend};

    #[derive(Parser)]
    #[command(name = "asteroids-arcade")]
    #[command(about = "Run the asteroids state machine headless with a scripted pilot")]
    struct Args {
        /// Settings file (JSON)
        #[arg(long, default_value = "asteroids.json")]
        config: PathBuf,

        /// Override the score store location (directory for JSON, file for SQLite)
        #[arg(long)]
        scores: Option<PathBuf>,

        /// Fixed seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Number of frames to run
        #[arg(long, default_value_t = 1800)]
        frames: u64,

        /// Keep scores in memory only
        #[arg(long)]
        memory: bool,
    }

    fn open_store(settings: &Settings) -> Result<Box<dyn ScoreStore + Send>> {
        Ok(match &settings.store {
            StoreBackend::Memory => Box::new(MemoryScoreStore::new()),
            StoreBackend::Json { path } => {
                let storage = FileStorage::new(path)
                    .with_context(|| format!("creating score directory {}", path.display()))?;
                Box::new(LocalScoreStore::open(storage).context("opening JSON score store")?)
            }
            #[cfg(feature = "sqlite")]
            StoreBackend::Sqlite { path } => Box::new(
                asteroids_arcade::persistence::sqlite::SqliteScoreStore::open(path)
                    .with_context(|| format!("opening score database {}", path.display()))?,
            ),
            #[cfg(not(feature = "sqlite"))]
            StoreBackend::Sqlite { .. } => {
                anyhow::bail!("SQLite score store requested but the `sqlite` feature is disabled")
            }
        })
    }

    fn open_service(settings: &Settings) -> Result<Box<dyn ScoreService>> {
        let store = open_store(settings)?;
        if settings.threaded_store {
            let service = ThreadedScoreService::spawn(store, settings.top_scores)
                .context("starting score worker")?;
            Ok(Box::new(service))
        } else {
            Ok(Box::new(InlineScoreService::new(store, settings.top_scores)))
        }
    }

    /// Scripted player: starts games, steers in circles while firing,
    /// signs the leaderboard and goes again
    #[derive(Default)]
    struct Pilot {
        frame: u64,
        typed: usize,
        games: u32,
    }

    const PILOT_NAME: &str = "PILOT";

    impl Pilot {
        fn events(&mut self, machine: &GameStateMachine<Box<dyn ScoreService>>) -> Vec<InputEvent> {
            self.frame += 1;
            match machine.current() {
                StateKind::MainMenu => {
                    self.typed = 0;
                    vec![InputEvent::Confirm]
                }
                StateKind::Playing => {
                    let mut events = vec![InputEvent::RotateRight, InputEvent::Fire];
                    if self.frame % 90 < 20 {
                        events.push(InputEvent::ThrustForward);
                    }
                    events
                }
                StateKind::Paused => vec![InputEvent::Pause],
                StateKind::GameOver => match machine.game_over().phase() {
                    GameOverPhase::NameEntry => match PILOT_NAME.chars().nth(self.typed) {
                        Some(c) => {
                            self.typed += 1;
                            vec![InputEvent::Text(c)]
                        }
                        None => vec![InputEvent::Confirm],
                    },
                    GameOverPhase::Menu => {
                        self.games += 1;
                        log::info!(
                            "Game {} over with {} points",
                            self.games,
                            machine.game_over().final_score()
                        );
                        vec![InputEvent::NavigateDown, InputEvent::Confirm]
                    }
                    GameOverPhase::Loading(_) | GameOverPhase::Submitting(_) => Vec::new(),
                },
                StateKind::HighScores => vec![InputEvent::Confirm],
            }
        }
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let args = Args::parse();

        let mut settings = Settings::load(&args.config)
            .with_context(|| format!("loading settings from {}", args.config.display()))?;
        if args.memory {
            settings.store = StoreBackend::Memory;
        } else if let Some(path) = args.scores {
            match &mut settings.store {
                StoreBackend::Json { path: p } | StoreBackend::Sqlite { path: p } => *p = path,
                StoreBackend::Memory => settings.store = StoreBackend::Json { path },
            }
        }
        if args.seed.is_some() {
            settings.seed = args.seed;
        }

        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!(
            "Asteroids (native) starting: seed {seed}, {} fps, store {:?}",
            settings.frame_rate,
            settings.store
        );

        let service = open_service(&settings)?;
        let mut machine =
            GameStateMachine::new(service, settings.tuning.clone(), settings.top_scores, seed);
        let mut pilot = Pilot::default();

        let frame_time = Duration::from_secs_f32(settings.frame_time());
        let mut last = Instant::now();
        for _ in 0..args.frames {
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32();
            last = now;

            let events = pilot.events(&machine);
            if !machine.tick(&events, dt) {
                break;
            }
            // Built every frame as a renderer would, even though nobody draws it
            let frame = machine.draw();
            log::trace!("frame: {} draw commands", frame.len());

            // Yield the rest of the frame
            if let Some(rest) = frame_time.checked_sub(now.elapsed()) {
                thread::sleep(rest);
            }
        }

        log::info!(
            "Finished in {:?} after {} games, best score {}",
            machine.current(),
            pilot.games,
            machine.main_menu().high_score()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is asteroids_arcade::web, this is just to satisfy the compiler
}
