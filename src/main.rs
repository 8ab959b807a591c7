//! The Corrupted Buffer entry point
//!
//! Native builds run headless: the autopilot plays a number of frames against a
//! simulated display and the results are logged. The browser build enters
//! through `corrupted_buffer::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;

    use corrupted_buffer::audio::LogAudio;
    use corrupted_buffer::autopilot;
    use corrupted_buffer::highscores::FileStore;
    use corrupted_buffer::sim::{DeathCause, GameEvent};
    use corrupted_buffer::{EffectSettings, GameConfig, Session};

    #[derive(Parser, Debug)]
    #[command(name = "corrupted-buffer", version, about = "Headless autopilot runner")]
    pub struct Args {
        /// Run seed (defaults to the current time)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Display callbacks to simulate
        #[arg(short, long, default_value_t = 60 * 60)]
        frames: u32,

        /// Simulated display refresh rate (Hz)
        #[arg(long, default_value_t = 60.0)]
        refresh_hz: f64,

        /// Game config JSON file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Effect settings JSON file
        #[arg(long)]
        effects: Option<PathBuf>,

        /// High score JSON file
        #[arg(long, default_value = "highscore.json")]
        highscore_file: PathBuf,
    }

    #[derive(Debug, Default)]
    struct Summary {
        steps: u64,
        sessions: u32,
        captures: u32,
        pulses: u32,
        best_score: u64,
        deaths: Vec<DeathCause>,
    }

    pub fn run(args: Args) {
        let seed = args.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        let config = args
            .config
            .as_deref()
            .map(GameConfig::load)
            .unwrap_or_default();
        let effects = args
            .effects
            .as_deref()
            .map(EffectSettings::load)
            .unwrap_or_default();

        log::info!("The Corrupted Buffer (native) starting with seed {seed}");
        let mut session = Session::new(seed, config, FileStore::new(&args.highscore_file), LogAudio)
            .with_effects(effects);

        let interval = 1000.0 / args.refresh_hz.max(1.0);
        let mut summary = Summary::default();

        for frame in 0..args.frames {
            let now = frame as f64 * interval;
            let input = autopilot::drive(&session.state, now);
            session.set_input(input);
            if !session.frame(now) {
                continue;
            }
            summary.steps += 1;

            for event in session.last_events() {
                match event {
                    GameEvent::SessionStarted => summary.sessions += 1,
                    GameEvent::GoalCaptured { score } => {
                        summary.captures += 1;
                        summary.best_score = summary.best_score.max(*score);
                    }
                    GameEvent::PulseFired { .. } => summary.pulses += 1,
                    GameEvent::PlayerDied { cause } => summary.deaths.push(*cause),
                    _ => {}
                }
            }
        }

        log::info!(
            "{} frames, {} steps, {} fps at the end",
            args.frames,
            summary.steps,
            session.fps()
        );
        // The summary is the runner's output and goes to stdout; diagnostics
        // go through the logger
        println!("sessions:   {}", summary.sessions);
        println!("captures:   {}", summary.captures);
        println!("pulses:     {}", summary.pulses);
        println!("best score: {}", summary.best_score);
        println!("high score: {}", session.state.high_score);
        println!("deaths:     {:?}", summary.deaths);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    native::run(native::Args::parse());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is corrupted_buffer::web::start, this is just to satisfy the compiler
}
