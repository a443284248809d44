//! Headless marquee driver.
//!
//! Submits labels, enters the animation view and prints render descriptors
//! while the integrator and render loops run.
//!
//! Run from repo root:
//!   `cargo run -p marquee-sim -- hello world`             - text frames
//!   `cargo run -p marquee-sim -- --json hello world`      - JSON lines
//!   `cargo run -p marquee-sim -- --threaded --seconds 2 a` - real-time thread
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::Parser;
use marquee_stage::{
    Clock, IntegratorThread, ManualClock, RenderDescriptor, SharedTheater, StageConfigError,
    StoreError, SystemClock, Theater, TheaterConfig,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum SimError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Config(#[from] StageConfigError),

    #[error("rejected label: {0}")]
    Store(#[from] StoreError),

    #[error("failed to start integrator: {0}")]
    Thread(std::io::Error),
}

#[derive(Debug, Parser)]
#[command(name = "marquee-sim")]
#[command(about = "Run the marquee integrator and render loops headlessly")]
struct Options {
    /// Label texts to submit
    #[arg(required = true)]
    labels: Vec<String>,

    /// Duration to run, in seconds
    #[arg(long, default_value_t = 3)]
    seconds: u64,

    /// Render frames per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    fps: u64,

    /// Print every Nth frame
    #[arg(long, default_value_t = 15, value_parser = clap::value_parser!(u64).range(1..))]
    every: u64,

    /// Fixed RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with `motion` and `stage` sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print frames as JSON lines
    #[arg(long)]
    json: bool,

    /// Run the integrator on its own thread against the system clock
    #[arg(long)]
    threaded: bool,

    /// Leave and re-enter the view halfway through
    #[arg(long)]
    reenter: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<TheaterConfig, SimError> {
    let Some(path) = path else {
        return Ok(TheaterConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.clone(),
        source,
    })?;
    let config: TheaterConfig = serde_json::from_str(&text)?;
    config.validate()?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

fn build_theater(opts: &Options, config: TheaterConfig) -> Result<Theater, SimError> {
    let theater = match opts.seed {
        Some(seed) => Theater::with_seed(config, seed)?,
        None => Theater::new(config)?,
    };
    Ok(theater)
}

#[derive(Serialize)]
struct FrameRecord<'a> {
    frame: u64,
    now_ms: u64,
    labels: &'a [RenderDescriptor],
}

fn print_frame(
    opts: &Options,
    frame: u64,
    now_ms: u64,
    labels: &[RenderDescriptor],
) -> Result<(), SimError> {
    if opts.json {
        let record = FrameRecord {
            frame,
            now_ms,
            labels,
        };
        println!("{}", serde_json::to_string(&record)?);
        return Ok(());
    }

    println!("frame {frame} @ {now_ms}ms");
    for d in labels {
        println!(
            "  {:<12} left {:6.2}% top {:6.2}% scale {:.2} {}",
            d.text, d.left_percent, d.top_percent, d.scale, d.color
        );
    }
    Ok(())
}

/// Replays the loops on a manual clock, as fast as possible.
fn run_simulated(opts: &Options, mut theater: Theater) -> Result<(), SimError> {
    let clock = ManualClock::new(0);
    for label in &opts.labels {
        theater.submit(label, clock.now_ms())?;
    }
    theater.enter_view(clock.now_ms());
    println!("{}", theater.status_line());

    let frame_ms = (1000 / opts.fps).max(1);
    let frames = opts.seconds * 1000 / frame_ms;
    for frame in 0..frames {
        clock.advance(frame_ms);
        if opts.reenter && frame == frames / 2 {
            theater.leave_view();
            theater.enter_view(clock.now_ms());
        }
        let labels = theater.frame(clock.now_ms());
        if frame % opts.every == 0 {
            print_frame(opts, frame, clock.now_ms(), &labels)?;
        }
    }
    Ok(())
}

/// Runs the integrator on its own thread against the system clock.
fn run_threaded(opts: &Options, theater: Theater) -> Result<(), SimError> {
    let clock = SystemClock;
    let shared = SharedTheater::new(theater);
    let integrator = IntegratorThread::spawn(&shared, clock).map_err(SimError::Thread)?;

    shared.enter_view(clock.now_ms());
    for label in &opts.labels {
        shared.submit(label, clock.now_ms())?;
    }
    println!("{}", shared.lock().status_line());

    let frame_ms = (1000 / opts.fps).max(1);
    let frames = opts.seconds * 1000 / frame_ms;
    let start = clock.now_ms();
    for frame in 0..frames {
        thread::sleep(Duration::from_millis(frame_ms));
        if opts.reenter && frame == frames / 2 {
            shared.leave_view();
            shared.enter_view(clock.now_ms());
        }
        let now = clock.now_ms();
        let labels = shared.render(now);
        if frame % opts.every == 0 {
            print_frame(opts, frame, now.saturating_sub(start), &labels)?;
        }
    }

    let ticks = integrator.stop();
    info!(ticks, "integrator finished");
    Ok(())
}

fn run() -> Result<(), SimError> {
    let opts = Options::parse();
    let config = load_config(opts.config.as_ref())?;
    let theater = build_theater(&opts, config)?;

    if opts.threaded {
        run_threaded(&opts, theater)
    } else {
        run_simulated(&opts, theater)
    }
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Options, clap::Error> {
        Options::try_parse_from(std::iter::once("marquee-sim").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_defaults() {
        let opts = parse(&["hello", "world"]).unwrap();
        assert_eq!(opts.labels, vec!["hello", "world"]);
        assert_eq!(opts.seconds, 3);
        assert_eq!(opts.fps, 60);
        assert_eq!(opts.every, 15);
        assert!(!opts.json);
    }

    #[test]
    fn test_parse_flags() {
        let opts = parse(&[
            "--seconds", "1", "--fps", "30", "--seed", "7", "--json", "--reenter", "a",
        ])
        .unwrap();
        assert_eq!(opts.seconds, 1);
        assert_eq!(opts.fps, 30);
        assert_eq!(opts.seed, Some(7));
        assert!(opts.json && opts.reenter);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--seconds", "x", "a"]).is_err());
        assert!(parse(&["--bogus", "a"]).is_err());
        assert!(parse(&["--fps", "0", "a"]).is_err());
    }

    #[test]
    fn test_config_json_partial() {
        let config: TheaterConfig =
            serde_json::from_str(r#"{ "stage": { "capacity": 3 } }"#).unwrap();
        assert_eq!(config.stage.capacity, 3);
        assert_eq!(config.stage.tick_interval_ms, 50);
        assert_eq!(config.motion, marquee_motion::MotionConfig::default());
    }

    #[test]
    fn test_config_json_oversized_capacity_rejected() {
        let dir = std::env::temp_dir().join(format!("marquee-sim-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("oversized.json");
        fs::write(&path, r#"{ "stage": { "capacity": 50 } }"#).unwrap();

        let result = load_config(Some(&path));
        fs::remove_dir_all(&dir).unwrap();

        assert!(matches!(
            result,
            Err(SimError::Config(StageConfigError::CapacityOutOfRange { capacity: 50, .. }))
        ));
    }

    #[test]
    fn test_simulated_run() {
        let opts = parse(&["--seconds", "1", "--seed", "3", "--reenter", "a", "b"]).unwrap();
        let theater = build_theater(&opts, TheaterConfig::default()).unwrap();
        assert!(run_simulated(&opts, theater).is_ok());
    }
}
