//! gyrodrive - Gyroscope-steered arcade driving game
//!
//! Connects to a phone streaming sensor logs over TCP, runs the game loop at
//! a fixed tick rate and takes start/retry/quit triggers from stdin.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod error;
mod link;
mod output;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use gyrodrive_engine::{
    FileScoreStore, Game, GameConfig, ObstaclePlacement, RandomPlacement, Trigger,
    TriggerOutcome,
};
use gyrodrive_errors::{ResultExt, error_context};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, trace, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::CliError;
use crate::link::SensorLink;

#[derive(Parser, Debug)]
#[command(name = "gyrodrive")]
#[command(about = "Gyroscope-steered arcade driving game")]
#[command(version)]
#[command(long_about = "
gyrodrive steers a car with a phone's gyroscope. The phone streams its sensor
log as comma-separated lines over TCP; gyrodrive connects to it, calibrates
against the resting phone and then runs the game.

Type start, retry or quit on stdin to drive the menus. With --emit-frames
each tick writes one JSON frame to stdout for an external renderer.
")]
struct Cli {
    /// Host streaming the sensor log
    host: String,

    /// Port of the sensor stream
    port: u16,

    /// YAML game configuration layered over the defaults
    #[arg(long, env = "GYRODRIVE_CONFIG")]
    config: Option<PathBuf>,

    /// Where the best score is kept
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Ticks per second
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=1000))]
    tick_rate: u32,

    /// Give up connecting after this many milliseconds
    #[arg(long, default_value_t = 5000)]
    connect_timeout_ms: u64,

    /// Fire a start trigger on launch
    #[arg(long)]
    auto_start: bool,

    /// Stop after this many ticks (0 runs until quit)
    #[arg(long, default_value_t = 0)]
    max_ticks: u64,

    /// Write one JSON frame per tick to stdout
    #[arg(long)]
    emit_frames: bool,

    /// Seed for obstacle placement
    #[arg(long)]
    seed: Option<u64>,

    /// Print errors as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run(&cli).await {
        Ok(()) => Ok(()),
        Err(e) => {
            let exit_code = e.exit_code();
            let e = anyhow::Error::new(e);
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;

    let score_path = cli.high_score_file.clone().unwrap_or_else(default_score_path);
    debug!(path = ?score_path, "Using best score file");

    let placement: Box<dyn ObstaclePlacement> = match cli.seed {
        Some(seed) => Box::new(RandomPlacement::seeded(seed)),
        None => Box::new(RandomPlacement::from_entropy()),
    };
    let mut game = Game::new(config, Box::new(FileScoreStore::new(score_path)), placement)
        .map_err(|e| CliError::InvalidConfiguration(e.to_string()))?;

    let stream = link::connect(
        &cli.host,
        cli.port,
        Duration::from_millis(cli.connect_timeout_ms),
    )
    .await?;
    let mut link = SensorLink::new(stream);

    if cli.auto_start {
        apply_trigger(&mut game, Trigger::Start);
    }

    let period = Duration::from_secs_f64(1.0 / f64::from(cli.tick_rate));
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut triggers = BufReader::new(tokio::io::stdin()).lines();
    let mut triggers_open = true;
    let mut ticks: u64 = 0;
    let stdout = std::io::stdout();

    loop {
        tokio::select! {
            at = interval.tick() => {
                let report = game.tick(at.into_std(), link.poll());
                if report.rejected > 0 || report.transition.is_some() {
                    debug!(?report, "Tick");
                } else {
                    trace!(?report, "Tick");
                }

                if cli.emit_frames {
                    let mut out = stdout.lock();
                    output::write_frame(&mut out, ticks, &game.snapshot())?;
                }

                ticks += 1;
                if cli.max_ticks > 0 && ticks >= cli.max_ticks {
                    info!(ticks, "Tick limit reached");
                    break;
                }
            }
            line = triggers.next_line(), if triggers_open => {
                match line {
                    Ok(Some(text)) => {
                        if handle_line(&mut game, &text) == Flow::Quit {
                            break;
                        }
                    }
                    Ok(None) => {
                        debug!("Trigger input closed");
                        triggers_open = false;
                    }
                    Err(e) => {
                        warn!(error = %e, "Trigger input failed");
                        triggers_open = false;
                    }
                }
            }
        }
    }

    info!(
        best = game.best_score(),
        ticks,
        link_open = link.is_open(),
        "Exiting"
    );
    std::io::stdout().flush()?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<GameConfig, CliError> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .context(error_context!("read_config", "path" => path.display().to_string()))?;
    let config = GameConfig::from_yaml_str(&text)
        .context(error_context!("load_config", "path" => path.display().to_string()))?;
    info!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

fn default_score_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("gyrodrive"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("high_score.json")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_line(game: &mut Game, line: &str) -> Flow {
    if line.trim().is_empty() {
        return Flow::Continue;
    }
    match line.parse::<Trigger>() {
        Ok(trigger) => apply_trigger(game, trigger),
        Err(e) => {
            warn!(error = %e, "Ignoring input");
            Flow::Continue
        }
    }
}

fn apply_trigger(game: &mut Game, trigger: Trigger) -> Flow {
    match game.handle_trigger(trigger, Instant::now()) {
        Ok(TriggerOutcome::Quit) => Flow::Quit,
        Ok(TriggerOutcome::Transition(_)) | Err(_) => Flow::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyrodrive_errors::{ResultExt, error_context};
use gyrodrive_engine::{FixedPlacement, GameState, MemoryScoreStore};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn parse_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["gyrodrive", "192.168.1.20", "5555"])?;
        assert_eq!(cli.host, "192.168.1.20");
        assert_eq!(cli.port, 5555);
        assert_eq!(cli.tick_rate, 60);
        assert_eq!(cli.connect_timeout_ms, 5000);
        assert_eq!(cli.max_ticks, 0);
        assert!(!cli.auto_start);
        assert!(!cli.emit_frames);
        assert_eq!(cli.verbose, 0);
        Ok(())
    }

    #[test]
    fn parse_rejects_bad_port() {
        assert!(Cli::try_parse_from(["gyrodrive", "localhost", "port"]).is_err());
        assert!(Cli::try_parse_from(["gyrodrive", "localhost", "70000"]).is_err());
        assert!(Cli::try_parse_from(["gyrodrive", "localhost"]).is_err());
    }

    #[test]
    fn parse_flags() -> TestResult {
        let cli = Cli::try_parse_from([
            "gyrodrive",
            "localhost",
            "5555",
            "--auto-start",
            "--max-ticks",
            "30",
            "--seed",
            "9",
            "-vv",
        ])?;
        assert!(cli.auto_start);
        assert_eq!(cli.max_ticks, 30);
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.verbose, 2);
        Ok(())
    }

    #[test]
    fn parse_rejects_zero_tick_rate() {
        assert!(Cli::try_parse_from(["gyrodrive", "h", "1", "--tick-rate", "0"]).is_err());
    }

    #[test]
    fn trigger_lines() -> TestResult {
        let mut game = Game::new(
            GameConfig::default(),
            Box::new(MemoryScoreStore::default()),
            Box::new(FixedPlacement::centred()),
        )?;

        assert_eq!(handle_line(&mut game, ""), Flow::Continue);
        assert_eq!(handle_line(&mut game, "jump"), Flow::Continue);
        assert_eq!(handle_line(&mut game, "retry"), Flow::Continue);
        assert_eq!(game.state(), GameState::MainMenu);

        assert_eq!(handle_line(&mut game, "Start"), Flow::Continue);
        assert_eq!(game.state(), GameState::Calibrating);
        assert_eq!(handle_line(&mut game, "quit\r"), Flow::Quit);
        Ok(())
    }

    #[test]
    fn missing_config_file_is_configuration_error() {
        let result = load_config(Some(Path::new("/nonexistent/gyrodrive.yaml")));
        let Err(CliError::InvalidConfiguration(msg)) = result else {
            panic!("expected a configuration error, got {result:?}");
        };
        assert!(msg.starts_with("read_config, path: /nonexistent/gyrodrive.yaml: I/O error"));
    }

    #[test]
    fn invalid_config_names_file_and_field() -> TestResult {
        let dir = tempfile::TempDir::new()?;
        let path = dir.path().join("game.yaml");
        std::fs::write(&path, "calibration:\n  duration_secs: 0\n")?;

        let result = load_config(Some(&path));
        let Err(CliError::InvalidConfiguration(msg)) = result else {
            panic!("expected a configuration error, got {result:?}");
        };
        assert!(msg.starts_with("load_config, path: "));
        assert!(msg.contains("game.yaml"));
        assert!(msg.contains("calibration.duration_secs"));
        Ok(())
    }

    #[test]
    fn no_config_file_means_defaults() -> TestResult {
        assert_eq!(load_config(None)?, GameConfig::default());
        Ok(())
    }
}
