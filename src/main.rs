use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use gallium::config::{Config, ConfigLoader, LoggingConfig, Validate};
use gallium::playback::{MidiSink, Playback};
use gallium::syntax::{Document, parse_top_level, pretty_top_level, print_top_level};

/// Gallium pattern language
#[derive(Parser)]
#[command(name = "gallium")]
#[command(about = "Parse, format and play Gallium pattern programs")]
struct Cli {
    /// Configuration file (defaults to gallium/config.toml in the config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level, overriding the configuration
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse, resolve and type-check a program
    Check { file: PathBuf },
    /// Print a program in normal form
    Fmt {
        file: PathBuf,
        /// Rewrite the file in place
        #[arg(long)]
        write: bool,
    },
    /// Print the events of a program over a time span as JSON
    Query {
        file: PathBuf,
        #[arg(long, default_value_t = 0.0)]
        from: f64,
        #[arg(long, default_value_t = 1.0)]
        to: f64,
    },
    /// Play a program, printing the MIDI bytes it sends
    Play {
        file: PathBuf,
        /// Beats to play before stopping
        #[arg(long)]
        beats: Option<u64>,
        #[arg(long)]
        bpm: Option<f64>,
    },
}

/// Prints MIDI bytes instead of sending them to a device.
struct StdoutSink;

impl MidiSink for StdoutSink {
    fn send(&mut self, bytes: &[u8], timestamp_ms: f64) {
        println!("{:>10.1} ms  {:02X?}", timestamp_ms, bytes);
    }
}

fn read_program(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let loader = match path {
        Some(path) => ConfigLoader::with_path(path),
        None => ConfigLoader::new()?,
    };
    loader.load()
}

/// The `[logging] level` of the config file, read without validation or
/// logging. Any failure falls back to the default level.
fn configured_log_level(path: Option<&Path>) -> String {
    let loader = match path {
        Some(path) => Some(ConfigLoader::with_path(path)),
        None => ConfigLoader::new().ok(),
    };
    loader
        .and_then(|loader| loader.read().ok())
        .map(|config| config.logging.level)
        .filter(|level| !level.trim().is_empty())
        .unwrap_or_else(|| LoggingConfig::default().level)
}

fn check(file: &Path) -> Result<()> {
    let code = read_program(file)?;
    match gallium::parse_and_resolve(&code) {
        Ok(_) => println!("ok"),
        Err(e) => {
            println!("{}", e);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn fmt(file: &Path, write: bool) -> Result<()> {
    let code = read_program(file)?;
    let document = parse_top_level(&code)
        .with_context(|| format!("Failed to parse {}", file.display()))?;
    let formatted = print_top_level(&Document::new(pretty_top_level(&document.tree)));
    if write {
        fs::write(file, format!("{}\n", formatted))
            .with_context(|| format!("Failed to write {}", file.display()))?;
        info!("Formatted {}", file.display());
    } else {
        println!("{}", formatted);
    }
    Ok(())
}

fn query(file: &Path, from: f64, to: f64) -> Result<()> {
    let code = read_program(file)?;
    let pattern = gallium::evaluate(&code)?;
    let events = pattern.query(from, to);
    println!("{}", serde_json::to_string_pretty(&events)?);
    Ok(())
}

async fn play(file: &Path, config: &Config) -> Result<()> {
    let code = read_program(file)?;
    let pattern = gallium::evaluate(&code)?;
    let mut playback = Playback::new(pattern, config.playback.bpm, config.playback.velocity);
    let beats = config.playback.beats;

    info!("Playing {} for {} beat(s) at {} bpm", file.display(), beats, playback.bpm());
    let mut interval = tokio::time::interval(Duration::from_secs_f64(playback.beat_length() / 1000.0));
    let start = Instant::now();
    let mut sink = StdoutSink;

    for _ in 0..beats {
        tokio::select! {
            _ = interval.tick() => {
                let now_ms = start.elapsed().as_secs_f64() * 1000.0;
                playback.query_and_send(now_ms, &mut sink);
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, stopping playback");
                break;
            }
        }
    }

    debug!("Stopped at beat {}", playback.beat());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Without --log-level the configured level applies, so the config is
    // read once up front and loaded for real after the subscriber is set.
    let log_level = match cli.log_level {
        Some(level) => level,
        None => configured_log_level(cli.config.as_deref()),
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level.as_str())
        .init();

    let mut config = load_config(cli.config)?;

    match cli.command {
        Command::Check { file } => check(&file),
        Command::Fmt { file, write } => fmt(&file, write),
        Command::Query { file, from, to } => query(&file, from, to),
        Command::Play { file, beats, bpm } => {
            if let Some(beats) = beats {
                config.playback.beats = beats;
            }
            if let Some(bpm) = bpm {
                config.playback.bpm = bpm;
            }
            config.validate();
            play(&file, &config).await
        }
    }
}
