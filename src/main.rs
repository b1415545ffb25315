//! Blox Level Generator
//!
//! Generates levels for a rolling-block puzzle by letting a block wander a
//! board at random, condensing away detours, and keeping the boards whose
//! solution is long compared to the floor they use. Saved levels can be
//! replayed in an interactive 3D viewer.

mod visualization;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blox::config::AppConfig;
use blox::generator::generate_levels;
use blox::grid::format_machine;
use blox::level::{format_level, format_solution, Level};
use blox::{persistence, RandomMoves};

const CONTROLS: &str = "Controls: Left/Right switch level, Up/Down step solution, R reset";

/// Generates rolling-block puzzle levels and displays them.
#[derive(Parser)]
#[command(name = "blox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used if it does not exist.
    #[arg(short, long, global = true, default_value = "blox.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate levels and save the ones scoring above the threshold.
    Generate {
        /// Seed for the move RNG, overriding the config.
        #[arg(long)]
        seed: Option<u64>,
        /// Number of games to run, overriding the config.
        #[arg(long)]
        levels: Option<usize>,
    },
    /// Display saved levels in an interactive 3D viewer.
    Display,
    /// Show the number of saved levels.
    Count,
    /// Print saved levels in machine-readable form.
    Export,
}

fn main() {
    init_tracing();

    if let Err(err) = run(Cli::parse()) {
        error!("{err}");
        std::process::exit(1);
    }
}

/// Initialize tracing with an env-driven filter (default INFO), logging to stderr.
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut config = AppConfig::load_or_default(&cli.config)?;

    match cli.command {
        Some(Command::Generate { seed, levels }) => {
            if seed.is_some() {
                config.generator.seed = seed;
            }
            if let Some(levels) = levels {
                config.generator.levels = levels;
            }
            config.validate()?;
            run_generator(&config)?;
        }
        Some(Command::Display) => run_display(&config)?,
        Some(Command::Count) => run_count(&config)?,
        Some(Command::Export) => run_export(&config)?,
        None => {
            // default: generate and display
            let levels = run_generator(&config)?;
            if !levels.is_empty() {
                println!("{CONTROLS}");
                visualization::display(levels);
            }
        }
    }

    Ok(())
}

/// Generates levels, prints and saves the kept ones, and returns them.
fn run_generator(config: &AppConfig) -> Result<Vec<Level>, Box<dyn Error>> {
    let report = match config.generator.seed {
        Some(seed) => generate_levels(
            &config.board,
            &config.generator,
            &mut RandomMoves::seeded(seed),
        )?,
        None => generate_levels(
            &config.board,
            &config.generator,
            &mut RandomMoves::from_entropy(),
        )?,
    };

    for level in &report.levels {
        println!("{}", format_level(level));
    }

    let output_dir = &config.generator.output_dir;
    persistence::save(output_dir, &report.levels)?;
    info!(
        kept = report.levels.len(),
        dir = %output_dir.display(),
        "wrote levels.txt and levels.bin"
    );

    Ok(report.levels)
}

/// Loads and displays saved levels.
fn run_display(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    let levels = persistence::load_all(&config.generator.output_dir)?;
    println!("Loaded {} levels", levels.len());
    println!("{CONTROLS}");
    visualization::display(levels);
    Ok(())
}

/// Prints the count of saved levels.
fn run_count(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    println!(
        "{} levels",
        persistence::count(&config.generator.output_dir)?
    );
    Ok(())
}

/// Prints every saved level in machine form followed by its solution.
fn run_export(config: &AppConfig) -> Result<(), Box<dyn Error>> {
    for level in persistence::load_all(&config.generator.output_dir)? {
        print!("{}", format_machine(level.grid()));
        println!("{}", format_solution(level.solution()));
        println!();
    }
    Ok(())
}
