//! `magic-tile`: expand a pattern/modifier pair and check the result.
//!
//! ```text
//! magic-tile data/pattern3x3.dat data/modifier3x3.dat --parallel
//! RUST_LOG=info magic-tile p.dat m.dat --distinct dense --json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};

use magic_tile::input::read_pair;
use magic_tile::report::Summary;
use magic_tile::{DistinctStrategy, Engine, EngineConfig, Execution, Outcome};

/// Command-line interface.
#[derive(Parser, Debug)]
#[command(name = "magic-tile", version, about = "Tile a pattern with a scaled modifier and check for a magic square")]
struct Cli {
    /// Pattern matrix file (dimension followed by N² integers)
    pattern: PathBuf,

    /// Modifier matrix file (same format and dimension as the pattern)
    modifier: PathBuf,

    /// Spread generation and verification over worker threads
    #[arg(long)]
    parallel: bool,

    /// Worker threads for --parallel (default: one per core)
    #[arg(long, env = "MAGIC_TILE_THREADS", requires = "parallel")]
    threads: Option<usize>,

    /// Distinctness algorithm
    #[arg(long, value_enum, default_value_t = Distinct::Hashed)]
    distinct: Distinct,

    /// Print the summary as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Distinct {
    Naive,
    Hashed,
    Dense,
}

impl From<Distinct> for DistinctStrategy {
    fn from(d: Distinct) -> Self {
        match d {
            Distinct::Naive => Self::Naive,
            Distinct::Hashed => Self::Hashed,
            Distinct::Dense => Self::Dense,
        }
    }
}

fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let out = f();
    log::info!("{label} took {:.6}s", start.elapsed().as_secs_f64());
    out
}

fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let config = EngineConfig {
        execution: if cli.parallel {
            Execution::Parallel
        } else {
            Execution::Sequential
        },
        distinct: cli.distinct.into(),
        threads: cli.threads,
        ..EngineConfig::default()
    };
    log::debug!("config: {config:?}");
    let engine = Engine::new(config)?;

    let (pattern, mut modifier) = timed("read", || read_pair(&cli.pattern, &cli.modifier))
        .with_context(|| {
            format!(
                "loading {} and {}",
                cli.pattern.display(),
                cli.modifier.display()
            )
        })?;
    log::info!("loaded {0}x{0} pattern and modifier", pattern.dim());

    let generated = timed("generate", || engine.generate(&pattern, &mut modifier))?;
    let verdict = timed("verify", || engine.verify(&generated));
    if !verdict.is_magic() {
        log::info!("not magic: {verdict}");
        if log::log_enabled!(log::Level::Debug) {
            if let Some(dup) = magic_tile::distinct::first_duplicate(&generated) {
                log::debug!(
                    "value {} repeats at {:?} and {:?}",
                    dup.value,
                    dup.first,
                    dup.second
                );
            }
        }
    }
    Ok(Outcome { generated, verdict })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let json = cli.json;
    let start = Instant::now();

    let outcome = match run(cli) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let summary = Summary::from_outcome(&outcome);
    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{summary}");
    }
    log::info!("total took {:.6}s", start.elapsed().as_secs_f64());
    ExitCode::SUCCESS
}
