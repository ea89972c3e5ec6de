use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use serde::Serialize;

use crate::cli::Output;
use crate::cli::output::keyspace_summary;
use crate::config::{KeysweepConfig, LENGTH_CEILING};
use crate::error::SearchError;
use crate::keyspace::KeySpace;
use crate::oracle::ZipOracle;
use crate::search::SearchCoordinator;

#[derive(Args, Debug)]
pub struct CrackArgs {
    /// Exact password length to search
    #[arg(value_parser = clap::value_parser!(u8).range(1..=LENGTH_CEILING as i64))]
    pub length: u8,

    /// Encrypted ZIP archive to unlock
    pub archive: PathBuf,

    /// Symbols to build candidates from, in enumeration order
    #[arg(short, long)]
    pub alphabet: Option<String>,

    /// Number of worker threads (default: derived from CPU cores)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Indices claimed by a worker at a time
    #[arg(long)]
    pub chunk_size: Option<u64>,

    /// Milliseconds between progress updates
    #[arg(long, value_name = "MS")]
    pub progress_interval_ms: Option<u64>,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Command-line values layered over every configuration file
#[derive(Serialize)]
struct CrackOverrides {
    alphabet: Option<String>,
    search: SearchOverrides,
    output: OutputOverrides,
}

#[derive(Serialize)]
struct SearchOverrides {
    workers: Option<usize>,
    chunk_size: Option<u64>,
    progress_interval: Option<u64>,
}

#[derive(Serialize)]
struct OutputOverrides {
    progress: Option<bool>,
}

impl From<&CrackArgs> for CrackOverrides {
    fn from(args: &CrackArgs) -> Self {
        Self {
            alphabet: args.alphabet.clone(),
            search: SearchOverrides {
                workers: args.workers,
                chunk_size: args.chunk_size,
                progress_interval: args.progress_interval_ms,
            },
            // Only an explicit --no-progress overrides the configured value
            output: OutputOverrides {
                progress: args.no_progress.then_some(false),
            },
        }
    }
}

pub fn execute(args: CrackArgs, custom_config: Option<&str>, output: &Output) -> Result<()> {
    let config = KeysweepConfig::load(custom_config, Some(CrackOverrides::from(&args)))?;
    let settings = config.settings()?;

    let length = usize::from(args.length);
    settings.check_length(length)?;

    let alphabet = settings.alphabet()?;
    let space = KeySpace::new(alphabet, length).map_err(fatal)?;
    let coordinator = SearchCoordinator::new(space, settings.search.clone()).map_err(fatal)?;

    let oracle = ZipOracle::open(&args.archive)
        .map_err(|err| fatal(err.into()))
        .with_context(|| format!("Failed to open {}", args.archive.display()))?;

    let space = coordinator.space();
    output.header(&format!("Cracking {}", args.archive.display()));
    output.key_value("keyspace", &keyspace_summary(space.total(), space.alphabet().len(), length), false);
    output.key_value("alphabet", &space.alphabet().to_string(), false);
    output.key_value("workers", &coordinator.workers().to_string(), false);
    output.verbose(&format!(
        "{} entries in archive, {} chunks of {}",
        oracle.entries(),
        coordinator.chunk_count(),
        coordinator.config().chunk_size
    ));

    let report = if settings.output.progress && !output.is_quiet() {
        let pb = output.progress_bar(space.total(), "searching");
        let bar = pb.clone();
        let report = coordinator.run_with_progress(&oracle, move |done, _total| bar.set_position(done));
        pb.finish_and_clear();
        report
    } else {
        coordinator.run(&oracle)
    }
    .map_err(fatal)?;

    let found = report
        .winner
        .as_ref()
        .map(|winner| (winner.candidate.as_str(), winner.worker_id));
    output.result(found, report.elapsed);
    output.verbose(&format!(
        "{} of {} candidates tested ({:.0}/s)",
        report.attempted,
        report.total,
        report.rate()
    ));

    Ok(())
}

/// Name the failure category in the user-visible message
fn fatal(err: SearchError) -> anyhow::Error {
    anyhow!("{} error: {err}", err.category())
}
