use anyhow::Result;
use clap::{Parser, Subcommand};

use super::Output;

pub mod config;
pub mod crack;

#[derive(Parser)]
#[command(
    name = "keysweep",
    version = env!("CARGO_PKG_VERSION"),
    about = "Parallel exhaustive keyspace search",
    long_about = "keysweep enumerates every fixed-length string over an alphabet across all CPU \
                  cores and stops as soon as one candidate unlocks the target, such as the \
                  password of a ZipCrypto archive."
)]
pub struct Cli {
    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recover the password of an encrypted ZIP archive
    Crack(crack::CrackArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);

        match self.command {
            Commands::Crack(args) => crack::execute(args, self.config.as_deref(), &output),
            Commands::Config(args) => config::execute(args, self.config.as_deref(), &output),
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // Logs share stderr with the progress bar; stdout carries results only
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["keysweep", "crack", "3", "a.zip", "-vv", "--config", "k.toml"])
            .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config.as_deref(), Some("k.toml"));
        assert!(matches!(cli.command, Commands::Crack(_)));
    }

    #[test]
    fn test_length_out_of_range_rejected() {
        assert!(Cli::try_parse_from(["keysweep", "crack", "0", "a.zip"]).is_err());
        assert!(Cli::try_parse_from(["keysweep", "crack", "21", "a.zip"]).is_err());
        assert!(Cli::try_parse_from(["keysweep", "crack", "20", "a.zip"]).is_ok());
    }
}
