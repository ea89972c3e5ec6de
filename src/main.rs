use anyhow::Result;
use clap::Parser;

use keysweep::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
