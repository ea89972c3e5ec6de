//! Styled terminal output for keysweep
//!
//! Messages go to stdout and the progress bar to stderr, so results
//! stay pipeable.

use console::style;
use indicatif::{HumanDuration, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✔").green(), message);
        }
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose && !self.quiet {
            println!("{} {}", style("ℹ").dim(), style(message).dim());
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Print a header/title
    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Print a key-value pair with consistent styling
    pub fn key_value(&self, key: &str, value: &str, highlight: bool) {
        if !self.quiet {
            let styled_value = if highlight {
                style(value).green().bold()
            } else {
                style(value).white()
            };
            println!("  {:<12} {}", style(key).dim(), styled_value);
        }
    }

    /// Print the outcome of a run: the found candidate stays visible in quiet mode
    pub fn result(&self, found: Option<(&str, usize)>, elapsed: Duration) {
        match found {
            Some((candidate, _)) if self.quiet => println!("{candidate}"),
            Some((candidate, worker_id)) => {
                println!(
                    "{} Found {} {}",
                    style("✔").green().bold(),
                    style(candidate).green().bold(),
                    style(format!("(worker {worker_id})")).dim()
                );
            }
            None => {
                if !self.quiet {
                    println!("{} {}", style("✗").red().bold(), style("No matching key found").red());
                }
            }
        }
        if !self.quiet {
            println!("  {} {}", style("elapsed").dim(), HumanDuration(elapsed));
        }
    }

    /// Create a progress bar, drawn on stderr. Hidden in quiet mode.
    pub fn progress_bar(&self, len: u64, message: &str) -> ProgressBar {
        if self.quiet {
            return ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::hidden());
        }

        let pb = ProgressBar::new(len);
        // The template is a constant, a parse failure falls back to the default bar
        if let Ok(bar_style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent:>3}% {pos}/{len} ({per_sec}) {msg}",
        ) {
            pb.set_style(bar_style.progress_chars("#>-"));
        }
        pb.set_message(message.to_string());
        pb
    }
}

/// Human-readable candidate count: `238328 (62^3)`
pub fn keyspace_summary(total: u64, base: usize, length: usize) -> String {
    format!("{total} ({base}^{length})")
}
