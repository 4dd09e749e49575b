//! CLI for reqmark.

mod commands;
mod notifier;
mod shell;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use reqmark_core::config;
use std::path::PathBuf;

use commands::{run_completions, run_import_har, run_shell};

/// Top-level CLI for reqmark.
#[derive(Debug, Parser)]
#[command(name = "reqmark")]
#[command(about = "reqmark: mark captured HTTP requests as valid and export them to CSV", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Interactive session: mark requests, describe them, save and export.
    Shell {
        /// Report path for `export` without an argument (overrides config).
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Mark every request of a HAR file (entry comment as description) and export.
    ImportHar {
        /// Path to the HAR file.
        path: PathBuf,

        /// Report path (overrides config).
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            run_completions(shell);
            return Ok(());
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Shell { out } => run_shell(&cfg, out.as_deref()).await?,
            CliCommand::ImportHar { path, out } => {
                run_import_har(&cfg, &path, out.as_deref())?;
            }
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
