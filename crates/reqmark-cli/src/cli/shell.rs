//! Line commands of `reqmark shell` and how they drive a session.
//! One command per line; unknown or malformed lines are reported and skipped.

use anyhow::{bail, Context, Result};
use reqmark_core::config::ReqmarkConfig;
use reqmark_core::decode;
use reqmark_core::har;
use reqmark_core::host::{Notifier, StaticSource};
use reqmark_core::session::Session;
use std::path::{Path, PathBuf};

pub const HELP: &str = "\
commands:
  mark <file>              select raw request bytes from a file
  mark-har <file> <index>  select entry <index> (0-based) of a HAR file
  describe <text>          set the description of the selected request
  save                     append the selection and description to the log
  status                   show the selected request
  list                     list saved entries
  export [path]            write the CSV report
  help                     show this text
  quit                     leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Mark(PathBuf),
    MarkHar { path: PathBuf, index: usize },
    Describe(String),
    Save,
    Status,
    List,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let cmd = match word {
            "mark" => {
                if rest.is_empty() {
                    bail!("usage: mark <file>");
                }
                ShellCommand::Mark(PathBuf::from(rest))
            }
            "mark-har" => {
                let Some((path, index)) = rest.rsplit_once(char::is_whitespace) else {
                    bail!("usage: mark-har <file> <index>");
                };
                let index = index
                    .parse()
                    .with_context(|| format!("invalid entry index: {}", index))?;
                ShellCommand::MarkHar {
                    path: PathBuf::from(path.trim()),
                    index,
                }
            }
            "describe" => ShellCommand::Describe(rest.to_string()),
            "save" => ShellCommand::Save,
            "status" => ShellCommand::Status,
            "list" => ShellCommand::List,
            "export" => ShellCommand::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => bail!("unknown command: {} (try `help`)", other),
        };
        Ok(Some(cmd))
    }
}

/// Whether the shell keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run one command against the session. Output goes to stdout.
pub fn execute<N: Notifier>(
    session: &mut Session<N>,
    cfg: &ReqmarkConfig,
    default_out: &Path,
    cmd: ShellCommand,
) -> Result<Flow> {
    match cmd {
        ShellCommand::Mark(path) => {
            let bytes =
                std::fs::read(&path).with_context(|| format!("read request: {}", path.display()))?;
            session.mark_as_valid(&StaticSource::single(bytes));
        }
        ShellCommand::MarkHar { path, index } => {
            let mut requests = har::load_requests(&path)?;
            if index >= requests.len() {
                bail!(
                    "HAR file has {} entries, no entry {}",
                    requests.len(),
                    index
                );
            }
            let picked = requests.swap_remove(index);
            tracing::debug!(url = %picked.url, index, "selected HAR entry");
            session.mark_as_valid(&StaticSource::single(picked.request));
        }
        ShellCommand::Describe(text) => session.set_description(text),
        ShellCommand::Save => {
            session.save_description();
        }
        ShellCommand::Status => {
            println!("{}", session.summary(cfg.preview_chars));
            if session.selected_request().is_some() {
                println!("Description: {}", session.description());
            }
            println!("Saved entries: {}", session.log().len());
        }
        ShellCommand::List => print_entries(session, cfg),
        ShellCommand::Export(path) => {
            let path = path.unwrap_or_else(|| default_out.to_path_buf());
            // Failure was already shown to the user; the shell keeps going.
            let _ = session.export_report(&path);
        }
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn print_entries<N: Notifier>(session: &Session<N>, cfg: &ReqmarkConfig) {
    let entries = session.log().snapshot();
    if entries.is_empty() {
        println!("No saved entries.");
        return;
    }
    println!("{:<6} {:<40} {}", "INDEX", "REQUEST", "DESCRIPTION");
    for (i, entry) in entries.iter().enumerate() {
        let text = cfg.request_decoding.decode(entry.request());
        let first_line = text.lines().next().unwrap_or("");
        println!(
            "{:<6} {:<40} {}",
            i,
            decode::preview(first_line, 40),
            entry.description()
        );
    }
}
