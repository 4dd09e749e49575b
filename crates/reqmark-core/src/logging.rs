//! tracing setup: append to a log file in the XDG state dir, or write to stderr.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,reqmark=debug,reqmark_core=debug,reqmark_cli=debug";

/// Per-event sink handed out by [`LogFile`].
enum Sink {
    File(File),
    Stderr(io::Stderr),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::File(f) => f.write(buf),
            Sink::Stderr(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::File(f) => f.flush(),
            Sink::Stderr(e) => e.flush(),
        }
    }
}

/// Open append-mode log file; every event gets its own handle.
struct LogFile(File);

impl LogFile {
    fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("create log dir: {}", dir.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open log file: {}", path.display()))?;
        Ok(Self(file))
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = Sink;

    fn make_writer(&'a self) -> Self::Writer {
        match self.0.try_clone() {
            Ok(f) => Sink::File(f),
            Err(_) => Sink::Stderr(io::stderr()),
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `~/.local/state/reqmark/reqmark.log`
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("reqmark")?;
    Ok(xdg_dirs.get_state_home().join("reqmark").join("reqmark.log"))
}

/// Install the global subscriber writing to [`log_file_path`].
/// Errors leave no subscriber installed; call [`init_logging_stderr`] then.
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let writer = BoxMakeWriter::new(LogFile::open(&path)?);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install tracing subscriber: {}", e))?;

    tracing::info!(path = %path.display(), "reqmark logging started");
    Ok(())
}

pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
