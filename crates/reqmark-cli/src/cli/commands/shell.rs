//! `reqmark shell` – interactive marking session over stdin.

use anyhow::Result;
use reqmark_core::config::ReqmarkConfig;
use reqmark_core::host::Notifier;
use reqmark_core::request_log::SharedRequestLog;
use reqmark_core::session::{Session, SessionEvent};
use std::borrow::Cow;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::cli::notifier::StdoutNotifier;
use crate::cli::shell::{execute, Flow, ShellCommand};

const PROMPT: &str = "reqmark> ";

pub async fn run_shell(cfg: &ReqmarkConfig, out: Option<&Path>) -> Result<()> {
    let default_out = cfg.resolve_export_path(out);
    let mut session = Session::new(SharedRequestLog::new(), StdoutNotifier, cfg.request_decoding);

    tracing::info!(report = %default_out.display(), "shell session started");
    println!("Type `help` for commands. Reports go to {}", default_out.display());

    let stdin = BufReader::new(tokio::io::stdin());
    run_lines(stdin, &mut std::io::stdout(), &mut session, cfg, &default_out).await?;

    tracing::info!(entries = session.log().len(), "shell session ended");
    Ok(())
}

/// Read commands from `input` until `quit` or end of input.
///
/// Prompts and status redraws go to `out`. Bad lines (unknown commands,
/// failed commands, invalid UTF-8) never end the session: invalid bytes are
/// replaced with U+FFFD and errors are reported on stderr.
pub async fn run_lines<R, W, N>(
    mut input: R,
    out: &mut W,
    session: &mut Session<N>,
    cfg: &ReqmarkConfig,
    default_out: &Path,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    N: Notifier,
{
    // Set by the listener when the selection changed; the loop redraws the status line.
    let redraw = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&redraw);
    session.subscribe(move |event| {
        if *event == SessionEvent::Marked {
            flag.store(true, Ordering::Relaxed);
        }
    });

    let mut buf = Vec::new();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if let Cow::Owned(_) = line {
            tracing::warn!("input line is not valid UTF-8; invalid bytes replaced");
        }

        let cmd = match ShellCommand::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("error: {:#}", e);
                continue;
            }
        };
        match execute(session, cfg, default_out, cmd) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => eprintln!("error: {:#}", e),
        }
        if redraw.swap(false, Ordering::Relaxed) {
            writeln!(out, "{}", session.summary(cfg.preview_chars))?;
        }
    }
    Ok(())
}
