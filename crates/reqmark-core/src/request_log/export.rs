//! CSV report export.
//!
//! Dialect: comma delimiter, `"` quoting only where needed (delimiter, quote,
//! CR or LF inside a field), embedded quotes doubled, CRLF record terminator.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io;
use std::path::Path;
use thiserror::Error;

use super::{Entry, RequestLog};
use crate::decode::RequestDecoding;

/// Header row of every report.
pub const CSV_HEADER: [&str; 2] = ["Request", "Description"];

/// Export failed. The cause is logged, never surfaced.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Error exporting data")]
pub struct ExportError;

/// Serialize `entries` as a report into `out`.
pub fn write_csv<W: io::Write>(
    out: W,
    entries: &[Entry],
    decoding: RequestDecoding,
) -> csv::Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::CRLF)
        .from_writer(out);

    writer.write_record(CSV_HEADER)?;
    for entry in entries {
        let request = decoding.decode(entry.request());
        writer.write_record([request.as_str(), entry.description()])?;
    }
    writer.flush()?;
    Ok(())
}

impl RequestLog {
    /// Write the whole log to `path`, creating or truncating the file.
    ///
    /// A failed export may leave a partial file behind; the log itself is
    /// never touched.
    pub fn export_csv(
        &self,
        path: impl AsRef<Path>,
        decoding: RequestDecoding,
    ) -> Result<(), ExportError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| {
            tracing::error!(path = %path.display(), "cannot create report: {}", e);
            ExportError
        })?;
        write_csv(file, &self.entries, decoding).map_err(|e| {
            tracing::error!(path = %path.display(), "cannot write report: {}", e);
            ExportError
        })?;
        tracing::info!(
            path = %path.display(),
            entries = self.entries.len(),
            "exported request log"
        );
        Ok(())
    }
}
