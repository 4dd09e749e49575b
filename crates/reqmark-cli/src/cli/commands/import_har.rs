//! `reqmark import-har <path>` – mark every HAR entry and export the report.

use anyhow::{Context, Result};
use reqmark_core::config::ReqmarkConfig;
use reqmark_core::har::{self, ImportedRequest};
use reqmark_core::host::{Notifier, StaticSource};
use reqmark_core::request_log::SharedRequestLog;
use reqmark_core::session::Session;
use std::path::Path;

use crate::cli::notifier::StdoutNotifier;

/// Mark, describe and save each request in order. Returns how many were saved.
pub fn import_into<N: Notifier>(session: &mut Session<N>, requests: Vec<ImportedRequest>) -> usize {
    let count = requests.len();
    for req in requests {
        session.mark_as_valid(&StaticSource::single(req.request));
        session.set_description(req.description);
        session.save_description();
    }
    count
}

pub fn run_import_har(cfg: &ReqmarkConfig, path: &Path, out: Option<&Path>) -> Result<()> {
    let requests = har::load_requests(path)?;
    let report = cfg.resolve_export_path(out);
    let mut session = Session::new(SharedRequestLog::new(), StdoutNotifier, cfg.request_decoding);

    let saved = import_into(&mut session, requests);
    tracing::info!(saved, har = %path.display(), "imported HAR entries");

    session
        .export_report(&report)
        .with_context(|| format!("export report: {}", report.display()))?;
    println!("Exported {saved} request(s) to {}", report.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqmark_core::decode::RequestDecoding;
    use reqmark_core::host::RecordingNotifier;

    fn imported(request: &str, description: &str) -> ImportedRequest {
        ImportedRequest {
            url: "https://example.com/".to_string(),
            request: request.as_bytes().to_vec(),
            description: description.to_string(),
        }
    }

    #[test]
    fn import_saves_every_request_in_order() {
        let mut session = Session::new(
            SharedRequestLog::new(),
            RecordingNotifier::new(),
            RequestDecoding::Utf8Lossy,
        );
        let saved = import_into(
            &mut session,
            vec![imported("GET /a", "first"), imported("GET /b", "")],
        );
        assert_eq!(saved, 2);
        assert_eq!(session.log().len(), saved);
        let entries = session.log().snapshot();
        assert_eq!(entries[0].request(), b"GET /a");
        assert_eq!(entries[0].description(), "first");
        assert_eq!(entries[1].description(), "");
    }

    #[test]
    fn import_counts_repeated_requests_separately() {
        let mut session = Session::new(
            SharedRequestLog::new(),
            RecordingNotifier::new(),
            RequestDecoding::Utf8Lossy,
        );
        let saved = import_into(
            &mut session,
            vec![imported("GET /a", "x"), imported("GET /a", "x"), imported("", "")],
        );
        assert_eq!(saved, 3);
        assert_eq!(session.log().len(), 3);
        assert_eq!(session.notifier().messages().len(), 6);
    }

    #[test]
    fn run_import_har_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let har_path = dir.path().join("capture.har");
        std::fs::write(
            &har_path,
            r#"{"log":{"version":"1.2","entries":[
                {"request":{"method":"GET","url":"https://example.com/a","httpVersion":"HTTP/1.1","headers":[]},
                 "response":{"status":200,"headers":[]},"comment":"a, b"}
            ]}}"#,
        )
        .unwrap();
        let out = dir.path().join("report.csv");

        run_import_har(&ReqmarkConfig::default(), &har_path, Some(&out)).unwrap();

        let content = std::fs::read_to_string(&out).unwrap();
        assert_eq!(
            content,
            "Request,Description\r\n\"GET /a HTTP/1.1\r\nHost: example.com\r\n\r\n\",\"a, b\"\r\n"
        );
    }

    #[test]
    fn run_import_har_unwritable_report_errs() {
        let dir = tempfile::tempdir().unwrap();
        let har_path = dir.path().join("capture.har");
        std::fs::write(
            &har_path,
            r#"{"log":{"entries":[{"request":{"url":"https://example.com/"}}]}}"#,
        )
        .unwrap();
        let out = dir.path().join("missing").join("report.csv");
        let err = run_import_har(&ReqmarkConfig::default(), &har_path, Some(&out)).unwrap_err();
        assert!(format!("{:#}", err).contains("Error exporting data"));
    }
}
