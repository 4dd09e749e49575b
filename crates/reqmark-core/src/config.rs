use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::decode::RequestDecoding;

/// Global configuration loaded from `~/.config/reqmark/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReqmarkConfig {
    /// Where `export` writes the CSV report when no `--out` is given.
    /// Relative paths resolve against the working directory.
    pub export_path: PathBuf,
    /// How request bytes become text in reports and previews.
    #[serde(default)]
    pub request_decoding: RequestDecoding,
    /// Characters of the selected request shown in the status line.
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

fn default_preview_chars() -> usize {
    50
}

impl Default for ReqmarkConfig {
    fn default() -> Self {
        Self {
            export_path: PathBuf::from("report.csv"),
            request_decoding: RequestDecoding::default(),
            preview_chars: default_preview_chars(),
        }
    }
}

impl ReqmarkConfig {
    /// `--out` wins over the configured path.
    pub fn resolve_export_path(&self, out: Option<&Path>) -> PathBuf {
        out.map(Path::to_path_buf)
            .unwrap_or_else(|| self.export_path.clone())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("reqmark")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ReqmarkConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ReqmarkConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<ReqmarkConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: ReqmarkConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ReqmarkConfig::default();
        assert_eq!(cfg.export_path, PathBuf::from("report.csv"));
        assert_eq!(cfg.request_decoding, RequestDecoding::Utf8Lossy);
        assert_eq!(cfg.preview_chars, 50);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ReqmarkConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: ReqmarkConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            export_path = "/srv/reports/valid.csv"
            request_decoding = "hex"
            preview_chars = 12
        "#;
        let cfg: ReqmarkConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.export_path, PathBuf::from("/srv/reports/valid.csv"));
        assert_eq!(cfg.request_decoding, RequestDecoding::Hex);
        assert_eq!(cfg.preview_chars, 12);
    }

    #[test]
    fn config_toml_optional_fields_default() {
        let cfg: ReqmarkConfig = toml::from_str(r#"export_path = "out.csv""#).unwrap();
        assert_eq!(cfg.request_decoding, RequestDecoding::Utf8Lossy);
        assert_eq!(cfg.preview_chars, 50);
    }

    #[test]
    fn config_toml_rejects_unknown_decoding() {
        let res: Result<ReqmarkConfig, _> = toml::from_str(
            r#"
            export_path = "out.csv"
            request_decoding = "latin1"
        "#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn out_flag_overrides_export_path() {
        let cfg = ReqmarkConfig::default();
        assert_eq!(cfg.resolve_export_path(None), PathBuf::from("report.csv"));
        assert_eq!(
            cfg.resolve_export_path(Some(Path::new("/tmp/x.csv"))),
            PathBuf::from("/tmp/x.csv")
        );
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "export_path = \"a.csv\"\npreview_chars = 3\n").unwrap();
        let cfg = load_from_path(&path).unwrap();
        assert_eq!(cfg.export_path, PathBuf::from("a.csv"));
        assert_eq!(cfg.preview_chars, 3);
        assert!(load_from_path(&dir.path().join("missing.toml")).is_err());
    }
}
