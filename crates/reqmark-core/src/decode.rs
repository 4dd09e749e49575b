//! Byte-to-text conversion for raw request bytes.
//!
//! Captured requests are opaque bytes; the CSV report and the session preview
//! need text. The policy is chosen in config so reports over binary bodies can
//! stay lossless.

use serde::{Deserialize, Serialize};

/// How raw request bytes are turned into a display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequestDecoding {
    /// UTF-8; invalid sequences become U+FFFD.
    #[default]
    Utf8Lossy,
    /// Lowercase hex of every byte.
    Hex,
}

impl RequestDecoding {
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            RequestDecoding::Utf8Lossy => String::from_utf8_lossy(bytes).into_owned(),
            RequestDecoding::Hex => hex::encode(bytes),
        }
    }
}

/// First `max_chars` characters of `text` (char boundary safe).
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
