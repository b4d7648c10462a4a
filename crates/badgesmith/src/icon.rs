//! Icon payloads for the badge's leading image.

use crate::{Error, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;

/// Bundled shield mark used when no icon is supplied.
pub const DEFAULT_ICON_SVG: &[u8] = include_bytes!("../assets/icon.svg");

/// A base64-encoded image plus the mime type used for its `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon {
    pub mime: String,
    pub data: String,
}

impl Default for Icon {
    fn default() -> Self {
        Self::from_bytes(DEFAULT_ICON_SVG)
    }
}

impl Icon {
    /// Wraps an already encoded payload. Nothing is validated.
    pub fn from_base64(mime: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime: mime.into(),
            data: data.into(),
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mime = sniff_mime(bytes);
        tracing::debug!(mime, len = bytes.len(), "encoding badge icon");
        Self {
            mime: mime.to_string(),
            data: STANDARD.encode(bytes),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::IconRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_bytes(&bytes))
    }

    /// An icon with no payload; renders as a broken (invisible) image reference.
    pub fn empty() -> Self {
        Self::from_base64(badgesmith_render::model::DEFAULT_ICON_MIME, "")
    }
}

/// Picks an image mime type from well-known magic numbers, defaulting to SVG.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/svg+xml"
    }
}
