//! Photo embedding: turns a stored photo reference into the `{{photo}}`
//! binding and the `photo` condition.
//!
//! Two strategies share the [`PhotoEmbedder`] trait:
//! - [`InlinePhotoEmbedder`] reads the file and emits a base64 data URI, so the
//!   resulting document is self-contained. PDF export always uses it.
//! - [`UrlPhotoEmbedder`] emits a URL under the public media prefix.
//!
//! A photo that cannot be read is treated as absent. The failure is logged
//! and never propagated.

use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::resume::PhotoAsset;

/// Value bound to `{{photo}}` plus the `photo` condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoBinding {
    pub value: String,
    pub present: bool,
}

impl PhotoBinding {
    pub fn absent() -> Self {
        PhotoBinding {
            value: String::new(),
            present: false,
        }
    }

    fn present(value: String) -> Self {
        PhotoBinding {
            value,
            present: true,
        }
    }
}

pub trait PhotoEmbedder: Send + Sync {
    fn embed(&self, photo: Option<&PhotoAsset>) -> PhotoBinding;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoStrategy {
    #[default]
    Inline,
    Url,
}

impl FromStr for PhotoStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(PhotoStrategy::Inline),
            "url" => Ok(PhotoStrategy::Url),
            other => Err(format!(
                "unsupported photo strategy '{other}' (expected inline or url)"
            )),
        }
    }
}

/// Builds the embedder for a configured strategy.
pub fn photo_embedder(
    strategy: PhotoStrategy,
    media_root: &Path,
    media_url: &str,
) -> Box<dyn PhotoEmbedder> {
    match strategy {
        PhotoStrategy::Inline => Box::new(InlinePhotoEmbedder::new(media_root)),
        PhotoStrategy::Url => Box::new(UrlPhotoEmbedder::new(media_url)),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Inline (data URI)
// ────────────────────────────────────────────────────────────────────────────

pub struct InlinePhotoEmbedder {
    media_root: PathBuf,
}

impl InlinePhotoEmbedder {
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
        }
    }
}

impl PhotoEmbedder for InlinePhotoEmbedder {
    fn embed(&self, photo: Option<&PhotoAsset>) -> PhotoBinding {
        let Some(asset) = photo else {
            return PhotoBinding::absent();
        };
        let Some(relative) = safe_relative_path(&asset.path) else {
            warn!(path = %asset.path, "Photo path escapes the media root; rendering without photo");
            return PhotoBinding::absent();
        };
        let full_path = self.media_root.join(relative);
        match std::fs::read(&full_path) {
            Ok(bytes) => {
                debug!(path = %full_path.display(), size = bytes.len(), "Embedding photo inline");
                PhotoBinding::present(data_uri(&bytes, &asset.path))
            }
            Err(e) => {
                warn!(
                    path = %full_path.display(),
                    error = %e,
                    "Photo could not be read; rendering without photo"
                );
                PhotoBinding::absent()
            }
        }
    }
}

/// Mime type inferred from the lower-cased file extension.
/// Unknown or missing extensions default to `image/jpeg`.
pub fn mime_for(filename: &str) -> &'static str {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

pub fn data_uri(bytes: &[u8], filename: &str) -> String {
    format!("data:{};base64,{}", mime_for(filename), STANDARD.encode(bytes))
}

/// Rejects absolute paths and `..` so a stored reference cannot leave the media root.
fn safe_relative_path(path: &str) -> Option<&Path> {
    let p = Path::new(path);
    let ok = !path.is_empty()
        && p.components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    ok.then_some(p)
}

// ────────────────────────────────────────────────────────────────────────────
// URL reference
// ────────────────────────────────────────────────────────────────────────────

pub struct UrlPhotoEmbedder {
    media_url: String,
}

impl UrlPhotoEmbedder {
    pub fn new(media_url: impl Into<String>) -> Self {
        Self {
            media_url: media_url.into(),
        }
    }
}

impl PhotoEmbedder for UrlPhotoEmbedder {
    fn embed(&self, photo: Option<&PhotoAsset>) -> PhotoBinding {
        match photo {
            Some(asset) if !asset.path.trim().is_empty() => PhotoBinding::present(format!(
                "{}/{}",
                self.media_url.trim_end_matches('/'),
                asset.path.trim_start_matches('/')
            )),
            _ => PhotoBinding::absent(),
        }
    }
}
