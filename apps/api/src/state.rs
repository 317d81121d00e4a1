use std::sync::Arc;

use crate::config::Config;
use crate::export::pdf::PdfConverter;
use crate::render::labels::Labels;
use crate::render::photo::PhotoEmbedder;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ResumeStore>,
    pub config: Config,
    /// Selected by `PDF_CONVERTER`. Builtin unless configured otherwise.
    pub converter: Arc<dyn PdfConverter>,
    /// Preview photo strategy (`PHOTO_STRATEGY`). PDF export inlines regardless.
    pub preview_photo: Arc<dyn PhotoEmbedder>,
    pub labels: &'static Labels,
}
