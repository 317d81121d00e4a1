// ────────────────────────────────────────────────────────────────────────────
// Export — résumé → PDF / DOCX bytes
// ────────────────────────────────────────────────────────────────────────────
//
// PDF:  template with markup → bind → compose css → assemble → PdfConverter
//       no template / empty markup → render::document::default_document → PdfConverter
// DOCX: aggregate → docx::build_document → docx::package
//
// Everything here is synchronous; handlers run it on the blocking pool.

pub mod docx;
pub mod handlers;
pub mod pdf;

use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::resume::ResumeAggregate;
use crate::models::template::TemplateRecord;
use crate::render::binder::bind_resume;
use crate::render::document::{assemble_document, default_document};
use crate::render::labels::Labels;
use crate::render::photo::{InlinePhotoEmbedder, PhotoEmbedder};
use crate::render::stylesheet::compose_stylesheet;

use self::pdf::PdfConverter;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF conversion failed: {0}")]
    Conversion(String),

    #[error("DOCX packaging failed: {0}")]
    Package(String),
}

impl From<zip::result::ZipError> for ExportError {
    fn from(e: zip::result::ZipError) -> Self {
        ExportError::Package(e.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Package(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn media_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub bytes: Vec<u8>,
    pub format: ExportFormat,
    pub filename: String,
}

impl ExportedFile {
    fn new(resume: &ResumeAggregate, format: ExportFormat, bytes: Vec<u8>) -> Self {
        ExportedFile {
            filename: export_filename(&resume.title, format),
            format,
            bytes,
        }
    }
}

/// Résumé title with spaces replaced by `_`, plus the format extension.
pub fn export_filename(title: &str, format: ExportFormat) -> String {
    let stem = title.trim().replace(' ', "_");
    let stem = if stem.is_empty() { "resume".to_string() } else { stem };
    format!("{stem}.{}", format.extension())
}

/// Standalone HTML for the PDF path. The photo is always inlined so the
/// converter never needs the media server.
pub fn pdf_document(
    resume: &ResumeAggregate,
    template: Option<&TemplateRecord>,
    media_root: &Path,
    labels: &Labels,
) -> String {
    let photo = InlinePhotoEmbedder::new(media_root).embed(resume.photo.as_ref());
    match template.filter(|t| t.has_markup()) {
        Some(template) => {
            let body = bind_resume(&template.html_structure, resume, &photo, labels);
            let css = compose_stylesheet(&template.css_styles);
            assemble_document(&resume.title, &body, &css)
        }
        None => {
            debug!(resume_id = %resume.id, "No usable template; using built-in layout");
            default_document(resume, &photo, labels)
        }
    }
}

pub fn export_pdf(
    resume: &ResumeAggregate,
    template: Option<&TemplateRecord>,
    media_root: &Path,
    converter: &dyn PdfConverter,
    labels: &Labels,
) -> Result<ExportedFile, ExportError> {
    info!(resume_id = %resume.id, converter = converter.name(), "Exporting PDF");
    let html = pdf_document(resume, template, media_root, labels);
    let bytes = converter.convert(&html, &resume.title)?;
    info!(resume_id = %resume.id, size = bytes.len(), "PDF export finished");
    Ok(ExportedFile::new(resume, ExportFormat::Pdf, bytes))
}

pub fn export_docx(resume: &ResumeAggregate, labels: &Labels) -> Result<ExportedFile, ExportError> {
    info!(resume_id = %resume.id, "Exporting DOCX");
    let bytes = docx::render_docx(resume, labels)?;
    info!(resume_id = %resume.id, size = bytes.len(), "DOCX export finished");
    Ok(ExportedFile::new(resume, ExportFormat::Docx, bytes))
}
