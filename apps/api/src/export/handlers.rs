use anyhow::Context;
use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{export_docx, export_pdf, ExportedFile};
use crate::state::AppState;
use crate::store::{assigned_template, require_resume};

/// GET /api/v1/resumes/:id/export/pdf
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let resume = require_resume(state.store.as_ref(), resume_id).await?;
    let template = assigned_template(state.store.as_ref(), &resume).await?;

    let converter = state.converter.clone();
    let media_root = state.config.media_root.clone();
    let labels = state.labels;
    let file = tokio::task::spawn_blocking(move || {
        export_pdf(
            &resume,
            template.as_ref(),
            &media_root,
            converter.as_ref(),
            labels,
        )
    })
    .await
    .context("PDF export task failed")??;

    attachment(file)
}

/// GET /api/v1/resumes/:id/export/docx
pub async fn handle_export_docx(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let resume = require_resume(state.store.as_ref(), resume_id).await?;

    let labels = state.labels;
    let file = tokio::task::spawn_blocking(move || export_docx(&resume, labels))
        .await
        .context("DOCX export task failed")??;

    attachment(file)
}

fn attachment(file: ExportedFile) -> Result<Response, AppError> {
    let disposition = HeaderValue::from_str(&content_disposition(&file.filename))
        .context("invalid Content-Disposition header")?;
    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(file.format.media_type()),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}

/// `attachment` with an ASCII fallback name plus the RFC 5987 UTF-8 form.
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        percent_encode(filename)
    )
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_filename_passes_through() {
        assert_eq!(
            content_disposition("Senior_Backend_CV.pdf"),
            "attachment; filename=\"Senior_Backend_CV.pdf\"; filename*=UTF-8''Senior_Backend_CV.pdf"
        );
    }

    #[test]
    fn test_non_ascii_filename_is_percent_encoded() {
        let value = content_disposition("Резюме.docx");
        assert!(value.contains("filename=\"______.docx\""), "got {value}");
        assert!(
            value.ends_with("filename*=UTF-8''%D0%A0%D0%B5%D0%B7%D1%8E%D0%BC%D0%B5.docx"),
            "got {value}"
        );
        assert!(HeaderValue::from_str(&value).is_ok());
    }

    #[test]
    fn test_quotes_are_replaced_in_fallback() {
        let value = content_disposition("a\"b.pdf");
        assert!(value.contains("filename=\"a_b.pdf\""));
        assert!(value.contains("a%22b.pdf"));
    }
}
