// ────────────────────────────────────────────────────────────────────────────
// PDF conversion
// ────────────────────────────────────────────────────────────────────────────
//
// `PdfConverter` turns one standalone HTML document into PDF bytes.
//
//   BuiltinConverter: html_flow (tokens → blocks) → layout (wrap, paginate)
//                     → writer (PDF 1.7, Flate streams)
//   CommandConverter: external tool via temp files

pub mod command;
pub mod html_flow;
pub mod layout;
pub mod metrics;
pub mod writer;

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::export::ExportError;

use self::command::CommandConverter;
use self::layout::{layout_blocks, PageGeometry};
use self::writer::PdfWriter;

pub trait PdfConverter: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    fn convert(&self, html: &str, title: &str) -> Result<Vec<u8>, ExportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterKind {
    #[default]
    Builtin,
    Command,
}

impl FromStr for ConverterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "builtin" => Ok(ConverterKind::Builtin),
            "command" => Ok(ConverterKind::Command),
            other => Err(format!(
                "unsupported PDF converter '{other}' (expected builtin or command)"
            )),
        }
    }
}

pub fn pdf_converter(kind: ConverterKind, program: &str) -> Arc<dyn PdfConverter> {
    debug!(?kind, program, "Selecting PDF converter");
    match kind {
        ConverterKind::Builtin => Arc::new(BuiltinConverter::default()),
        ConverterKind::Command => Arc::new(CommandConverter::new(program)),
    }
}

/// In-process text-flow converter. CSS is ignored beyond the shared page
/// geometry; images are not drawn.
#[derive(Default)]
pub struct BuiltinConverter {
    geometry: PageGeometry,
}

impl PdfConverter for BuiltinConverter {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn convert(&self, html: &str, title: &str) -> Result<Vec<u8>, ExportError> {
        let blocks = html_flow::html_to_blocks(html)?;
        let pages = layout_blocks(&blocks, self.geometry);
        debug!(blocks = blocks.len(), pages = pages.len(), "Built-in PDF layout done");
        Ok(PdfWriter::new(self.geometry).write(&pages, title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_output_reads_back() {
        let html = "<!DOCTYPE html><html><head><style>h1{}</style></head><body>\
                    <h1>Jane Doe</h1><h2>Experience</h2>\
                    <p><b>Engineer</b> at Acme</p><ul><li>Shipped the parser</li></ul>\
                    </body></html>";
        let bytes = BuiltinConverter::default().convert(html, "CV").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));

        let text = pdf_extract::extract_text_from_mem(&bytes).unwrap();
        for expected in ["Jane Doe", "Experience", "Engineer", "Shipped the parser"] {
            assert!(text.contains(expected), "missing {expected:?} in {text:?}");
        }
        assert!(!text.contains("h1{}"), "stylesheet text must not be drawn");
    }

    #[test]
    fn test_builtin_rejects_malformed_markup() {
        let err = BuiltinConverter::default()
            .convert("<html><body><p class=\"x>broken", "CV")
            .unwrap_err();
        assert!(matches!(err, ExportError::Conversion(_)));
    }

    #[test]
    fn test_converter_kind_parsing() {
        assert_eq!("builtin".parse::<ConverterKind>(), Ok(ConverterKind::Builtin));
        assert_eq!("COMMAND".parse::<ConverterKind>(), Ok(ConverterKind::Command));
        assert!("wkhtml".parse::<ConverterKind>().is_err());
        assert_eq!(pdf_converter(ConverterKind::Command, "weasyprint").name(), "command");
    }
}
