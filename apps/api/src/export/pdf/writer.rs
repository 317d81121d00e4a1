//! Minimal PDF 1.7 serializer for laid-out pages.
//!
//! ```text
//! %PDF-1.7
//! 1 0 obj  Catalog
//! 2 0 obj  Pages
//! 3 0 obj  Helvetica        (/F1)
//! 4 0 obj  Helvetica-Bold   (/F2)
//! n 0 obj  content stream, page   (per page)
//! n 0 obj  Info
//! xref / trailer / %%EOF
//! ```
//!
//! Both fonts are standard Type1 with WinAnsiEncoding, so nothing is
//! embedded. Characters outside WinAnsi are written as `?`.

use std::io::Write;

use miniz_oxide::deflate::compress_to_vec_zlib;

use crate::export::pdf::layout::{Line, Page, PageGeometry};
use crate::export::pdf::metrics::PdfFont;

const FONTS: [PdfFont; 2] = [PdfFont::Helvetica, PdfFont::HelveticaBold];
const FIRST_FONT_OBJ: usize = 3;

pub struct PdfWriter {
    geometry: PageGeometry,
}

impl PdfWriter {
    pub fn new(geometry: PageGeometry) -> Self {
        Self { geometry }
    }

    pub fn write(&self, pages: &[Page], title: &str) -> Vec<u8> {
        // Slot 0 is the free-list head; PDF objects are 1-indexed.
        let mut objects: Vec<Vec<u8>> = vec![Vec::new(), Vec::new(), Vec::new()];

        for font in FONTS {
            objects.push(
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    font.base_font()
                )
                .into_bytes(),
            );
        }
        let font_resources = FONTS
            .iter()
            .enumerate()
            .map(|(i, f)| format!("/{} {} 0 R", f.resource_name(), FIRST_FONT_OBJ + i))
            .collect::<Vec<_>>()
            .join(" ");

        let mut page_ids = Vec::with_capacity(pages.len());
        for page in pages {
            let content = content_stream(page);
            let compressed = compress_to_vec_zlib(&content, 6);

            let content_id = objects.len();
            let mut data = Vec::with_capacity(compressed.len() + 64);
            let _ = write!(
                data,
                "<< /Length {} /Filter /FlateDecode >>\nstream\n",
                compressed.len()
            );
            data.extend_from_slice(&compressed);
            data.extend_from_slice(b"\nendstream");
            objects.push(data);

            page_ids.push(objects.len());
            objects.push(
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                     /Contents {} 0 R /Resources << /Font << {} >> >> >>",
                    self.geometry.width, self.geometry.height, content_id, font_resources
                )
                .into_bytes(),
            );
        }

        objects[1] = b"<< /Type /Catalog /Pages 2 0 R >>".to_vec();
        let kids = page_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");
        objects[2] =
            format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, page_ids.len()).into_bytes();

        let info_id = objects.len();
        let mut info = b"<< /Title (".to_vec();
        info.extend_from_slice(&encode_text(title));
        info.extend_from_slice(b") /Producer (resume-export) >>");
        objects.push(info);

        serialize(&objects, info_id)
    }
}

fn content_stream(page: &Page) -> Vec<u8> {
    let mut out = Vec::new();
    for line in &page.lines {
        write_line(&mut out, line);
    }
    out
}

fn write_line(out: &mut Vec<u8>, line: &Line) {
    let _ = writeln!(out, "BT {:.2} {:.2} Td", line.x, line.y);
    for run in &line.runs {
        let _ = write!(out, "/{} {:.1} Tf (", run.font.resource_name(), line.size);
        out.extend_from_slice(&encode_text(&run.text));
        out.extend_from_slice(b") Tj\n");
    }
    out.extend_from_slice(b"ET\n");
}

/// WinAnsi bytes with `\`, `(` and `)` escaped for a literal string.
pub fn encode_text(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for c in s.chars() {
        let byte = unicode_to_winansi(c).unwrap_or(b'?');
        if matches!(byte, b'\\' | b'(' | b')') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out
}

/// Windows-1252 mapping: Latin-1 is direct, 0x80..=0x9F holds the
/// typographic extras.
fn unicode_to_winansi(ch: char) -> Option<u8> {
    let cp = ch as u32;
    if (0x20..=0x7E).contains(&cp) || (0xA0..=0xFF).contains(&cp) {
        return Some(cp as u8);
    }
    match cp {
        0x20AC => Some(0x80),
        0x201A => Some(0x82),
        0x0192 => Some(0x83),
        0x201E => Some(0x84),
        0x2026 => Some(0x85),
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02C6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8A),
        0x2039 => Some(0x8B),
        0x0152 => Some(0x8C),
        0x017D => Some(0x8E),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201C => Some(0x93),
        0x201D => Some(0x94),
        0x2022 => Some(0x95),
        0x2013 => Some(0x96),
        0x2014 => Some(0x97),
        0x02DC => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9A),
        0x203A => Some(0x9B),
        0x0153 => Some(0x9C),
        0x017E => Some(0x9E),
        0x0178 => Some(0x9F),
        _ => None,
    }
}

fn serialize(objects: &[Vec<u8>], info_id: usize) -> Vec<u8> {
    let mut output: Vec<u8> = Vec::new();
    let mut offsets = vec![0usize; objects.len()];

    output.extend_from_slice(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n");
    for (i, data) in objects.iter().enumerate().skip(1) {
        offsets[i] = output.len();
        let _ = write!(output, "{i} 0 obj\n");
        output.extend_from_slice(data);
        output.extend_from_slice(b"\nendobj\n\n");
    }

    let xref_offset = output.len();
    let _ = write!(output, "xref\n0 {}\n", objects.len());
    output.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets.iter().skip(1) {
        let _ = write!(output, "{offset:010} 00000 n \n");
    }
    let _ = write!(
        output,
        "trailer\n<< /Size {} /Root 1 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len(),
        info_id,
        xref_offset
    );
    output
}
