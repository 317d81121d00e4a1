//! OOXML (WordprocessingML) serialisation and zip packaging.
//!
//! Parts written:
//! - `[Content_Types].xml`, `_rels/.rels`, `docProps/core.xml`
//! - `word/document.xml`, `word/styles.xml`, `word/numbering.xml`
//! - `word/_rels/document.xml.rels`

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::export::docx::{DocxBlock, DocxDocument, TextRun};
use crate::export::ExportError;

/// A4 in twentieths of a point.
const PAGE_WIDTH_TWIPS: u32 = 11906;
const PAGE_HEIGHT_TWIPS: u32 = 16838;
/// 0.5in top/bottom, 0.75in left/right.
const MARGIN_VERTICAL_TWIPS: u32 = 720;
const MARGIN_HORIZONTAL_TWIPS: u32 = 1080;

const BULLET_NUM_ID: u32 = 1;

pub fn package(doc: &DocxDocument) -> Result<Vec<u8>, ExportError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let parts: [(&str, String); 7] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
        ("_rels/.rels", ROOT_RELS_XML.to_string()),
        ("docProps/core.xml", core_properties_xml(&doc.title)),
        ("word/document.xml", document_xml(&doc.blocks)),
        ("word/styles.xml", STYLES_XML.to_string()),
        ("word/numbering.xml", NUMBERING_XML.to_string()),
        ("word/_rels/document.xml.rels", DOCUMENT_RELS_XML.to_string()),
    ];
    for (name, contents) in parts {
        zip.start_file(name, options)?;
        zip.write_all(contents.as_bytes())?;
    }

    Ok(zip.finish()?.into_inner())
}

// ────────────────────────────────────────────────────────────────────────────
// document.xml
// ────────────────────────────────────────────────────────────────────────────

pub fn document_xml(blocks: &[DocxBlock]) -> String {
    let mut body = String::new();
    for block in blocks {
        body.push_str(&block_xml(block));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><w:body>{body}<w:sectPr><w:pgSz w:w="{PAGE_WIDTH_TWIPS}" w:h="{PAGE_HEIGHT_TWIPS}"/><w:pgMar w:top="{MARGIN_VERTICAL_TWIPS}" w:right="{MARGIN_HORIZONTAL_TWIPS}" w:bottom="{MARGIN_VERTICAL_TWIPS}" w:left="{MARGIN_HORIZONTAL_TWIPS}" w:header="360" w:footer="360" w:gutter="0"/></w:sectPr></w:body></w:document>"#
    )
}

fn block_xml(block: &DocxBlock) -> String {
    match block {
        DocxBlock::Heading {
            level,
            text,
            centered,
        } => {
            let mut xml = format!(r#"<w:p><w:pPr><w:pStyle w:val="Heading{level}"/>"#);
            if *centered {
                xml.push_str(r#"<w:jc w:val="center"/>"#);
            }
            xml.push_str("</w:pPr>");
            xml.push_str(&run_xml(&TextRun::plain(text.as_str())));
            xml.push_str("</w:p>");
            xml
        }
        DocxBlock::Paragraph { runs, centered } => {
            let mut xml = String::from("<w:p>");
            if *centered {
                xml.push_str(r#"<w:pPr><w:jc w:val="center"/></w:pPr>"#);
            }
            for run in runs {
                xml.push_str(&run_xml(run));
            }
            xml.push_str("</w:p>");
            xml
        }
        DocxBlock::Bullet { runs } => {
            let mut xml = format!(
                r#"<w:p><w:pPr><w:pStyle w:val="ListBullet"/><w:numPr><w:ilvl w:val="0"/><w:numId w:val="{BULLET_NUM_ID}"/></w:numPr></w:pPr>"#
            );
            for run in runs {
                xml.push_str(&run_xml(run));
            }
            xml.push_str("</w:p>");
            xml
        }
    }
}

/// One `<w:r>`; embedded newlines become `<w:br/>`.
fn run_xml(run: &TextRun) -> String {
    let mut xml = String::from("<w:r>");
    if run.bold {
        xml.push_str("<w:rPr><w:b/></w:rPr>");
    }
    for (i, line) in run.text.split('\n').enumerate() {
        if i > 0 {
            xml.push_str("<w:br/>");
        }
        if !line.is_empty() {
            xml.push_str(&format!(
                r#"<w:t xml:space="preserve">{}</w:t>"#,
                escape_xml(line)
            ));
        }
    }
    xml.push_str("</w:r>");
    xml
}

pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn core_properties_xml(title: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>{}</dc:title><dc:creator>resume-export</dc:creator></cp:coreProperties>"#,
        escape_xml(title)
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Static parts
// ────────────────────────────────────────────────────────────────────────────

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/><Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering" Target="numbering.xml"/></Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:docDefaults><w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/><w:szCs w:val="22"/></w:rPr></w:rPrDefault><w:pPrDefault><w:pPr><w:spacing w:after="120" w:line="259" w:lineRule="auto"/></w:pPr></w:pPrDefault></w:docDefaults>
<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>
<w:style w:type="paragraph" w:styleId="Heading1"><w:name w:val="heading 1"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="0" w:after="120"/><w:outlineLvl w:val="0"/></w:pPr><w:rPr><w:b/><w:color w:val="1F3864"/><w:sz w:val="36"/><w:szCs w:val="36"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="Heading2"><w:name w:val="heading 2"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/><w:pPr><w:keepNext/><w:spacing w:before="240" w:after="80"/><w:outlineLvl w:val="1"/></w:pPr><w:rPr><w:b/><w:color w:val="2F5496"/><w:sz w:val="26"/><w:szCs w:val="26"/></w:rPr></w:style>
<w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/><w:basedOn w:val="Normal"/><w:pPr><w:ind w:left="360" w:hanging="360"/></w:pPr></w:style>
</w:styles>"#;

const NUMBERING_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/><w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/><w:lvlText w:val="•"/><w:lvlJc w:val="left"/><w:pPr><w:ind w:left="360" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum><w:num w:numId="1"><w:abstractNumId w:val="0"/></w:num></w:numbering>"#;
