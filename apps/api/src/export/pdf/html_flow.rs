//! HTML → text-flow blocks for the built-in converter.
//!
//! This is not a browser. `lol_html` streams the assembled document through
//! element and text handlers; everything in `<head>`, `<style>`, `<script>`
//! and `<title>` is dropped, and block-level elements become [`Block`]s of
//! bold/regular [`Span`]s. CSS is not applied and images are skipped.

use std::cell::RefCell;
use std::rc::Rc;

use lol_html::{doc_comments, doc_text, element, rewrite_str, RewriteStrSettings};

use crate::export::ExportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `h1`..`h6`
    Heading(u8),
    Paragraph,
    ListItem,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub kind: BlockKind,
    pub spans: Vec<Span>,
}

impl Block {
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Forced line break inside a block (from `<br>`).
pub const LINE_BREAK: char = '\n';

const HIDDEN_ELEMENTS: &[&str] = &["head", "style", "script", "title"];

// ────────────────────────────────────────────────────────────────────────────
// Entities
// ────────────────────────────────────────────────────────────────────────────

/// `lol_html` hands text chunks over undecoded; this covers the named
/// entities résumé markup uses plus numeric references.
pub fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let candidate = &rest[amp..];
        let decoded = candidate
            .find(';')
            .filter(|semi| *semi <= 10)
            .and_then(|semi| decode_entity(&candidate[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &candidate[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &candidate[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        "ndash" => Some('\u{2013}'),
        "mdash" => Some('\u{2014}'),
        "bull" => Some('\u{2022}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix('x').or_else(|| num.strip_prefix('X')) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Block builder
// ────────────────────────────────────────────────────────────────────────────

const BLOCK_ELEMENTS: &[&str] = &[
    "p", "div", "section", "article", "header", "footer", "main", "aside", "nav", "ul", "ol",
    "table", "tr", "body", "html", "blockquote", "dl", "dt", "dd",
];

const BOLD_ELEMENTS: &[&str] = &["b", "strong", "th"];

struct FlowBuilder {
    blocks: Vec<Block>,
    kind: BlockKind,
    spans: Vec<Span>,
    bold_depth: usize,
    hidden_depth: usize,
}

impl FlowBuilder {
    fn flush(&mut self, next_kind: BlockKind) {
        let spans = std::mem::take(&mut self.spans);
        if spans.iter().any(|s| !s.text.trim().is_empty()) {
            self.blocks.push(Block {
                kind: self.kind,
                spans,
            });
        }
        self.kind = next_kind;
    }

    fn push_text(&mut self, raw: &str) {
        if self.hidden_depth > 0 {
            return;
        }
        let collapsed = collapse_whitespace(&decode_entities(raw));
        if collapsed.is_empty() {
            return;
        }
        let bold = self.bold_depth > 0 || matches!(self.kind, BlockKind::Heading(_));
        match self.spans.last_mut() {
            Some(last) if last.bold == bold => last.text.push_str(&collapsed),
            _ => self.spans.push(Span {
                text: collapsed,
                bold,
            }),
        }
    }

    fn start(&mut self, name: &str, self_closing: bool) {
        if let Some(level) = heading_level(name) {
            self.flush(BlockKind::Heading(level));
            return;
        }
        match name {
            _ if HIDDEN_ELEMENTS.contains(&name) => self.hidden_depth += 1,
            "br" => self.push_break(),
            "li" => self.flush(BlockKind::ListItem),
            _ if BLOCK_ELEMENTS.contains(&name) => self.flush(BlockKind::Paragraph),
            _ if BOLD_ELEMENTS.contains(&name) && !self_closing => self.bold_depth += 1,
            _ => {}
        }
    }

    fn end(&mut self, name: &str) {
        match name {
            _ if HIDDEN_ELEMENTS.contains(&name) => {
                self.hidden_depth = self.hidden_depth.saturating_sub(1)
            }
            "li" => self.flush(BlockKind::Paragraph),
            _ if heading_level(name).is_some() => self.flush(BlockKind::Paragraph),
            _ if BLOCK_ELEMENTS.contains(&name) => self.flush(BlockKind::Paragraph),
            _ if BOLD_ELEMENTS.contains(&name) => {
                self.bold_depth = self.bold_depth.saturating_sub(1)
            }
            _ => {}
        }
    }

    fn push_break(&mut self) {
        if self.hidden_depth > 0 {
            return;
        }
        let bold = self.bold_depth > 0 || matches!(self.kind, BlockKind::Heading(_));
        self.spans.push(Span {
            text: LINE_BREAK.to_string(),
            bold,
        });
    }
}

fn heading_level(name: &str) -> Option<u8> {
    let digit = name.strip_prefix('h')?;
    match digit.parse::<u8>() {
        Ok(level @ 1..=6) if digit.len() == 1 => Some(level),
        _ => None,
    }
}

/// Runs of whitespace become one space; leading/trailing space is kept so
/// adjacent inline elements stay separated.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Streams `html` through the rewriter and groups its visible text into
/// blocks.
///
/// Handled markup is removed from the rewriter output, so whatever is left
/// is markup the parser never completed. A tag still open at the end of the
/// input is a conversion failure.
pub fn html_to_blocks(html: &str) -> Result<Vec<Block>, ExportError> {
    let flow = Rc::new(RefCell::new(FlowBuilder {
        blocks: Vec::new(),
        kind: BlockKind::Paragraph,
        spans: Vec::new(),
        bold_depth: 0,
        hidden_depth: 0,
    }));

    let leftover = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![element!("*", {
                let flow = Rc::clone(&flow);
                move |el| {
                    let name = el.tag_name().to_ascii_lowercase();
                    flow.borrow_mut().start(&name, el.is_self_closing());
                    if let Some(handlers) = el.end_tag_handlers() {
                        let flow = Rc::clone(&flow);
                        let handler: lol_html::EndTagHandler<'static> =
                            Box::new(move |_end| {
                                flow.borrow_mut().end(&name);
                                Ok(())
                            });
                        handlers.push(handler);
                    }
                    el.remove_and_keep_content();
                    Ok(())
                }
            })],
            document_content_handlers: vec![
                doc_text!({
                    let flow = Rc::clone(&flow);
                    move |t| {
                        flow.borrow_mut().push_text(t.as_str());
                        t.remove();
                        Ok(())
                    }
                }),
                doc_comments!(|c| {
                    c.remove();
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::default()
        },
    )
    .map_err(|err| ExportError::Conversion(err.to_string()))?;

    // Only the doctype survives a clean rewrite.
    if let Some((lt, _)) = leftover
        .match_indices('<')
        .find(|(i, _)| !leftover[i + 1..].starts_with('!'))
    {
        return Err(ExportError::Conversion(format!(
            "unterminated tag at end of document: {}",
            leftover[lt..].chars().take(40).collect::<String>()
        )));
    }

    let mut flow = flow.borrow_mut();
    flow.flush(BlockKind::Paragraph);
    Ok(std::mem::take(&mut flow.blocks))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_and_style_are_skipped() {
        let blocks = html_to_blocks(
            "<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><title>T</title>\
             <style>p { color: red; } a > b {}</style></head>\
             <body><p>Hello</p></body></html>",
        )
        .unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].plain_text(), "Hello");
    }

    #[test]
    fn test_headings_lists_and_bold_runs() {
        let blocks = html_to_blocks(
            "<h1>Jane</h1><h2>Skills</h2><ul><li><b>Rust</b> (Expert)</li><li>Go</li></ul>",
        )
        .unwrap();
        let kinds: Vec<_> = blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Heading(1),
                BlockKind::Heading(2),
                BlockKind::ListItem,
                BlockKind::ListItem
            ]
        );
        assert!(blocks[0].spans[0].bold, "headings are bold");
        assert_eq!(
            blocks[2].spans,
            vec![
                Span {
                    text: "Rust".to_string(),
                    bold: true
                },
                Span {
                    text: " (Expert)".to_string(),
                    bold: false
                },
            ]
        );
    }

    #[test]
    fn test_entities_are_decoded() {
        assert_eq!(decode_entities("Tom &amp; Jerry &lt;3 &#39;x&#x27;"), "Tom & Jerry <3 'x'");
        assert_eq!(decode_entities("AT&T &bogus; &"), "AT&T &bogus; &");
    }

    #[test]
    fn test_whitespace_collapses_and_br_breaks() {
        let blocks = html_to_blocks("<p>one\n    two<br>three</p>").unwrap();
        assert_eq!(blocks[0].plain_text(), "one two\nthree");
    }

    #[test]
    fn test_quoted_gt_inside_attribute() {
        let blocks = html_to_blocks("<div title=\"a > b\">Text</div>").unwrap();
        assert_eq!(blocks[0].plain_text(), "Text");
    }

    #[test]
    fn test_images_are_skipped() {
        let blocks = html_to_blocks("<div><img src=\"data:image/png;base64,AAAA\">Caption</div>")
            .unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].plain_text(), "Caption");
    }

    #[test]
    fn test_unterminated_tag_fails() {
        let err = html_to_blocks("<p>ok</p><div class=\"x").unwrap_err();
        assert!(matches!(err, ExportError::Conversion(_)));
        assert!(err.to_string().contains("unterminated tag"), "got {err}");
    }

    #[test]
    fn test_unterminated_tag_inside_document_shell_fails() {
        let err = html_to_blocks(
            "<!DOCTYPE html><html><body><div class=\"resume\"><h1>Jane</h1>\
             <p class=\"open</div></body></html>",
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("PDF conversion failed"), "got {err}");
    }

    #[test]
    fn test_comments_and_doctype_produce_no_text() {
        let blocks =
            html_to_blocks("<!DOCTYPE html><!-- note --><p>a<!-- inline -->b</p>").unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].plain_text(), "ab");
    }

    #[test]
    fn test_script_outside_head_is_hidden() {
        let blocks = html_to_blocks("<p>x</p><script>var a = 1 < 2;</script><p>y</p>").unwrap();
        let texts: Vec<_> = blocks.iter().map(Block::plain_text).collect();
        assert_eq!(texts, vec!["x", "y"]);
    }

    #[test]
    fn test_entities_in_markup_are_decoded() {
        let blocks = html_to_blocks("<p>R&amp;D &ndash; 2021</p>").unwrap();
        assert_eq!(blocks[0].plain_text(), "R&D \u{2013} 2021");
    }

    #[test]
    fn test_bare_less_than_is_text() {
        let blocks = html_to_blocks("<p>a < b</p>").unwrap();
        assert_eq!(blocks[0].plain_text(), "a < b");
    }
}
