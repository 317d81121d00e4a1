// ────────────────────────────────────────────────────────────────────────────
// Render — template binding and HTML document assembly
// ────────────────────────────────────────────────────────────────────────────
//
// Data flow for a templated résumé:
//
//   aggregate ──► sections::expand_sections ──┐
//   photo     ──► photo::PhotoEmbedder ───────┼─► binder ─► template::Template
//   template css ─► stylesheet::compose ──────┴─────────► document::assemble_document
//
// A résumé with no template skips the binder and goes through
// `document::default_document`.

pub mod binder;
pub mod dates;
pub mod document;
pub mod handlers;
pub mod labels;
pub mod photo;
pub mod preview;
pub mod sections;
pub mod stylesheet;
pub mod template;

/// Escapes text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
