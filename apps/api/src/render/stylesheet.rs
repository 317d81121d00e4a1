//! Print stylesheet composition.
//!
//! Author stylesheets target on-screen viewing at arbitrary length. Exports
//! append a fixed override block after them so the same template biases
//! toward a single A4 page. Every override declaration is `!important`, so it
//! wins over author rules regardless of selector specificity.
//!
//! The page geometry constants are shared with the built-in PDF converter.

use std::fmt::Write;

pub const PAGE_WIDTH_PT: f32 = 595.28;
pub const PAGE_HEIGHT_PT: f32 = 841.89;
pub const MARGIN_VERTICAL_MM: f32 = 12.0;
pub const MARGIN_HORIZONTAL_MM: f32 = 15.0;
pub const BASE_FONT_SIZE_PT: f32 = 10.0;
pub const LINE_HEIGHT: f32 = 1.3;

pub fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

/// Rule blocks appended after the author stylesheet.
const PRINT_OVERRIDES: &[(&str, &[(&str, &str)])] = &[
    ("html, body", &[("margin", "0"), ("padding", "0")]),
    ("h1", &[("font-size", "18pt"), ("margin", "0 0 4pt 0")]),
    ("h2, h3", &[("font-size", "12pt"), ("margin", "8pt 0 3pt 0")]),
    ("p", &[("margin", "0 0 3pt 0")]),
    (
        "section, li, .education-item, .experience-item, .achievement-item, \
         .skill-item, .language-item",
        &[("break-inside", "avoid"), ("page-break-inside", "avoid")],
    ),
    (
        "img",
        &[
            ("max-width", "35mm"),
            ("max-height", "45mm"),
            ("object-fit", "cover"),
        ],
    ),
];

/// The override block on its own.
pub fn print_overrides() -> String {
    let mut css = String::new();
    let _ = writeln!(
        css,
        "@page {{ size: A4; margin: {}mm {}mm; }}",
        MARGIN_VERTICAL_MM, MARGIN_HORIZONTAL_MM
    );
    let _ = writeln!(
        css,
        "body {{ font-size: {}pt !important; line-height: {} !important; }}",
        BASE_FONT_SIZE_PT, LINE_HEIGHT
    );
    for (selector, declarations) in PRINT_OVERRIDES {
        let _ = write!(css, "{selector} {{");
        for (property, value) in declarations.iter() {
            let _ = write!(css, " {property}: {value} !important;");
        }
        css.push_str(" }\n");
    }
    css
}

/// Author stylesheet followed by the print overrides.
pub fn compose_stylesheet(author_css: &str) -> String {
    let author = author_css.trim_end();
    let mut css = String::with_capacity(author.len() + 1024);
    if !author.is_empty() {
        css.push_str(author);
        css.push_str("\n\n");
    }
    css.push_str("/* print overrides */\n");
    css.push_str(&print_overrides());
    css
}
