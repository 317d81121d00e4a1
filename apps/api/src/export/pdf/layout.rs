//! Line breaking and pagination for the built-in converter.
//!
//! Greedy word-wrap against static Helvetica metrics on the same A4 geometry
//! the print stylesheet declares. Words never split; a word wider than the
//! text column overflows on its own line.

use crate::export::pdf::html_flow::{Block, BlockKind, Span, LINE_BREAK};
use crate::export::pdf::metrics::PdfFont;
use crate::render::stylesheet::{
    mm_to_pt, BASE_FONT_SIZE_PT, LINE_HEIGHT, MARGIN_HORIZONTAL_MM, MARGIN_VERTICAL_MM,
    PAGE_HEIGHT_PT, PAGE_WIDTH_PT,
};

const BULLET: &str = "\u{2022}";
const LIST_INDENT_PT: f32 = 12.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    pub text: String,
    pub font: PdfFont,
}

/// One positioned line of text; `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub runs: Vec<Run>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, Copy)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_x: f32,
    pub margin_y: f32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry {
            width: PAGE_WIDTH_PT,
            height: PAGE_HEIGHT_PT,
            margin_x: mm_to_pt(MARGIN_HORIZONTAL_MM),
            margin_y: mm_to_pt(MARGIN_VERTICAL_MM),
        }
    }
}

impl PageGeometry {
    pub fn text_width(&self) -> f32 {
        self.width - 2.0 * self.margin_x
    }

    fn top(&self) -> f32 {
        self.height - self.margin_y
    }
}

struct BlockStyle {
    size: f32,
    space_before: f32,
    space_after: f32,
    centered: bool,
    indent: f32,
}

fn style_for(kind: BlockKind) -> BlockStyle {
    match kind {
        BlockKind::Heading(1) => BlockStyle {
            size: 18.0,
            space_before: 8.0,
            space_after: 4.0,
            centered: true,
            indent: 0.0,
        },
        BlockKind::Heading(2) => BlockStyle {
            size: 12.0,
            space_before: 8.0,
            space_after: 3.0,
            centered: false,
            indent: 0.0,
        },
        BlockKind::Heading(_) => BlockStyle {
            size: 11.0,
            space_before: 6.0,
            space_after: 2.0,
            centered: false,
            indent: 0.0,
        },
        BlockKind::Paragraph => BlockStyle {
            size: BASE_FONT_SIZE_PT,
            space_before: 0.0,
            space_after: 3.0,
            centered: false,
            indent: 0.0,
        },
        BlockKind::ListItem => BlockStyle {
            size: BASE_FONT_SIZE_PT,
            space_before: 0.0,
            space_after: 1.0,
            centered: false,
            indent: LIST_INDENT_PT,
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Words
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Item {
    Word {
        text: String,
        bold: bool,
        space_before: bool,
    },
    Break,
}

/// Splits spans into words. A word that directly follows another without
/// whitespace (e.g. a bold run followed by a comma) has `space_before = false`
/// and is never separated from it by a line break.
fn words(spans: &[Span]) -> Vec<Item> {
    let mut items = Vec::new();
    let mut pending_space = false;

    for span in spans {
        let mut current = String::new();
        for c in span.text.chars() {
            if c == LINE_BREAK {
                flush_word(&mut items, &mut current, span.bold, &mut pending_space);
                items.push(Item::Break);
                pending_space = false;
            } else if c.is_whitespace() {
                flush_word(&mut items, &mut current, span.bold, &mut pending_space);
                pending_space = true;
            } else {
                current.push(c);
            }
        }
        flush_word(&mut items, &mut current, span.bold, &mut pending_space);
    }
    items
}

fn flush_word(items: &mut Vec<Item>, current: &mut String, bold: bool, pending_space: &mut bool) {
    if current.is_empty() {
        return;
    }
    items.push(Item::Word {
        text: std::mem::take(current),
        bold,
        space_before: *pending_space,
    });
    *pending_space = false;
}

/// Unbreakable group of glued words.
struct Unit {
    pieces: Vec<(String, bool)>,
}

impl Unit {
    fn width(&self, size: f32) -> f32 {
        self.pieces
            .iter()
            .map(|(text, bold)| PdfFont::for_weight(*bold).metrics().measure_pt(text, size))
            .sum()
    }
}

/// Lines of units: each inner Vec is one visual line.
fn wrap(items: Vec<Item>, max_width: f32, size: f32) -> Vec<Vec<Unit>> {
    let space = PdfFont::Helvetica.metrics().space_width_pt(size);
    let mut lines: Vec<Vec<Unit>> = Vec::new();
    let mut line: Vec<Unit> = Vec::new();
    let mut line_width = 0.0_f32;
    let mut unit: Option<Unit> = None;

    let place = |unit: Unit, lines: &mut Vec<Vec<Unit>>, line: &mut Vec<Unit>, width: &mut f32| {
        let w = unit.width(size);
        if !line.is_empty() && *width + space + w > max_width {
            lines.push(std::mem::take(line));
            *width = 0.0;
        }
        *width += if line.is_empty() { w } else { space + w };
        line.push(unit);
    };

    for item in items {
        match item {
            Item::Break => {
                if let Some(u) = unit.take() {
                    place(u, &mut lines, &mut line, &mut line_width);
                }
                lines.push(std::mem::take(&mut line));
                line_width = 0.0;
            }
            Item::Word {
                text,
                bold,
                space_before,
            } => match unit.as_mut() {
                Some(u) if !space_before => u.pieces.push((text, bold)),
                _ => {
                    if let Some(u) = unit.take() {
                        place(u, &mut lines, &mut line, &mut line_width);
                    }
                    unit = Some(Unit {
                        pieces: vec![(text, bold)],
                    });
                }
            },
        }
    }
    if let Some(u) = unit.take() {
        place(u, &mut lines, &mut line, &mut line_width);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn line_runs(units: Vec<Unit>) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for (i, unit) in units.into_iter().enumerate() {
        for (j, (text, bold)) in unit.pieces.into_iter().enumerate() {
            let font = PdfFont::for_weight(bold);
            let text = if i > 0 && j == 0 {
                format!(" {text}")
            } else {
                text
            };
            match runs.last_mut() {
                Some(last) if last.font == font => last.text.push_str(&text),
                _ => runs.push(Run { text, font }),
            }
        }
    }
    runs
}

fn runs_width(runs: &[Run], size: f32) -> f32 {
    runs.iter()
        .map(|r| r.font.metrics().measure_pt(&r.text, size))
        .sum()
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

struct Paginator {
    geometry: PageGeometry,
    pages: Vec<Page>,
    current: Page,
    cursor: f32,
}

impl Paginator {
    fn new(geometry: PageGeometry) -> Self {
        Paginator {
            geometry,
            pages: Vec::new(),
            current: Page::default(),
            cursor: geometry.top(),
        }
    }

    fn skip(&mut self, amount: f32) {
        if !self.current.lines.is_empty() {
            self.cursor -= amount;
        }
    }

    /// Reserves one line of `size` and returns its baseline.
    fn next_baseline(&mut self, size: f32) -> f32 {
        let advance = size * LINE_HEIGHT;
        if self.cursor - advance < self.geometry.margin_y && !self.current.lines.is_empty() {
            self.pages.push(std::mem::take(&mut self.current));
            self.cursor = self.geometry.top();
        }
        let baseline = self.cursor - size;
        self.cursor -= advance;
        baseline
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.lines.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

/// Lays blocks out top to bottom. Always returns at least one page.
pub fn layout_blocks(blocks: &[Block], geometry: PageGeometry) -> Vec<Page> {
    let mut paginator = Paginator::new(geometry);

    for block in blocks {
        let style = style_for(block.kind);
        let max_width = geometry.text_width() - style.indent;
        let lines = wrap(words(&block.spans), max_width, style.size);
        if lines.is_empty() {
            continue;
        }
        paginator.skip(style.space_before);

        for (i, units) in lines.into_iter().enumerate() {
            let runs = line_runs(units);
            let baseline = paginator.next_baseline(style.size);
            let x = if style.centered {
                geometry.margin_x + ((max_width - runs_width(&runs, style.size)) / 2.0).max(0.0)
            } else {
                geometry.margin_x + style.indent
            };
            if block.kind == BlockKind::ListItem && i == 0 {
                paginator.current.lines.push(Line {
                    x: geometry.margin_x,
                    y: baseline,
                    size: style.size,
                    runs: vec![Run {
                        text: BULLET.to_string(),
                        font: PdfFont::Helvetica,
                    }],
                });
            }
            if !runs.is_empty() {
                paginator.current.lines.push(Line {
                    x,
                    y: baseline,
                    size: style.size,
                    runs,
                });
            }
        }
        paginator.skip(style.space_after);
    }

    paginator.finish()
}
