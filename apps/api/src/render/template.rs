//! Template token grammar.
//!
//! Template markup is free-form HTML carrying a fixed, small token vocabulary:
//!
//! ```text
//! {{name}}                                placeholder
//! {{#if cond}} ... {{else}} ... {{/if}}   conditional block ({{else}} optional)
//! ```
//!
//! [`Template::parse`] turns markup into a flat sequence of [`Node`]s in one
//! pass; [`Template::render`] walks that sequence against [`Bindings`].
//!
//! Rules:
//! - Every occurrence of a bound placeholder is replaced. Bound values are
//!   inserted as-is and never re-scanned for tokens.
//! - A placeholder with no binding stays in the output verbatim.
//! - Only one conditional region is structural: the first well-formed block
//!   whose condition the caller supplied. Any other block is emitted
//!   verbatim, like an unbound placeholder, and does not use up the slot.
//! - Stray `{{else}}`/`{{/if}}` and an `{{#if}}` with no closing `{{/if}}`
//!   are plain text. Nested conditionals are not supported: the first
//!   `{{/if}}` closes the block.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Node<'a> {
    Text(&'a str),
    Placeholder {
        name: &'a str,
        raw: &'a str,
    },
    Conditional {
        condition: &'a str,
        then_branch: Vec<Node<'a>>,
        else_branch: Option<Vec<Node<'a>>>,
        /// Source text of the whole block, markers included.
        raw: &'a str,
    },
}

/// Parsed template markup. Borrows from the source string.
#[derive(Debug, Clone, PartialEq)]
pub struct Template<'a> {
    nodes: Vec<Node<'a>>,
}

/// Values and conditions supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: HashMap<String, String>,
    conditions: HashMap<String, bool>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn set_condition(&mut self, name: impl Into<String>, value: bool) -> &mut Self {
        self.conditions.insert(name.into(), value);
        self
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn condition(&self, name: &str) -> Option<bool> {
        self.conditions.get(name).copied()
    }
}

enum Marker<'a> {
    Placeholder(&'a str),
    If(&'a str),
    Else,
    EndIf,
}

impl<'a> Template<'a> {
    pub fn parse(source: &'a str) -> Self {
        Template {
            nodes: parse_nodes(source, true),
        }
    }

    pub fn nodes(&self) -> &[Node<'a>] {
        &self.nodes
    }

    pub fn render(&self, bindings: &Bindings) -> String {
        let mut out = String::new();
        let mut slot = ConditionalSlot::Open;
        render_nodes(&self.nodes, bindings, &mut slot, &mut out);
        out
    }

    /// Placeholder names the bindings cannot resolve, in first-seen order.
    /// Only branches that would actually render are inspected.
    pub fn unresolved(&self, bindings: &Bindings) -> Vec<&'a str> {
        let mut names = Vec::new();
        let mut slot = ConditionalSlot::Open;
        collect_unresolved(&self.nodes, bindings, &mut slot, &mut names);
        names
    }
}

/// Parses and renders in one call.
pub fn bind(markup: &str, bindings: &Bindings) -> String {
    Template::parse(markup).render(bindings)
}

// ────────────────────────────────────────────────────────────────────────────
// Parsing
// ────────────────────────────────────────────────────────────────────────────

/// Finds the next `{{...}}` at or after `from`. Returns `(start, end, inner)`
/// where `end` is one past the closing braces.
fn find_marker(src: &str, from: usize) -> Option<(usize, usize, &str)> {
    let open = src.get(from..)?.find("{{")? + from;
    let close = src[open + 2..].find("}}")? + open + 2;
    Some((open, close + 2, &src[open + 2..close]))
}

fn is_ident(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn classify(inner: &str) -> Option<Marker<'_>> {
    let inner = inner.trim();
    match inner {
        "else" => return Some(Marker::Else),
        "/if" => return Some(Marker::EndIf),
        _ => {}
    }
    if let Some(rest) = inner.strip_prefix("#if") {
        let cond = rest.trim_start();
        if cond.len() < rest.len() && is_ident(cond) {
            return Some(Marker::If(cond));
        }
        return None;
    }
    is_ident(inner).then_some(Marker::Placeholder(inner))
}

fn parse_nodes(src: &str, allow_conditional: bool) -> Vec<Node<'_>> {
    let mut nodes = Vec::new();
    let mut text_start = 0;
    let mut search = 0;

    while let Some((open, end, inner)) = find_marker(src, search) {
        match classify(inner) {
            Some(Marker::Placeholder(name)) => {
                push_text(&mut nodes, &src[text_start..open]);
                nodes.push(Node::Placeholder {
                    name,
                    raw: &src[open..end],
                });
                text_start = end;
                search = end;
            }
            Some(Marker::If(condition)) if allow_conditional => {
                match parse_conditional(src, open, end, condition) {
                    Some((node, block_end)) => {
                        push_text(&mut nodes, &src[text_start..open]);
                        nodes.push(node);
                        text_start = block_end;
                        search = block_end;
                    }
                    None => search = end,
                }
            }
            _ => search = open + 2,
        }
    }
    push_text(&mut nodes, &src[text_start..]);
    nodes
}

/// Parses the block opened by the `{{#if}}` at `open..open_end`. Returns the
/// node and the offset just past `{{/if}}`, or `None` if the block never closes.
fn parse_conditional<'a>(
    src: &'a str,
    open: usize,
    open_end: usize,
    condition: &'a str,
) -> Option<(Node<'a>, usize)> {
    let mut search = open_end;
    let mut else_at: Option<(usize, usize)> = None;

    while let Some((start, end, inner)) = find_marker(src, search) {
        match classify(inner) {
            Some(Marker::EndIf) => {
                let (then_src, else_src) = match else_at {
                    Some((else_start, else_end)) => {
                        (&src[open_end..else_start], Some(&src[else_end..start]))
                    }
                    None => (&src[open_end..start], None),
                };
                let node = Node::Conditional {
                    condition,
                    then_branch: parse_nodes(then_src, false),
                    else_branch: else_src.map(|s| parse_nodes(s, false)),
                    raw: &src[open..end],
                };
                return Some((node, end));
            }
            Some(Marker::Else) if else_at.is_none() => {
                else_at = Some((start, end));
                search = end;
            }
            _ => search = start + 2,
        }
    }
    None
}

fn push_text<'a>(nodes: &mut Vec<Node<'a>>, text: &'a str) {
    if !text.is_empty() {
        nodes.push(Node::Text(text));
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// Tracks whether the single structural conditional has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConditionalSlot {
    Open,
    Taken,
}

impl ConditionalSlot {
    /// The branch choice for a conditional, or `None` if it stays verbatim.
    /// Claims the slot on the first supplied condition.
    fn claim(&mut self, bindings: &Bindings, condition: &str) -> Option<bool> {
        if *self == ConditionalSlot::Taken {
            return None;
        }
        let value = bindings.condition(condition)?;
        *self = ConditionalSlot::Taken;
        Some(value)
    }
}

fn render_nodes(
    nodes: &[Node<'_>],
    bindings: &Bindings,
    slot: &mut ConditionalSlot,
    out: &mut String,
) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Placeholder { name, raw } => match bindings.value(name) {
                Some(value) => out.push_str(value),
                None => out.push_str(raw),
            },
            Node::Conditional {
                condition,
                then_branch,
                else_branch,
                raw,
            } => match slot.claim(bindings, condition) {
                Some(true) => render_nodes(then_branch, bindings, slot, out),
                Some(false) => {
                    if let Some(branch) = else_branch {
                        render_nodes(branch, bindings, slot, out);
                    }
                }
                None => out.push_str(raw),
            },
        }
    }
}

fn collect_unresolved<'a>(
    nodes: &[Node<'a>],
    bindings: &Bindings,
    slot: &mut ConditionalSlot,
    names: &mut Vec<&'a str>,
) {
    for node in nodes {
        match node {
            Node::Text(_) => {}
            Node::Placeholder { name, .. } => {
                if bindings.value(name).is_none() && !names.contains(name) {
                    names.push(name);
                }
            }
            Node::Conditional {
                condition,
                then_branch,
                else_branch,
                ..
            } => match slot.claim(bindings, condition) {
                Some(true) => collect_unresolved(then_branch, bindings, slot, names),
                Some(false) => {
                    if let Some(branch) = else_branch {
                        collect_unresolved(branch, bindings, slot, names);
                    }
                }
                None => {}
            },
        }
    }
}
