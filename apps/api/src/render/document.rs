//! Standalone HTML documents handed to the PDF converter.
//!
//! Two entry points:
//! - [`assemble_document`] wraps bound template markup and a composed stylesheet.
//! - [`default_document`] builds the built-in layout straight from the
//!   aggregate for résumés without a usable template. It never touches the
//!   placeholder binder.

use std::fmt::Write;

use crate::models::resume::ResumeAggregate;
use crate::render::escape_html;
use crate::render::labels::Labels;
use crate::render::photo::PhotoBinding;
use crate::render::sections::expand_sections;
use crate::render::stylesheet::compose_stylesheet;

pub fn assemble_document(title: &str, body_markup: &str, css: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <title>{}</title>\n\
         <style>\n{}\n</style>\n\
         </head>\n\
         <body>\n\
         <div class=\"resume\">\n{}\n</div>\n\
         </body>\n\
         </html>\n",
        escape_html(title),
        css,
        body_markup
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in layout
// ────────────────────────────────────────────────────────────────────────────

const DEFAULT_LAYOUT_CSS: &str = "\
body { font-family: Helvetica, Arial, sans-serif; color: #222; }
.header { text-align: center; margin-bottom: 10pt; }
.header img { border-radius: 4pt; }
.contact, .links { color: #555; }
h2 { border-bottom: 1px solid #999; text-transform: uppercase; letter-spacing: 0.5pt; }
.item-header { display: flex; justify-content: space-between; font-weight: bold; }
.item-subtitle { font-style: italic; }
.item-date { color: #555; font-weight: normal; }";

/// Built-in layout: header, then one section per non-empty category.
pub fn default_document(resume: &ResumeAggregate, photo: &PhotoBinding, labels: &Labels) -> String {
    let mut body = String::new();

    body.push_str("<div class=\"header\">");
    if photo.present {
        let _ = write!(
            body,
            "<img src=\"{}\" alt=\"\">",
            escape_html(&photo.value)
        );
    }
    match &resume.personal_info {
        Some(p) => {
            let name = if p.full_name.trim().is_empty() {
                &resume.title
            } else {
                &p.full_name
            };
            let _ = write!(body, "<h1>{}</h1>", escape_html(name));

            let contact = joined_line(&[
                (labels.phone, &p.phone),
                (labels.email, &p.email),
                (labels.address, &p.address),
            ]);
            if !contact.is_empty() {
                let _ = write!(body, "<p class=\"contact\">{contact}</p>");
            }
            let links = joined_line(&[(labels.linkedin, &p.linkedin), (labels.website, &p.website)]);
            if !links.is_empty() {
                let _ = write!(body, "<p class=\"links\">{links}</p>");
            }
        }
        None => {
            let _ = write!(body, "<h1>{}</h1>", escape_html(&resume.title));
        }
    }
    body.push_str("</div>");

    if let Some(summary) = resume
        .personal_info
        .as_ref()
        .map(|p| p.summary.trim())
        .filter(|s| !s.is_empty())
    {
        push_section(
            &mut body,
            labels.summary,
            &format!("<p>{}</p>", escape_html(summary).replace('\n', "<br>")),
        );
    }

    let fragments = expand_sections(resume, labels);
    push_section(&mut body, labels.education, &fragments.education);
    push_section(&mut body, labels.experience, &fragments.work_experience);
    push_section(&mut body, labels.skills, &fragments.skills);
    push_section(&mut body, labels.achievements, &fragments.achievements);
    push_section(&mut body, labels.languages, &fragments.languages);

    let css = compose_stylesheet(DEFAULT_LAYOUT_CSS);
    assemble_document(&resume.title, &body, &css)
}

/// `"Label: value | Label: value"` over the non-empty values.
fn joined_line(parts: &[(&str, &String)]) -> String {
    parts
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(label, value)| format!("{}: {}", label, escape_html(value.trim())))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Heading plus content, skipped entirely when the content is empty.
fn push_section(body: &mut String, heading: &str, content: &str) {
    if content.is_empty() {
        return;
    }
    let _ = write!(
        body,
        "<section><h2>{}</h2>{}</section>",
        escape_html(heading),
        content
    );
}
