//! Word-processor export.
//!
//! [`build_document`] walks the aggregate once and emits structural blocks
//! (headings, paragraphs of runs, bullets); [`package`] serialises them to an
//! OOXML archive. Nothing here goes through the HTML pipeline, but ordering,
//! date ranges and labels come from the same helpers the HTML side uses.

pub mod package;

use crate::export::ExportError;
use crate::models::resume::{PersonalInfo, ResumeAggregate};
use crate::render::dates::{format_period, format_year};
use crate::render::labels::Labels;
use crate::render::sections::skills_by_category;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    /// `\n` becomes a line break inside the paragraph.
    pub text: String,
    pub bold: bool,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        TextRun {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        TextRun {
            text: text.into(),
            bold: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocxBlock {
    Heading {
        level: u8,
        text: String,
        centered: bool,
    },
    Paragraph {
        runs: Vec<TextRun>,
        centered: bool,
    },
    Bullet {
        runs: Vec<TextRun>,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocxDocument {
    pub title: String,
    pub blocks: Vec<DocxBlock>,
}

impl DocxDocument {
    fn heading(&mut self, level: u8, text: &str) {
        self.blocks.push(DocxBlock::Heading {
            level,
            text: text.to_string(),
            centered: false,
        });
    }

    fn paragraph(&mut self, runs: Vec<TextRun>) {
        self.blocks.push(DocxBlock::Paragraph {
            runs,
            centered: false,
        });
    }

    /// Section heading texts, in document order.
    pub fn section_headings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                DocxBlock::Heading { level: 2, text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Builds the document model. Categories with no records add nothing.
pub fn build_document(resume: &ResumeAggregate, labels: &Labels) -> DocxDocument {
    let mut doc = DocxDocument {
        title: resume.title.clone(),
        blocks: Vec::new(),
    };

    if let Some(personal) = &resume.personal_info {
        personal_block(&mut doc, personal, labels);
    }

    if !resume.education.is_empty() {
        doc.heading(2, labels.education);
        for edu in &resume.education {
            let mut runs = vec![
                TextRun::bold(format!("{}\n", edu.institution)),
                TextRun::plain(format!("{}, {}\n", edu.degree, edu.field_of_study)),
                TextRun::plain(format_period(edu.start_date, edu.period_end(), labels)),
            ];
            push_description(&mut runs, &edu.description);
            doc.paragraph(runs);
        }
    }

    if !resume.work_experience.is_empty() {
        doc.heading(2, labels.experience);
        for work in &resume.work_experience {
            let mut runs = vec![
                TextRun::bold(format!("{}\n", work.position)),
                TextRun::plain(format!("{}\n", work.company)),
                TextRun::plain(format_period(work.start_date, work.period_end(), labels)),
            ];
            push_description(&mut runs, &work.description);
            doc.paragraph(runs);
        }
    }

    if !resume.skills.is_empty() {
        doc.heading(2, labels.skills);
        for group in skills_by_category(&resume.skills, labels) {
            let listed = group
                .skills
                .iter()
                .map(|s| format!("{} ({})", s.name, s.level_label))
                .collect::<Vec<_>>()
                .join(", ");
            doc.paragraph(vec![
                TextRun::bold(format!("{}: ", group.label)),
                TextRun::plain(listed),
            ]);
        }
    }

    if !resume.achievements.is_empty() {
        doc.heading(2, labels.achievements);
        for achievement in &resume.achievements {
            let year = format_year(achievement.date);
            let title = if year.is_empty() {
                achievement.title.clone()
            } else {
                format!("{} ({})", achievement.title, year)
            };
            let mut runs = vec![TextRun::bold(title)];
            push_description(&mut runs, &achievement.description);
            doc.blocks.push(DocxBlock::Bullet { runs });
        }
    }

    if !resume.languages.is_empty() {
        doc.heading(2, labels.languages);
        let joined = resume
            .languages
            .iter()
            .map(|l| format!("{} - {}", l.language, labels.proficiency(l.proficiency)))
            .collect::<Vec<_>>()
            .join(", ");
        doc.paragraph(vec![TextRun::plain(joined)]);
    }

    doc
}

fn personal_block(doc: &mut DocxDocument, personal: &PersonalInfo, labels: &Labels) {
    doc.blocks.push(DocxBlock::Heading {
        level: 1,
        text: personal.full_name.clone(),
        centered: true,
    });

    let contact = labelled_line(&[
        (labels.phone, &personal.phone),
        (labels.email, &personal.email),
        (labels.address, &personal.address),
    ]);
    if !contact.is_empty() {
        doc.blocks.push(DocxBlock::Paragraph {
            runs: vec![TextRun::plain(contact)],
            centered: true,
        });
    }

    let links = labelled_line(&[
        (labels.linkedin, &personal.linkedin),
        (labels.website, &personal.website),
    ]);
    if !links.is_empty() {
        doc.blocks.push(DocxBlock::Paragraph {
            runs: vec![TextRun::plain(links)],
            centered: true,
        });
    }

    let summary = personal.summary.trim();
    if !summary.is_empty() {
        doc.heading(2, labels.summary);
        doc.paragraph(vec![TextRun::plain(summary)]);
    }
}

fn labelled_line(parts: &[(&str, &String)]) -> String {
    parts
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(label, value)| format!("{}: {}", label, value.trim()))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Description on its own line after the last run, when non-empty.
fn push_description(runs: &mut Vec<TextRun>, description: &str) {
    let description = description.trim();
    if !description.is_empty() {
        runs.push(TextRun::plain(format!("\n{description}")));
    }
}

/// Builds and packages the document.
pub fn render_docx(resume: &ResumeAggregate, labels: &Labels) -> Result<Vec<u8>, ExportError> {
    package::package(&build_document(resume, labels))
}
