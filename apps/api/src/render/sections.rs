//! Section fragments: one markup string per repeated category.
//!
//! Each record maps to a fixed snippet shape (header line with title and
//! date, secondary line, optional description block) and snippets are
//! concatenated in list order. Record text is HTML-escaped; dates go through
//! [`crate::render::dates`].

use std::fmt::Write;

use serde::Serialize;

use crate::models::resume::{
    AchievementRecord, EducationRecord, ExperienceRecord, LanguageRecord, ResumeAggregate,
    SkillCategory, SkillLevel, SkillRecord,
};
use crate::render::dates::{format_date, format_period};
use crate::render::escape_html;
use crate::render::labels::Labels;

/// The five expanded category fragments.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SectionFragments {
    pub work_experience: String,
    pub education: String,
    pub skills: String,
    pub achievements: String,
    pub languages: String,
}

pub fn expand_sections(resume: &ResumeAggregate, labels: &Labels) -> SectionFragments {
    SectionFragments {
        work_experience: experience_fragment(&resume.work_experience, labels),
        education: education_fragment(&resume.education, labels),
        skills: skills_fragment(&resume.skills, labels),
        achievements: achievements_fragment(&resume.achievements, labels),
        languages: languages_fragment(&resume.languages, labels),
    }
}

pub fn education_fragment(records: &[EducationRecord], labels: &Labels) -> String {
    let mut out = String::new();
    for edu in records {
        out.push_str("<div class=\"education-item\">");
        push_header(
            &mut out,
            &edu.institution,
            &format_period(edu.start_date, edu.period_end(), labels),
        );
        let _ = write!(
            out,
            "<div class=\"item-subtitle\">{}, {}</div>",
            escape_html(&edu.degree),
            escape_html(&edu.field_of_study)
        );
        push_description(&mut out, &edu.description);
        out.push_str("</div>");
    }
    out
}

pub fn experience_fragment(records: &[ExperienceRecord], labels: &Labels) -> String {
    let mut out = String::new();
    for work in records {
        out.push_str("<div class=\"experience-item\">");
        push_header(
            &mut out,
            &work.position,
            &format_period(work.start_date, work.period_end(), labels),
        );
        let _ = write!(
            out,
            "<div class=\"item-subtitle\">{}</div>",
            escape_html(&work.company)
        );
        push_description(&mut out, &work.description);
        out.push_str("</div>");
    }
    out
}

/// Flat list in input order, each skill annotated with its level.
pub fn skills_fragment(records: &[SkillRecord], labels: &Labels) -> String {
    let mut out = String::new();
    for skill in records {
        let _ = write!(
            out,
            "<div class=\"skill-item\"><span class=\"skill-name\">{}</span> \
             <span class=\"skill-level\">({})</span></div>",
            escape_html(&skill.name),
            escape_html(labels.skill_level(skill.level))
        );
    }
    out
}

pub fn achievements_fragment(records: &[AchievementRecord], labels: &Labels) -> String {
    let mut out = String::new();
    for achievement in records {
        out.push_str("<div class=\"achievement-item\">");
        push_header(
            &mut out,
            &achievement.title,
            &format_date(achievement.date, labels),
        );
        push_description(&mut out, &achievement.description);
        out.push_str("</div>");
    }
    out
}

pub fn languages_fragment(records: &[LanguageRecord], labels: &Labels) -> String {
    let mut out = String::new();
    for lang in records {
        let _ = write!(
            out,
            "<div class=\"language-item\"><span class=\"language-name\">{}</span> - \
             <span class=\"language-level\">{}</span></div>",
            escape_html(&lang.language),
            escape_html(labels.proficiency(lang.proficiency))
        );
    }
    out
}

fn push_header(out: &mut String, title: &str, date: &str) {
    let _ = write!(
        out,
        "<div class=\"item-header\"><span class=\"item-title\">{}</span>",
        escape_html(title)
    );
    if !date.is_empty() {
        let _ = write!(out, " <span class=\"item-date\">{}</span>", escape_html(date));
    }
    out.push_str("</div>");
}

fn push_description(out: &mut String, description: &str) {
    let description = description.trim();
    if description.is_empty() {
        return;
    }
    let _ = write!(
        out,
        "<div class=\"item-description\">{}</div>",
        escape_html(description).replace('\n', "<br>")
    );
}

// ────────────────────────────────────────────────────────────────────────────
// Skills grouped by category
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillView {
    pub name: String,
    pub level: SkillLevel,
    pub level_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillGroup {
    pub category: SkillCategory,
    pub label: &'static str,
    pub skills: Vec<SkillView>,
}

/// Groups skills in fixed category order; list order is kept inside a group
/// and empty categories are dropped.
pub fn skills_by_category(records: &[SkillRecord], labels: &Labels) -> Vec<SkillGroup> {
    SkillCategory::ALL
        .iter()
        .filter_map(|category| {
            let skills: Vec<SkillView> = records
                .iter()
                .filter(|s| s.category == *category)
                .map(|s| SkillView {
                    name: s.name.clone(),
                    level: s.level,
                    level_label: labels.skill_level(s.level),
                })
                .collect();
            (!skills.is_empty()).then(|| SkillGroup {
                category: *category,
                label: labels.skill_category(*category),
                skills,
            })
        })
        .collect()
}
