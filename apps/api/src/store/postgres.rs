//! PostgreSQL-backed store. Read-only; schema in `migrations/0001_init.sql`.
//!
//! `ORDER BY` clauses carry the display ordering: ascending `order`, ties
//! most recent first (skills by name).

use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{
    AchievementRecord, EducationRecord, ExperienceRecord, LanguageRecord, PersonalInfo,
    PhotoAsset, ResumeAggregate, SkillRecord,
};
use crate::models::template::TemplateRecord;
use crate::store::ResumeStore;

pub struct PgResumeStore {
    pool: PgPool,
}

impl PgResumeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rows
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, FromRow)]
struct ResumeRow {
    id: Uuid,
    title: String,
    template_id: Option<Uuid>,
    photo: Option<String>,
}

#[derive(Debug, FromRow)]
struct PersonalInfoRow {
    full_name: String,
    phone: String,
    email: String,
    address: String,
    linkedin: String,
    website: String,
    summary: String,
}

#[derive(Debug, FromRow)]
struct EducationRow {
    institution: String,
    degree: String,
    field_of_study: String,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    description: String,
    order: i32,
}

#[derive(Debug, FromRow)]
struct ExperienceRow {
    company: String,
    position: String,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    is_current: bool,
    description: String,
    order: i32,
}

#[derive(Debug, FromRow)]
struct SkillRow {
    name: String,
    level: String,
    category: String,
    order: i32,
}

#[derive(Debug, FromRow)]
struct AchievementRow {
    title: String,
    description: String,
    date: Option<NaiveDate>,
    order: i32,
}

#[derive(Debug, FromRow)]
struct LanguageRow {
    language: String,
    proficiency: String,
    order: i32,
}

#[derive(Debug, FromRow)]
struct TemplateRow {
    id: Uuid,
    name: String,
    html_structure: String,
    css_styles: String,
    is_active: bool,
}

/// Enum columns hold their code text; anything else is corrupt data.
fn parse_code<T>(raw: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(raw.parse::<T>().context("invalid enum code in database")?)
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ResumeStore for PgResumeStore {
    async fn load_resume(&self, id: Uuid) -> Result<Option<ResumeAggregate>, AppError> {
        let Some(resume) = sqlx::query_as::<_, ResumeRow>(
            "SELECT id, title, template_id, photo FROM resumes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let personal = sqlx::query_as::<_, PersonalInfoRow>(
            "SELECT full_name, phone, email, address, linkedin, website, summary \
             FROM personal_info WHERE resume_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let education = sqlx::query_as::<_, EducationRow>(
            "SELECT institution, degree, field_of_study, start_date, end_date, description, \"order\" \
             FROM education WHERE resume_id = $1 ORDER BY \"order\" ASC, start_date DESC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let experience = sqlx::query_as::<_, ExperienceRow>(
            "SELECT company, position, start_date, end_date, is_current, description, \"order\" \
             FROM work_experience WHERE resume_id = $1 ORDER BY \"order\" ASC, start_date DESC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let skills = sqlx::query_as::<_, SkillRow>(
            "SELECT name, level, category, \"order\" \
             FROM skills WHERE resume_id = $1 ORDER BY \"order\" ASC, name ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let achievements = sqlx::query_as::<_, AchievementRow>(
            "SELECT title, description, date, \"order\" \
             FROM achievements WHERE resume_id = $1 ORDER BY \"order\" ASC, date DESC NULLS LAST",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let languages = sqlx::query_as::<_, LanguageRow>(
            "SELECT language, proficiency, \"order\" \
             FROM languages WHERE resume_id = $1 ORDER BY \"order\" ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(ResumeAggregate {
            id: resume.id,
            title: resume.title,
            template_id: resume.template_id,
            personal_info: personal.map(|p| PersonalInfo {
                full_name: p.full_name,
                phone: p.phone,
                email: p.email,
                address: p.address,
                linkedin: p.linkedin,
                website: p.website,
                summary: p.summary,
            }),
            education: education
                .into_iter()
                .map(|e| EducationRecord {
                    institution: e.institution,
                    degree: e.degree,
                    field_of_study: e.field_of_study,
                    start_date: e.start_date,
                    end_date: e.end_date,
                    description: e.description,
                    order: e.order,
                })
                .collect(),
            work_experience: experience
                .into_iter()
                .map(|w| ExperienceRecord {
                    company: w.company,
                    position: w.position,
                    start_date: w.start_date,
                    end_date: w.end_date,
                    is_current: w.is_current,
                    description: w.description,
                    order: w.order,
                })
                .collect(),
            skills: skills
                .into_iter()
                .map(|s| {
                    Ok(SkillRecord {
                        level: parse_code(&s.level)?,
                        category: parse_code(&s.category)?,
                        name: s.name,
                        order: s.order,
                    })
                })
                .collect::<Result<_, AppError>>()?,
            achievements: achievements
                .into_iter()
                .map(|a| AchievementRecord {
                    title: a.title,
                    description: a.description,
                    date: a.date,
                    order: a.order,
                })
                .collect(),
            languages: languages
                .into_iter()
                .map(|l| {
                    Ok(LanguageRecord {
                        proficiency: parse_code(&l.proficiency)?,
                        language: l.language,
                        order: l.order,
                    })
                })
                .collect::<Result<_, AppError>>()?,
            photo: resume
                .photo
                .filter(|p| !p.trim().is_empty())
                .map(|path| PhotoAsset { path }),
        }))
    }

    async fn load_template(&self, id: Uuid) -> Result<Option<TemplateRecord>, AppError> {
        let row = sqlx::query_as::<_, TemplateRow>(
            "SELECT id, name, html_structure, css_styles, is_active \
             FROM resume_templates WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|t| TemplateRecord {
            id: t.id,
            name: t.name,
            html_structure: t.html_structure,
            css_styles: t.css_styles,
            is_active: t.is_active,
        }))
    }
}
