use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A fully hydrated résumé: the résumé row plus every owned child record.
///
/// Supplied read-only to the render/export core. Child lists are expected in
/// display order; see [`ResumeAggregate::sort_records`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeAggregate {
    pub id: Uuid,
    pub title: String,
    pub template_id: Option<Uuid>,
    pub personal_info: Option<PersonalInfo>,
    #[serde(default)]
    pub education: Vec<EducationRecord>,
    #[serde(default)]
    pub work_experience: Vec<ExperienceRecord>,
    #[serde(default)]
    pub skills: Vec<SkillRecord>,
    #[serde(default)]
    pub achievements: Vec<AchievementRecord>,
    #[serde(default)]
    pub languages: Vec<LanguageRecord>,
    pub photo: Option<PhotoAsset>,
}

/// Personal block. Optional sub-fields are empty strings when unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationRecord {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: NaiveDate,
    /// `None` means the studies are ongoing.
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceRecord {
    pub company: String,
    pub position: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,
    #[serde(default)]
    pub level: SkillLevel,
    #[serde(default)]
    pub category: SkillCategory,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageRecord {
    pub language: String,
    pub proficiency: Proficiency,
    #[serde(default)]
    pub order: i32,
}

/// Reference to a stored photo file, relative to the media root
/// (e.g. `resumes/photos/jane.png`). The extension drives mime inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoAsset {
    pub path: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Enumerations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    #[default]
    Technical,
    Soft,
    Language,
    Other,
}

/// CEFR level or native speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Proficiency {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
    #[serde(rename = "native")]
    Native,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 4] = [
        SkillLevel::Beginner,
        SkillLevel::Intermediate,
        SkillLevel::Advanced,
        SkillLevel::Expert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Expert => "expert",
        }
    }
}

impl SkillCategory {
    /// Display order of category groups.
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Technical,
        SkillCategory::Soft,
        SkillCategory::Language,
        SkillCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Technical => "technical",
            SkillCategory::Soft => "soft",
            SkillCategory::Language => "language",
            SkillCategory::Other => "other",
        }
    }
}

impl Proficiency {
    pub const ALL: [Proficiency; 7] = [
        Proficiency::A1,
        Proficiency::A2,
        Proficiency::B1,
        Proficiency::B2,
        Proficiency::C1,
        Proficiency::C2,
        Proficiency::Native,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Proficiency::A1 => "A1",
            Proficiency::A2 => "A2",
            Proficiency::B1 => "B1",
            Proficiency::B2 => "B2",
            Proficiency::C1 => "C1",
            Proficiency::C2 => "C2",
            Proficiency::Native => "native",
        }
    }
}

/// Error returned when a stored enum code is not part of the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: String,
}

impl fmt::Display for UnknownCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} code '{}'", self.kind, self.code)
    }
}

impl std::error::Error for UnknownCode {}

fn parse_code<T: Copy>(
    all: &[T],
    as_str: fn(&T) -> &'static str,
    kind: &'static str,
    s: &str,
) -> Result<T, UnknownCode> {
    all.iter()
        .copied()
        .find(|v| as_str(v) == s)
        .ok_or_else(|| UnknownCode {
            kind,
            code: s.to_string(),
        })
}

impl FromStr for SkillLevel {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(&Self::ALL, Self::as_str, "skill level", s)
    }
}

impl FromStr for SkillCategory {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(&Self::ALL, Self::as_str, "skill category", s)
    }
}

impl FromStr for Proficiency {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(&Self::ALL, Self::as_str, "proficiency", s)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Periods & ordering
// ────────────────────────────────────────────────────────────────────────────

/// How the end of a dated period is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodEnd {
    /// Ongoing: rendered with the "present" label.
    Present,
    Date(NaiveDate),
    /// No end to show; only the start date is rendered.
    Open,
}

impl EducationRecord {
    /// Education has no current flag: a missing end date means ongoing.
    pub fn period_end(&self) -> PeriodEnd {
        match self.end_date {
            Some(d) => PeriodEnd::Date(d),
            None => PeriodEnd::Present,
        }
    }
}

impl ExperienceRecord {
    /// `is_current` wins over a set end date.
    pub fn period_end(&self) -> PeriodEnd {
        if self.is_current {
            return PeriodEnd::Present;
        }
        match self.end_date {
            Some(d) => PeriodEnd::Date(d),
            None => PeriodEnd::Open,
        }
    }
}

impl ResumeAggregate {
    /// Stable in-memory sort matching the store ordering: ascending `order`,
    /// ties broken most-recent-first (skills by name, languages by position).
    pub fn sort_records(&mut self) {
        self.education.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then_with(|| b.start_date.cmp(&a.start_date))
        });
        self.work_experience.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then_with(|| b.start_date.cmp(&a.start_date))
        });
        self.skills
            .sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
        self.achievements.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then_with(|| newest_first(a.date, b.date))
        });
        self.languages.sort_by_key(|l| l.order);
    }

    /// Number of filled sections out of six (personal info + five lists).
    pub fn sections_count(&self) -> usize {
        [
            self.personal_info.is_some(),
            !self.education.is_empty(),
            !self.work_experience.is_empty(),
            !self.skills.is_empty(),
            !self.achievements.is_empty(),
            !self.languages.is_empty(),
        ]
        .iter()
        .filter(|filled| **filled)
        .count()
    }
}

/// Dated entries first, newest first; undated entries last.
fn newest_first(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
