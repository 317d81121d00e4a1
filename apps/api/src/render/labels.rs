//! Display labels for both exporters.
//!
//! Every enum→label lookup goes through these closed tables so the HTML and
//! DOCX paths always agree on wording.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::resume::{Proficiency, SkillCategory, SkillLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "ru" => Ok(Locale::Ru),
            other => Err(format!("unsupported locale '{other}' (expected en or ru)")),
        }
    }
}

/// Fallback values shown when a résumé has no personal block at all.
pub struct PersonalPlaceholders {
    pub full_name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub address: &'static str,
    pub linkedin: &'static str,
    pub website: &'static str,
    pub summary: &'static str,
}

pub struct Labels {
    pub locale: Locale,
    pub months: [&'static str; 12],
    pub present: &'static str,

    pub summary: &'static str,
    pub education: &'static str,
    pub experience: &'static str,
    pub skills: &'static str,
    pub achievements: &'static str,
    pub languages: &'static str,

    pub phone: &'static str,
    pub email: &'static str,
    pub address: &'static str,
    pub linkedin: &'static str,
    pub website: &'static str,

    pub placeholders: PersonalPlaceholders,

    /// Indexed in `SkillLevel::ALL` order.
    skill_levels: [&'static str; 4],
    /// Indexed in `SkillCategory::ALL` order.
    skill_categories: [&'static str; 4],
    /// Indexed in `Proficiency::ALL` order.
    proficiencies: [&'static str; 7],
}

impl Labels {
    pub fn skill_level(&self, level: SkillLevel) -> &'static str {
        let idx = SkillLevel::ALL.iter().position(|l| *l == level).unwrap_or(0);
        self.skill_levels[idx]
    }

    pub fn skill_category(&self, category: SkillCategory) -> &'static str {
        let idx = SkillCategory::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or(0);
        self.skill_categories[idx]
    }

    pub fn proficiency(&self, proficiency: Proficiency) -> &'static str {
        let idx = Proficiency::ALL
            .iter()
            .position(|p| *p == proficiency)
            .unwrap_or(0);
        self.proficiencies[idx]
    }

    /// `month` is 1-based, as returned by `chrono::Datelike::month`.
    pub fn month(&self, month: u32) -> &'static str {
        let idx = (month.clamp(1, 12) - 1) as usize;
        self.months[idx]
    }
}

static EN_LABELS: Labels = Labels {
    locale: Locale::En,
    months: [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ],
    present: "Present",
    summary: "Summary",
    education: "Education",
    experience: "Experience",
    skills: "Skills",
    achievements: "Achievements",
    languages: "Languages",
    phone: "Phone",
    email: "Email",
    address: "Address",
    linkedin: "LinkedIn",
    website: "Website",
    placeholders: PersonalPlaceholders {
        full_name: "Your Name",
        email: "email@example.com",
        phone: "+1 (555) 000-0000",
        address: "City, Country",
        linkedin: "linkedin.com/in/your-profile",
        website: "your-website.com",
        summary: "A short professional summary goes here.",
    },
    skill_levels: ["Beginner", "Intermediate", "Advanced", "Expert"],
    skill_categories: ["Technical", "Soft skills", "Languages", "Other"],
    proficiencies: [
        "A1 - Beginner",
        "A2 - Elementary",
        "B1 - Intermediate",
        "B2 - Upper intermediate",
        "C1 - Advanced",
        "C2 - Proficient",
        "Native",
    ],
};

static RU_LABELS: Labels = Labels {
    locale: Locale::Ru,
    months: [
        "январь", "февраль", "март", "апрель", "май", "июнь", "июль", "август", "сентябрь",
        "октябрь", "ноябрь", "декабрь",
    ],
    present: "настоящее время",
    summary: "О себе",
    education: "Образование",
    experience: "Опыт работы",
    skills: "Навыки",
    achievements: "Достижения",
    languages: "Языки",
    phone: "Телефон",
    email: "Email",
    address: "Адрес",
    linkedin: "LinkedIn",
    website: "Сайт",
    placeholders: PersonalPlaceholders {
        full_name: "Ваше имя",
        email: "email@example.com",
        phone: "+7 (999) 000-00-00",
        address: "Город, страна",
        linkedin: "linkedin.com/in/profile",
        website: "ваш-сайт.ru",
        summary: "Кратко расскажите о себе.",
    },
    skill_levels: ["Начальный", "Средний", "Продвинутый", "Эксперт"],
    skill_categories: ["Технические", "Гибкие навыки", "Языки", "Другое"],
    proficiencies: [
        "A1 - Начальный",
        "A2 - Элементарный",
        "B1 - Средний",
        "B2 - Выше среднего",
        "C1 - Продвинутый",
        "C2 - Владение в совершенстве",
        "Родной",
    ],
};

/// Returns the static label table for a locale.
pub fn labels_for(locale: Locale) -> &'static Labels {
    match locale {
        Locale::En => &EN_LABELS,
        Locale::Ru => &RU_LABELS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_enum_value_has_a_label() {
        for locale in [Locale::En, Locale::Ru] {
            let labels = labels_for(locale);
            for level in SkillLevel::ALL {
                assert!(!labels.skill_level(level).is_empty());
            }
            for category in SkillCategory::ALL {
                assert!(!labels.skill_category(category).is_empty());
            }
            for p in Proficiency::ALL {
                assert!(!labels.proficiency(p).is_empty());
            }
        }
    }

    #[test]
    fn test_cefr_labels_carry_the_code() {
        let labels = labels_for(Locale::En);
        assert_eq!(labels.proficiency(Proficiency::B2), "B2 - Upper intermediate");
        assert_eq!(labels.proficiency(Proficiency::Native), "Native");
        assert_eq!(labels.skill_level(SkillLevel::Expert), "Expert");
        assert_eq!(labels.skill_category(SkillCategory::Soft), "Soft skills");
    }

    #[test]
    fn test_month_is_one_based() {
        let labels = labels_for(Locale::En);
        assert_eq!(labels.month(1), "January");
        assert_eq!(labels.month(12), "December");
        assert_eq!(labels_for(Locale::Ru).month(5), "май");
    }

    #[test]
    fn test_locale_parses_case_insensitively() {
        assert_eq!("RU".parse::<Locale>(), Ok(Locale::Ru));
        assert_eq!(" en ".parse::<Locale>(), Ok(Locale::En));
        assert!("de".parse::<Locale>().is_err());
    }
}
