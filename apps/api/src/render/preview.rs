//! Preview payload: bound markup plus everything a client needs to render
//! the résumé itself.

use serde::Serialize;

use crate::models::resume::ResumeAggregate;
use crate::models::template::TemplateRecord;
use crate::render::binder::bind_resume;
use crate::render::labels::Labels;
use crate::render::photo::PhotoBinding;
use crate::render::stylesheet::compose_stylesheet;

const TOTAL_SECTIONS: usize = 6;

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub html: String,
    pub css: String,
    pub template_html: String,
    pub data: ResumeAggregate,
    pub stats: PreviewStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreviewStats {
    pub sections_count: usize,
    pub completion_percentage: u32,
}

impl PreviewStats {
    pub fn for_resume(resume: &ResumeAggregate) -> Self {
        let filled = resume.sections_count();
        PreviewStats {
            sections_count: filled,
            completion_percentage: (filled as f64 / TOTAL_SECTIONS as f64 * 100.0).round() as u32,
        }
    }
}

pub fn build_preview(
    resume: ResumeAggregate,
    template: &TemplateRecord,
    photo: &PhotoBinding,
    labels: &Labels,
) -> PreviewResponse {
    let html = bind_resume(&template.html_structure, &resume, photo, labels);
    PreviewResponse {
        html,
        css: compose_stylesheet(&template.css_styles),
        template_html: template.html_structure.clone(),
        stats: PreviewStats::for_resume(&resume),
        data: resume,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{LanguageRecord, PersonalInfo, Proficiency};
    use crate::render::labels::{labels_for, Locale};
    use uuid::Uuid;

    fn resume() -> ResumeAggregate {
        ResumeAggregate {
            id: Uuid::new_v4(),
            title: "CV".to_string(),
            template_id: None,
            personal_info: None,
            education: vec![],
            work_experience: vec![],
            skills: vec![],
            achievements: vec![],
            languages: vec![],
            photo: None,
        }
    }

    #[test]
    fn test_completion_percentage_rounds() {
        let mut r = resume();
        assert_eq!(
            PreviewStats::for_resume(&r),
            PreviewStats {
                sections_count: 0,
                completion_percentage: 0
            }
        );
        r.personal_info = Some(PersonalInfo::default());
        assert_eq!(PreviewStats::for_resume(&r).completion_percentage, 17);
        r.languages.push(LanguageRecord {
            language: "French".to_string(),
            proficiency: Proficiency::A2,
            order: 0,
        });
        let stats = PreviewStats::for_resume(&r);
        assert_eq!(stats.sections_count, 2);
        assert_eq!(stats.completion_percentage, 33);
    }

    #[test]
    fn test_preview_carries_bound_and_raw_markup() {
        let template = TemplateRecord {
            id: Uuid::new_v4(),
            name: "Plain".to_string(),
            html_structure: "<h1>{{full_name}}</h1>".to_string(),
            css_styles: "h1 { color: navy; }".to_string(),
            is_active: true,
        };
        let preview = build_preview(
            resume(),
            &template,
            &PhotoBinding::absent(),
            labels_for(Locale::En),
        );
        assert_eq!(preview.html, "<h1>Your Name</h1>");
        assert_eq!(preview.template_html, "<h1>{{full_name}}</h1>");
        assert!(preview.css.starts_with("h1 { color: navy; }"));
        assert!(preview.css.contains("!important"));

        let json = serde_json::to_value(&preview).unwrap();
        assert_eq!(json["stats"]["sections_count"], 0);
        assert_eq!(json["data"]["title"], "CV");
    }
}
