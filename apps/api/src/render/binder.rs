//! Placeholder binding for a résumé against author template markup.
//!
//! Token vocabulary:
//! - personal fields: `full_name`, `email`, `phone`, `address`, `linkedin`,
//!   `website`, `summary`
//! - section fragments: `work_experience`, `education`, `skills`,
//!   `achievements` (alias `rewards`), `languages`
//! - `photo` value and the `photo` condition
//!
//! Any other token is left in the output untouched.

use tracing::debug;

use crate::models::resume::{PersonalInfo, ResumeAggregate};
use crate::render::escape_html;
use crate::render::labels::Labels;
use crate::render::photo::PhotoBinding;
use crate::render::sections::{expand_sections, SectionFragments};
use crate::render::template::{Bindings, Template};

pub const PHOTO_CONDITION: &str = "photo";

/// Builds the full binding map for one résumé.
pub fn resume_bindings(
    resume: &ResumeAggregate,
    fragments: &SectionFragments,
    photo: &PhotoBinding,
    labels: &Labels,
) -> Bindings {
    let mut bindings = Bindings::new();
    bind_personal(&mut bindings, resume.personal_info.as_ref(), labels);

    bindings
        .set("work_experience", fragments.work_experience.as_str())
        .set("education", fragments.education.as_str())
        .set("skills", fragments.skills.as_str())
        .set("achievements", fragments.achievements.as_str())
        .set("rewards", fragments.achievements.as_str())
        .set("languages", fragments.languages.as_str());

    bindings
        .set("photo", escape_html(&photo.value))
        .set_condition(PHOTO_CONDITION, photo.present);
    bindings
}

/// Absent personal block → display placeholders; present block → its values,
/// with unset optional fields as "".
fn bind_personal(bindings: &mut Bindings, personal: Option<&PersonalInfo>, labels: &Labels) {
    match personal {
        Some(p) => {
            bindings
                .set("full_name", escape_html(&p.full_name))
                .set("email", escape_html(&p.email))
                .set("phone", escape_html(&p.phone))
                .set("address", escape_html(&p.address))
                .set("linkedin", escape_html(&p.linkedin))
                .set("website", escape_html(&p.website))
                .set("summary", escape_html(&p.summary));
        }
        None => {
            let ph = &labels.placeholders;
            bindings
                .set("full_name", escape_html(ph.full_name))
                .set("email", escape_html(ph.email))
                .set("phone", escape_html(ph.phone))
                .set("address", escape_html(ph.address))
                .set("linkedin", escape_html(ph.linkedin))
                .set("website", escape_html(ph.website))
                .set("summary", escape_html(ph.summary));
        }
    }
}

/// Binds a résumé into template markup in a single parse/render pass.
pub fn bind_resume(
    markup: &str,
    resume: &ResumeAggregate,
    photo: &PhotoBinding,
    labels: &Labels,
) -> String {
    let fragments = expand_sections(resume, labels);
    let bindings = resume_bindings(resume, &fragments, photo, labels);
    let template = Template::parse(markup);

    let unresolved = template.unresolved(&bindings);
    if !unresolved.is_empty() {
        debug!(
            resume_id = %resume.id,
            tokens = ?unresolved,
            "Template has unresolved placeholders; leaving them verbatim"
        );
    }
    template.render(&bindings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{AchievementRecord, SkillCategory, SkillLevel, SkillRecord};
    use crate::render::labels::{labels_for, Locale};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn en() -> &'static Labels {
        labels_for(Locale::En)
    }

    fn resume(personal: Option<PersonalInfo>) -> ResumeAggregate {
        ResumeAggregate {
            id: Uuid::new_v4(),
            title: "My CV".to_string(),
            template_id: None,
            personal_info: personal,
            education: vec![],
            work_experience: vec![],
            skills: vec![],
            achievements: vec![],
            languages: vec![],
            photo: None,
        }
    }

    fn jane() -> PersonalInfo {
        PersonalInfo {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_every_occurrence_is_bound() {
        let html = bind_resume(
            "<h1>{{full_name}}</h1><footer>{{full_name}}</footer><p>{{full_name}}</p>",
            &resume(Some(jane())),
            &PhotoBinding::absent(),
            en(),
        );
        assert_eq!(html.matches("Jane Doe").count(), 3, "got {html}");
        assert!(!html.contains("{{full_name}}"));
    }

    #[test]
    fn test_absent_personal_block_uses_placeholders() {
        let html = bind_resume(
            "{{full_name}}|{{email}}|{{summary}}",
            &resume(None),
            &PhotoBinding::absent(),
            en(),
        );
        assert_eq!(
            html,
            "Your Name|email@example.com|A short professional summary goes here."
        );
    }

    #[test]
    fn test_present_block_with_missing_fields_binds_empty() {
        let html = bind_resume(
            "[{{phone}}][{{address}}][{{linkedin}}][{{website}}][{{summary}}]",
            &resume(Some(jane())),
            &PhotoBinding::absent(),
            en(),
        );
        assert_eq!(html, "[][][][][]");
    }

    #[test]
    fn test_rewards_alias_binds_achievements() {
        let mut r = resume(Some(jane()));
        r.achievements.push(AchievementRecord {
            title: "Best Paper".to_string(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2021, 5, 1),
            order: 0,
        });
        let html = bind_resume(
            "<a>{{achievements}}</a><b>{{rewards}}</b>",
            &r,
            &PhotoBinding::absent(),
            en(),
        );
        assert_eq!(html.matches("Best Paper").count(), 2);
        let a = &html[html.find("<a>").unwrap()..html.find("</a>").unwrap()];
        let b = &html[html.find("<b>").unwrap()..html.find("</b>").unwrap()];
        assert_eq!(a[3..], b[3..], "alias must carry identical content");
    }

    #[test]
    fn test_unknown_tokens_stay_verbatim() {
        let html = bind_resume(
            "{{full_name}} {{favourite_color}}",
            &resume(Some(jane())),
            &PhotoBinding::absent(),
            en(),
        );
        assert_eq!(html, "Jane Doe {{favourite_color}}");
    }

    #[test]
    fn test_personal_values_are_escaped() {
        let mut p = jane();
        p.full_name = "<script>x</script>".to_string();
        let html = bind_resume("{{full_name}}", &resume(Some(p)), &PhotoBinding::absent(), en());
        assert_eq!(html, "&lt;script&gt;x&lt;/script&gt;");
    }

    #[test]
    fn test_photo_condition_follows_binding() {
        let markup = "{{#if photo}}<img src=\"{{photo}}\">{{else}}<span>no photo</span>{{/if}}";
        let present = PhotoBinding {
            value: "data:image/png;base64,AAAA".to_string(),
            present: true,
        };
        let with = bind_resume(markup, &resume(Some(jane())), &present, en());
        assert_eq!(with, "<img src=\"data:image/png;base64,AAAA\">");

        let without = bind_resume(markup, &resume(Some(jane())), &PhotoBinding::absent(), en());
        assert_eq!(without, "<span>no photo</span>");
        for marker in ["{{#if", "{{else}}", "{{/if}}", "{{photo}}", "<img"] {
            assert!(!without.contains(marker), "{marker} leaked into {without}");
        }
    }

    #[test]
    fn test_skill_fragment_is_inserted_unescaped() {
        let mut r = resume(Some(jane()));
        r.skills.push(SkillRecord {
            name: "Rust".to_string(),
            level: SkillLevel::Expert,
            category: SkillCategory::Technical,
            order: 0,
        });
        let html = bind_resume("<div>{{skills}}</div>", &r, &PhotoBinding::absent(), en());
        assert!(html.contains("<span class=\"skill-name\">Rust</span>"), "got {html}");
    }
}
