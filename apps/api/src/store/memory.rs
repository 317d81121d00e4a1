use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeAggregate;
use crate::models::template::TemplateRecord;
use crate::store::ResumeStore;

/// HashMap-backed store. Child lists are normalised on insert.
#[derive(Default)]
pub struct MemoryResumeStore {
    resumes: RwLock<HashMap<Uuid, ResumeAggregate>>,
    templates: RwLock<HashMap<Uuid, TemplateRecord>>,
}

impl MemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_resume(&self, mut resume: ResumeAggregate) {
        resume.sort_records();
        self.resumes.write().await.insert(resume.id, resume);
    }

    pub async fn insert_template(&self, template: TemplateRecord) {
        self.templates.write().await.insert(template.id, template);
    }
}

#[async_trait]
impl ResumeStore for MemoryResumeStore {
    async fn load_resume(&self, id: Uuid) -> Result<Option<ResumeAggregate>, AppError> {
        Ok(self.resumes.read().await.get(&id).cloned())
    }

    async fn load_template(&self, id: Uuid) -> Result<Option<TemplateRecord>, AppError> {
        Ok(self.templates.read().await.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::LanguageRecord;
    use crate::models::resume::Proficiency;

    #[tokio::test]
    async fn test_insert_sorts_and_load_returns_clone() {
        let store = MemoryResumeStore::new();
        let id = Uuid::new_v4();
        store
            .insert_resume(ResumeAggregate {
                id,
                title: "CV".to_string(),
                template_id: None,
                personal_info: None,
                education: vec![],
                work_experience: vec![],
                skills: vec![],
                achievements: vec![],
                languages: vec![
                    LanguageRecord {
                        language: "German".to_string(),
                        proficiency: Proficiency::B1,
                        order: 2,
                    },
                    LanguageRecord {
                        language: "English".to_string(),
                        proficiency: Proficiency::C2,
                        order: 1,
                    },
                ],
                photo: None,
            })
            .await;

        let loaded = store.load_resume(id).await.unwrap().unwrap();
        let names: Vec<_> = loaded.languages.iter().map(|l| l.language.as_str()).collect();
        assert_eq!(names, vec!["English", "German"]);
        assert!(store.load_resume(Uuid::new_v4()).await.unwrap().is_none());
        assert!(store.load_template(Uuid::new_v4()).await.unwrap().is_none());
    }
}
