//! Read-only access to résumé aggregates and templates.
//!
//! `AppState` holds an `Arc<dyn ResumeStore>`. Production uses
//! [`postgres::PgResumeStore`]; tests use the in-memory store.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeAggregate;
use crate::models::template::TemplateRecord;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Full aggregate with child lists in display order, or `None` if the id
    /// is unknown.
    async fn load_resume(&self, id: Uuid) -> Result<Option<ResumeAggregate>, AppError>;

    async fn load_template(&self, id: Uuid) -> Result<Option<TemplateRecord>, AppError>;
}

/// Loads a résumé or fails with `NotFound`.
pub async fn require_resume(store: &dyn ResumeStore, id: Uuid) -> Result<ResumeAggregate, AppError> {
    store
        .load_resume(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

/// The résumé's assigned template. A dangling reference counts as no template.
pub async fn assigned_template(
    store: &dyn ResumeStore,
    resume: &ResumeAggregate,
) -> Result<Option<TemplateRecord>, AppError> {
    match resume.template_id {
        Some(template_id) => store.load_template(template_id).await,
        None => Ok(None),
    }
}
