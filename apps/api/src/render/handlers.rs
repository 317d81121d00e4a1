use anyhow::Context;
use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::preview::{build_preview, PreviewResponse};
use crate::render::sections::{skills_by_category, SkillGroup};
use crate::state::AppState;
use crate::store::{assigned_template, require_resume};

/// GET /api/v1/resumes/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<PreviewResponse>, AppError> {
    let resume = require_resume(state.store.as_ref(), resume_id).await?;
    let template = assigned_template(state.store.as_ref(), &resume)
        .await?
        .ok_or_else(|| {
            AppError::Validation(format!("Resume {resume_id} has no template assigned"))
        })?;

    let embedder = state.preview_photo.clone();
    let labels = state.labels;
    let preview = tokio::task::spawn_blocking(move || {
        let photo = embedder.embed(resume.photo.as_ref());
        build_preview(resume, &template, &photo, labels)
    })
    .await
    .context("preview task failed")?;

    Ok(Json(preview))
}

/// GET /api/v1/resumes/:id/skills/by-category
pub async fn handle_skills_by_category(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<Vec<SkillGroup>>, AppError> {
    let resume = require_resume(state.store.as_ref(), resume_id).await?;
    Ok(Json(skills_by_category(&resume.skills, state.labels)))
}
