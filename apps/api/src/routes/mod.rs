pub mod health;

use axum::{routing::get, Router};
use tower_http::services::ServeDir;

use crate::export::handlers as export;
use crate::render::handlers as render;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let media = ServeDir::new(&state.config.media_root);

    Router::new()
        .route("/health", get(health::health_handler))
        // Export API
        .route(
            "/api/v1/resumes/:id/export/pdf",
            get(export::handle_export_pdf),
        )
        .route(
            "/api/v1/resumes/:id/export/docx",
            get(export::handle_export_docx),
        )
        // Render API
        .route("/api/v1/resumes/:id/preview", get(render::handle_preview))
        .route(
            "/api/v1/resumes/:id/skills/by-category",
            get(render::handle_skills_by_category),
        )
        // Stored photos, for the URL photo strategy
        .nest_service("/media", media)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};
    use std::path::Path;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::config::Config;
    use crate::export::pdf::{BuiltinConverter, ConverterKind};
    use crate::models::resume::{
        PersonalInfo, PhotoAsset, ResumeAggregate, SkillCategory, SkillLevel, SkillRecord,
    };
    use crate::models::template::TemplateRecord;
    use crate::render::labels::{labels_for, Locale};
    use crate::render::photo::{PhotoStrategy, UrlPhotoEmbedder};
    use crate::store::memory::MemoryResumeStore;

    fn test_config(media_root: &Path) -> Config {
        Config {
            database_url: "postgres://unused".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            media_root: media_root.to_path_buf(),
            media_url: "/media/".to_string(),
            photo_strategy: PhotoStrategy::Url,
            pdf_converter: ConverterKind::Builtin,
            pdf_converter_bin: "weasyprint".to_string(),
            locale: Locale::En,
        }
    }

    fn app(store: MemoryResumeStore, media_root: &Path) -> Router {
        build_router(AppState {
            store: Arc::new(store),
            config: test_config(media_root),
            converter: Arc::new(BuiltinConverter::default()),
            preview_photo: Arc::new(UrlPhotoEmbedder::new("/media/")),
            labels: labels_for(Locale::En),
        })
    }

    fn resume(template_id: Option<Uuid>) -> ResumeAggregate {
        ResumeAggregate {
            id: Uuid::new_v4(),
            title: "Senior Backend CV".to_string(),
            template_id,
            personal_info: Some(PersonalInfo {
                full_name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                ..Default::default()
            }),
            education: vec![],
            work_experience: vec![],
            skills: vec![
                SkillRecord {
                    name: "Mentoring".to_string(),
                    level: SkillLevel::Advanced,
                    category: SkillCategory::Soft,
                    order: 0,
                },
                SkillRecord {
                    name: "Rust".to_string(),
                    level: SkillLevel::Expert,
                    category: SkillCategory::Technical,
                    order: 1,
                },
            ],
            achievements: vec![],
            languages: vec![],
            photo: Some(PhotoAsset {
                path: "photos/jane.jpg".to_string(),
            }),
        }
    }

    fn template() -> TemplateRecord {
        TemplateRecord {
            id: Uuid::new_v4(),
            name: "Classic".to_string(),
            html_structure: "<h1>{{full_name}}</h1>{{#if photo}}<img src=\"{{photo}}\">{{/if}}"
                .to_string(),
            css_styles: "h1 { color: navy; }".to_string(),
            is_active: true,
        }
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn test_health() {
        let media = tempfile::tempdir().unwrap();
        let response = get(app(MemoryResumeStore::new(), media.path()), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "resume-export");
    }

    #[tokio::test]
    async fn test_unknown_resume_is_404_on_every_endpoint() {
        let media = tempfile::tempdir().unwrap();
        let id = Uuid::new_v4();
        for suffix in ["export/pdf", "export/docx", "preview", "skills/by-category"] {
            let response = get(
                app(MemoryResumeStore::new(), media.path()),
                &format!("/api/v1/resumes/{id}/{suffix}"),
            )
            .await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{suffix}");
            let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
            assert_eq!(body["error"]["code"], "NOT_FOUND");
        }
    }

    #[tokio::test]
    async fn test_pdf_export_headers_and_body() {
        let media = tempfile::tempdir().unwrap();
        let store = MemoryResumeStore::new();
        let r = resume(None);
        let id = r.id;
        store.insert_resume(r).await;

        let response = get(
            app(store, media.path()),
            &format!("/api/v1/resumes/{id}/export/pdf"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Senior_Backend_CV.pdf\"; filename*=UTF-8''Senior_Backend_CV.pdf"
        );
        assert!(body_bytes(response).await.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_malformed_template_is_export_failure() {
        let media = tempfile::tempdir().unwrap();
        let store = MemoryResumeStore::new();
        let mut broken = template();
        broken.html_structure = "<h1>{{full_name}}</h1><p class=\"open".to_string();
        let r = resume(Some(broken.id));
        let id = r.id;
        store.insert_template(broken).await;
        store.insert_resume(r).await;

        let response = get(
            app(store, media.path()),
            &format!("/api/v1/resumes/{id}/export/pdf"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["error"]["code"], "EXPORT_FAILED");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("PDF conversion failed"));
    }

    #[tokio::test]
    async fn test_docx_export_is_a_zip_package() {
        let media = tempfile::tempdir().unwrap();
        let store = MemoryResumeStore::new();
        let r = resume(None);
        let id = r.id;
        store.insert_resume(r).await;

        let response = get(
            app(store, media.path()),
            &format!("/api/v1/resumes/{id}/export/docx"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.contains("Senior_Backend_CV.docx"));

        let bytes = body_bytes(response).await;
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        assert!(xml.contains("Jane Doe"));
    }

    #[tokio::test]
    async fn test_preview_without_template_is_400() {
        let media = tempfile::tempdir().unwrap();
        let store = MemoryResumeStore::new();
        let r = resume(None);
        let id = r.id;
        store.insert_resume(r).await;

        let response = get(
            app(store, media.path()),
            &format!("/api/v1/resumes/{id}/preview"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_preview_binds_with_url_photo() {
        let media = tempfile::tempdir().unwrap();
        let store = MemoryResumeStore::new();
        let t = template();
        let r = resume(Some(t.id));
        let id = r.id;
        store.insert_template(t).await;
        store.insert_resume(r).await;

        let response = get(
            app(store, media.path()),
            &format!("/api/v1/resumes/{id}/preview"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(
            body["html"],
            "<h1>Jane Doe</h1><img src=\"/media/photos/jane.jpg\">"
        );
        assert!(body["css"].as_str().unwrap().starts_with("h1 { color: navy; }"));
        assert_eq!(body["template_html"], template().html_structure);
        assert_eq!(body["data"]["title"], "Senior Backend CV");
        // personal info + skills
        assert_eq!(body["stats"]["sections_count"], 2);
        assert_eq!(body["stats"]["completion_percentage"], 33);
    }

    #[tokio::test]
    async fn test_skills_by_category_order() {
        let media = tempfile::tempdir().unwrap();
        let store = MemoryResumeStore::new();
        let r = resume(None);
        let id = r.id;
        store.insert_resume(r).await;

        let response = get(
            app(store, media.path()),
            &format!("/api/v1/resumes/{id}/skills/by-category"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        let groups = body.as_array().unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0]["category"], "technical");
        assert_eq!(groups[0]["skills"][0]["name"], "Rust");
        assert_eq!(groups[0]["skills"][0]["level_label"], "Expert");
        assert_eq!(groups[1]["category"], "soft");
    }

    #[tokio::test]
    async fn test_media_is_served_from_media_root() {
        let media = tempfile::tempdir().unwrap();
        std::fs::create_dir(media.path().join("photos")).unwrap();
        std::fs::write(media.path().join("photos/jane.jpg"), b"\xFF\xD8\xFF").unwrap();

        let response = get(
            app(MemoryResumeStore::new(), media.path()),
            "/media/photos/jane.jpg",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_bytes(response).await, b"\xFF\xD8\xFF".to_vec());
    }
}
