pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::authoring::handlers as authoring;
use crate::evaluation::handlers as evaluation;
use crate::state::AppState;

/// Upper bound for one request body (a full batch of résumé uploads).
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Evaluation API
        .route("/api/v1/rubric", post(evaluation::handle_extract_rubric))
        .route("/api/v1/evaluate", post(evaluation::handle_evaluate))
        .route("/api/v1/match", post(evaluation::handle_match))
        .route("/api/v1/match/upload", post(evaluation::handle_match_upload))
        .route("/api/v1/emails", post(evaluation::handle_draft_email))
        // Job description authoring
        .route(
            "/api/v1/job-descriptions/generate",
            post(authoring::handle_generate_job_description),
        )
        .route(
            "/api/v1/job-descriptions/upload",
            post(authoring::handle_upload_job_description),
        )
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::{Config, PipelineSettings};
    use crate::evaluation::matching::MatchingPipeline;
    use crate::evaluation::prompts::RUBRIC_SYSTEM;
    use crate::llm_client::prompts::{EMPLOYER_BRANDING, HR_PROFESSIONAL};
    use crate::llm_client::testing::{Reply, ScriptedInference};

    const RUBRIC: &str = r#"{
        "role_type": "technical",
        "industry_context": "Fintech",
        "hard_skills": [{"name": "Rust", "importance": "high"}],
        "soft_skills": [{"name": "Communication", "importance": "medium"}],
        "experience_requirements": []
    }"#;

    fn app(max_resumes: usize) -> Router {
        let llm = ScriptedInference::new(Reply::text(
            r#"{"criteria": [{"id": "H1", "score": 9}, {"id": "S1", "score": 7}],
                "remarks": "Solid Rust background."}"#,
        ))
        .on_system(RUBRIC_SYSTEM, Reply::text(RUBRIC))
        .on_system(EMPLOYER_BRANDING, Reply::text("Dear candidate,"))
        .on_system(HR_PROFESSIONAL, Reply::text("# Senior Rust Engineer"))
        .on_prompt("WEAK-RESUME", Reply::text(r#"{"criteria": [{"id": "H1", "score": 2}, {"id": "S1", "score": 3}]}"#));

        let config = Config {
            openai_api_key: "test-key".to_string(),
            openai_base_url: "http://localhost:0".to_string(),
            model_name: "test-model".to_string(),
            max_resumes,
            llm_timeout: Duration::from_secs(1),
            port: 0,
            rust_log: "info".to_string(),
        };
        build_router(AppState {
            pipeline: MatchingPipeline::new(Arc::new(llm), PipelineSettings::default()),
            config,
        })
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(10)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_rubric_endpoint_assigns_ids() {
        let (status, body) =
            post_json(app(10), "/api/v1/rubric", json!({"jd_text": "Rust engineer"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["role_type"], "technical");
        assert_eq!(body["hard_skills"][0]["id"], "H1");
        assert_eq!(body["soft_skills"][0]["id"], "S1");
    }

    #[tokio::test]
    async fn test_evaluate_endpoint() {
        let (status, body) = post_json(
            app(10),
            "/api/v1/evaluate",
            json!({"resume_text": "Rust for 6 years", "jd_text": "Rust engineer"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        // (9×1.5 + 7×1.0) / 2.5 × 10 = 82
        assert!((body["score"].as_f64().unwrap() - 82.0).abs() < 1e-9);
        assert_eq!(body["score_source"], "weighted");
        assert_eq!(body["missing_skills"], json!([]));
    }

    #[tokio::test]
    async fn test_empty_job_description_is_rejected() {
        let (status, body) = post_json(
            app(10),
            "/api/v1/evaluate",
            json!({"resume_text": "Rust", "jd_text": "   "}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_match_endpoint() {
        let (status, body) = post_json(
            app(10),
            "/api/v1/match",
            json!({
                "job_description": "Rust engineer",
                "position": "Backend Engineer",
                "resumes": [
                    {"filename": "weak.pdf", "text": "WEAK-RESUME"},
                    {"filename": "strong.pdf", "text": "Rust for 6 years"}
                ]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["best_candidate"], "strong.pdf");
        assert_eq!(body["candidates"][0]["filename"], "weak.pdf");
        assert_eq!(
            body["candidates"][0]["missing_skills"],
            json!(["Rust", "Communication"])
        );
        assert_eq!(body["interview_email"], "Dear candidate,");
        assert_eq!(body["rejection_email"], "Dear candidate,");
    }

    #[tokio::test]
    async fn test_match_rejects_oversized_batch() {
        let resumes: Vec<Value> = (0..3)
            .map(|i| json!({"filename": format!("{i}.pdf"), "text": "Rust"}))
            .collect();
        let (status, body) = post_json(
            app(2),
            "/api/v1/match",
            json!({"job_description": "Rust engineer", "resumes": resumes}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Maximum 2 resumes allowed");
    }

    #[tokio::test]
    async fn test_match_rejects_duplicate_filenames() {
        let (status, body) = post_json(
            app(10),
            "/api/v1/match",
            json!({
                "job_description": "Rust engineer",
                "resumes": [
                    {"filename": "cv.pdf", "text": "Rust for 6 years"},
                    {"filename": "cv.pdf", "text": "WEAK-RESUME"}
                ]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Duplicate resume filename: cv.pdf");
    }

    #[tokio::test]
    async fn test_match_upload_skips_unsupported_files() {
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"job_description\"\r\n\r\nRust engineer\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"resumes\"; filename=\"strong.txt\"\r\n\
             Content-Type: text/plain\r\n\r\nRust for 6 years\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"resumes\"; filename=\"cv.doc\"\r\n\
             Content-Type: application/octet-stream\r\n\r\nbinary\r\n\
             --{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/match/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = app(10).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["candidates"].as_array().unwrap().len(), 1);
        assert_eq!(body["best_candidate"], "strong.txt");
        assert_eq!(body["candidates"][0]["resume_excerpt"], "Rust for 6 years");
    }

    #[tokio::test]
    async fn test_match_upload_rejects_duplicate_filenames() {
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"job_description\"\r\n\r\nRust engineer\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"resumes\"; filename=\"cv.txt\"\r\n\
             Content-Type: text/plain\r\n\r\nRust for 6 years\r\n\
             --{b}\r\nContent-Disposition: form-data; name=\"resumes\"; filename=\"cv.txt\"\r\n\
             Content-Type: text/plain\r\n\r\nWEAK-RESUME\r\n\
             --{b}--\r\n",
            b = boundary
        );
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/match/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = app(10).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["message"], "Duplicate resume filename: cv.txt");
    }

    #[tokio::test]
    async fn test_email_endpoint_defaults() {
        let (status, body) =
            post_json(app(10), "/api/v1/emails", json!({"email_type": "rejection"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email_content"], "Dear candidate,");
    }

    #[tokio::test]
    async fn test_generate_job_description_endpoint() {
        let (status, body) = post_json(
            app(10),
            "/api/v1/job-descriptions/generate",
            json!({
                "job_title": "Senior Rust Engineer",
                "years_of_experience": "5+",
                "must_have_skills": "Rust"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["job_description"], "# Senior Rust Engineer");
    }
}
