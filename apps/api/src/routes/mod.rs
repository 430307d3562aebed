pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::evaluation::handlers::handle_recommend;
use crate::state::AppState;
use crate::ui;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Browser form
        .route("/", get(ui::form_page).post(ui::handle_submit))
        // JSON API
        .route("/recommend", post(handle_recommend))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{CompletionBackend, LlmError};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    const RESUME_PDF: &[u8] = include_bytes!("../../fixtures/resume.pdf");
    const VALID_JSON: &str = r#"{"score":85,"strengths":["Go experience"],"concerns":[],"skill_match":{"Go":true},"recommendation":"Strong candidate"}"#;
    const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

    enum StubReply {
        Content(&'static str),
        Transport(&'static str),
        Api(u16, &'static str),
    }

    struct StubBackend {
        reply: StubReply,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionBackend for StubBackend {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                StubReply::Content(s) => Ok(s.to_string()),
                StubReply::Transport(msg) => Err(LlmError::Transport(msg.to_string())),
                StubReply::Api(status, msg) => Err(LlmError::Api {
                    status: *status,
                    message: msg.to_string(),
                }),
            }
        }
    }

    fn stub_app(reply: StubReply) -> (Router, Arc<StubBackend>) {
        let backend = Arc::new(StubBackend {
            reply,
            calls: AtomicUsize::new(0),
        });
        let state = AppState {
            backend: backend.clone(),
        };
        (build_router(state), backend)
    }

    fn multipart_request(
        uri: &str,
        fields: &[(&str, &str)],
        resume: Option<&[u8]>,
    ) -> Request<Body> {
        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        if let Some(pdf) = resume {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume_file\"; filename=\"resume.pdf\"\r\nContent-Type: application/pdf\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(pdf);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn engineering_fields() -> Vec<(&'static str, &'static str)> {
        vec![
            ("job_title", "Backend Engineer"),
            ("department", "Engineering"),
            ("job_description", "3+ years Go experience"),
        ]
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (app, _) = stub_app(StubReply::Content(VALID_JSON));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_recommend_success_echoes_stub_evaluation() {
        let (app, backend) = stub_app(StubReply::Content(VALID_JSON));
        let request = multipart_request("/recommend", &engineering_fields(), Some(RESUME_PDF));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["score"].as_f64(), Some(85.0));
        assert_eq!(json["strengths"], serde_json::json!(["Go experience"]));
        assert_eq!(json["concerns"], serde_json::json!([]));
        assert_eq!(json["skill_match"]["Go"], serde_json::json!(true));
        assert_eq!(json["recommendation"], "Strong candidate");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recommend_unknown_department_is_422_with_no_upstream_call() {
        let (app, backend) = stub_app(StubReply::Content(VALID_JSON));
        let fields = vec![
            ("job_title", "Backend Engineer"),
            ("department", "Finance"),
            ("job_description", "3+ years Go experience"),
        ];
        let request = multipart_request("/recommend", &fields, Some(RESUME_PDF));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "INVALID_INPUT");
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Finance"));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_recommend_missing_field_is_422() {
        let (app, backend) = stub_app(StubReply::Content(VALID_JSON));
        let fields = vec![
            ("job_title", "Backend Engineer"),
            ("department", "Engineering"),
        ];
        let request = multipart_request("/recommend", &fields, Some(RESUME_PDF));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("job_description"));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_recommend_unreadable_resume_is_400_with_no_upstream_call() {
        let (app, backend) = stub_app(StubReply::Content(VALID_JSON));
        let request = multipart_request(
            "/recommend",
            &engineering_fields(),
            Some(b"this is not a pdf"),
        );

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "DOCUMENT_PARSE_ERROR");
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_recommend_transport_failure_is_502() {
        let (app, _) = stub_app(StubReply::Transport("connection timed out"));
        let request = multipart_request("/recommend", &engineering_fields(), Some(RESUME_PDF));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "UPSTREAM_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_recommend_upstream_error_is_502_with_status_detail() {
        let (app, _) = stub_app(StubReply::Api(503, "service overloaded"));
        let request = multipart_request("/recommend", &engineering_fields(), Some(RESUME_PDF));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "UPSTREAM_ERROR");
        assert!(json["error"]["message"].as_str().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_recommend_schema_mismatch_is_500_without_leaking_raw() {
        let (app, _) = stub_app(StubReply::Content(r#"{"totally": "wrong-shape"}"#));
        let request = multipart_request("/recommend", &engineering_fields(), Some(RESUME_PDF));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "RESPONSE_VALIDATION_ERROR");
        // The raw upstream payload goes to logs, never to the caller.
        assert!(!json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("wrong-shape"));
    }

    #[tokio::test]
    async fn test_form_page_serves_upload_form() {
        let (app, _) = stub_app(StubReply::Content(VALID_JSON));
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("<form method=\"post\""));
        assert!(html.contains("resume_file"));
    }

    #[tokio::test]
    async fn test_form_submit_renders_evaluation_inline() {
        let (app, _) = stub_app(StubReply::Content(VALID_JSON));
        let request = multipart_request("/", &engineering_fields(), Some(RESUME_PDF));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Score: 85/100"));
        assert!(html.contains("Strong candidate"));
    }

    #[tokio::test]
    async fn test_form_submit_error_stays_on_usable_form() {
        let (app, backend) = stub_app(StubReply::Content(VALID_JSON));
        let fields = vec![
            ("job_title", "Backend Engineer"),
            ("department", "Finance"),
            ("job_description", "3+ years Go experience"),
        ];
        let request = multipart_request("/", &fields, Some(RESUME_PDF));

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Finance"));
        assert!(html.contains("<form method=\"post\""));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }
}
