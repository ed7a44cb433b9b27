pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::intake::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/tech-catalog", get(handlers::handle_tech_catalog))
        // Intake wizard
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route("/api/v1/sessions/:id/start", post(handlers::handle_start))
        .route(
            "/api/v1/sessions/:id/basic-info",
            post(handlers::handle_basic_info),
        )
        .route(
            "/api/v1/sessions/:id/tech-stack",
            post(handlers::handle_tech_stack),
        )
        .route(
            "/api/v1/sessions/:id/responses/:ordinal",
            put(handlers::handle_set_response),
        )
        .route("/api/v1/sessions/:id/submit", post(handlers::handle_submit))
        .route("/api/v1/sessions/:id/reset", post(handlers::handle_reset))
        // Stored applications
        .route("/api/v1/candidates", get(handlers::handle_list_candidates))
        .route(
            "/api/v1/candidates/fallback",
            get(handlers::handle_list_fallback),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::intake::session::IntakeService;
    use crate::storage::fallback::FallbackLog;
    use crate::storage::gateway::PersistenceGateway;
    use crate::storage::remote::UnconfiguredStore;
    use crate::testing::{reply_with, share_link, StubGenerator};

    fn test_router(dir: &tempfile::TempDir) -> Router {
        let config = Config {
            database_url: None,
            llm_base_url: "http://localhost:11434".into(),
            llm_model: "llama3.2:3b".into(),
            llm_timeout: Duration::from_secs(30),
            fallback_log_path: dir.path().join("candidates.json"),
            question_fallback: true,
            session_idle_ttl: Duration::from_secs(3600),
            port: 8080,
            rust_log: "info".into(),
        };
        let gateway = Arc::new(PersistenceGateway::new(
            Arc::new(UnconfiguredStore),
            FallbackLog::new(&config.fallback_log_path),
        ));
        let intake = Arc::new(IntakeService::new(
            Arc::new(StubGenerator::new(reply_with(1))),
            gateway.clone(),
            config.question_fallback,
            config.session_idle_ttl,
        ));
        build_router(AppState {
            config,
            intake,
            gateway,
        })
    }

    async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };
        let response = router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_and_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let router = test_router(&dir);

        let (status, body) = send(&router, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "talentscout-api");
        assert_eq!(body["llm_model"], "llama3.2:3b");
        assert_eq!(body["question_fallback"], true);
        assert_eq!(body["remote_store"], false);

        let (status, body) = send(&router, Method::GET, "/api/v1/tech-catalog", None).await;
        assert_eq!(status, StatusCode::OK);
        let categories = body.as_array().unwrap();
        assert_eq!(categories.len(), 11);
        assert_eq!(categories[0]["label"], "Programming Languages");
        assert!(!categories[0]["options"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_full_intake_over_http() {
        let dir = tempfile::tempdir().unwrap();
        let router = test_router(&dir);

        let (status, body) = send(&router, Method::POST, "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["step"], "welcome");
        let base = format!("/api/v1/sessions/{}", body["session_id"].as_str().unwrap());

        let (status, body) = send(&router, Method::POST, &format!("{base}/start"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["step"], "basic_info");

        let (status, body) = send(
            &router,
            Method::POST,
            &format!("{base}/basic-info"),
            Some(json!({"name": "Ada Lovelace", "email": "not-an-email", "position": "Backend Engineer"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"][0]["message"], "Please enter a valid email");
        assert_eq!(body["step"], "basic_info");

        let (status, _) = send(
            &router,
            Method::POST,
            &format!("{base}/basic-info"),
            Some(json!({
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "experience": 5,
                "position": "Backend Engineer"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &router,
            Method::POST,
            &format!("{base}/tech-stack"),
            Some(json!({"categories": {"languages": ["Python"]}})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["step"], "questions");
        assert_eq!(body["questions"].as_array().unwrap().len(), 1);

        let (status, _) = send(&router, Method::POST, &format!("{base}/submit"), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = send(
            &router,
            Method::PUT,
            &format!("{base}/responses/1"),
            Some(json!({"url": share_link(1)})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["responses"][0]["ordinal"], 1);

        let (status, body) = send(&router, Method::POST, &format!("{base}/submit"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["step"], "complete");
        assert_eq!(body["outcome"]["persisted"], "local-fallback");

        let (status, body) = send(&router, Method::GET, "/api/v1/candidates/fallback", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = send(&router, Method::GET, "/api/v1/candidates", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_step_mismatch_and_unknown_session() {
        let dir = tempfile::tempdir().unwrap();
        let router = test_router(&dir);

        let (_, body) = send(&router, Method::POST, "/api/v1/sessions", None).await;
        let base = format!("/api/v1/sessions/{}", body["session_id"].as_str().unwrap());

        let (status, body) = send(&router, Method::POST, &format!("{base}/submit"), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "STEP_MISMATCH");

        let (status, _) = send(&router, Method::DELETE, &base, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&router, Method::GET, &base, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
