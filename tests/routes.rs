#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

use common::state_with;

const PREVIEW_ORIGIN: &str = "https://deploy-preview-7--esita-chatbot.netlify.app";

#[actix_web::test]
async fn index_lists_usage_hints() {
    let app = init_app!(state_with(&[("ASSISTANT_NAME", "Nova")]));

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Nova backend is running");
    assert_eq!(body["try"], json!(["/health", "/docs", "/api/chat (POST)"]));
}

#[actix_web::test]
async fn health_reports_provider_and_model() {
    let app = init_app!(state_with(&[
        ("GROQ_API_KEY", "gsk-test"),
        ("GROQ_MODEL", "llama-3.3-70b-versatile"),
    ]));

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"status": "ok", "provider": "groq", "model": "llama-3.3-70b-versatile"})
    );
}

#[actix_web::test]
async fn health_is_ok_without_credentials() {
    let app = init_app!(state_with(&[]));

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["provider"], "gemini");
}

#[actix_web::test]
async fn openapi_document_describes_routes() {
    let app = init_app!(state_with(&[]));

    let req = test::TestRequest::get().uri("/openapi.json").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let doc: Value = test::read_body_json(resp).await;
    assert!(doc["paths"]["/api/chat"]["post"].is_object());
    assert!(doc["paths"]["/health"]["get"].is_object());
    assert!(doc["paths"]["/"]["get"].is_object());
    let schemas = &doc["components"]["schemas"];
    for name in ["ChatRequest", "HistoryItem", "ChatResponse", "ErrorResponse", "HealthResponse"] {
        assert!(schemas[name].is_object(), "missing schema {name}");
    }
}

#[actix_web::test]
async fn docs_serves_swagger_ui() {
    let app = init_app!(state_with(&[]));

    let req = test::TestRequest::get().uri("/docs").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_redirection());
    assert_eq!(resp.headers().get("location").unwrap(), "/docs/");

    let req = test::TestRequest::get().uri("/docs/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = test::read_body(resp).await;
    assert!(String::from_utf8_lossy(&html).contains("swagger"));
}

#[actix_web::test]
async fn preflight_allows_preview_deployments() {
    let app = init_app!(state_with(&[]));

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/chat")
        .insert_header(("origin", PREVIEW_ORIGIN))
        .insert_header(("access-control-request-method", "POST"))
        .insert_header(("access-control-request-headers", "content-type"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let headers = resp.headers();
    assert_eq!(
        headers.get("access-control-allow-origin").unwrap(),
        PREVIEW_ORIGIN
    );
    assert!(headers.get("access-control-allow-credentials").is_none());
}

#[actix_web::test]
async fn exact_origin_is_allowed() {
    let app = init_app!(state_with(&[]));

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("origin", "http://localhost:5173"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:5173"
    );
}

#[actix_web::test]
async fn unknown_origin_gets_no_cors_grant() {
    let app = init_app!(state_with(&[]));

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("origin", "https://netlify.app.evil.example"))
        .to_request();
    // Rejection may surface as an error response or a middleware error
    if let Ok(resp) = test::try_call_service(&app, req).await {
        assert!(resp.headers().get("access-control-allow-origin").is_none());
    }
}

#[actix_web::test]
async fn credentials_can_be_enabled() {
    let app = init_app!(state_with(&[("CORS_ALLOW_CREDENTIALS", "true")]));

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("origin", "https://esita-chatbot.netlify.app"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("access-control-allow-credentials").unwrap(),
        "true"
    );
}
