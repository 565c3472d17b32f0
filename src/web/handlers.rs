use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use serde_json::json;
use uuid::Uuid;

use crate::error::RelayError;
use crate::model::prompt::{system_prompt, Conversation};
use crate::web::models::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse};
use crate::AppState;

pub const EMPTY_MESSAGE_REPLY: &str = "Please type something 🙂";

// Index banner with usage hints
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner with usage hints")),
    tag = "Service"
)]
pub async fn index(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": format!("{} backend is running", data.config.assistant_name),
        "try": ["/health", "/docs", "/api/chat (POST)"],
    }))
}

// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "Service"
)]
pub async fn health_check(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        provider: data.model.provider().to_string(),
        model: data.model.model_name().to_string(),
    })
}

/// Relay a message and its trailing history to the configured provider
#[utoipa::path(
    post,
    path = "/api/chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Provider reply, or a nudge for an empty message", body = ChatResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 429, description = "Provider rate limit reached", body = ErrorResponse),
        (status = 502, description = "Provider call failed", body = ErrorResponse),
        (status = 503, description = "Provider API key not configured", body = ErrorResponse),
        (status = 504, description = "Provider call timed out", body = ErrorResponse)
    ),
    tag = "Chat"
)]
pub async fn chat(
    data: web::Data<AppState>,
    req: web::Json<ChatRequest>,
) -> Result<HttpResponse, RelayError> {
    let req = req.into_inner();
    let request_id = Uuid::new_v4();

    let message = req.message.trim();
    if message.is_empty() {
        return Ok(HttpResponse::Ok().json(ChatResponse {
            reply: EMPTY_MESSAGE_REPLY.to_string(),
        }));
    }

    if !data.model.is_configured() {
        let err = RelayError::MissingApiKey(data.model.provider());
        error!("Chat request {} rejected: {}", request_id, err);
        return Err(err);
    }

    let history = req.history.unwrap_or_default();
    let conversation = Conversation::build(
        system_prompt(&data.config.assistant_name),
        &history,
        message,
        data.config.history_window,
    );

    info!(
        "Chat request {}: {} characters, {} of {} history items kept",
        request_id,
        message.len(),
        conversation.turns().len() - 1,
        history.len()
    );

    match data.model.generate(&conversation).await {
        Ok(reply) => Ok(HttpResponse::Ok().json(ChatResponse { reply })),
        Err(e) => {
            error!("Chat request {} failed: {}", request_id, e);
            Err(e)
        }
    }
}
