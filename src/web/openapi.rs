use utoipa::OpenApi;

use crate::web::handlers;
use crate::web::models::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse, HistoryItem};

#[derive(OpenApi)]
#[openapi(
    paths(handlers::index, handlers::health_check, handlers::chat),
    components(schemas(ChatRequest, HistoryItem, ChatResponse, ErrorResponse, HealthResponse)),
    tags(
        (name = "Service", description = "Banner and health"),
        (name = "Chat", description = "LLM chat relay")
    )
)]
pub struct ApiDoc;
