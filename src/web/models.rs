use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One prior turn. Roles other than `assistant` are treated as `user`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct HistoryItem {
    #[serde(default)]
    #[schema(example = "user")]
    pub role: String,
    #[serde(default)]
    #[schema(example = "What is Rust?")]
    pub text: String,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ChatRequest {
    #[serde(default)]
    #[schema(example = "Tell me more about ownership")]
    pub message: String,
    #[serde(default)]
    pub history: Option<Vec<HistoryItem>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Gemini request timed out")]
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "gemini")]
    pub provider: String,
    #[schema(example = "gemini-1.5-flash")]
    pub model: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "system")]
    System,
}

impl Role {
    /// Upper-case prefix used in flat prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Assistant => "ASSISTANT",
            Role::System => "SYSTEM",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}
