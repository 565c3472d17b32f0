use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};

use super::check_status;
use super::prompt::Conversation;
use crate::config::{Provider, ProviderConfig};
use crate::error::RelayError;

// Groq exposes an OpenAI-compatible chat completions endpoint
pub struct GroqClient {
    api_base: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    client: Client,
}

impl GroqClient {
    pub fn new(config: &ProviderConfig, api_key: String, client: Client) -> Self {
        Self {
            api_base: config.api_base.clone(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn generate(&self, conversation: &Conversation) -> Result<String, RelayError> {
        let url = format!("{}/chat/completions", self.api_base);

        let payload = json!({
            "model": self.model,
            "messages": conversation.messages(),
            "temperature": self.temperature,
            "max_tokens": self.max_tokens
        });

        info!(
            "Sending {} messages to Groq model {}",
            conversation.turns().len() + 1,
            self.model
        );
        debug!("Payload: {}", payload);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RelayError::from_transport(Provider::Groq, e))?;

        let response = check_status(Provider::Groq, response).await?;

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| RelayError::from_transport(Provider::Groq, e))?;
        debug!("Response JSON: {}", response_json);

        let content = response_json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| RelayError::MalformedResponse {
                provider: Provider::Groq,
                message: "missing choices[0].message.content".to_string(),
            })?;

        Ok(content.to_string())
    }
}
