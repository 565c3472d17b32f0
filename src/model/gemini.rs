use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};

use super::check_status;
use super::prompt::Conversation;
use crate::config::{Provider, ProviderConfig};
use crate::error::RelayError;

pub struct GeminiClient {
    api_base: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    client: Client,
}

impl GeminiClient {
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

    fn api_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    pub async fn generate(&self, conversation: &Conversation) -> Result<String, RelayError> {
        let prompt = conversation.render_flat();

        // The whole conversation goes out as one flat user turn
        let payload = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_tokens
            }
        });

        info!(
            "Sending prompt of {} characters to Gemini model {}",
            prompt.len(),
            self.model
        );
        debug!("Prompt: {}", prompt);

        let response = self
            .client
            .post(self.api_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RelayError::from_transport(Provider::Gemini, e))?;

        let response = check_status(Provider::Gemini, response).await?;

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| RelayError::from_transport(Provider::Gemini, e))?;
        debug!("Response JSON: {}", response_json);

        extract_text(&response_json)
    }
}

/// Concatenates the text parts of the first candidate. A candidate with no
/// text parts (e.g. blocked by safety filters) yields an empty string.
fn extract_text(response_json: &Value) -> Result<String, RelayError> {
    let candidate = response_json
        .get("candidates")
        .and_then(|candidates| candidates.get(0));

    let candidate = match candidate {
        Some(candidate) => candidate,
        None if response_json.get("promptFeedback").is_some() => return Ok(String::new()),
        None => {
            return Err(RelayError::MalformedResponse {
                provider: Provider::Gemini,
                message: "missing candidates".to_string(),
            })
        }
    };

    let text = candidate
        .get("content")
        .and_then(|content| content.get("parts"))
        .and_then(|parts| parts.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                .collect::<String>()
        })
        .unwrap_or_default();

    Ok(text)
}
