pub mod gemini;
pub mod groq;
pub mod prompt;

use anyhow::Result;
use log::{debug, info, warn};
use reqwest::{Client, Response};

use crate::config::{Provider, ProviderConfig};
use crate::error::RelayError;
use gemini::GeminiClient;
use groq::GroqClient;
use prompt::{Conversation, EMPTY_REPLY_FALLBACK};

enum Backend {
    Gemini(GeminiClient),
    Groq(GroqClient),
}

// Holds the one provider client chosen at startup
pub struct ModelManager {
    provider: Provider,
    model: String,
    backend: Option<Backend>,
}

impl ModelManager {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let backend = match &config.api_key {
            Some(key) => {
                let client = Client::builder().timeout(config.timeout).build()?;
                info!(
                    "Using {} model {} at {} (timeout {:?})",
                    config.provider, config.model, config.api_base, config.timeout
                );
                Some(match config.provider {
                    Provider::Gemini => Backend::Gemini(GeminiClient::new(config, key.clone(), client)),
                    Provider::Groq => Backend::Groq(GroqClient::new(config, key.clone(), client)),
                })
            }
            None => {
                warn!(
                    "No {} API key configured, chat requests will fail until {} is set",
                    config.provider.display_name(),
                    config.provider.key_var()
                );
                None
            }
        };

        Ok(Self {
            provider: config.provider,
            model: config.model.clone(),
            backend,
        })
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model_name(&self) -> &str {
        match &self.backend {
            Some(Backend::Gemini(client)) => client.model(),
            Some(Backend::Groq(client)) => client.model(),
            None => &self.model,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Makes exactly one provider call. The reply is trimmed and replaced with
    /// a fallback message when the provider returns no text.
    pub async fn generate(&self, conversation: &Conversation) -> Result<String, RelayError> {
        let text = match &self.backend {
            Some(Backend::Gemini(client)) => client.generate(conversation).await?,
            Some(Backend::Groq(client)) => client.generate(conversation).await?,
            None => return Err(RelayError::MissingApiKey(self.provider)),
        };

        let text = text.trim();
        if text.is_empty() {
            warn!("{} returned an empty reply", self.provider);
            return Ok(EMPTY_REPLY_FALLBACK.to_string());
        }

        info!("Response length: {} characters", text.len());
        Ok(text.to_string())
    }
}

/// Maps a non-2xx provider response to an error. The full body only goes to
/// the debug log; clients get a truncated copy.
pub(crate) async fn check_status(
    provider: Provider,
    response: Response,
) -> Result<Response, RelayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!("Failed to read {} error body: {}", provider, e);
            String::new()
        }
    };
    debug!("{} returned {}: {}", provider, status, body);

    if status.as_u16() == 429 {
        return Err(RelayError::RateLimited(provider));
    }
    Err(RelayError::upstream(provider, status.as_u16(), &body))
}
