use std::env;
use std::fmt;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use regex::Regex;

pub const GEMINI_KEY_VARS: [&str; 3] = ["GEMINI_API_KEY", "GOOGLE_API_KEY", "GEMINI_KEY"];
pub const GROQ_KEY_VAR: &str = "GROQ_API_KEY";

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";
const DEFAULT_GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GROQ_BASE: &str = "https://api.groq.com/openai/v1";
const DEFAULT_ORIGINS: &str =
    "http://localhost:5173,http://127.0.0.1:5173,https://esita-chatbot.netlify.app";
const DEFAULT_ORIGIN_REGEX: &str = r"^https://.*\.netlify\.app$";

const MIN_MAX_TOKENS: u32 = 16;
const MAX_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Gemini,
    Groq,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::Groq => "groq",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Gemini => "Gemini",
            Provider::Groq => "Groq",
        }
    }

    /// Environment variable operators are told to set when the key is missing.
    pub fn key_var(&self) -> &'static str {
        match self {
            Provider::Gemini => GEMINI_KEY_VARS[0],
            Provider::Groq => GROQ_KEY_VAR,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: Provider,
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub origin_regex: Option<Regex>,
    pub allow_credentials: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub assistant_name: String,
    pub history_window: usize,
    pub provider: ProviderConfig,
    pub cors: CorsConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source. Blank
    /// values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let gemini_key = GEMINI_KEY_VARS.iter().find_map(|var| get(*var));
        let groq_key = get(GROQ_KEY_VAR);

        let provider = match get("LLM_PROVIDER") {
            Some(name) => match name.to_lowercase().as_str() {
                "gemini" => Provider::Gemini,
                "groq" => Provider::Groq,
                other => return Err(anyhow!("unknown LLM_PROVIDER '{}'", other)),
            },
            None if gemini_key.is_none() && groq_key.is_some() => Provider::Groq,
            None => Provider::Gemini,
        };

        let (api_key, model, api_base) = match provider {
            Provider::Gemini => (
                gemini_key,
                get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                get("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_GEMINI_BASE.to_string()),
            ),
            Provider::Groq => (
                groq_key,
                get("GROQ_MODEL").unwrap_or_else(|| DEFAULT_GROQ_MODEL.to_string()),
                get("GROQ_API_BASE").unwrap_or_else(|| DEFAULT_GROQ_BASE.to_string()),
            ),
        };

        let max_tokens: u32 = parse_or(&get, "MAX_TOKENS", 1024)?;
        let timeout_secs: u64 = parse_or(&get, "REQUEST_TIMEOUT_SECS", 20)?;
        if timeout_secs == 0 {
            return Err(anyhow!("REQUEST_TIMEOUT_SECS must be at least 1"));
        }

        let provider = ProviderConfig {
            provider,
            api_key,
            model,
            api_base: api_base.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
            temperature: parse_or(&get, "TEMPERATURE", 0.7)?,
            max_tokens: max_tokens.clamp(MIN_MAX_TOKENS, MAX_MAX_TOKENS),
        };

        let allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ORIGINS.to_string())
            .split(',')
            .map(|o| o.trim().trim_end_matches('/').to_string())
            .filter(|o| !o.is_empty())
            .collect();

        // An explicitly empty CORS_ORIGIN_REGEX disables pattern matching.
        let origin_regex = match lookup("CORS_ORIGIN_REGEX") {
            Some(pattern) if pattern.trim().is_empty() => None,
            Some(pattern) => Some(pattern.trim().to_string()),
            None => Some(DEFAULT_ORIGIN_REGEX.to_string()),
        }
        .map(|pattern| {
            Regex::new(&pattern).with_context(|| format!("invalid CORS_ORIGIN_REGEX '{}'", pattern))
        })
        .transpose()?;

        let cors = CorsConfig {
            allowed_origins,
            origin_regex,
            allow_credentials: parse_bool(&get, "CORS_ALLOW_CREDENTIALS", false)?,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&get, "PORT", 8000)?,
            assistant_name: get("ASSISTANT_NAME").unwrap_or_else(|| "Esita".to_string()),
            history_window: parse_or(&get, "HISTORY_WINDOW", 6)?,
            provider,
            cors,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow!("invalid {} '{}': {}", key, raw, e)),
        None => Ok(default),
    }
}

fn parse_bool<G>(get: &G, key: &str, default: bool) -> Result<bool>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key).map(|v| v.to_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
        Some(v) => Err(anyhow!("invalid {} '{}': expected true or false", key, v)),
        None => Ok(default),
    }
}
