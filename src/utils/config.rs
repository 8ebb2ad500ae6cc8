use crate::llm::Provider;
use crate::types::{AppError, Result};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub slack: SlackConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    /// "openai" or "ollama".
    pub provider: String,
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    pub openai_model: String,
    pub ollama_url: String,
    pub ollama_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlackConfig {
    pub webhook_url: Option<String>,
    pub channel: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .map_err(|e| AppError::Configuration(format!("Invalid PORT: {}", e)))?,
            },
            llm: LLMConfig {
                provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "openai".to_string()),
                openai_api_key: env::var("OPENAI_API_KEY").ok(),
                openai_api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                openai_model: env::var("OPENAI_MODEL")
                    .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
                ollama_url: env::var("OLLAMA_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                ollama_model: env::var("OLLAMA_MODEL")
                    .unwrap_or_else(|_| "llama3.2".to_string()),
            },
            slack: SlackConfig {
                webhook_url: env::var("SLACK_WEBHOOK_URL").ok(),
                channel: env::var("SLACK_CHANNEL")
                    .unwrap_or_else(|_| "#support-escalations".to_string()),
            },
        })
    }

    /// Resolve the configured LLM provider.
    pub fn llm_provider(&self) -> Result<Provider> {
        match self.llm.provider.as_str() {
            "openai" => {
                let api_key = self.llm.openai_api_key.clone().ok_or_else(|| {
                    AppError::Configuration(
                        "OPENAI_API_KEY is required when LLM_PROVIDER=openai".to_string(),
                    )
                })?;
                Ok(Provider::OpenAI {
                    api_key,
                    api_base: self.llm.openai_api_base.clone(),
                    model: self.llm.openai_model.clone(),
                })
            }
            "ollama" => Ok(Provider::Ollama {
                base_url: self.llm.ollama_url.clone(),
                model: self.llm.ollama_model.clone(),
            }),
            other => Err(AppError::Configuration(format!(
                "Unknown LLM_PROVIDER '{}', expected 'openai' or 'ollama'",
                other
            ))),
        }
    }
}
