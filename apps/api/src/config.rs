use anyhow::{Context, Result};

const DEFAULT_COMPOSE_URL: &str = "https://api.fastmcp.com/v1/compose";
const DEFAULT_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// Application configuration loaded from environment variables.
/// Only the database URL is required; both upstream APIs are optional and
/// the engine degrades to scripted copy when their keys are absent.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub compose_api_url: String,
    pub compose_api_key: Option<String>,
    pub chat_api_url: String,
    pub chat_api_key: Option<String>,
    pub chat_model: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            compose_api_url: std::env::var("FASTMCP_API_URL")
                .unwrap_or_else(|_| DEFAULT_COMPOSE_URL.to_string()),
            compose_api_key: optional_env("FASTMCP_API_KEY"),
            chat_api_url: std::env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| DEFAULT_CHAT_URL.to_string()),
            chat_api_key: optional_env("OPENAI_API_KEY")
                .or_else(|| optional_env("CHATGPT_API_KEY")),
            chat_model: std::env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset, blank, and templated `<enter api key>` placeholder values all
/// count as missing, so a copied sample .env falls back to scripted copy
/// instead of sending a junk bearer token upstream.
fn optional_env(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() && !value.contains("<enter") => Some(value),
        _ => None,
    }
}
