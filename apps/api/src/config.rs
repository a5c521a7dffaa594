use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Resolved exactly once at startup and passed by reference into each
/// remote client constructor — never re-read per call.
#[derive(Debug, Clone)]
pub struct Config {
    pub assemblyai_api_key: String,
    pub groq_api_key: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            assemblyai_api_key: require_env("ASSEMBLYAI_API_KEY")?,
            groq_api_key: require_env("GROQ_API_KEY")?,
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
