//! Server configuration

use std::path::PathBuf;
use std::time::Duration;

use crate::session::DEFAULT_IDLE_TIMEOUT;

pub const DEFAULT_COMPLETION_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_COMPLETION_MODEL: &str = "llama3-70b-8192";
pub const DEFAULT_VISION_MODEL: &str = "llava-1.5-7b";

/// Server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    pub cors_origins: Vec<String>,
    pub rate_limit_rps: u32,
    /// Completion endpoint credential. Absent or placeholder disables live calls.
    pub groq_api_key: Option<String>,
    pub completion_url: String,
    pub completion_model: String,
    pub vision_model: String,
    /// Replaces the embedded fallback table when set.
    pub fallbacks_path: Option<PathBuf>,
    pub project_name: String,
    /// Sessions unused for this long are logged out.
    pub session_idle_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first if present
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "host=localhost user=postgres dbname=nutri".into()),
            bind_address: std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| v.split(',').map(|o| o.trim().to_string()).collect())
                .unwrap_or_else(|_| vec!["*".to_string()]),
            rate_limit_rps: std::env::var("RATE_LIMIT_RPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|&rps| rps > 0)
                .unwrap_or(100),
            groq_api_key: std::env::var("GROQ_API_KEY").ok(),
            completion_url: std::env::var("COMPLETION_URL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_URL.into()),
            completion_model: std::env::var("COMPLETION_MODEL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_MODEL.into()),
            vision_model: std::env::var("VISION_MODEL")
                .unwrap_or_else(|_| DEFAULT_VISION_MODEL.into()),
            fallbacks_path: std::env::var("FALLBACKS_PATH").ok().map(PathBuf::from),
            project_name: std::env::var("PROJECT_NAME")
                .unwrap_or_else(|_| "AI Health & Nutrition Assistant".into()),
            session_idle_timeout: std::env::var("SESSION_IDLE_MINUTES")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|&m| m > 0)
                .map(|m| Duration::from_secs(m * 60))
                .unwrap_or(DEFAULT_IDLE_TIMEOUT),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            bind_address: "0.0.0.0:8080".to_string(),
            cors_origins: vec!["*".to_string()],
            rate_limit_rps: 100,
            groq_api_key: None,
            completion_url: DEFAULT_COMPLETION_URL.to_string(),
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            fallbacks_path: None,
            project_name: "AI Health & Nutrition Assistant".to_string(),
            session_idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}
