//! Application configuration loaded from environment variables.
//!
//! A `.env` file is honoured for local development.

use std::env;

/// Default OpenAI-compatible endpoint (Together AI).
pub const DEFAULT_COMPLETION_API_URL: &str = "https://api.together.xyz/v1";
/// Default chat model used for plan generation.
pub const DEFAULT_COMPLETION_MODEL: &str = "meta-llama/Llama-Vision-Free";

/// Which record store backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Firestore,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(Self::Firestore),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::Invalid("RECORD_STORE", s.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL for CORS and cookie attributes
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Record store backend
    pub record_store: StoreBackend,
    /// Base URL of the chat-completion API
    pub completion_api_url: String,
    /// Model identifier sent with every completion request
    pub completion_model: String,
    /// Supabase project URL (identity provider)
    pub supabase_url: String,

    // --- Secrets ---
    /// Completion provider API key
    pub completion_api_key: String,
    /// Supabase anon key
    pub supabase_anon_key: String,
}

impl Config {
    /// Config for tests only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            record_store: StoreBackend::Memory,
            completion_api_url: "http://127.0.0.1:9/v1".to_string(),
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            supabase_url: "http://127.0.0.1:9".to_string(),
            completion_api_key: "test_completion_key".to_string(),
            supabase_anon_key: "test_anon_key".to_string(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let record_store = match env::var("RECORD_STORE") {
            Ok(v) => v.parse()?,
            Err(_) => StoreBackend::Firestore,
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            record_store,
            completion_api_url: env::var("COMPLETION_API_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_COMPLETION_API_URL.to_string()),
            completion_model: env::var("COMPLETION_MODEL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_MODEL.to_string()),
            supabase_url: env::var("SUPABASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("SUPABASE_URL"))?,

            completion_api_key: env::var("TOGETHER_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("TOGETHER_API_KEY"))?,
            supabase_anon_key: env::var("SUPABASE_ANON_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("SUPABASE_ANON_KEY"))?,
        })
    }

    /// Whether cookies should carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.frontend_url.starts_with("https://")
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("TOGETHER_API_KEY", " test_key \n");
        env::set_var("SUPABASE_URL", "https://project.supabase.co/");
        env::set_var("SUPABASE_ANON_KEY", "anon");
        env::set_var("RECORD_STORE", "memory");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.completion_api_key, "test_key");
        assert_eq!(config.supabase_url, "https://project.supabase.co");
        assert_eq!(config.record_store, StoreBackend::Memory);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_store_backend_parse() {
        assert_eq!(
            "Firestore".parse::<StoreBackend>().unwrap(),
            StoreBackend::Firestore
        );
        assert_eq!(" memory ".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert!("postgres".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_secure_cookies_follow_frontend_scheme() {
        let mut config = Config::test_default();
        assert!(!config.secure_cookies());
        config.frontend_url = "https://repup.app".to_string();
        assert!(config.secure_cookies());
    }
}
