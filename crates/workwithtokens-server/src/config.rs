//! Server configuration
//!
//! Read from environment variables (a `.env` file is loaded first when
//! present). Provider sections are optional: a missing API key disables the
//! endpoints that need it instead of failing startup.

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use workwithtokens::ModelSettings;

const DEFAULT_JWT_SECRET: &str = "your-super-secret-jwt-key-change-this-in-production";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Full server configuration
#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Single allowed CORS origin; permissive CORS when unset
    pub frontend_url: Option<String>,
    /// Static frontend served as router fallback when the directory exists
    pub static_dir: PathBuf,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub anthropic: Option<AnthropicConfig>,
    pub openai: Option<OpenAiConfig>,
    pub voyage: Option<VoyageConfig>,
    pub rag: RagConfig,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    /// Full connection URL, takes precedence over the individual fields
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub ssl: bool,
    pub max_connections: u32,
}

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl: Duration,
    /// True when JWT_SECRET was not provided
    pub uses_default_secret: bool,
}

#[derive(Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub version: String,
    pub settings: ModelSettings,
}

#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub chat: ModelSettings,
    pub embedding_model: String,
    pub vector_store_id: Option<String>,
    pub assistant_id: Option<String>,
    pub fine_tune_model: Option<String>,
}

#[derive(Clone)]
pub struct VoyageConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct RagConfig {
    pub poll_interval: Duration,
    pub max_polls: u32,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1000),
            max_polls: 120,
        }
    }
}

impl AppConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_any = |keys: &[&str]| keys.iter().find_map(|k| get(*k));

        let jwt_secret = get("JWT_SECRET");
        let jwt = JwtConfig {
            uses_default_secret: jwt_secret.is_none(),
            secret: jwt_secret.unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string()),
            ttl: Duration::from_secs(parse_or(&get, "JWT_TTL_SECS", 86_400)?),
        };

        let database = DatabaseConfig {
            url: get("DATABASE_URL"),
            host: get("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parse_or(&get, "DB_PORT", 5432)?,
            username: get("DB_USERNAME").unwrap_or_else(|| "postgres".to_string()),
            password: get("DB_PASSWORD").unwrap_or_default(),
            database: get("DB_DATABASE").unwrap_or_else(|| "postgres".to_string()),
            ssl: parse_bool_or(&get, "DB_SSL", true)?,
            max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 5)?,
        };

        let anthropic = match get_any(&["ANTHROPIC_API_KEY", "CLAUDE_API_KEY"]) {
            Some(api_key) => Some(AnthropicConfig {
                api_key,
                base_url: get("ANTHROPIC_BASE_URL"),
                version: get("ANTHROPIC_VERSION").unwrap_or_else(|| "2023-06-01".to_string()),
                settings: ModelSettings::new(
                    get("CLAUDE_MODEL")
                        .unwrap_or_else(|| "claude-3-5-sonnet-20241022".to_string()),
                    parse_or(&get, "CLAUDE_TEMPERATURE", 0.3)?,
                    parse_or(&get, "CLAUDE_MAX_TOKENS", 1024)?,
                ),
            }),
            None => None,
        };

        let openai = match get("OPENAI_API_KEY") {
            Some(api_key) => Some(OpenAiConfig {
                api_key,
                base_url: get("OPENAI_BASE_URL"),
                chat: ModelSettings::new(
                    get("OPENAI_CHAT_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
                    parse_or(&get, "OPENAI_TEMPERATURE", 0.3)?,
                    parse_or(&get, "OPENAI_MAX_TOKENS", 60)?,
                ),
                embedding_model: get("OPENAI_EMBEDDING_MODEL")
                    .unwrap_or_else(|| "text-embedding-3-large".to_string()),
                vector_store_id: get("OPENAI_VECTOR_STORE_ID"),
                assistant_id: get("OPENAI_ASSISTANT_ID"),
                fine_tune_model: get("FT_MODEL"),
            }),
            None => None,
        };

        let voyage = get_any(&["VOYAGE_API_KEY", "NOMIC_API_KEY"]).map(|api_key| VoyageConfig {
            api_key,
            base_url: get("VOYAGE_BASE_URL"),
            model: get("VOYAGE_MODEL").unwrap_or_else(|| "voyage-3".to_string()),
        });

        let rag = RagConfig {
            poll_interval: Duration::from_millis(parse_or(&get, "RAG_POLL_INTERVAL_MS", 1000)?),
            max_polls: parse_or(&get, "RAG_MAX_POLLS", 120)?,
        };

        Ok(Self {
            port: parse_or(&get, "PORT", 3000)?,
            frontend_url: get("FRONTEND_URL"),
            static_dir: PathBuf::from(get("STATIC_DIR").unwrap_or_else(|| "public".to_string())),
            database,
            jwt,
            anthropic,
            openai,
            voyage,
            rag,
        })
    }
}

impl DatabaseConfig {
    /// Connection options for the pool.
    ///
    /// A URL keeps its own `sslmode`. Otherwise `ssl` requires TLS without
    /// verifying the server certificate (managed Postgres with self-signed certs).
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url);
        }

        let ssl_mode = if self.ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(&self.database)
            .ssl_mode(ssl_mode))
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            key: key.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn parse_bool_or<G>(get: &G, key: &str, default: bool) -> Result<bool, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid {
                key: key.to_string(),
                value: raw,
                reason: "expected a boolean".to_string(),
            }),
        },
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_env() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert!(config.jwt.uses_default_secret);
        assert_eq!(config.jwt.ttl, Duration::from_secs(86_400));
        assert!(config.anthropic.is_none());
        assert!(config.openai.is_none());
        assert!(config.voyage.is_none());
        assert!(config.database.ssl);
        assert_eq!(config.rag.max_polls, 120);
        assert_eq!(config.rag.poll_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_provider_sections_follow_keys() {
        let config = load(&[
            ("CLAUDE_API_KEY", "sk-ant"),
            ("OPENAI_API_KEY", "sk-openai"),
            ("OPENAI_VECTOR_STORE_ID", "vs_123"),
            ("NOMIC_API_KEY", "pa-voyage"),
        ])
        .unwrap();

        let anthropic = config.anthropic.unwrap();
        assert_eq!(anthropic.api_key, "sk-ant");
        assert_eq!(anthropic.version, "2023-06-01");
        assert!(anthropic.base_url.is_none());

        let openai = config.openai.unwrap();
        assert_eq!(openai.chat.model, "gpt-4o-mini");
        assert_eq!(openai.chat.max_tokens, 60);
        assert_eq!(openai.embedding_model, "text-embedding-3-large");
        assert_eq!(openai.vector_store_id.as_deref(), Some("vs_123"));
        assert!(openai.fine_tune_model.is_none());

        let voyage = config.voyage.unwrap();
        assert_eq!(voyage.api_key, "pa-voyage");
        assert_eq!(voyage.model, "voyage-3");
    }

    #[test]
    fn test_base_url_override() {
        let config = load(&[
            ("OPENAI_API_KEY", "sk-openai"),
            ("OPENAI_BASE_URL", "http://localhost:8080"),
        ])
        .unwrap();
        assert_eq!(
            config.openai.unwrap().base_url.as_deref(),
            Some("http://localhost:8080")
        );
    }

    #[test]
    fn test_primary_key_name_wins_over_alias() {
        let config = load(&[
            ("ANTHROPIC_API_KEY", "primary"),
            ("CLAUDE_API_KEY", "alias"),
        ])
        .unwrap();
        assert_eq!(config.anthropic.unwrap().api_key, "primary");
    }

    #[test]
    fn test_empty_values_are_unset() {
        let config = load(&[("OPENAI_API_KEY", "  "), ("JWT_SECRET", "")]).unwrap();
        assert!(config.openai.is_none());
        assert!(config.jwt.uses_default_secret);
    }

    #[test]
    fn test_invalid_number_names_variable() {
        let err = load(&[("PORT", "eighty")]).err().unwrap();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_invalid_bool() {
        assert!(load(&[("DB_SSL", "maybe")]).is_err());
        assert!(!load(&[("DB_SSL", "false")]).unwrap().database.ssl);
    }
}
