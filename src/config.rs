//! Runtime configuration
//!
//! Everything comes from the process environment. Binaries call
//! `dotenv::dotenv()` first so a local `.env` file is honoured.

use crate::chat::SessionLimits;
use crate::error::AppError;
use crate::Result;
use std::env;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, Default)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Display delay before the assistant reply is appended. Never affects which reply is chosen.
    pub chat_reply_delay: Duration,
    /// Idle expiry and capacity for in-memory chat sessions.
    pub chat_sessions: SessionLimits,
    /// Hosted auth backend; `None` selects the in-memory backend.
    pub supabase: Option<SupabaseConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            chat_reply_delay: Duration::ZERO,
            chat_sessions: SessionLimits::default(),
            supabase: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT").or_else(|_| env::var("API_PORT")) {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::ConfigError(format!("invalid port '{}': {}", raw, e)))?,
            Err(_) => DEFAULT_PORT,
        };

        let chat_reply_delay = Duration::from_millis(env_number("CHAT_REPLY_DELAY_MS", 0)?);

        let defaults = SessionLimits::default();
        let chat_sessions = SessionLimits {
            idle_ttl: Duration::from_secs(env_number(
                "CHAT_SESSION_TTL_SECS",
                defaults.idle_ttl.as_secs(),
            )?),
            max_sessions: env_number("CHAT_MAX_SESSIONS", defaults.max_sessions as u64)? as usize,
        };
        if chat_sessions.max_sessions == 0 {
            return Err(AppError::ConfigError(
                "CHAT_MAX_SESSIONS must be at least 1".to_string(),
            ));
        }

        let supabase = match (env::var("SUPABASE_URL"), env::var("SUPABASE_ANON_KEY")) {
            (Ok(url), Ok(anon_key)) if !url.trim().is_empty() && !anon_key.trim().is_empty() => {
                Some(SupabaseConfig {
                    url: url.trim().trim_end_matches('/').to_string(),
                    anon_key: anon_key.trim().to_string(),
                })
            }
            _ => None,
        };

        Ok(Self {
            port,
            chat_reply_delay,
            chat_sessions,
            supabase,
        })
    }
}

fn env_number(key: &str, default: u64) -> Result<u64> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| AppError::ConfigError(format!("invalid {} '{}': {}", key, raw, e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.chat_reply_delay, Duration::ZERO);
        assert!(config.supabase.is_none());
        assert_eq!(config.chat_sessions.idle_ttl, Duration::from_secs(1800));
        assert_eq!(config.chat_sessions.max_sessions, 1000);
    }

    #[test]
    fn test_missing_number_uses_default() {
        assert_eq!(env_number("VITT_MUKTI_UNSET_TEST_KEY", 42).unwrap(), 42);
    }
}
