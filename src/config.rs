use std::env;
use tracing::warn;
use crate::error::AppError;

const DEV_JWT_SECRET: &str = "eventhub-dev-secret-change-me";

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
    pub session_sweep_secs: u64,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| "memory".to_string());

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if Self::is_memory_url(&database_url) => {
                warn!("JWT_SECRET not set, using the development secret (memory mode only)");
                DEV_JWT_SECRET.to_string()
            }
            _ => return Err(AppError::Config("JWT_SECRET must be set when using a database".into())),
        };

        Ok(Self {
            database_url,
            port: parse_var("PORT", 3000)?,
            jwt_secret,
            token_ttl_hours: parse_var("TOKEN_TTL_HOURS", 24)?,
            session_sweep_secs: parse_var("SESSION_SWEEP_SECS", 300)?,
            seed_demo_data: parse_var("SEED_DEMO_DATA", true)?,
        })
    }

    pub fn is_memory_url(url: &str) -> bool {
        url == "memory" || url.starts_with("memory:")
    }

    pub fn uses_memory_store(&self) -> bool {
        Self::is_memory_url(&self.database_url)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {}", name, raw))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_urls_are_recognised() {
        assert!(Config::is_memory_url("memory"));
        assert!(Config::is_memory_url("memory://demo"));
        assert!(!Config::is_memory_url("sqlite://events.db"));
    }
}
