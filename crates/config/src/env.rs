use apex_common::error::{ApexError, ApexResult};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ApexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ApexError::Config(format!("invalid LOG_FORMAT: {other}"))),
        }
    }
}

#[derive(Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub web_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present, then reads required vars.
    pub fn from_env() -> ApexResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        Ok(Self {
            database_url: get_var("DATABASE_URL")?,
            jwt_secret: get_var("JWT_SECRET")?,
            host: get_var_or("HOST", "0.0.0.0"),
            port: parse_var("PORT", "3000")?,
            log_level: get_var_or("LOG_LEVEL", "info"),
            log_format: get_var_or("LOG_FORMAT", "pretty").parse()?,
            web_url: get_var_or("WEB_URL", "http://localhost:4200"),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", "10")?,
            db_acquire_timeout_secs: parse_var("DB_ACQUIRE_TIMEOUT_SECS", "5")?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .field("web_url", &self.web_url)
            .field("db_max_connections", &self.db_max_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .finish()
    }
}

fn get_var(key: &str) -> ApexResult<String> {
    env::var(key).map_err(|_| ApexError::Config(format!("{key} is required but not set")))
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_var<T>(key: &str, default: &str) -> ApexResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_var_or(key, default)
        .parse()
        .map_err(|e| ApexError::Config(format!("invalid {key}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const OPTIONAL: &[&str] = &[
        "HOST",
        "PORT",
        "LOG_LEVEL",
        "LOG_FORMAT",
        "WEB_URL",
        "DB_MAX_CONNECTIONS",
        "DB_ACQUIRE_TIMEOUT_SECS",
    ];

    fn clear_optional() {
        for key in OPTIONAL {
            env::remove_var(key);
        }
    }

    #[test]
    fn config_from_env_succeeds_with_required_vars() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");
        clear_optional();

        env::set_var("DATABASE_URL", "postgres://localhost/apex_test");
        env::set_var("JWT_SECRET", "test-secret");

        let cfg = AppConfig::from_env().expect("should parse config");
        assert_eq!(cfg.database_url, "postgres://localhost/apex_test");
        assert_eq!(cfg.jwt_secret, "test-secret");
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.log_format, LogFormat::Pretty);
        assert_eq!(cfg.web_url, "http://localhost:4200");
        assert_eq!(cfg.db_max_connections, 10);
        assert_eq!(cfg.db_acquire_timeout_secs, 5);

        env::remove_var("DATABASE_URL");
        env::remove_var("JWT_SECRET");
    }

    #[test]
    fn config_from_env_fails_without_database_url() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::remove_var("DATABASE_URL");
        env::set_var("JWT_SECRET", "test-secret");
        let result = AppConfig::from_env();
        assert!(result.is_err());
        env::remove_var("JWT_SECRET");
    }

    #[test]
    fn config_from_env_fails_without_jwt_secret() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");

        env::set_var("DATABASE_URL", "postgres://localhost/apex_test");
        env::remove_var("JWT_SECRET");
        let err = AppConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
        env::remove_var("DATABASE_URL");
    }

    #[test]
    fn invalid_pool_size_is_config_error() {
        let _guard = ENV_LOCK.lock().expect("env lock poisoned");
        clear_optional();

        env::set_var("DATABASE_URL", "postgres://localhost/apex_test");
        env::set_var("JWT_SECRET", "test-secret");
        env::set_var("DB_MAX_CONNECTIONS", "lots");

        let err = AppConfig::from_env().unwrap_err();
        assert!(matches!(err, ApexError::Config(ref m) if m.contains("DB_MAX_CONNECTIONS")));

        clear_optional();
        env::remove_var("DATABASE_URL");
        env::remove_var("JWT_SECRET");
    }

    #[test]
    fn log_format_parses_case_insensitively() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    fn sample_config() -> AppConfig {
        AppConfig {
            database_url: String::new(),
            jwt_secret: "hs256-signing-key".to_owned(),
            host: "127.0.0.1".to_owned(),
            port: 3000,
            log_level: "debug".to_owned(),
            log_format: LogFormat::Pretty,
            web_url: String::new(),
            db_max_connections: 4,
            db_acquire_timeout_secs: 1,
        }
    }

    #[test]
    fn bind_addr_formats_correctly() {
        assert_eq!(sample_config().bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn debug_output_hides_jwt_secret() {
        let printed = format!("{:?}", sample_config());
        assert!(!printed.contains("hs256-signing-key"));
        assert!(printed.contains("jwt_secret: \"[REDACTED]\""));
        assert!(printed.contains("port: 3000"));
    }
}
