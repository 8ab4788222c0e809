use std::str::FromStr;

use thiserror::Error;

/// Default OpenAlex API base URL.
pub const BASE_URL: &str = "https://api.openalex.org";

/// Server configuration loaded once from environment variables.
///
/// Read-only after startup; the client and query builders borrow it.
#[derive(Debug, Clone)]
pub struct Config {
    pub email: Option<String>,
    pub base_url: String,
    pub timeout_secs: f64,
    pub max_concurrent_requests: usize,
    pub default_page_size: u32,
    pub max_page_size: u32,
    /// Advisory budget from the OpenAlex terms; logged, never enforced.
    pub daily_request_limit: u64,
    pub log_api_requests: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
    #[error("OPENALEX_TIMEOUT must be positive")]
    Timeout,
    #[error("OPENALEX_MAX_CONCURRENT must be positive")]
    MaxConcurrent,
    #[error("OPENALEX_DEFAULT_PAGE_SIZE must be between 1 and {max}")]
    PageSize { max: u32 },
    #[error("OPENALEX_DAILY_LIMIT must be positive")]
    DailyLimit,
}

fn env_parse<T: FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Load and validate configuration from environment variables.
    /// Invalid values are fatal to startup; nothing else in the server
    /// is allowed to abort the process.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            email: std::env::var("OPENALEX_EMAIL").ok(),
            base_url: BASE_URL.to_string(),
            timeout_secs: env_parse("OPENALEX_TIMEOUT", 30.0)?,
            max_concurrent_requests: env_parse("OPENALEX_MAX_CONCURRENT", 10)?,
            default_page_size: env_parse("OPENALEX_DEFAULT_PAGE_SIZE", 25)?,
            max_page_size: env_parse("OPENALEX_MAX_PAGE_SIZE", 200)?,
            daily_request_limit: env_parse("OPENALEX_DAILY_LIMIT", 100_000)?,
            log_api_requests: std::env::var("LOG_API_REQUESTS")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs <= 0.0 {
            return Err(ConfigError::Timeout);
        }
        if self.max_concurrent_requests == 0 {
            return Err(ConfigError::MaxConcurrent);
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::PageSize {
                max: self.max_page_size,
            });
        }
        if self.daily_request_limit == 0 {
            return Err(ConfigError::DailyLimit);
        }
        Ok(())
    }

    /// User agent for API requests, carrying the polite-pool email if set.
    pub fn user_agent(&self) -> String {
        let base = format!("openalex-mcp/{}", env!("CARGO_PKG_VERSION"));
        match &self.email {
            Some(email) => format!("{} (mailto:{})", base, email),
            None => base,
        }
    }

    /// Whether requests qualify for the OpenAlex polite pool.
    pub fn polite_pool(&self) -> bool {
        self.email.is_some()
    }

    /// Configuration pointed at a mock server, for tests.
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            email: None,
            base_url: base_url.to_string(),
            timeout_secs: 5.0,
            max_concurrent_requests: 10,
            default_page_size: 25,
            max_page_size: 200,
            daily_request_limit: 100_000,
            log_api_requests: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_testing(BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_page_size, 200);
        assert_eq!(config.default_page_size, 25);
        assert!(!config.polite_pool());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_timeout() {
        let config = Config {
            timeout_secs: 0.0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Timeout)));
    }

    #[test]
    fn test_validate_concurrency() {
        let config = Config {
            max_concurrent_requests: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MaxConcurrent)));
    }

    #[test]
    fn test_validate_page_size() {
        let config = Config {
            default_page_size: 300,
            max_page_size: 200,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PageSize { max: 200 })
        ));

        let config = Config {
            default_page_size: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_user_agent_with_email() {
        let config = Config {
            email: Some("researcher@example.edu".to_string()),
            ..Config::default()
        };
        assert!(config
            .user_agent()
            .contains("(mailto:researcher@example.edu)"));
        assert!(config.polite_pool());
    }
}
