use std::env;
use std::time::Duration;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub tick_millis: u64,
    pub user_id: Option<i64>,
    pub dev_server_host: String,
    pub dev_server_port: u16,
    pub dev_server_seed_file: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("QUIZ_API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string()),
            request_timeout_secs: env::var("QUIZ_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(10),
            tick_millis: env::var("QUIZ_TICK_MILLIS")
                .ok()
                .and_then(|t| t.parse().ok())
                .filter(|t| *t > 0)
                .unwrap_or(1000),
            user_id: env::var("QUIZ_USER_ID").ok().and_then(|u| u.parse().ok()),
            dev_server_host: env::var("DEV_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            dev_server_port: env::var("DEV_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            dev_server_seed_file: env::var("DEV_SERVER_SEED_FILE").ok(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    /// Checks the settings the attempt runner cannot work without.
    pub fn validate_for_runner(&self) -> AppResult<i64> {
        reqwest::Url::parse(&self.api_base_url).map_err(|e| {
            AppError::ConfigError(format!(
                "QUIZ_API_BASE_URL '{}' is not a valid URL: {}",
                self.api_base_url, e
            ))
        })?;

        self.user_id.ok_or_else(|| {
            AppError::ConfigError(
                "QUIZ_USER_ID is not set; the acting user must be known to submit scores"
                    .to_string(),
            )
        })
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 2,
            tick_millis: 1000,
            user_id: Some(1),
            dev_server_host: "127.0.0.1".to_string(),
            dev_server_port: 0,
            dev_server_seed_file: None,
        }
    }
}
