use anyhow::{Context, Result};
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

use crate::calculator::DEFAULT_NOTIFICATION_TITLE;

pub const CATALOG_API_URL_ENV: &str = "CATALOG_API_URL";
pub const CATALOG_AUTH_TOKEN_ENV: &str = "CATALOG_AUTH_TOKEN";
pub const NOTIFICATION_WEBHOOK_URL_ENV: &str = "NOTIFICATION_WEBHOOK_URL";
pub const NOTIFICATION_TITLE_ENV: &str = "NOTIFICATION_TITLE";
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
pub const LOG_FILE_ENV: &str = "LOG_FILE";

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub catalog_api_url: String,
    pub catalog_auth_token: Option<String>,
    pub notification_webhook_url: Option<String>,
    pub notification_title: String,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

fn optional_var(name: &str) -> Option<String> {
    dotenv::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl Settings {
    /// Reads the settings from the environment, a `.env` file included.
    pub fn from_env() -> Result<Self> {
        let catalog_api_url = optional_var(CATALOG_API_URL_ENV)
            .context(format!("{} is not set", CATALOG_API_URL_ENV))?;

        let log_level = match optional_var(LOG_LEVEL_ENV) {
            Some(level) => LevelFilter::from_str(&level)
                .ok()
                .context(format!("invalid {}: {}", LOG_LEVEL_ENV, level))?,
            None => DEFAULT_LOG_LEVEL,
        };

        Ok(Self {
            catalog_api_url,
            catalog_auth_token: optional_var(CATALOG_AUTH_TOKEN_ENV),
            notification_webhook_url: optional_var(NOTIFICATION_WEBHOOK_URL_ENV),
            notification_title: optional_var(NOTIFICATION_TITLE_ENV)
                .unwrap_or_else(|| String::from(DEFAULT_NOTIFICATION_TITLE)),
            log_level,
            log_file: optional_var(LOG_FILE_ENV).map(PathBuf::from),
        })
    }
}
