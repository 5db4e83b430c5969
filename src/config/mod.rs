#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, RoleTaxonomy};
use crate::utils::error::{AlertError, Result};
use crate::utils::validation::{self, Validate};
use reqwest::Client;
use std::time::Duration;
use toml_config::SettingsFile;

pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://serpapi.com/search";
pub const DEFAULT_LOCATION: &str = "United States";
pub const DEFAULT_SITE_FILTER: &str = "linkedin.com/jobs";
pub const DEFAULT_SEEN_IDS_FILE: &str = "seen_jobs.txt";
pub const DEFAULT_INTERVAL_SECONDS: u64 = 28800;

/// Runtime settings, loaded once at startup and handed to each component.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub serpapi_key: String,
    pub webhook_url: String,
    pub search_endpoint: String,
    pub location: String,
    pub site_filter: String,
    pub seen_ids_file: String,
    pub interval_seconds: u64,
    pub request_timeout_seconds: Option<u64>,
    pub taxonomy: RoleTaxonomy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            serpapi_key: String::new(),
            webhook_url: String::new(),
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            location: DEFAULT_LOCATION.to_string(),
            site_filter: DEFAULT_SITE_FILTER.to_string(),
            seen_ids_file: DEFAULT_SEEN_IDS_FILE.to_string(),
            interval_seconds: DEFAULT_INTERVAL_SECONDS,
            request_timeout_seconds: None,
            taxonomy: RoleTaxonomy::default(),
        }
    }
}

impl AppConfig {
    /// 從環境變數載入 (會先讀取 .env)
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Missing credentials stay empty;
    /// see [`Validate`] for reporting them.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = lookup("SERPAPI_KEY") {
            config.serpapi_key = key;
        }
        if let Some(url) = lookup("DISCORD_WEBHOOK_URL") {
            config.webhook_url = url;
        }
        if let Some(endpoint) = lookup("SERPAPI_ENDPOINT") {
            config.search_endpoint = endpoint;
        }
        if let Some(location) = lookup("JOB_LOCATION") {
            config.location = location;
        }
        if let Some(site) = lookup("JOB_SITE_FILTER") {
            config.site_filter = site;
        }
        if let Some(path) = lookup("SEEN_IDS_FILE") {
            config.seen_ids_file = path;
        }
        if let Some(raw) = lookup("SLEEP_SECONDS") {
            config.set_interval_seconds("SLEEP_SECONDS", parse_seconds("SLEEP_SECONDS", &raw)?)?;
        }
        if let Some(raw) = lookup("REQUEST_TIMEOUT_SECONDS") {
            config.request_timeout_seconds = Some(parse_seconds("REQUEST_TIMEOUT_SECONDS", &raw)?);
        }

        Ok(config)
    }

    /// 以設定檔內容覆蓋
    pub fn apply_settings(&mut self, settings: SettingsFile) -> Result<()> {
        if let Some(search) = settings.search {
            if let Some(endpoint) = search.endpoint {
                self.search_endpoint = endpoint;
            }
            if let Some(api_key) = search.api_key {
                self.serpapi_key = api_key;
            }
            if let Some(location) = search.location {
                self.location = location;
            }
            if let Some(site) = search.site {
                self.site_filter = site;
            }
            if let Some(timeout) = search.request_timeout_seconds {
                self.request_timeout_seconds = Some(timeout);
            }
        }
        if let Some(notify) = settings.notify {
            if let Some(url) = notify.webhook_url {
                self.webhook_url = url;
            }
        }
        if let Some(path) = settings.storage.and_then(|s| s.seen_ids_file) {
            self.seen_ids_file = path;
        }
        if let Some(interval) = settings.schedule.and_then(|s| s.interval_seconds) {
            self.set_interval_seconds("schedule.interval_seconds", interval)?;
        }
        if let Some(roles) = settings.roles {
            self.taxonomy = RoleTaxonomy::new(roles);
        }
        Ok(())
    }

    /// A zero interval would loop on the search API without pause, so it is
    /// rejected outright.
    pub fn set_interval_seconds(&mut self, field: &str, secs: u64) -> Result<()> {
        validation::validate_positive_number(field, secs, 1)?;
        self.interval_seconds = secs;
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    /// Shared HTTP client; only the timeout is configurable.
    pub fn http_client(&self) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(secs) = self.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(builder.build()?)
    }
}

fn parse_seconds(field: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|e| AlertError::InvalidConfigValueError {
            field: field.to_string(),
            value: raw.to_string(),
            reason: format!("expected a whole number of seconds ({})", e),
        })
}

impl ConfigProvider for AppConfig {
    fn search_endpoint(&self) -> &str {
        &self.search_endpoint
    }

    fn api_key(&self) -> &str {
        &self.serpapi_key
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn site_filter(&self) -> &str {
        &self.site_filter
    }

    fn webhook_url(&self) -> &str {
        &self.webhook_url
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_positive_number("SLEEP_SECONDS", self.interval_seconds, 1)?;
        validation::validate_path("SEEN_IDS_FILE", &self.seen_ids_file)?;
        validation::validate_url("SERPAPI_ENDPOINT", &self.search_endpoint)?;
        validation::validate_non_empty_string("SERPAPI_KEY", &self.serpapi_key)?;
        validation::validate_url("DISCORD_WEBHOOK_URL", &self.webhook_url)?;

        if self.taxonomy.is_empty() {
            return Err(AlertError::ConfigError {
                message: "role taxonomy has no roles".to_string(),
            });
        }

        Ok(())
    }
}
