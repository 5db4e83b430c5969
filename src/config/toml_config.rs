use crate::utils::error::{AlertError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Optional settings file layered over the environment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsFile {
    pub search: Option<SearchSettings>,
    pub notify: Option<NotifySettings>,
    pub storage: Option<StorageSettings>,
    pub schedule: Option<ScheduleSettings>,
    pub roles: Option<BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchSettings {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub location: Option<String>,
    pub site: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotifySettings {
    pub webhook_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageSettings {
    pub seen_ids_file: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleSettings {
    pub interval_seconds: Option<u64>,
}

impl SettingsFile {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AlertError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content)?;

        toml::from_str(&processed).map_err(|e| AlertError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DISCORD_WEBHOOK_URL})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AlertError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_settings() {
        let content = r#"
[search]
endpoint = "https://serpapi.example.com/search"
location = "Germany"
site = "linkedin.com/jobs"
request_timeout_seconds = 20

[notify]
webhook_url = "https://discord.com/api/webhooks/1/abc"

[storage]
seen_ids_file = "state/seen.txt"

[schedule]
interval_seconds = 3600

[roles]
"data engineer" = ["data engineer", "etl engineer"]
"ai engineer" = ["ai engineer"]
"#;

        let settings = SettingsFile::from_toml_str(content).unwrap();

        let search = settings.search.unwrap();
        assert_eq!(search.location.as_deref(), Some("Germany"));
        assert_eq!(search.request_timeout_seconds, Some(20));
        assert_eq!(
            settings.schedule.unwrap().interval_seconds,
            Some(3600)
        );
        let roles = settings.roles.unwrap();
        assert_eq!(roles.len(), 2);
        assert_eq!(roles["data engineer"], vec!["data engineer", "etl engineer"]);
    }

    #[test]
    fn test_empty_file_is_valid() {
        let settings = SettingsFile::from_toml_str("").unwrap();
        assert!(settings.search.is_none());
        assert!(settings.roles.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("JOB_ALERT_TEST_WEBHOOK", "https://discord.com/api/webhooks/9/zz");

        let settings = SettingsFile::from_toml_str(
            r#"
[notify]
webhook_url = "${JOB_ALERT_TEST_WEBHOOK}"

[search]
api_key = "${JOB_ALERT_TEST_UNSET_KEY}"
"#,
        )
        .unwrap();

        assert_eq!(
            settings.notify.unwrap().webhook_url.as_deref(),
            Some("https://discord.com/api/webhooks/9/zz")
        );
        assert_eq!(
            settings.search.unwrap().api_key.as_deref(),
            Some("${JOB_ALERT_TEST_UNSET_KEY}")
        );

        std::env::remove_var("JOB_ALERT_TEST_WEBHOOK");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = SettingsFile::from_toml_str("[search\nlocation = ");
        assert!(matches!(result, Err(AlertError::ConfigError { .. })));
    }

    #[test]
    fn test_settings_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[schedule]\ninterval_seconds = 900\n")
            .unwrap();

        let settings = SettingsFile::from_file(temp_file.path()).unwrap();
        assert_eq!(settings.schedule.unwrap().interval_seconds, Some(900));
    }
}
