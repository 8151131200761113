use crate::core::change::NotifyPolicy;
use crate::core::menu::MissingMenuPolicy;
use crate::core::render::Sender;
use crate::domain::model::MonitoredSource;
use crate::utils::error::{Result, WatchError};
use crate::utils::validation::{
    validate_http_url, validate_json_file, validate_not_blank, validate_required,
    validate_timeout, Validate,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Ubuntu; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Render messages but only log them.
    pub test_mode: bool,
    pub webhook: WebhookConfig,
    pub monitor: MonitorConfig,
    pub menu: MenuConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    pub url: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_seconds: 10,
        }
    }
}

impl WebhookConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub channel: String,
    pub username: String,
    pub icon_emoji: String,
    pub cache_path: String,
    pub user_agent: String,
    pub fetch_timeout_seconds: u64,
    pub notify_policy: NotifyPolicy,
    pub sources: Vec<MonitoredSource>,
    /// Link to the CI run that produced the notification, taken from the environment.
    #[serde(skip)]
    pub run_url: Option<String>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            channel: "#yks-takip".to_string(),
            username: "ÖSYM YKS Bot".to_string(),
            icon_emoji: ":rotating_light:".to_string(),
            cache_path: "cache/osym_data.json".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout_seconds: 15,
            notify_policy: NotifyPolicy::Always,
            sources: vec![
                MonitoredSource::new("https://www.osym.gov.tr/TR,33351/2025.html", "YKS Duyurular"),
                MonitoredSource::new("https://www.osym.gov.tr/TR,33007/2025.html", "YKS Belgeler"),
            ],
            run_url: None,
        }
    }
}

impl MonitorConfig {
    pub fn sender(&self) -> Sender {
        Sender {
            channel: self.channel.clone(),
            username: self.username.clone(),
            icon_emoji: self.icon_emoji.clone(),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub channel: String,
    pub username: String,
    pub icon_emoji: String,
    /// Tried in order; the first existing file wins.
    pub data_paths: Vec<String>,
    pub on_missing: MissingMenuPolicy,
    /// Replaces today's date.
    #[serde(skip)]
    pub date: Option<NaiveDate>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            channel: "#ogle-yemegi".to_string(),
            username: "Yemek Bot 🍽️".to_string(),
            icon_emoji: ":fork_and_knife:".to_string(),
            data_paths: vec![
                "data/yemek_menusu.json".to_string(),
                "yemek_menusu.json".to_string(),
            ],
            on_missing: MissingMenuPolicy::SendFallback,
            date: None,
        }
    }
}

impl MenuConfig {
    pub fn sender(&self) -> Sender {
        Sender {
            channel: self.channel.clone(),
            username: self.username.clone(),
            icon_emoji: self.icon_emoji.clone(),
        }
    }

    pub fn data_paths(&self) -> Vec<PathBuf> {
        self.data_paths.iter().map(PathBuf::from).collect()
    }
}

impl WatchConfig {
    /// Load from a TOML file. `${VAR}` references are expanded first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replace `${VAR}` with the variable's value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| WatchError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// The webhook URL, required unless running in test mode.
    pub fn require_webhook(&self) -> Result<&str> {
        validate_required("webhook.url", &self.webhook.url).map(String::as_str)
    }
}

impl Validate for WebhookConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.url {
            validate_http_url("webhook.url", url)?;
        }
        validate_timeout("webhook.timeout_seconds", self.timeout_seconds)
    }
}

impl Validate for MonitorConfig {
    fn validate(&self) -> Result<()> {
        validate_not_blank("monitor.channel", &self.channel)?;
        validate_not_blank("monitor.user_agent", &self.user_agent)?;
        validate_json_file("monitor.cache_path", &self.cache_path)?;
        validate_timeout("monitor.fetch_timeout_seconds", self.fetch_timeout_seconds)?;

        if self.sources.is_empty() {
            return Err(WatchError::ConfigError {
                message: "monitor.sources must list at least one page".to_string(),
            });
        }
        for source in &self.sources {
            validate_http_url("monitor.sources.url", &source.url)?;
            validate_not_blank("monitor.sources.display_name", &source.display_name)?;
        }
        Ok(())
    }
}

impl Validate for MenuConfig {
    fn validate(&self) -> Result<()> {
        validate_not_blank("menu.channel", &self.channel)?;
        if self.data_paths.is_empty() {
            return Err(WatchError::ConfigError {
                message: "menu.data_paths must list at least one file".to_string(),
            });
        }
        for path in &self.data_paths {
            validate_json_file("menu.data_paths", path)?;
        }
        Ok(())
    }
}

impl Validate for WatchConfig {
    fn validate(&self) -> Result<()> {
        self.webhook.validate()?;
        self.monitor.validate()?;
        self.menu.validate()?;
        if !self.test_mode {
            self.require_webhook()?;
        }
        Ok(())
    }
}
