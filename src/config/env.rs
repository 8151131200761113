use crate::config::toml_config::WatchConfig;
use crate::utils::error::{Result, WatchError};
use chrono::NaiveDate;
use std::path::PathBuf;

/// Settings read from the process environment (and `.env`, when present).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub webhook_url: Option<String>,
    pub channel: Option<String>,
    pub test_mode: Option<bool>,
    pub test_date: Option<NaiveDate>,
    pub github: Option<GithubRun>,
    /// The `.env` file that was read, reported once logging is up.
    pub dotenv_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubRun {
    pub repository: String,
    pub run_id: String,
    pub runner_os: Option<String>,
}

impl GithubRun {
    pub fn run_url(&self) -> String {
        format!(
            "https://github.com/{}/actions/runs/{}",
            self.repository, self.run_id
        )
    }
}

impl EnvOverrides {
    pub fn from_env() -> Result<Self> {
        let dotenv_file = dotenvy::dotenv().ok();
        Self::read_process_env(dotenv_file)
    }

    fn read_process_env(dotenv_file: Option<PathBuf>) -> Result<Self> {
        let mut env = Self::from_lookup(|key| std::env::var(key).ok())?;
        env.dotenv_file = dotenv_file;
        Ok(env)
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let test_date = match get("TEST_DATE") {
            Some(raw) => Some(NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
                WatchError::InvalidConfigValueError {
                    field: "TEST_DATE".to_string(),
                    value: raw.clone(),
                    reason: format!("expected YYYY-MM-DD: {}", e),
                }
            })?),
            None => None,
        };

        let github = match (get("GITHUB_ACTIONS"), get("GITHUB_REPOSITORY"), get("GITHUB_RUN_ID")) {
            (Some(_), Some(repository), Some(run_id)) => Some(GithubRun {
                repository,
                run_id,
                runner_os: get("RUNNER_OS"),
            }),
            _ => None,
        };

        Ok(Self {
            webhook_url: get("SLACK_WEBHOOK_URL"),
            channel: get("SLACK_CHANNEL"),
            test_mode: get("TEST_MODE").map(|v| v.trim().eq_ignore_ascii_case("true")),
            test_date,
            github,
            dotenv_file: None,
        })
    }

    /// `SLACK_CHANNEL` applies to whichever pipeline runs.
    pub fn apply(&self, config: &mut WatchConfig) {
        if let Some(url) = &self.webhook_url {
            config.webhook.url = Some(url.clone());
        }
        if let Some(channel) = &self.channel {
            config.monitor.channel = channel.clone();
            config.menu.channel = channel.clone();
        }
        if let Some(test_mode) = self.test_mode {
            config.test_mode = test_mode;
        }
        if let Some(date) = self.test_date {
            config.menu.date = Some(date);
        }
        if let Some(run) = &self.github {
            config.monitor.run_url = Some(run.run_url());
        }
    }
}
