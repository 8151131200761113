use crate::config::env::EnvOverrides;
use crate::config::toml_config::WatchConfig;
use crate::core::change::NotifyPolicy;
use crate::core::menu::MissingMenuPolicy;
use crate::utils::error::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, ValueEnum};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log line format: compact for terminals, json for log collectors
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Render notifications but only log them
    #[arg(long)]
    pub test_mode: bool,

    /// Override the target channel
    #[arg(long)]
    pub channel: Option<String>,
}

impl CommonArgs {
    /// Defaults, then the TOML file, then the environment, then these flags.
    pub fn load_config(&self, env: &EnvOverrides) -> Result<WatchConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                WatchConfig::from_file(path)?
            }
            None => WatchConfig::default(),
        };

        env.apply(&mut config);

        if self.test_mode {
            config.test_mode = true;
        }
        if let Some(channel) = &self.channel {
            config.monitor.channel = channel.clone();
            config.menu.channel = channel.clone();
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "watchbot")]
#[command(about = "Counts table rows on watched pages and posts a chat notification")]
pub struct MonitorArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Where the per-page counts are kept between runs
    #[arg(long)]
    pub cache_path: Option<String>,

    #[arg(long, value_enum)]
    pub notify_policy: Option<NotifyPolicy>,
}

impl MonitorArgs {
    pub fn load_config(&self, env: &EnvOverrides) -> Result<WatchConfig> {
        let mut config = self.common.load_config(env)?;
        if let Some(path) = &self.cache_path {
            config.monitor.cache_path = path.clone();
        }
        if let Some(policy) = self.notify_policy {
            config.monitor.notify_policy = policy;
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "menu_bot")]
#[command(about = "Posts today's cafeteria menu to a chat channel")]
pub struct MenuArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Use this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Menu file; may be repeated, the first existing one is used
    #[arg(long = "menu-file")]
    pub menu_files: Vec<String>,

    #[arg(long, value_enum)]
    pub on_missing: Option<MissingMenuPolicy>,
}

impl MenuArgs {
    pub fn load_config(&self, env: &EnvOverrides) -> Result<WatchConfig> {
        let mut config = self.common.load_config(env)?;
        if let Some(date) = self.date {
            config.menu.date = Some(date);
        }
        if !self.menu_files.is_empty() {
            config.menu.data_paths = self.menu_files.clone();
        }
        if let Some(policy) = self.on_missing {
            config.menu.on_missing = policy;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_environment() {
        let args = MonitorArgs::parse_from([
            "watchbot",
            "--test-mode",
            "--channel",
            "#cli",
            "--notify-policy",
            "on-change",
        ]);
        let env = EnvOverrides {
            channel: Some("#env".to_string()),
            test_mode: Some(false),
            ..Default::default()
        };

        let config = args.load_config(&env).unwrap();

        assert!(config.test_mode);
        assert_eq!(config.monitor.channel, "#cli");
        assert_eq!(config.monitor.notify_policy, NotifyPolicy::OnChange);
    }

    #[test]
    fn test_menu_args() {
        let args = MenuArgs::parse_from([
            "menu_bot",
            "--date",
            "2024-06-10",
            "--menu-file",
            "a.json",
            "--menu-file",
            "b.json",
            "--on-missing",
            "silent",
        ]);

        let config = args.load_config(&EnvOverrides::default()).unwrap();

        assert_eq!(config.menu.date, NaiveDate::from_ymd_opt(2024, 6, 10));
        assert_eq!(config.menu.data_paths, vec!["a.json", "b.json"]);
        assert_eq!(config.menu.on_missing, MissingMenuPolicy::Silent);
    }

    #[test]
    fn test_cli_date_wins_over_env_date() {
        let args = MenuArgs::parse_from(["menu_bot", "--date", "2024-06-11"]);
        let env = EnvOverrides {
            test_date: NaiveDate::from_ymd_opt(2024, 6, 15),
            ..Default::default()
        };

        let config = args.load_config(&env).unwrap();
        assert_eq!(config.menu.date, NaiveDate::from_ymd_opt(2024, 6, 11));
    }
}
