#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{LogFormat, MenuArgs, MonitorArgs};
pub use env::EnvOverrides;
pub use toml_config::{MenuConfig, MonitorConfig, WatchConfig, WebhookConfig};
