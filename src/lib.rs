pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{MenuArgs, MonitorArgs};

pub use crate::app::pipelines::{MenuNotifier, PageMonitor};
pub use crate::config::{EnvOverrides, WatchConfig};
pub use crate::core::engine::RunEngine;
pub use crate::utils::error::{Result, WatchError};
