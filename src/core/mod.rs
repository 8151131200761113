pub mod change;
pub mod engine;
pub mod extractor;
pub mod menu;
pub mod render;

pub use crate::domain::model::{CacheMap, MenuEntry, MenuTable, NotificationMessage};
pub use crate::domain::ports::{CacheStore, NotificationSink, PageFetcher, Pipeline};
pub use crate::utils::error::Result;
