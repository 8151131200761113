// Adapters layer: concrete implementations of the domain ports (http, webhook, files).

pub mod http;
pub mod slack;
pub mod storage;

pub use http::HttpPageFetcher;
pub use slack::{build_sink, DryRunSink, SlackWebhookSink};
pub use storage::{load_menu_table, JsonFileCache};
