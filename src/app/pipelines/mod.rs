pub mod menu_notifier;
pub mod page_monitor;

pub use menu_notifier::{MenuDay, MenuNotifier, MenuReport};
pub use page_monitor::{MonitorReport, PageMonitor, SourceOutcome};
