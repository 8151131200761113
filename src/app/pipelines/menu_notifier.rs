use crate::adapters::storage::load_menu_table;
use crate::config::toml_config::MenuConfig;
use crate::core::menu::{date_key, resolve, MenuLookup, MissingMenuPolicy};
use crate::core::render;
use crate::domain::model::{MenuTable, NotificationMessage};
use crate::domain::ports::{NotificationSink, Pipeline};
use crate::utils::error::Result;
use chrono::{Local, NaiveDate};

/// How the day was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuDay {
    FullMenu,
    Notice,
    Weekend,
    Missing,
}

pub struct MenuPlan {
    day: MenuDay,
    message: Option<NotificationMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuReport {
    pub date: NaiveDate,
    pub day: MenuDay,
    /// `None` when nothing was due.
    pub delivered: Option<bool>,
}

impl MenuReport {
    /// A message was due and could not be delivered.
    pub fn delivery_failed(&self) -> bool {
        self.delivered == Some(false)
    }
}

/// Daily menu bot. Missing days are either announced or skipped per
/// [`MissingMenuPolicy`].
pub struct MenuNotifier<N: NotificationSink> {
    sink: N,
    config: MenuConfig,
    date: NaiveDate,
}

impl<N: NotificationSink> MenuNotifier<N> {
    pub fn new(sink: N, config: MenuConfig) -> Self {
        let date = config.date.unwrap_or_else(|| Local::now().date_naive());
        Self { sink, config, date }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Decide what to post for the configured date.
    pub fn plan(&self, table: &MenuTable) -> MenuPlan {
        let sender = self.config.sender();
        let lookup = resolve(table, self.date);

        let (day, message) = match lookup {
            MenuLookup::Found(entry) => {
                tracing::info!("✅ Menu found for {}", date_key(self.date));
                let day = if entry.notice().is_some() {
                    MenuDay::Notice
                } else {
                    MenuDay::FullMenu
                };
                (day, Some(render::menu(&sender, entry, self.date)))
            }
            MenuLookup::Weekend => {
                tracing::info!("📅 Weekend - no menu expected");
                (MenuDay::Weekend, Some(render::no_service(&sender, self.date)))
            }
            MenuLookup::Missing => {
                tracing::warn!("❌ No menu for {}", date_key(self.date));
                (MenuDay::Missing, Some(render::no_data(&sender, self.date)))
            }
        };

        let message = match (day, self.config.on_missing) {
            (MenuDay::Weekend | MenuDay::Missing, MissingMenuPolicy::Silent) => {
                tracing::info!("ℹ️ Fallback messages disabled - nothing to send");
                None
            }
            _ => message,
        };

        MenuPlan { day, message }
    }
}

#[async_trait::async_trait]
impl<N: NotificationSink> Pipeline for MenuNotifier<N> {
    type Observed = MenuTable;
    type Planned = MenuPlan;
    type Report = MenuReport;

    fn name(&self) -> &str {
        "menu notifier"
    }

    async fn extract(&self) -> Result<Self::Observed> {
        tracing::info!("🔍 Looking up menu for {}", self.date.format("%d.%m.%Y %A"));
        let table = load_menu_table(&self.config.data_paths());
        tracing::info!("📋 Menu file covers {} days", table.len());
        Ok(table)
    }

    async fn transform(&self, observed: Self::Observed) -> Result<Self::Planned> {
        Ok(self.plan(&observed))
    }

    async fn load(&self, planned: Self::Planned) -> Result<Self::Report> {
        let delivered = match &planned.message {
            Some(message) => Some(self.sink.send(message).await),
            None => None,
        };

        Ok(MenuReport {
            date: self.date,
            day: planned.day,
            delivered,
        })
    }
}
