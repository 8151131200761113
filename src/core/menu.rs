use crate::domain::model::{MenuEntry, MenuTable};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// What to post when the table has no entry for the day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum MissingMenuPolicy {
    /// Post nothing.
    Silent,
    /// "No service" on weekends, "no data" on weekdays.
    #[default]
    SendFallback,
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Exact lookup on the ISO date string.
pub fn lookup(table: &MenuTable, date: NaiveDate) -> Option<&MenuEntry> {
    table.get(&date_key(date))
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// What the table says about one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuLookup<'a> {
    Found(&'a MenuEntry),
    Weekend,
    Missing,
}

pub fn resolve(table: &MenuTable, date: NaiveDate) -> MenuLookup<'_> {
    match lookup(table, date) {
        Some(entry) => MenuLookup::Found(entry),
        None if is_weekend(date) => MenuLookup::Weekend,
        None => MenuLookup::Missing,
    }
}
