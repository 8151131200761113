use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A page whose table rows are counted on every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitoredSource {
    pub url: String,
    #[serde(alias = "name")]
    pub display_name: String,
}

impl MonitoredSource {
    pub fn new(url: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            display_name: display_name.into(),
        }
    }

    /// First eight hex digits of the MD5 digest of the URL.
    pub fn cache_key(&self) -> String {
        cache_key_for(&self.url)
    }
}

pub fn cache_key_for(url: &str) -> String {
    let digest = md5::compute(url.as_bytes());
    let mut hex = format!("{:x}", digest);
    hex.truncate(8);
    hex
}

/// Last observation of one source. The cache key is the key of the enclosing map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub url: String,
    #[serde(rename = "count")]
    pub observed_count: u32,
    #[serde(rename = "last_check")]
    pub last_checked: NaiveDateTime,
    #[serde(rename = "page_name")]
    pub label: String,
}

pub type CacheMap = BTreeMap<String, CacheEntry>;

/// One day's menu. Every category is optional in the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MenuEntry {
    #[serde(alias = "tarih")]
    pub date: Option<String>,
    #[serde(alias = "corbalar", deserialize_with = "nullable_items")]
    pub soups: Vec<String>,
    #[serde(alias = "ana_yemekler", deserialize_with = "nullable_items")]
    pub mains: Vec<String>,
    #[serde(alias = "yan_yemekler", deserialize_with = "nullable_items")]
    pub sides: Vec<String>,
    #[serde(alias = "salatalar", deserialize_with = "nullable_items")]
    pub salads: Vec<String>,
    #[serde(alias = "tatlilar", deserialize_with = "nullable_items")]
    pub desserts: Vec<String>,
    #[serde(alias = "kalori", deserialize_with = "string_or_number")]
    pub calories: Option<String>,
    #[serde(alias = "ozel_durum")]
    pub special_notice: Option<String>,
}

impl MenuEntry {
    /// The special notice, if it carries any non-blank text.
    pub fn notice(&self) -> Option<&str> {
        self.special_notice
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// A `null` category reads as empty and `null` items are dropped.
fn nullable_items<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(items.into_iter().flatten().flatten().collect())
}

/// ISO date string (`YYYY-MM-DD`) to menu.
pub type MenuTable = BTreeMap<String, MenuEntry>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: String,
    pub text: String,
    /// Rendered side by side with its neighbour where the layout allows it.
    pub short: bool,
}

impl Section {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            short: false,
        }
    }

    pub fn short(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            short: true,
            ..Self::new(label, text)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAction {
    pub label: String,
    pub url: String,
    pub primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Legacy attachment card with a colour bar, fields and buttons.
    Attachment { color: String },
    /// Block Kit header, one section per body block, context footer.
    Blocks,
    /// Single `text` field.
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub channel: String,
    pub username: String,
    pub icon_emoji: String,
    pub title: String,
    pub body_sections: Vec<Section>,
    pub link_actions: Vec<LinkAction>,
    pub footer: Option<String>,
    pub layout: Layout,
}

impl NotificationMessage {
    pub fn section(&self, label: &str) -> Option<&Section> {
        self.body_sections.iter().find(|s| s.label == label)
    }
}
