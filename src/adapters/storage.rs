use crate::domain::model::{CacheEntry, CacheMap, MenuEntry, MenuTable};
use crate::domain::ports::CacheStore;
use crate::utils::error::Result;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Flat JSON file holding one entry per monitored source.
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    path: PathBuf,
}

impl JsonFileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<Map<String, Value>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        read_json_object(&self.path).map(Some)
    }
}

fn read_json_object(path: &Path) -> Result<Map<String, Value>> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

impl CacheStore for JsonFileCache {
    fn load(&self) -> CacheMap {
        let raw = match self.read() {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!("📂 No cache file at {}, starting empty", self.path.display());
                return CacheMap::new();
            }
            Err(e) => {
                tracing::warn!("⚠️ Cache unreadable, starting empty: {}", e);
                return CacheMap::new();
            }
        };

        let mut entries = CacheMap::new();
        for (key, value) in raw {
            match serde_json::from_value::<CacheEntry>(value) {
                Ok(entry) => {
                    entries.insert(key, entry);
                }
                Err(e) => tracing::warn!("⚠️ Skipping cache entry {}: {}", key, e),
            }
        }
        tracing::info!("📂 Cache loaded: {} entries", entries.len());
        entries
    }

    fn save(&self, entries: &CacheMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json)?;
        fs::rename(&staging, &self.path)?;

        tracing::info!("💾 Cache saved: {} entries", entries.len());
        Ok(())
    }
}

/// Read the menu table from the first candidate path that exists.
///
/// A missing file or malformed JSON yields an empty table. Entries that do not match the
/// menu shape are skipped one by one.
pub fn load_menu_table(candidates: &[PathBuf]) -> MenuTable {
    let Some(path) = candidates.iter().find(|p| p.exists()) else {
        tracing::error!("❌ No menu file found (tried {} paths)", candidates.len());
        return MenuTable::new();
    };
    tracing::info!("📂 Menu file found: {}", path.display());

    let raw = match read_json_object(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!("❌ Menu file unreadable: {}", e);
            return MenuTable::new();
        }
    };

    let mut table = MenuTable::new();
    for (date, value) in raw {
        match serde_json::from_value::<MenuEntry>(value) {
            Ok(entry) => {
                table.insert(date, entry);
            }
            Err(e) => tracing::warn!("⚠️ Skipping menu for {}: {}", date, e),
        }
    }
    table
}
