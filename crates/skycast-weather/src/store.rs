//! Persistent search preferences: last city, recent searches, display unit.
//!
//! Stored as a single JSON document in the data directory. Every mutation is
//! written through immediately.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::WeatherError;
use crate::types::TemperatureUnit;

/// Maximum number of remembered searches
pub const HISTORY_LIMIT: usize = 5;

const FILE_NAME: &str = "preferences.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub last_city: Option<String>,
    /// Most recent first, no duplicates
    #[serde(default)]
    pub history: Vec<String>,
    #[serde(default)]
    pub unit: Option<TemperatureUnit>,
}

impl Preferences {
    /// Move `city` to the front of the history and make it the last city.
    /// Blank names are ignored.
    pub fn record_search(&mut self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            return;
        }

        self.history.retain(|c| c != city);
        self.history.insert(0, city.to_string());
        self.history.truncate(HISTORY_LIMIT);
        self.last_city = Some(city.to_string());
    }

    /// Drop blanks and duplicates and enforce the length cap, keeping the
    /// first occurrence of each city.
    fn normalize(&mut self) {
        let mut seen: Vec<String> = Vec::with_capacity(HISTORY_LIMIT);
        for city in self.history.drain(..) {
            let city = city.trim().to_string();
            if city.is_empty() || seen.contains(&city) {
                continue;
            }
            seen.push(city);
        }
        seen.truncate(HISTORY_LIMIT);
        self.history = seen;
    }
}

#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    prefs: Mutex<Preferences>,
}

impl PreferenceStore {
    /// Open the store in `data_dir`, starting empty if nothing was saved yet.
    ///
    /// A file that cannot be parsed is ignored with a warning and replaced on
    /// the next write.
    ///
    /// # Errors
    ///
    /// `Storage` if the file exists but cannot be read.
    pub fn open(data_dir: &Path) -> Result<Self, WeatherError> {
        let path = data_dir.join(FILE_NAME);

        let prefs = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Preferences>(&contents) {
                Ok(mut prefs) => {
                    prefs.normalize();
                    prefs
                }
                Err(e) => {
                    tracing::warn!(
                        "Ignoring unreadable preferences at {}: {}",
                        path.display(),
                        e
                    );
                    Preferences::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Preferences::default(),
            Err(e) => {
                return Err(WeatherError::Storage(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        Ok(Self {
            path,
            prefs: Mutex::new(prefs),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn last_city(&self) -> Option<String> {
        self.prefs.lock().last_city.clone()
    }

    pub fn history(&self) -> Vec<String> {
        self.prefs.lock().history.clone()
    }

    /// Stored unit, if the user ever picked one
    pub fn unit(&self) -> Option<TemperatureUnit> {
        self.prefs.lock().unit
    }

    /// # Errors
    ///
    /// `Storage` if the preferences cannot be written.
    pub fn record_search(&self, city: &str) -> Result<(), WeatherError> {
        let mut prefs = self.prefs.lock();
        prefs.record_search(city);
        self.persist(&prefs)
    }

    /// Forget recent searches; the last city is kept.
    ///
    /// # Errors
    ///
    /// `Storage` if the preferences cannot be written.
    pub fn clear_history(&self) -> Result<(), WeatherError> {
        let mut prefs = self.prefs.lock();
        prefs.history.clear();
        self.persist(&prefs)
    }

    /// # Errors
    ///
    /// `Storage` if the preferences cannot be written.
    pub fn set_unit(&self, unit: TemperatureUnit) -> Result<(), WeatherError> {
        let mut prefs = self.prefs.lock();
        prefs.unit = Some(unit);
        self.persist(&prefs)
    }

    fn persist(&self, prefs: &Preferences) -> Result<(), WeatherError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                WeatherError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let contents = serde_json::to_string_pretty(prefs)
            .map_err(|e| WeatherError::Storage(format!("Failed to serialize preferences: {}", e)))?;

        std::fs::write(&self.path, contents).map_err(|e| {
            WeatherError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        tracing::debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_search_moves_city_to_front() {
        let mut prefs = Preferences::default();
        for city in ["Paris", "Oslo", "Lima"] {
            prefs.record_search(city);
        }
        prefs.record_search("Paris");

        assert_eq!(prefs.history, ["Paris", "Lima", "Oslo"]);
        assert_eq!(prefs.last_city.as_deref(), Some("Paris"));
    }

    #[test]
    fn test_differently_cased_names_are_separate_entries() {
        let mut prefs = Preferences::default();
        prefs.record_search("Paris");
        prefs.record_search(" paris ");

        assert_eq!(prefs.history, ["paris", "Paris"]);
        assert_eq!(prefs.last_city.as_deref(), Some("paris"));
    }

    #[test]
    fn test_history_is_capped() {
        let mut prefs = Preferences::default();
        for city in ["A", "B", "C", "D", "E", "F", "G"] {
            prefs.record_search(city);
        }
        assert_eq!(prefs.history, ["G", "F", "E", "D", "C"]);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let mut prefs = Preferences::default();
        prefs.record_search("Rome");
        prefs.record_search("   ");
        assert_eq!(prefs.history, ["Rome"]);
        assert_eq!(prefs.last_city.as_deref(), Some("Rome"));
    }

    #[test]
    fn test_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");

        let store = PreferenceStore::open(&data_dir).unwrap();
        assert!(store.history().is_empty());
        assert_eq!(store.last_city(), None);
        store.record_search("Berlin").unwrap();
        store.record_search("Madrid").unwrap();
        store.set_unit(TemperatureUnit::Fahrenheit).unwrap();

        let reopened = PreferenceStore::open(&data_dir).unwrap();
        assert_eq!(reopened.history(), ["Madrid", "Berlin"]);
        assert_eq!(reopened.last_city().as_deref(), Some("Madrid"));
        assert_eq!(reopened.unit(), Some(TemperatureUnit::Fahrenheit));
    }

    #[test]
    fn test_clear_history_keeps_last_city() {
        let dir = tempfile::tempdir().unwrap();
        let store = PreferenceStore::open(dir.path()).unwrap();
        store.record_search("Cairo").unwrap();
        store.clear_history().unwrap();

        let reopened = PreferenceStore::open(dir.path()).unwrap();
        assert!(reopened.history().is_empty());
        assert_eq!(reopened.last_city().as_deref(), Some("Cairo"));
    }

    #[test]
    fn test_corrupted_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(FILE_NAME), "{ not json").unwrap();

        let store = PreferenceStore::open(dir.path()).unwrap();
        assert!(store.history().is_empty());
        assert_eq!(store.last_city(), None);
        assert_eq!(store.unit(), None);

        store.record_search("Lagos").unwrap();
        let reopened = PreferenceStore::open(dir.path()).unwrap();
        assert_eq!(reopened.history(), ["Lagos"]);
    }

    #[test]
    fn test_hand_edited_history_is_normalized() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(FILE_NAME),
            r#"{"history": ["Quito", "quito", "", "Lima", "A", "B", "C", "D"]}"#,
        )
        .unwrap();

        let store = PreferenceStore::open(dir.path()).unwrap();
        assert_eq!(store.history(), ["Quito", "quito", "Lima", "A", "B"]);
        assert_eq!(store.unit(), None);
    }
}
