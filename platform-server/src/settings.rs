//! Persisted route settings.
//!
//! The browser keeps its own copy of these under the same storage key; the
//! server-side blob only supplies the fallback origin/destination when a
//! departures query omits them. Loading is forgiving: a missing or corrupt
//! file yields the default Wynyard → Redfern route.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Fixed storage key shared with the browser client.
pub const SETTINGS_KEY: &str = "whichplatform_settings";

/// A saved stop: upstream global stop id plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedStop {
    pub id: String,
    pub name: String,
}

impl SavedStop {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Route settings blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default query origin.
    pub origin: SavedStop,

    /// Default query destination.
    pub dest: SavedStop,

    /// Optional saved "home" stop.
    pub home: Option<SavedStop>,

    /// Optional saved "work" stop.
    pub work: Option<SavedStop>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            origin: SavedStop::new("200080", "Wynyard"),
            dest: SavedStop::new("201510", "Redfern"),
            home: None,
            work: None,
        }
    }
}

impl Settings {
    /// Default on-disk location, named after the shared storage key.
    pub fn default_path() -> PathBuf {
        PathBuf::from(format!("{SETTINGS_KEY}.json"))
    }

    /// Load settings from disk, falling back to defaults when the file is
    /// missing or unreadable. Fields absent from the file keep their
    /// default values.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };

        match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("ignoring corrupt settings file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Write settings to disk as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_wynyard_to_redfern() {
        let settings = Settings::default();
        assert_eq!(settings.origin.id, "200080");
        assert_eq!(settings.dest.id, "201510");
        assert!(settings.home.is_none());
        assert!(settings.work.is_none());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(Settings::load(&path), Settings::default());
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = Settings {
            origin: SavedStop::new("200060", "Central"),
            dest: SavedStop::new("206010", "Chatswood"),
            home: Some(SavedStop::new("200080", "Wynyard")),
            work: None,
        };
        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path), settings);
    }

    #[test]
    fn partial_file_keeps_default_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"origin": {"id": "200060", "name": "Central"}}"#).unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.origin.id, "200060");
        // Unmentioned fields fall back to defaults.
        assert_eq!(settings.dest.id, "201510");
    }
}
