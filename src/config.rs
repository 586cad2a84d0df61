use std::path::Path;

use serde::{Deserialize, Serialize};

/// Which calendar dates are rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayCalendar {
    /// Bikram Sambat, the default for Nepali users.
    #[default]
    Bs,
    /// Gregorian.
    Gregorian,
}

/// Application configuration.
///
/// Stored as `config.toml` inside the data directory. Loading is tolerant:
/// a missing or unreadable file falls back to defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// How many deadlines the upcoming feed is capped at.
    upcoming_window: usize,

    /// Calendar used for rendering dates.
    display_calendar: DisplayCalendar,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upcoming_window: default_upcoming_window(),
            display_calendar: DisplayCalendar::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or
    /// if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// The upcoming-feed cap.
    #[must_use]
    pub const fn upcoming_window(&self) -> usize {
        self.upcoming_window
    }

    /// The calendar dates are rendered in.
    #[must_use]
    pub const fn display_calendar(&self) -> DisplayCalendar {
        self.display_calendar
    }

    /// Sets the calendar used for rendering dates.
    pub const fn set_display_calendar(&mut self, calendar: DisplayCalendar) {
        self.display_calendar = calendar;
    }
}

const fn default_upcoming_window() -> usize {
    5
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the
/// domain type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_upcoming_window")]
        upcoming_window: usize,

        #[serde(default)]
        display_calendar: DisplayCalendar,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                upcoming_window,
                display_calendar,
            } => Self {
                upcoming_window,
                display_calendar,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            upcoming_window: config.upcoming_window,
            display_calendar: config.display_calendar,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nupcoming_window = 8\ndisplay_calendar = \"gregorian\"\n")
            .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.upcoming_window(), 8);
        assert_eq!(config.display_calendar(), DisplayCalendar::Gregorian);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn empty_version_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn round_trips_through_toml() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        let mut config = Config::default();
        config.set_display_calendar(DisplayCalendar::Gregorian);
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
