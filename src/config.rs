//! User settings persisted in the OS config directory.

use std::path::{Path, PathBuf};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::io::TASKS_KEY;

/// Column the calendar rows start on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FirstWeekday {
    #[default]
    Sunday,
    Monday,
}

impl FirstWeekday {
    pub fn weekday(&self) -> Weekday {
        match self {
            FirstWeekday::Sunday => Weekday::Sun,
            FirstWeekday::Monday => Weekday::Mon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    pub first_weekday: FirstWeekday,
    /// Key the task list is stored under.
    pub storage_key: String,
    pub show_week_numbers: bool,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            first_weekday: FirstWeekday::Sunday,
            storage_key: TASKS_KEY.to_string(),
            show_week_numbers: false,
        }
    }
}

impl PlannerSettings {
    /// `settings.json` in the platform config dir, or the working directory
    /// when there is none.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("", "", "MonthPlanner")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("settings.json"))
    }

    /// Read settings, falling back to defaults for a missing or bad file.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|e| {
                log::warn!("bad settings file {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
