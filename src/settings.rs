use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{PennyError, Result};
use crate::fields::DateOrder;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub data_dir: String,
    /// "mdy" or "dmy". Used when a slash/dash date is genuinely ambiguous
    /// (both components <= 12); there is no locale signal in statement
    /// files, so this has to be user configuration.
    #[serde(default = "default_date_order")]
    pub date_order: String,
}

fn default_date_order() -> String {
    DateOrder::MonthFirst.key().to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir().to_string_lossy().to_string(),
            date_order: default_date_order(),
        }
    }
}

impl Settings {
    pub fn date_order(&self) -> DateOrder {
        DateOrder::from_key(&self.date_order).unwrap_or_default()
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("penny")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("penny")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Settings::default()
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| PennyError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn get_data_dir() -> PathBuf {
    PathBuf::from(&load_settings().data_dir)
}
