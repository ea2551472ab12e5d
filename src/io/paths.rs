use std::path::{Path, PathBuf};

use chrono::NaiveDate;

const APP_DIR: &str = "zenith";

/// Default store location: `~/.local/share/zenith/` (platform data dir)
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| std::env::temp_dir().join(APP_DIR))
}

/// Default config file: `~/.config/zenith/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// `tasks_YYYY-MM-DD.json` inside the data dir
pub fn tasks_file(data_dir: &Path, date: NaiveDate) -> PathBuf {
    data_dir.join(format!("tasks_{}.json", date.format("%Y-%m-%d")))
}

pub fn scripts_file(data_dir: &Path) -> PathBuf {
    data_dir.join("scripts.json")
}

pub fn log_file(data_dir: &Path) -> PathBuf {
    data_dir.join("zenith.log")
}
