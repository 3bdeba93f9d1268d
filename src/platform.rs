// Bookmark Alpha platform paths
// Config and data directories come from `dirs`, with environment overrides
// for portable installs and tests.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "bookmark-alpha";

/// Overrides [`get_config_dir`] when set.
pub const CONFIG_DIR_ENV: &str = "BOOKMARK_ALPHA_CONFIG_DIR";

/// Overrides [`get_data_dir`] when set.
pub const DATA_DIR_ENV: &str = "BOOKMARK_ALPHA_DATA_DIR";

/// Directory holding `settings.json`.
///
/// `$BOOKMARK_ALPHA_CONFIG_DIR`, else the platform config dir
/// (`~/.config/bookmark-alpha` on Linux), else `./bookmark-alpha`.
pub fn get_config_dir() -> PathBuf {
    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Directory holding the bookmark database.
///
/// `$BOOKMARK_ALPHA_DATA_DIR`, else the platform data dir
/// (`~/.local/share/bookmark-alpha` on Linux), else `./bookmark-alpha`.
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Default location of the settings file.
pub fn default_settings_path() -> PathBuf {
    get_config_dir().join("settings.json")
}

/// Default location of the bookmark database.
pub fn default_database_path() -> PathBuf {
    get_data_dir().join("bookmark-alpha.db")
}
