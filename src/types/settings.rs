use serde::{Deserialize, Serialize};

use super::bookmark::ViewMode;

/// Key under which the bookmark collection is stored.
pub const DEFAULT_STORAGE_KEY: &str = "bookmarkAlpha";

/// Top-level application settings container.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub images: ImageSettings,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralSettings {
    pub storage_key: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Presentation preferences remembered between sessions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DisplaySettings {
    pub view_mode: ViewMode,
}

/// Parameters for the third-party image services used by the image resolver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageSettings {
    pub screenshot_api_key: String,
    pub screenshot_dimension: String,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            screenshot_api_key: "free".to_string(),
            screenshot_dimension: "1024x768".to_string(),
        }
    }
}
