use std::path::Path;

use serde::{Deserialize, Serialize};

/// Platform layer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Track the host color-scheme preference instead of a fixed theme
    pub follow_system_theme: bool,
    /// Theme used when not following the system
    pub theme: String,
    pub canvas_selector: String,
    /// Element whose content box defines the logical window size
    pub wrapper_selector: String,
    /// Mount point of the durable storage area
    pub storage_path: String,
    pub context_version: (u8, u8),
    pub initial_width: u32,
    pub initial_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            follow_system_theme: true,
            theme: "Dark".to_string(),
            canvas_selector: "#canvas".to_string(),
            wrapper_selector: "#canvas-wrapper".to_string(),
            storage_path: "/home/web_user/.local".to_string(),
            context_version: (3, 1),
            initial_width: 1280,
            initial_height: 720,
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Settings {
    /// Load settings from a JSON file; missing keys keep their defaults
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_web_layout() {
        let settings = Settings::default();
        assert!(settings.follow_system_theme);
        assert_eq!(settings.canvas_selector, "#canvas");
        assert_eq!(settings.wrapper_selector, "#canvas-wrapper");
        assert_eq!(settings.storage_path, "/home/web_user/.local");
        assert_eq!(settings.context_version, (3, 1));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings =
            Settings::from_json(r#"{ "follow_system_theme": false, "theme": "Light" }"#).unwrap();
        assert!(!settings.follow_system_theme);
        assert_eq!(settings.theme, "Light");
        assert_eq!(settings.wrapper_selector, "#canvas-wrapper");
    }

    #[test]
    fn test_context_version_as_array() {
        let settings = Settings::from_json(r#"{ "context_version": [2, 0] }"#).unwrap();
        assert_eq!(settings.context_version, (2, 0));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Settings::load_from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
