//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ThermwatchError, ThermwatchResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Overlay drawing parameters.
    pub overlay: OverlayConfig,

    /// How times are presented to operators.
    pub display: DisplayConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Coordinate space that detection rectangles are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSpace {
    /// Detections share the decoded image's intrinsic pixel space.
    #[default]
    Intrinsic,
    /// Legacy heuristic: when detections overshoot the intrinsic size,
    /// shrink them by the largest overshoot ratio before mapping.
    InferFromExtent,
}

/// Overlay drawing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Gap between a box's top edge and its confidence label (px).
    pub label_margin: f64,

    /// Confidence label text height (px). Labels never anchor above this.
    pub label_text_height: f64,

    /// Coordinate space of incoming detections.
    pub detection_space: DetectionSpace,
}

/// Presentation settings for times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Minutes east of UTC for rendered wall-clock times.
    pub utc_offset_minutes: i32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "thermwatch=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            label_margin: 10.0,
            label_text_height: 40.0,
            detection_space: DetectionSpace::Intrinsic,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        // America/Mexico_City, which no longer observes DST.
        Self {
            utc_offset_minutes: -360,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location.
    ///
    /// A missing file yields defaults. A file that exists but cannot be
    /// read or fails validation is an error, so the caller can report it
    /// once logging is up.
    pub fn load() -> ThermwatchResult<Self> {
        Self::load_or_default(&config_file_path())
    }

    /// Like [`load_from`](Self::load_from), but a missing file yields defaults.
    pub fn load_or_default(path: &Path) -> ThermwatchResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load config from an explicit path, reporting any failure.
    pub fn load_from(path: &Path) -> ThermwatchResult<Self> {
        if !path.exists() {
            return Err(ThermwatchError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the overlay and display code cannot work with.
    pub fn validate(&self) -> ThermwatchResult<()> {
        let overlay = &self.overlay;
        if !overlay.label_margin.is_finite() || overlay.label_margin < 0.0 {
            return Err(ThermwatchError::config(format!(
                "overlay.label_margin must be a non-negative number, got {}",
                overlay.label_margin
            )));
        }
        if !overlay.label_text_height.is_finite() || overlay.label_text_height < 0.0 {
            return Err(ThermwatchError::config(format!(
                "overlay.label_text_height must be a non-negative number, got {}",
                overlay.label_text_height
            )));
        }
        if self.display.utc_offset_minutes.abs() >= 24 * 60 {
            return Err(ThermwatchError::config(format!(
                "display.utc_offset_minutes out of range: {}",
                self.display.utc_offset_minutes
            )));
        }
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("thermwatch").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_field_settings() {
        let config = AppConfig::default();
        assert_eq!(config.overlay.label_margin, 10.0);
        assert_eq!(config.overlay.label_text_height, 40.0);
        assert_eq!(config.overlay.detection_space, DetectionSpace::Intrinsic);
        assert_eq!(config.display.utc_offset_minutes, -360);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let raw = r#"{ "overlay": { "detection_space": "infer_from_extent" } }"#;
        let config: AppConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(
            config.overlay.detection_space,
            DetectionSpace::InferFromExtent
        );
        assert_eq!(config.overlay.label_margin, 10.0);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load_from(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ThermwatchError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_or_default_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_or_default_reports_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"overlay":{"label_margin":-4.0}}"#).unwrap();
        let err = AppConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ThermwatchError::Config { .. }));
        assert!(err.to_string().contains("label_margin"));

        std::fs::write(&path, "{ not json").unwrap();
        let err = AppConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ThermwatchError::Json(_)));
    }

    #[test]
    fn test_load_from_rejects_negative_margin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "overlay": { "label_margin": -4.0 } }"#).unwrap();
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ThermwatchError::Config { .. }));
    }

    #[test]
    fn test_load_from_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = AppConfig::default();
        config.display.utc_offset_minutes = 60;
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }
}
