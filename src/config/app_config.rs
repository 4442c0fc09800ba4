use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::config::PlayConfig;
use crate::render::PlayFieldConfig;
use crate::util::GameError;

pub const CONFIG_FILE: &str = "quadrant.json";

/// Window creation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "quadrant".to_string(),
            width: 800,
            height: 640,
            resizable: true,
        }
    }
}

/// Frame pacing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub fps: u32,
    /// Longest delta fed to the logical clock in one frame.
    pub max_frame_delta_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            max_frame_delta_ms: 250,
        }
    }
}

impl TimingConfig {
    /// Target frame interval in microseconds.
    pub fn frame_interval_us(&self) -> u64 {
        1_000_000 / u64::from(self.fps.max(1))
    }

    pub fn max_frame_delta_us(&self) -> u64 {
        self.max_frame_delta_ms.saturating_mul(1_000)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub timing: TimingConfig,
    pub play: PlayConfig,
    pub render: PlayFieldConfig,
}

impl AppConfig {
    /// Loads config from a specified path.
    /// Returns default config if file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a specified path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.timing.fps == 0 {
            return Err(GameError::InvalidConfig("fps must be positive".to_string()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(GameError::InvalidConfig(
                "window size must be non-zero".to_string(),
            ));
        }
        self.play.validate()?;
        self.render.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MismatchPolicy;
    use tempfile::tempdir;

    #[test]
    fn test_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 640);
        assert_eq!(config.timing.fps, 60);
        assert_eq!(config.timing.frame_interval_us(), 16_666);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_io() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("quadrant.json");

        let mut config = AppConfig::default();
        config.window.title = "test".to_string();
        config.timing.fps = 30;
        config.play.mismatch_policy = MismatchPolicy::GameOver;
        config.play.seed = Some(7);

        config.save_to(&file_path).unwrap();
        let loaded = AppConfig::load_from(&file_path).unwrap();

        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nonexistent.json");

        let config = AppConfig::load_from(&file_path).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("broken.json");
        fs::write(&file_path, "{ not json").unwrap();

        assert!(AppConfig::load_from(&file_path).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_fps() {
        let mut config = AppConfig::default();
        config.timing.fps = 0;
        assert!(config.validate().is_err());
    }
}
