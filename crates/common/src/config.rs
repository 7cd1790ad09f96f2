use crate::color::{Color, ColorError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading the viewer configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config value: {0}")]
    Color(#[from] ColorError),
}

/// On-disk form of the config. Channels are wide integers so range errors
/// surface through `Color::new` rather than a serde integer overflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct RawConfig {
    window_width: u32,
    window_height: u32,
    fov_degrees: f32,
    near: f32,
    far: f32,
    move_speed: f32,
    sensitivity: f32,
    background: [i64; 3],
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
            move_speed: 10.0,
            sensitivity: 0.1,
            background: [26, 26, 38],
        }
    }
}

/// Validated viewer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub window_width: u32,
    pub window_height: u32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub move_speed: f32,
    pub sensitivity: f32,
    pub background: Color,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        // The defaults are in range, so this cannot fail.
        Self::from_raw(RawConfig::default()).unwrap()
    }
}

impl ViewerConfig {
    /// Load from a YAML file. A missing file yields the defaults; a present
    /// but malformed file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_yaml::from_str(text)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let [r, g, b] = raw.background;
        Ok(Self {
            window_width: raw.window_width,
            window_height: raw.window_height,
            fov_degrees: raw.fov_degrees,
            near: raw.near,
            far: raw.far,
            move_speed: raw.move_speed,
            sensitivity: raw.sensitivity,
            background: Color::new(r, g, b)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_file_missing() {
        let config = ViewerConfig::load("does/not/exist.yaml").unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = ViewerConfig::from_yaml("move_speed: 4.5\n").unwrap();
        assert_eq!(config.move_speed, 4.5);
        assert_eq!(config.window_width, 1280);
    }

    #[test]
    fn out_of_range_background_is_rejected() {
        let err = ViewerConfig::from_yaml("background: [300, 0, 0]\n").unwrap_err();
        assert!(matches!(err, ConfigError::Color(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "window_width: 640\nwindow_height: 480").unwrap();
        let config = ViewerConfig::load(file.path()).unwrap();
        assert_eq!(config.window_width, 640);
        assert_eq!(config.window_height, 480);
    }
}
