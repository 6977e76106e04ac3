use crate::models::input::ScreenBounds;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upper bound for the cursor easing hint
pub const MAX_CURSOR_MOVE_SECS: f64 = 5.0;

/// Which side of the PIP joint a fingertip must be on for the finger to count as extended.
///
/// Depends on the detector's coordinate origin and on whether the frame was mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionConvention {
    /// `tip.y > pip.y`
    TipBelowPip,
    /// `tip.y < pip.y`
    TipAbovePip,
}

impl Default for ExtensionConvention {
    fn default() -> Self {
        ExtensionConvention::TipBelowPip
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Minimum confidence for the detector to report a hand (0.0-1.0)
    pub detection_confidence: f32,
    /// Minimum confidence for the detector to keep tracking a hand (0.0-1.0)
    pub tracking_confidence: f32,
    /// Maximum number of hands the detector tracks; only the first drives the cursor
    pub max_hands: u32,
    /// Fingertip distance in pixels under which two fingers count as "together"
    pub distance_threshold: f32,
    /// Minimum seconds between two click actions (left and right share it)
    pub click_cooldown_secs: f64,
    /// Minimum seconds between two scroll actions
    pub scroll_cooldown_secs: f64,
    /// Scroll units per scroll gesture
    pub scroll_amount: i32,
    /// Camera frame width in pixels
    pub frame_width: u32,
    /// Camera frame height in pixels
    pub frame_height: u32,
    /// Easing duration hint for cursor moves, in seconds
    pub cursor_move_duration_secs: f64,
    /// Direction of the finger extension test
    pub extension_convention: ExtensionConvention,
    /// Use this screen size instead of querying the input backend
    pub screen_override: Option<ScreenBounds>,
    /// Log frame rate while running
    pub show_fps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detection_confidence: 0.7,
            tracking_confidence: 0.7,
            max_hands: 2,
            distance_threshold: 30.0,
            click_cooldown_secs: 0.3,
            scroll_cooldown_secs: 0.2,
            scroll_amount: 3,
            frame_width: 1280,
            frame_height: 720,
            cursor_move_duration_secs: 0.01,
            extension_convention: ExtensionConvention::TipBelowPip,
            screen_override: None,
            show_fps: true,
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating it with defaults if it doesn't exist
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=1.0).contains(&self.detection_confidence) {
            return Err(ConfigError::Invalid(format!(
                "Invalid detection confidence: {}. Must be between 0.0 and 1.0",
                self.detection_confidence
            )));
        }

        if !(0.0..=1.0).contains(&self.tracking_confidence) {
            return Err(ConfigError::Invalid(format!(
                "Invalid tracking confidence: {}. Must be between 0.0 and 1.0",
                self.tracking_confidence
            )));
        }

        if self.max_hands == 0 {
            return Err(ConfigError::Invalid(
                "Invalid max hands: 0. Must track at least one hand".to_string(),
            ));
        }

        if !self.distance_threshold.is_finite() || self.distance_threshold <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "Invalid distance threshold: {}. Must be a positive pixel distance",
                self.distance_threshold
            )));
        }

        for (name, value) in [
            ("click cooldown", self.click_cooldown_secs),
            ("scroll cooldown", self.scroll_cooldown_secs),
            ("cursor move duration", self.cursor_move_duration_secs),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "Invalid {}: {}. Must be zero or more seconds",
                    name, value
                )));
            }
        }

        if self.cursor_move_duration_secs > MAX_CURSOR_MOVE_SECS {
            return Err(ConfigError::Invalid(format!(
                "Invalid cursor move duration: {}. Must be at most {} seconds",
                self.cursor_move_duration_secs, MAX_CURSOR_MOVE_SECS
            )));
        }

        if self.scroll_amount <= 0 {
            return Err(ConfigError::Invalid(format!(
                "Invalid scroll amount: {}. Must scroll at least one unit",
                self.scroll_amount
            )));
        }

        if self.frame_width == 0 || self.frame_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "Invalid frame size: {}x{}. Both dimensions must be non-zero",
                self.frame_width, self.frame_height
            )));
        }

        if let Some(screen) = self.screen_override {
            if screen.width == 0 || screen.height == 0 {
                return Err(ConfigError::Invalid(format!(
                    "Invalid screen override: {}x{}. Both dimensions must be non-zero",
                    screen.width, screen.height
                )));
            }
        }

        Ok(())
    }

    /// Reset to default configuration
    pub fn reset() -> ConfigResult<Self> {
        let config = Self::default();
        config.save()?;
        Ok(config)
    }

    /// Easing hint for cursor moves; out-of-range values fall back to an instant move
    pub fn cursor_move_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.cursor_move_duration_secs).unwrap_or_default()
    }

    /// Get the configuration file path
    pub fn get_config_path() -> ConfigResult<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| ConfigError::NoHomeDir)?;

        let mut path = PathBuf::from(home);
        path.push(".gesture_mouse");
        path.push("config");
        path.push("settings.json");

        Ok(path)
    }
}

// ==============================================================================
// Error Types
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine home directory")]
    NoHomeDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;
