//! Configuration management for the reading-lens pipeline

use crate::constants::{
    DEFAULT_BASE_FONT_SIZE_PX, DEFAULT_DEAD_ZONE_RADIUS, DEFAULT_DEAD_ZONE_STABLE_MS, DEFAULT_DETECTION_CONFIDENCE,
    DEFAULT_DISTANCE_SCALE, DEFAULT_FONT_CHANGE_THRESHOLD, DEFAULT_MAX_FACES, DEFAULT_NO_FACE_GRACE_MS,
    DEFAULT_POSITION_TOLERANCE, DEFAULT_SMOOTHING_WINDOW, DEFAULT_STABILITY_THRESHOLD, DEFAULT_TARGET_FACE_RATIO,
    DEFAULT_TRACKING_CONFIDENCE,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Landmark detector configuration
    pub detector: DetectorConfig,

    /// Temporal smoothing configuration
    pub smoothing: SmoothingConfig,

    /// Alignment classification configuration
    pub alignment: AlignmentConfig,

    /// Relative distance configuration
    pub distance: DistanceConfig,

    /// Font mapping configuration
    pub font: FontConfig,
}

/// Landmark detector parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Maximum number of faces to track
    pub max_faces: usize,

    /// Detection confidence threshold (0.0-1.0)
    pub detection_confidence: f64,

    /// Tracking confidence threshold (0.0-1.0)
    pub tracking_confidence: f64,
}

/// Temporal smoothing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Rolling window size in frames
    pub window: usize,

    /// No-face grace period before the window is cleared (ms)
    pub no_face_grace_ms: u64,
}

/// Alignment classification parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentConfig {
    /// Target face-width-to-image ratio at the calibration distance
    pub target_face_ratio: f64,

    /// Normalized center-offset tolerance
    pub position_tolerance: f64,

    /// Consecutive identical frames before a status change is emitted
    pub stability_threshold: u32,
}

/// Relative distance parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceConfig {
    /// Scale applied to the raw (1/ratio - 1) signal
    pub scale: f64,
}

/// Font mapping parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    /// Base font size before calibration overrides it (px)
    pub base_size_px: f64,

    /// Dead zone radius in distance units
    pub dead_zone_radius: f64,

    /// Stability time before the dead zone recenters (ms)
    pub dead_zone_stable_ms: u64,

    /// Minimum distance delta before a font update
    pub change_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            smoothing: SmoothingConfig::default(),
            alignment: AlignmentConfig::default(),
            distance: DistanceConfig::default(),
            font: FontConfig::default(),
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_faces: DEFAULT_MAX_FACES,
            detection_confidence: DEFAULT_DETECTION_CONFIDENCE,
            tracking_confidence: DEFAULT_TRACKING_CONFIDENCE,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_SMOOTHING_WINDOW,
            no_face_grace_ms: DEFAULT_NO_FACE_GRACE_MS,
        }
    }
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            target_face_ratio: DEFAULT_TARGET_FACE_RATIO,
            position_tolerance: DEFAULT_POSITION_TOLERANCE,
            stability_threshold: DEFAULT_STABILITY_THRESHOLD,
        }
    }
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_DISTANCE_SCALE,
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            base_size_px: DEFAULT_BASE_FONT_SIZE_PX,
            dead_zone_radius: DEFAULT_DEAD_ZONE_RADIUS,
            dead_zone_stable_ms: DEFAULT_DEAD_ZONE_STABLE_MS,
            change_threshold: DEFAULT_FONT_CHANGE_THRESHOLD,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_yaml::to_string(self).map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.detector.detection_confidence) {
            return Err(Error::Config(
                "Detection confidence must be between 0.0 and 1.0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.detector.tracking_confidence) {
            return Err(Error::Config(
                "Tracking confidence must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.detector.max_faces == 0 {
            return Err(Error::Config("Max faces must be greater than 0".to_string()));
        }

        if self.smoothing.window == 0 {
            return Err(Error::Config("Smoothing window must be greater than 0".to_string()));
        }

        if self.alignment.target_face_ratio <= 0.0 || self.alignment.target_face_ratio > 1.0 {
            return Err(Error::Config(
                "Target face ratio must be in (0.0, 1.0]".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.alignment.position_tolerance) {
            return Err(Error::Config(
                "Position tolerance must be between 0.0 and 1.0".to_string(),
            ));
        }
        if self.alignment.stability_threshold == 0 {
            return Err(Error::Config(
                "Stability threshold must be greater than 0".to_string(),
            ));
        }

        if self.distance.scale <= 0.0 {
            return Err(Error::Config("Distance scale must be positive".to_string()));
        }

        if self.font.base_size_px <= 0.0 {
            return Err(Error::Config("Base font size must be positive".to_string()));
        }
        if self.font.dead_zone_radius < 0.0 {
            return Err(Error::Config("Dead zone radius must be non-negative".to_string()));
        }
        if self.font.change_threshold < 0.0 {
            return Err(Error::Config("Font change threshold must be non-negative".to_string()));
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Reading Lens Configuration

# Landmark detector
detector:
  max_faces: 1
  detection_confidence: 0.5
  tracking_confidence: 0.5

# Temporal smoothing
smoothing:
  window: 5
  no_face_grace_ms: 500

# Alignment classification
alignment:
  target_face_ratio: 0.5
  position_tolerance: 0.2
  stability_threshold: 3

# Relative distance
distance:
  scale: 100.0

# Font mapping
font:
  base_size_px: 18.0
  dead_zone_radius: 2.0
  dead_zone_stable_ms: 1000
  change_threshold: 0.5
"#;
