//! Landmark source and camera capability interfaces.
//!
//! The landmark detection model and the capture device are external
//! collaborators. This module defines the narrow seams the pipeline consumes:
//! a per-frame payload of normalized landmark positions plus image
//! dimensions, and the one-shot setup contracts for the detector and camera.

use crate::constants::{DEFAULT_DETECTION_CONFIDENCE, DEFAULT_MAX_FACES, DEFAULT_TRACKING_CONFIDENCE};
use crate::Result;
use serde::{Deserialize, Serialize};

/// A single normalized 2D facial landmark, both coordinates in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One camera frame's worth of detection output.
///
/// `landmarks` is `None` when the detector reported no face for the frame;
/// image dimensions are always present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub landmarks: Option<Vec<Landmark>>,
    pub image_width: u32,
    pub image_height: u32,
}

impl Frame {
    /// Frame with a detected face
    #[must_use]
    pub fn with_landmarks(landmarks: Vec<Landmark>, image_width: u32, image_height: u32) -> Self {
        Self {
            landmarks: Some(landmarks),
            image_width,
            image_height,
        }
    }

    /// Frame where no face was detected
    #[must_use]
    pub const fn without_face(image_width: u32, image_height: u32) -> Self {
        Self {
            landmarks: None,
            image_width,
            image_height,
        }
    }
}

/// Detector configuration passed to the landmark source at session start
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DetectorOptions {
    /// Maximum number of faces to track
    pub max_faces: usize,

    /// Minimum detection confidence (0.0-1.0)
    pub detection_confidence: f64,

    /// Minimum tracking confidence (0.0-1.0)
    pub tracking_confidence: f64,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            max_faces: DEFAULT_MAX_FACES,
            detection_confidence: DEFAULT_DETECTION_CONFIDENCE,
            tracking_confidence: DEFAULT_TRACKING_CONFIDENCE,
        }
    }
}

/// External landmark detection capability.
///
/// Frames are delivered by the host to [`crate::session::ReadingSession::process_frame`];
/// this trait only covers one-shot initialization of the underlying model.
pub trait LandmarkSource {
    /// Configure and initialize the detection model
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ModelInit`] if the model fails to load or initialize.
    fn configure(&mut self, options: &DetectorOptions) -> Result<()>;
}

/// External capture device capability
pub trait Camera {
    /// Acquire the capture device
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::CameraPermissionDenied`] when access is refused
    /// and [`crate::Error::CameraNotFound`] when no device is present.
    fn acquire(&mut self) -> Result<()>;

    /// Release the capture device; must be safe to call when not acquired
    fn release(&mut self);
}
