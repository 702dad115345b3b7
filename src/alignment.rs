//! Alignment classification against the calibration-frame geometry.
//!
//! Compares smoothed face metrics against the target face ratio and position
//! tolerance and yields one discrete [`AlignmentStatus`] per frame. Raw
//! classifications are returned synchronously; external listeners only hear
//! about a status once it has held for a configurable number of consecutive
//! frames, which suppresses flicker from single-frame detection noise.

use crate::constants::{CLOSE_RATIO_FACTOR, FAR_RATIO_FACTOR};
use crate::face_metrics::FaceMetrics;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete classification of the user's position relative to the ideal
/// calibration frame. Exactly one value per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlignmentStatus {
    /// No face detected in the frame
    NoFace,
    /// Face too small: user is too far from the screen
    TooFar,
    /// Face too large: user is too close
    TooClose,
    /// Face center left of tolerance
    TooLeft,
    /// Face center right of tolerance
    TooRight,
    /// Face center above tolerance
    TooHigh,
    /// Face center below tolerance
    TooLow,
    /// Within all tolerances; calibration may proceed
    Good,
}

impl AlignmentStatus {
    /// Corrective instruction shown to the user for this status
    #[must_use]
    pub const fn instruction(self) -> &'static str {
        match self {
            Self::NoFace => "position your face in front of the camera",
            Self::TooFar => "move closer to the screen",
            Self::TooClose => "move farther from the screen",
            Self::TooLeft => "move to the right",
            Self::TooRight => "move to the left",
            Self::TooHigh => "lower your position",
            Self::TooLow => "raise your position",
            Self::Good => "hold this position",
        }
    }
}

impl fmt::Display for AlignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoFace => "no-face",
            Self::TooFar => "too-far",
            Self::TooClose => "too-close",
            Self::TooLeft => "too-left",
            Self::TooRight => "too-right",
            Self::TooHigh => "too-high",
            Self::TooLow => "too-low",
            Self::Good => "good",
        };
        write!(f, "{name}")
    }
}

/// Callback invoked with each debounced status change
pub type AlignmentListener = Box<dyn FnMut(AlignmentStatus)>;

/// Stateful classifier with debounced change notification
pub struct AlignmentClassifier {
    position_tolerance: f64,
    // Derived once from the target face ratio, not from the tolerance
    far_threshold: f64,
    close_threshold: f64,
    stability_threshold: u32,
    previous_status: Option<AlignmentStatus>,
    stability_counter: u32,
    last_emitted: Option<AlignmentStatus>,
    listeners: Vec<AlignmentListener>,
}

impl AlignmentClassifier {
    /// Create a classifier for the given calibration-frame geometry
    ///
    /// # Panics
    ///
    /// Panics if `target_face_ratio` is not positive.
    #[must_use]
    pub fn new(target_face_ratio: f64, position_tolerance: f64, stability_threshold: u32) -> Self {
        assert!(target_face_ratio > 0.0, "Target face ratio must be positive");
        Self {
            position_tolerance,
            far_threshold: target_face_ratio * FAR_RATIO_FACTOR,
            close_threshold: target_face_ratio * CLOSE_RATIO_FACTOR,
            stability_threshold,
            previous_status: None,
            stability_counter: 0,
            last_emitted: None,
            listeners: Vec::new(),
        }
    }

    /// Register a listener for debounced status changes
    pub fn add_listener(&mut self, listener: AlignmentListener) {
        self.listeners.push(listener);
    }

    /// Classify the latest smoothed metrics and update the debounce state.
    ///
    /// The raw status is returned immediately for synchronous use (e.g.
    /// calibration gating). Listeners are only notified once the same status
    /// has held for `stability_threshold` consecutive frames.
    pub fn classify(&mut self, smoothed: Option<&FaceMetrics>) -> AlignmentStatus {
        let status = Self::raw_status(
            smoothed,
            self.far_threshold,
            self.close_threshold,
            self.position_tolerance,
        );

        if self.previous_status == Some(status) {
            self.stability_counter += 1;
        } else {
            // A single differing frame restarts the count for the new status
            self.previous_status = Some(status);
            self.stability_counter = 1;
        }

        if self.stability_counter >= self.stability_threshold && self.last_emitted != Some(status) {
            debug!("Alignment status stabilized: {status}");
            self.last_emitted = Some(status);
            for listener in &mut self.listeners {
                listener(status);
            }
        }

        status
    }

    /// Raw classification without touching the debounce state.
    ///
    /// Used for synchronous gating (calibration) between frames.
    #[must_use]
    pub fn peek(&self, smoothed: Option<&FaceMetrics>) -> AlignmentStatus {
        Self::raw_status(
            smoothed,
            self.far_threshold,
            self.close_threshold,
            self.position_tolerance,
        )
    }

    /// Most recent debounced status, if any has stabilized yet
    #[must_use]
    pub fn stable_status(&self) -> Option<AlignmentStatus> {
        self.last_emitted
    }

    /// Reset debounce state (buffers survive a session restart, status does not)
    pub fn reset(&mut self) {
        self.previous_status = None;
        self.stability_counter = 0;
        self.last_emitted = None;
    }

    // Decision order is fixed: first match wins
    fn raw_status(
        smoothed: Option<&FaceMetrics>,
        far_threshold: f64,
        close_threshold: f64,
        tolerance: f64,
    ) -> AlignmentStatus {
        let Some(metrics) = smoothed else {
            return AlignmentStatus::NoFace;
        };

        let ratio = metrics.width_to_image_ratio;
        if ratio < far_threshold {
            AlignmentStatus::TooFar
        } else if ratio > close_threshold {
            AlignmentStatus::TooClose
        } else if metrics.face_center_x < -tolerance {
            AlignmentStatus::TooLeft
        } else if metrics.face_center_x > tolerance {
            AlignmentStatus::TooRight
        } else if metrics.face_center_y < -tolerance {
            AlignmentStatus::TooHigh
        } else if metrics.face_center_y > tolerance {
            AlignmentStatus::TooLow
        } else {
            AlignmentStatus::Good
        }
    }
}
