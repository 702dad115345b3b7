//! Face metrics extraction from a single frame's landmarks.
//!
//! Converts one frame's normalized landmark set into the geometric
//! measurements the rest of the pipeline works with: face width and height in
//! pixels, width/height-to-image ratios, and the face center normalized to
//! [-1, 1] in both axes.

use crate::constants::{
    LANDMARK_CHIN, LANDMARK_FOREHEAD, LANDMARK_LEFT_EAR, LANDMARK_RIGHT_EAR, MIN_LANDMARK_COUNT,
};
use crate::landmarks::Frame;
use std::time::Instant;

/// Geometric measurements for one frame. Immutable once built.
#[derive(Debug, Clone, Copy)]
pub struct FaceMetrics {
    /// Face width in pixels (ear-to-ear span)
    pub face_width: f64,
    /// Face height in pixels (forehead-to-chin span)
    pub face_height: f64,
    /// Face width as a fraction of image width
    pub width_to_image_ratio: f64,
    /// Face height as a fraction of image height
    pub height_to_image_ratio: f64,
    /// Horizontal face center, normalized to [-1, 1] (0 = image center)
    pub face_center_x: f64,
    /// Vertical face center, normalized to [-1, 1]
    pub face_center_y: f64,
    /// Source image width in pixels
    pub image_width: u32,
    /// Source image height in pixels
    pub image_height: u32,
    /// Monotonic capture timestamp
    pub timestamp: Instant,
}

impl FaceMetrics {
    /// Extract metrics from a frame's landmark set.
    ///
    /// Returns `None` when the frame carries no face or too few landmarks to
    /// address the reference indices; that case is the caller's to handle.
    #[must_use]
    pub fn from_frame(frame: &Frame, now: Instant) -> Option<Self> {
        let landmarks = frame.landmarks.as_deref()?;
        if landmarks.len() < MIN_LANDMARK_COUNT {
            return None;
        }

        let left_ear = landmarks[LANDMARK_LEFT_EAR];
        let right_ear = landmarks[LANDMARK_RIGHT_EAR];
        let forehead = landmarks[LANDMARK_FOREHEAD];
        let chin = landmarks[LANDMARK_CHIN];

        let image_width = f64::from(frame.image_width);
        let image_height = f64::from(frame.image_height);

        let face_width = (right_ear.x - left_ear.x).abs() * image_width;
        let face_height = (chin.y - forehead.y).abs() * image_height;

        // Midpoint in normalized [0, 1] coordinates, then mapped to [-1, 1]
        let center_x = (right_ear.x + left_ear.x) / 2.0;
        let center_y = (chin.y + forehead.y) / 2.0;

        Some(Self {
            face_width,
            face_height,
            width_to_image_ratio: if image_width > 0.0 { face_width / image_width } else { 0.0 },
            height_to_image_ratio: if image_height > 0.0 { face_height / image_height } else { 0.0 },
            face_center_x: (center_x - 0.5) * 2.0,
            face_center_y: (center_y - 0.5) * 2.0,
            image_width: frame.image_width,
            image_height: frame.image_height,
            timestamp: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::Landmark;

    /// Build a full landmark set with the five reference points placed explicitly
    fn landmark_set(
        left_ear: (f64, f64),
        right_ear: (f64, f64),
        forehead: (f64, f64),
        chin: (f64, f64),
    ) -> Vec<Landmark> {
        let mut points = vec![Landmark::new(0.5, 0.5); MIN_LANDMARK_COUNT];
        points[LANDMARK_LEFT_EAR] = Landmark::new(left_ear.0, left_ear.1);
        points[LANDMARK_RIGHT_EAR] = Landmark::new(right_ear.0, right_ear.1);
        points[LANDMARK_FOREHEAD] = Landmark::new(forehead.0, forehead.1);
        points[LANDMARK_CHIN] = Landmark::new(chin.0, chin.1);
        points
    }

    #[test]
    fn test_centered_face_geometry() {
        let points = landmark_set((0.25, 0.5), (0.75, 0.5), (0.5, 0.2), (0.5, 0.8));
        let frame = Frame::with_landmarks(points, 640, 480);
        let metrics = FaceMetrics::from_frame(&frame, Instant::now()).unwrap();

        assert!((metrics.face_width - 320.0).abs() < 1e-9);
        assert!((metrics.face_height - 288.0).abs() < 1e-9);
        assert!((metrics.width_to_image_ratio - 0.5).abs() < 1e-9);
        assert!(metrics.face_center_x.abs() < 1e-9);
        assert!(metrics.face_center_y.abs() < 1e-9);
    }

    #[test]
    fn test_offset_face_center_normalization() {
        // Face shifted right and up
        let points = landmark_set((0.5, 0.4), (0.9, 0.4), (0.7, 0.1), (0.7, 0.5));
        let frame = Frame::with_landmarks(points, 640, 480);
        let metrics = FaceMetrics::from_frame(&frame, Instant::now()).unwrap();

        assert!((metrics.face_center_x - 0.4).abs() < 1e-9);
        assert!((metrics.face_center_y - (-0.4)).abs() < 1e-9);
    }

    #[test]
    fn test_geometry_is_non_negative_and_bounded() {
        // Swapped ears (mirrored detection) must still give non-negative width
        let points = landmark_set((0.8, 0.5), (0.2, 0.5), (0.5, 0.7), (0.5, 0.3));
        let frame = Frame::with_landmarks(points, 640, 480);
        let metrics = FaceMetrics::from_frame(&frame, Instant::now()).unwrap();

        assert!(metrics.face_width >= 0.0);
        assert!(metrics.face_height >= 0.0);
        assert!((-1.0..=1.0).contains(&metrics.face_center_x));
        assert!((-1.0..=1.0).contains(&metrics.face_center_y));
    }

    #[test]
    fn test_no_face_returns_none() {
        let frame = Frame::without_face(640, 480);
        assert!(FaceMetrics::from_frame(&frame, Instant::now()).is_none());
    }

    #[test]
    fn test_short_landmark_set_returns_none() {
        let frame = Frame::with_landmarks(vec![Landmark::new(0.5, 0.5); 10], 640, 480);
        assert!(FaceMetrics::from_frame(&frame, Instant::now()).is_none());
    }
}
