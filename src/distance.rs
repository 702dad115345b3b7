//! Relative distance derivation from smoothed face metrics.
//!
//! Converts the live smoothed face width and the calibration reference into a
//! signed relative-distance offset. Sign convention: a face larger than the
//! reference is closer, yielding negative distance; smaller is farther,
//! yielding positive. Downstream font and contrast mapping depend on this
//! direction.

use crate::alignment::AlignmentStatus;
use crate::calibration::CalibrationRecord;
use crate::face_metrics::FaceMetrics;

/// Per-frame distance reading; never persisted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceSample {
    /// Signed relative distance in scaled units (0 when neutral)
    pub distance: f64,
    /// Smoothed face width over the calibration reference width (1 when neutral)
    pub distance_ratio: f64,
    /// Whether a calibration reference informed this sample
    pub is_calibrated: bool,
    /// Whether metrics were available this frame
    pub face_detected: bool,
    /// Alignment classification for the same frame
    pub alignment: AlignmentStatus,
}

/// Stateless converter from smoothed width + calibration to distance samples
#[derive(Debug, Clone, Copy)]
pub struct DistanceCalculator {
    scale: f64,
}

impl DistanceCalculator {
    #[must_use]
    pub const fn new(scale: f64) -> Self {
        Self { scale }
    }

    /// Derive the sample for one frame.
    ///
    /// Uncalibrated or missing metrics yield the neutral sample (distance 0,
    /// ratio 1, `is_calibrated` false); `face_detected` distinguishes the
    /// calibrated-but-no-face case, which is a valid state and not an error.
    #[must_use]
    pub fn sample(
        &self,
        smoothed: Option<&FaceMetrics>,
        calibration: Option<&CalibrationRecord>,
        alignment: AlignmentStatus,
    ) -> DistanceSample {
        let face_detected = smoothed.is_some();

        let (Some(metrics), Some(reference)) = (smoothed, calibration) else {
            return DistanceSample {
                distance: 0.0,
                distance_ratio: 1.0,
                is_calibrated: false,
                face_detected,
                alignment,
            };
        };

        let ratio = metrics.face_width / reference.reference_face_width;
        let distance = (1.0 / ratio - 1.0) * self.scale;

        DistanceSample {
            distance,
            distance_ratio: ratio,
            is_calibrated: true,
            face_detected,
            alignment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn metrics(face_width: f64) -> FaceMetrics {
        FaceMetrics {
            face_width,
            face_height: face_width * 1.3,
            width_to_image_ratio: face_width / 640.0,
            height_to_image_ratio: face_width * 1.3 / 480.0,
            face_center_x: 0.0,
            face_center_y: 0.0,
            image_width: 640,
            image_height: 480,
            timestamp: Instant::now(),
        }
    }

    fn reference(width: f64) -> CalibrationRecord {
        CalibrationRecord {
            reference_face_width: width,
            reference_font_size: 18.0,
            timestamp: 1,
        }
    }

    #[test]
    fn test_uncalibrated_yields_neutral_sample() {
        let calc = DistanceCalculator::new(100.0);
        let m = metrics(320.0);
        let sample = calc.sample(Some(&m), None, AlignmentStatus::Good);

        assert!(!sample.is_calibrated);
        assert!(sample.face_detected);
        assert_eq!(sample.distance, 0.0);
        assert_eq!(sample.distance_ratio, 1.0);
    }

    #[test]
    fn test_calibrated_without_face_is_neutral_but_distinct() {
        let calc = DistanceCalculator::new(100.0);
        let cal = reference(320.0);
        let sample = calc.sample(None, Some(&cal), AlignmentStatus::NoFace);

        assert!(!sample.is_calibrated);
        assert!(!sample.face_detected);
        assert_eq!(sample.distance, 0.0);
    }

    #[test]
    fn test_at_reference_width_distance_is_zero() {
        let calc = DistanceCalculator::new(100.0);
        let cal = reference(320.0);
        let m = metrics(320.0);
        let sample = calc.sample(Some(&m), Some(&cal), AlignmentStatus::Good);

        assert!(sample.is_calibrated);
        assert!(sample.distance.abs() < 1e-9);
        assert!((sample.distance_ratio - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_double_width_is_minus_fifty() {
        let calc = DistanceCalculator::new(100.0);
        let cal = reference(320.0);
        let m = metrics(640.0);
        let sample = calc.sample(Some(&m), Some(&cal), AlignmentStatus::TooClose);

        // ratio 2 -> (1/2 - 1) * 100 = -50: closer is negative
        assert!((sample.distance - (-50.0)).abs() < 1e-9);
        assert!((sample.distance_ratio - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_half_width_is_positive_hundred() {
        let calc = DistanceCalculator::new(100.0);
        let cal = reference(320.0);
        let m = metrics(160.0);
        let sample = calc.sample(Some(&m), Some(&cal), AlignmentStatus::TooFar);

        // ratio 0.5 -> (2 - 1) * 100 = +100: farther is positive
        assert!((sample.distance - 100.0).abs() < 1e-9);
    }
}
