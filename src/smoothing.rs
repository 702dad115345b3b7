//! Temporal smoothing of per-frame face metrics.
//!
//! A fixed-size FIFO window over recent [`FaceMetrics`] samples, averaged per
//! field to suppress single-frame landmark noise. The buffer is cleared after
//! a no-face grace period so stale averages never leak into a reacquired
//! face's readings.

use crate::face_metrics::FaceMetrics;
use log::debug;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Rolling-window smoother over face metrics
pub struct MetricsSmoother {
    window_size: usize,
    no_face_grace: Duration,
    buffer: VecDeque<FaceMetrics>,
    last_face_seen: Option<Instant>,
}

impl MetricsSmoother {
    /// Create a new smoother
    ///
    /// # Panics
    ///
    /// Panics if `window_size` is zero.
    #[must_use]
    pub fn new(window_size: usize, no_face_grace: Duration) -> Self {
        assert!(window_size > 0, "Window size must be greater than 0");
        Self {
            window_size,
            no_face_grace,
            buffer: VecDeque::with_capacity(window_size),
            last_face_seen: None,
        }
    }

    /// Add a new sample, evicting the oldest once the window is full
    pub fn push(&mut self, metrics: FaceMetrics) {
        while self.buffer.len() >= self.window_size {
            self.buffer.pop_front();
        }
        self.last_face_seen = Some(metrics.timestamp);
        self.buffer.push_back(metrics);
    }

    /// Record a frame with no detected face.
    ///
    /// Once no face has been seen for longer than the grace period the whole
    /// buffer is dropped; brief detection misses inside the grace window keep
    /// the current average intact.
    pub fn note_no_face(&mut self, now: Instant) {
        if self.buffer.is_empty() {
            return;
        }
        if let Some(last_seen) = self.last_face_seen {
            if now.duration_since(last_seen) > self.no_face_grace {
                debug!(
                    "No face for {:?} (> {:?} grace), clearing smoothing buffer",
                    now.duration_since(last_seen),
                    self.no_face_grace
                );
                self.buffer.clear();
            }
        }
    }

    /// Per-field arithmetic mean over the current buffer.
    ///
    /// Image dimensions and timestamp are taken from the newest sample.
    /// Returns `None` while the buffer is empty.
    #[must_use]
    pub fn average(&self) -> Option<FaceMetrics> {
        let newest = self.buffer.back()?;
        let n = self.buffer.len() as f64;

        let mut averaged = FaceMetrics {
            face_width: 0.0,
            face_height: 0.0,
            width_to_image_ratio: 0.0,
            height_to_image_ratio: 0.0,
            face_center_x: 0.0,
            face_center_y: 0.0,
            image_width: newest.image_width,
            image_height: newest.image_height,
            timestamp: newest.timestamp,
        };

        for sample in &self.buffer {
            averaged.face_width += sample.face_width;
            averaged.face_height += sample.face_height;
            averaged.width_to_image_ratio += sample.width_to_image_ratio;
            averaged.height_to_image_ratio += sample.height_to_image_ratio;
            averaged.face_center_x += sample.face_center_x;
            averaged.face_center_y += sample.face_center_y;
        }

        averaged.face_width /= n;
        averaged.face_height /= n;
        averaged.width_to_image_ratio /= n;
        averaged.height_to_image_ratio /= n;
        averaged.face_center_x /= n;
        averaged.face_center_y /= n;

        Some(averaged)
    }

    /// Number of samples currently buffered
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the buffer holds no samples
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop all buffered samples
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.last_face_seen = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(face_width: f64, center_x: f64, at: Instant) -> FaceMetrics {
        FaceMetrics {
            face_width,
            face_height: face_width * 1.3,
            width_to_image_ratio: face_width / 640.0,
            height_to_image_ratio: face_width * 1.3 / 480.0,
            face_center_x: center_x,
            face_center_y: 0.0,
            image_width: 640,
            image_height: 480,
            timestamp: at,
        }
    }

    #[test]
    fn test_uniform_input_is_idempotent() {
        let now = Instant::now();
        let mut smoother = MetricsSmoother::new(5, Duration::from_millis(500));
        for _ in 0..5 {
            smoother.push(metrics(320.0, 0.1, now));
        }

        let averaged = smoother.average().unwrap();
        assert!((averaged.face_width - 320.0).abs() < 1e-9);
        assert!((averaged.face_center_x - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_window_never_exceeds_size() {
        let now = Instant::now();
        let mut smoother = MetricsSmoother::new(3, Duration::from_millis(500));
        for i in 0..10 {
            smoother.push(metrics(300.0 + f64::from(i), 0.0, now));
            assert!(smoother.len() <= 3);
        }
        // Mean of the three newest: 307, 308, 309
        assert!((smoother.average().unwrap().face_width - 308.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_window_averages_what_it_has() {
        let now = Instant::now();
        let mut smoother = MetricsSmoother::new(5, Duration::from_millis(500));
        smoother.push(metrics(300.0, 0.0, now));
        smoother.push(metrics(320.0, 0.0, now));
        assert!((smoother.average().unwrap().face_width - 310.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_buffer_returns_none() {
        let smoother = MetricsSmoother::new(5, Duration::from_millis(500));
        assert!(smoother.average().is_none());
    }

    #[test]
    fn test_grace_period_clears_buffer() {
        let start = Instant::now();
        let mut smoother = MetricsSmoother::new(5, Duration::from_millis(500));
        smoother.push(metrics(320.0, 0.0, start));

        // Inside the grace window the buffer survives
        smoother.note_no_face(start + Duration::from_millis(400));
        assert_eq!(smoother.len(), 1);

        // Beyond it the buffer is dropped
        smoother.note_no_face(start + Duration::from_millis(600));
        assert!(smoother.is_empty());
        assert!(smoother.average().is_none());
    }

    #[test]
    fn test_reacquire_after_clear_starts_fresh() {
        let start = Instant::now();
        let mut smoother = MetricsSmoother::new(5, Duration::from_millis(500));
        smoother.push(metrics(400.0, 0.0, start));
        smoother.note_no_face(start + Duration::from_millis(700));

        let later = start + Duration::from_millis(900);
        smoother.push(metrics(200.0, 0.0, later));
        // No stale 400 px sample contaminating the new average
        assert!((smoother.average().unwrap().face_width - 200.0).abs() < 1e-9);
    }

    #[test]
    #[should_panic(expected = "Window size must be greater than 0")]
    fn test_zero_window_panics() {
        let _ = MetricsSmoother::new(0, Duration::from_millis(500));
    }
}
