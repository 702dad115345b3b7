//! Distance-to-font-size mapping with jitter suppression.
//!
//! Three independent filters compose before a font change is committed: a
//! dead zone around the current distance center absorbs small movements, a
//! distance-delta threshold rejects high-frequency jitter outside the zone,
//! and a minimum font delta skips imperceptible updates. The dead zone
//! recenters onto the new distance after the signal has been stable for a
//! configurable time, so deliberate repositioning settles into a new rest
//! point instead of oscillating.

use crate::constants::{
    FONT_DISTANCE_DAMPING, FONT_DISTANCE_GAIN, FONT_MIN_COMMIT_DELTA, FONT_MULTIPLIER_MAX, FONT_MULTIPLIER_MIN,
    FONT_SIZE_MAX_PX, FONT_SIZE_MIN_PX,
};
use log::debug;
use std::time::{Duration, Instant};

/// Stateful distance-to-font-size mapper
pub struct FontMapper {
    base_font_px: f64,
    current_font_px: f64,
    last_stable_distance: f64,
    dead_zone_center: f64,
    dead_zone_radius: f64,
    dead_zone_stable_time: Duration,
    last_distance_change: Option<Instant>,
    change_threshold: f64,
}

impl FontMapper {
    /// Create a mapper around a base font size
    ///
    /// # Panics
    ///
    /// Panics if `dead_zone_radius` is negative or `base_font_px` is not positive.
    #[must_use]
    pub fn new(base_font_px: f64, dead_zone_radius: f64, dead_zone_stable_time: Duration, change_threshold: f64) -> Self {
        assert!(base_font_px > 0.0, "Base font size must be positive");
        assert!(dead_zone_radius >= 0.0, "Dead zone radius must be non-negative");
        Self {
            base_font_px,
            current_font_px: base_font_px,
            last_stable_distance: 0.0,
            dead_zone_center: 0.0,
            dead_zone_radius,
            dead_zone_stable_time,
            last_distance_change: None,
            change_threshold,
        }
    }

    /// Process one distance reading; returns the new font size only when a
    /// change was committed.
    pub fn update(&mut self, distance: f64, now: Instant) -> Option<f64> {
        // Filter 1: dead zone absorbs small movements around the rest point
        if (distance - self.dead_zone_center).abs() <= self.dead_zone_radius {
            return None;
        }

        // Recenter after the signal sat still long enough: the excursion is a
        // deliberate move to a new rest point, not noise
        if let Some(last_change) = self.last_distance_change {
            if now.duration_since(last_change) > self.dead_zone_stable_time {
                debug!("Recentering dead zone to {distance:.2}");
                self.dead_zone_center = distance;
            }
        }
        self.last_distance_change = Some(now);

        // Filter 2: reject jitter relative to the last committed distance
        if (distance - self.last_stable_distance).abs() < self.change_threshold {
            return None;
        }

        let multiplier = (1.0 + distance * FONT_DISTANCE_GAIN * FONT_DISTANCE_DAMPING / 100.0)
            .clamp(FONT_MULTIPLIER_MIN, FONT_MULTIPLIER_MAX);
        let candidate = (self.base_font_px * multiplier).clamp(FONT_SIZE_MIN_PX, FONT_SIZE_MAX_PX);

        // Filter 3: skip imperceptible font changes
        if (candidate - self.current_font_px).abs() < FONT_MIN_COMMIT_DELTA {
            return None;
        }

        debug!(
            "Font commit: {:.2}px -> {candidate:.2}px at distance {distance:.2}",
            self.current_font_px
        );
        self.current_font_px = candidate;
        self.last_stable_distance = distance;
        Some(candidate)
    }

    /// Current committed font size in pixels
    #[must_use]
    pub const fn current_font_px(&self) -> f64 {
        self.current_font_px
    }

    /// Adopt a new base font size (calibration), resetting mapping state
    pub fn set_base_font(&mut self, base_font_px: f64) {
        self.base_font_px = base_font_px;
        self.reset();
    }

    /// Return to base font size and forget all distance state
    pub fn reset(&mut self) {
        self.current_font_px = self.base_font_px;
        self.last_stable_distance = 0.0;
        self.dead_zone_center = 0.0;
        self.last_distance_change = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_DEAD_ZONE_RADIUS, DEFAULT_FONT_CHANGE_THRESHOLD};

    fn mapper() -> FontMapper {
        FontMapper::new(
            18.0,
            DEFAULT_DEAD_ZONE_RADIUS,
            Duration::from_millis(1000),
            DEFAULT_FONT_CHANGE_THRESHOLD,
        )
    }

    #[test]
    fn test_dead_zone_absorbs_radius_delta() {
        let mut m = mapper();
        let now = Instant::now();
        // Exactly the radius: inside the (inclusive) zone
        assert!(m.update(DEFAULT_DEAD_ZONE_RADIUS, now).is_none());
        assert!(m.update(-DEFAULT_DEAD_ZONE_RADIUS, now).is_none());
        assert!((m.current_font_px() - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_deliberate_move_commits_exactly_once() {
        let mut m = mapper();
        let start = Instant::now();

        // Outside the zone, past the change threshold: one commit
        let d = DEFAULT_DEAD_ZONE_RADIUS + DEFAULT_FONT_CHANGE_THRESHOLD + 8.0;
        let committed = m.update(d, start).expect("expected a committed update");
        assert!((FONT_SIZE_MIN_PX..=FONT_SIZE_MAX_PX).contains(&committed));
        assert!(committed > 18.0, "farther distance must grow the font");

        // Same distance again shortly after: no second commit
        assert!(m.update(d, start + Duration::from_millis(33)).is_none());
    }

    #[test]
    fn test_distance_delta_threshold_blocks_jitter() {
        let mut m = mapper();
        let start = Instant::now();

        let d = 10.0;
        assert!(m.update(d, start).is_some());
        // Jitter around the committed distance, still outside the dead zone
        assert!(m.update(d + 0.3, start + Duration::from_millis(33)).is_none());
        assert!(m.update(d - 0.4, start + Duration::from_millis(66)).is_none());
    }

    #[test]
    fn test_clamps_to_font_bounds() {
        let mut m = mapper();
        let now = Instant::now();

        let big = m.update(500.0, now).unwrap();
        assert!((big - FONT_SIZE_MAX_PX).abs() < 1e-9);

        m.reset();
        let small = m.update(-500.0, now).unwrap();
        assert!((small - FONT_SIZE_MIN_PX).abs() < 1e-9);
    }

    #[test]
    fn test_closer_shrinks_farther_grows() {
        let mut m = mapper();
        let now = Instant::now();
        let closer = m.update(-20.0, now).unwrap();
        assert!(closer < 18.0);

        m.reset();
        let farther = m.update(20.0, now).unwrap();
        assert!(farther > 18.0);
    }

    #[test]
    fn test_dead_zone_recenters_after_stability() {
        let mut m = mapper();
        let start = Instant::now();

        // Commit at d=10, then leave the signal alone past the stable time
        assert!(m.update(10.0, start).is_some());
        let later = start + Duration::from_millis(1500);

        // Next excursion recenters the zone onto the new distance...
        m.update(10.0, later);
        // ...so readings near it now fall inside the zone
        assert!(m.update(11.0, later + Duration::from_millis(33)).is_none());
    }

    #[test]
    fn test_set_base_font_resets_state() {
        let mut m = mapper();
        let now = Instant::now();
        m.update(20.0, now);
        m.set_base_font(24.0);
        assert!((m.current_font_px() - 24.0).abs() < 1e-9);
    }
}
