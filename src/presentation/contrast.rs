//! Distance-to-contrast mapping.
//!
//! Maps a relative distance to a target WCAG-style contrast ratio inside a
//! fixed band, then derives concrete background/text colors from the two base
//! colors. The text luminance is solved directly from the target ratio; the
//! background is then nudged by an empirical per-unit factor and the achieved
//! ratio is recomputed once for reporting. The single adjustment pass is an
//! accepted approximation, so callers get both the target and the achieved
//! ratio back.

use super::color::{contrast_ratio, gray_for_luminance, Rgb};
use crate::constants::{
    CONTRAST_BG_SLOPE_ABOVE, CONTRAST_BG_SLOPE_BELOW, CONTRAST_DISTANCE_SCALE, CONTRAST_NORMALIZATION_WINDOW,
    CONTRAST_RATIO_BASE, CONTRAST_RATIO_MAX, CONTRAST_RATIO_MIN,
};
use log::debug;

/// Background/text pair produced for one target ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastColors {
    pub background: Rgb,
    pub text: Rgb,
    /// Ratio the mapping aimed for
    pub target_ratio: f64,
    /// Ratio the returned colors actually achieve (reporting only)
    pub achieved_ratio: f64,
}

/// Maps distance to a contrast target and concrete colors
#[derive(Debug, Clone, Copy)]
pub struct ContrastMapper {
    base_background: Rgb,
    base_text: Rgb,
    base_ratio: f64,
    min_ratio: f64,
    max_ratio: f64,
}

impl ContrastMapper {
    #[must_use]
    pub fn new(base_background: Rgb, base_text: Rgb) -> Self {
        Self {
            base_background,
            base_text,
            base_ratio: CONTRAST_RATIO_BASE,
            min_ratio: CONTRAST_RATIO_MIN,
            max_ratio: CONTRAST_RATIO_MAX,
        }
    }

    /// Target contrast ratio for a relative distance, saturating at the band
    /// edges. Farther (positive distance) asks for more contrast. The base
    /// ratio sits off-center in the band, so each side gets its own slope and
    /// a saturated reading lands exactly on its edge.
    #[must_use]
    pub fn target_ratio(&self, distance: f64) -> f64 {
        let normalized = (distance * CONTRAST_DISTANCE_SCALE / 100.0)
            .clamp(-CONTRAST_NORMALIZATION_WINDOW, CONTRAST_NORMALIZATION_WINDOW);
        let span = if normalized >= 0.0 {
            self.max_ratio - self.base_ratio
        } else {
            self.base_ratio - self.min_ratio
        };
        let target = self.base_ratio + normalized / CONTRAST_NORMALIZATION_WINDOW * span;
        target.clamp(self.min_ratio, self.max_ratio)
    }

    /// Solve colors for a target ratio against the base background.
    #[must_use]
    pub fn colors_for_ratio(&self, target_ratio: f64) -> ContrastColors {
        let target_ratio = target_ratio.clamp(self.min_ratio, self.max_ratio);
        let bg_luminance = self.base_background.relative_luminance();

        // Text luminance solved exactly against the unadjusted background;
        // assumes the light-background/dark-text reading theme.
        let text_luminance = ((bg_luminance + 0.05) / target_ratio - 0.05).max(0.0);
        let text = gray_for_luminance(text_luminance);

        // One empirical brightness pass on the background, steeper below the
        // base ratio than above it.
        let delta = target_ratio - self.base_ratio;
        let factor = if delta < 0.0 {
            1.0 + delta * CONTRAST_BG_SLOPE_BELOW
        } else {
            1.0 + delta * CONTRAST_BG_SLOPE_ABOVE
        };
        let background = self.base_background.scaled(factor);

        // Recomputed for verification and reporting, not a second correction
        let achieved_ratio = contrast_ratio(background.relative_luminance(), text.relative_luminance());
        debug!(
            "Contrast target {target_ratio:.2}, achieved {achieved_ratio:.2} after single background pass"
        );

        ContrastColors {
            background,
            text,
            target_ratio,
            achieved_ratio,
        }
    }

    /// Full mapping: distance to colors
    #[must_use]
    pub fn map(&self, distance: f64) -> ContrastColors {
        self.colors_for_ratio(self.target_ratio(distance))
    }

    /// The unmodified base color pair
    #[must_use]
    pub const fn base_colors(&self) -> (Rgb, Rgb) {
        (self.base_background, self.base_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BASE_BACKGROUND, BASE_TEXT};

    fn mapper() -> ContrastMapper {
        ContrastMapper::new(BASE_BACKGROUND.into(), BASE_TEXT.into())
    }

    #[test]
    fn test_target_ratio_band_clamp() {
        let m = mapper();
        for d in [-500.0, -100.0, -30.0, -5.0, 0.0, 5.0, 30.0, 100.0, 500.0] {
            let target = m.target_ratio(d);
            assert!(
                (CONTRAST_RATIO_MIN..=CONTRAST_RATIO_MAX).contains(&target),
                "distance {d} gave target {target}"
            );
        }
    }

    #[test]
    fn test_neutral_distance_gives_base_ratio() {
        let m = mapper();
        assert!((m.target_ratio(0.0) - CONTRAST_RATIO_BASE).abs() < 1e-9);
    }

    #[test]
    fn test_farther_means_more_contrast() {
        let m = mapper();
        assert!(m.target_ratio(20.0) > m.target_ratio(0.0));
        assert!(m.target_ratio(-20.0) < m.target_ratio(0.0));
    }

    #[test]
    fn test_saturates_at_band_edges() {
        let m = mapper();
        // Both edges must be reachable, not just the near one
        assert!((m.target_ratio(100.0) - CONTRAST_RATIO_MAX).abs() < 1e-9);
        assert!((m.target_ratio(-100.0) - CONTRAST_RATIO_MIN).abs() < 1e-9);
        assert!((m.target_ratio(1000.0) - m.target_ratio(100.0)).abs() < 1e-9);
        assert!((m.target_ratio(-1000.0) - m.target_ratio(-100.0)).abs() < 1e-9);
    }

    #[test]
    fn test_aa_boundary_achieved_ratio_is_approximate() {
        // Target exactly 4.5; after the single background pass the achieved
        // ratio drifts a little below it. That approximation is the contract.
        let m = mapper();
        let colors = m.colors_for_ratio(4.5);

        assert!((colors.target_ratio - 4.5).abs() < 1e-9);
        assert!(
            (colors.achieved_ratio - 4.5).abs() < 0.6,
            "achieved {} too far from 4.5",
            colors.achieved_ratio
        );
    }

    #[test]
    fn test_text_is_darker_than_background() {
        let m = mapper();
        for d in [-20.0, 0.0, 20.0] {
            let colors = m.map(d);
            assert!(colors.text.relative_luminance() < colors.background.relative_luminance());
        }
    }

    #[test]
    fn test_higher_target_darkens_text() {
        let m = mapper();
        let low = m.colors_for_ratio(4.0);
        let high = m.colors_for_ratio(8.0);
        assert!(high.text.relative_luminance() < low.text.relative_luminance());
        assert!(high.achieved_ratio > low.achieved_ratio);
    }
}
