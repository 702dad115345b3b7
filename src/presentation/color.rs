//! sRGB color math: relative luminance and contrast ratios.
//!
//! Implements the WCAG luminance model: channels are gamma-expanded to linear
//! light, weighted 0.2126/0.7152/0.0722, and two luminances compare as
//! `(L_lighter + 0.05) / (L_darker + 0.05)`.

/// An sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// WCAG relative luminance in [0, 1]
    #[must_use]
    pub fn relative_luminance(self) -> f64 {
        let r = linearize(self.r);
        let g = linearize(self.g);
        let b = linearize(self.b);
        0.2126 * r + 0.7152 * g + 0.0722 * b
    }

    /// Scale all channels by `factor`, clamping to the valid range
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        let scale = |c: u8| (f64::from(c) * factor).round().clamp(0.0, 255.0) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// CSS hex representation, e.g. `#faf7f0`
    #[must_use]
    pub fn to_css_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// Gamma-expand one 8-bit sRGB channel to linear light
fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Compress a linear-light value back to an 8-bit sRGB channel
fn delinearize(linear: f64) -> u8 {
    let linear = linear.clamp(0.0, 1.0);
    let c = if linear <= 0.003_130_8 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    };
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Contrast ratio between two luminances, order-independent
#[must_use]
pub fn contrast_ratio(luminance_a: f64, luminance_b: f64) -> f64 {
    let lighter = luminance_a.max(luminance_b);
    let darker = luminance_a.min(luminance_b);
    (lighter + 0.05) / (darker + 0.05)
}

/// Neutral gray whose relative luminance is (approximately) `luminance`.
///
/// For gray the channel weights sum to one, so the linear channel value
/// equals the target luminance directly; only 8-bit quantization error
/// remains.
#[must_use]
pub fn gray_for_luminance(luminance: f64) -> Rgb {
    let channel = delinearize(luminance);
    Rgb::new(channel, channel, channel)
}
