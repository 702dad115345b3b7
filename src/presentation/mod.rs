//! Presentation mapping: distance to font size and contrast.
//!
//! The mappers in this module own all presentation state; the rendering
//! surface behind [`ReadingSurface`] only ever receives concrete values.

/// Font-size mapping with dead zone and change thresholds
pub mod font;

/// sRGB luminance and contrast-ratio math
pub mod color;

/// Distance-to-contrast mapping and color derivation
pub mod contrast;

use crate::constants::SETTINGS_STORAGE_KEY;
use crate::storage::KeyValueStore;
use crate::{Error, Result};
use color::Rgb;
use log::warn;
use serde::{Deserialize, Serialize};

/// Current presentation values applied to the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresentationState {
    pub font_size_px: f64,
    pub background: Rgb,
    pub text: Rgb,
}

/// Rendering surface the session writes presentation changes to.
///
/// In the browser host this is the reading-view DOM; in tests and the replay
/// binary it is a recording or printing stand-in.
pub trait ReadingSurface {
    /// Apply a new font size in pixels
    fn set_font_size(&mut self, px: f64);

    /// Apply new background and text colors
    fn set_colors(&mut self, background: Rgb, text: Rgb);

    /// Show a user-facing alignment/calibration status line
    fn show_status(&mut self, status: &str);
}

/// Persisted feature toggles; absence of the record means defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureSettings {
    pub dynamic_font_enabled: bool,
    pub dynamic_contrast_enabled: bool,
}

impl Default for FeatureSettings {
    fn default() -> Self {
        Self {
            dynamic_font_enabled: true,
            dynamic_contrast_enabled: true,
        }
    }
}

impl FeatureSettings {
    /// Load settings, falling back to defaults when absent or unreadable
    #[must_use]
    pub fn load_or_default(store: &dyn KeyValueStore) -> Self {
        match store.read(SETTINGS_STORAGE_KEY) {
            Ok(Some(payload)) => serde_json::from_str(&payload).unwrap_or_else(|e| {
                warn!("Malformed settings record, using defaults: {e}");
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                warn!("Settings read failed, using defaults: {e}");
                Self::default()
            }
        }
    }

    /// Persist the toggles
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails.
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        let payload = serde_json::to_string(self).map_err(|e| Error::Storage(format!("serialize settings: {e}")))?;
        store.write(SETTINGS_STORAGE_KEY, &payload)
    }
}
