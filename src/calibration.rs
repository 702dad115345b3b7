//! Calibration record management and persistence.
//!
//! A calibration captures the user's face width at a known-good distance plus
//! the base font size chosen at that distance. The record is written once per
//! calibration action and read back on every session start; a missing record
//! means "uncalibrated" and distance-based output is refused downstream.

use crate::constants::CALIBRATION_STORAGE_KEY;
use crate::storage::KeyValueStore;
use crate::{Error, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Reference measurement captured by a calibration action.
///
/// Serialized with camelCase keys to match the host's stored records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationRecord {
    /// Face width in pixels at the calibration distance
    pub reference_face_width: f64,

    /// Base font size in pixels chosen at the calibration distance
    pub reference_font_size: f64,

    /// Wall-clock creation time, unix milliseconds
    pub timestamp: u64,
}

impl CalibrationRecord {
    /// Build a record stamped with the current wall-clock time
    #[must_use]
    pub fn new(reference_face_width: f64, reference_font_size: f64) -> Self {
        Self {
            reference_face_width,
            reference_font_size,
            timestamp: unix_millis(),
        }
    }

    /// Shape validation applied to every record loaded from storage
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedCalibration`] when the reference width is
    /// not a positive finite number or the timestamp is zero.
    pub fn validate(&self) -> Result<()> {
        if !self.reference_face_width.is_finite() || self.reference_face_width <= 0.0 {
            return Err(Error::MalformedCalibration(format!(
                "reference face width must be positive, got {}",
                self.reference_face_width
            )));
        }
        if self.timestamp == 0 {
            return Err(Error::MalformedCalibration("timestamp is missing or zero".to_string()));
        }
        Ok(())
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as u64)
}

/// Holds the active calibration and mediates its persistence
#[derive(Default)]
pub struct CalibrationManager {
    record: Option<CalibrationRecord>,
}

impl CalibrationManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active record, if calibrated
    #[must_use]
    pub fn record(&self) -> Option<&CalibrationRecord> {
        self.record.as_ref()
    }

    /// Whether a valid calibration is loaded
    #[must_use]
    pub fn is_calibrated(&self) -> bool {
        self.record.is_some()
    }

    /// Adopt a freshly captured record and persist it
    ///
    /// # Errors
    ///
    /// Returns a storage error if the write fails; the in-memory record is
    /// only replaced on a successful write.
    pub fn store(&mut self, record: CalibrationRecord, store: &mut dyn KeyValueStore) -> Result<()> {
        record.validate()?;
        let payload =
            serde_json::to_string(&record).map_err(|e| Error::Storage(format!("serialize calibration: {e}")))?;
        store.write(CALIBRATION_STORAGE_KEY, &payload)?;
        info!(
            "Calibration stored: reference width {:.1}px, base font {:.1}px",
            record.reference_face_width, record.reference_font_size
        );
        self.record = Some(record);
        Ok(())
    }

    /// Load the persisted record, if any.
    ///
    /// Absence is the valid "uncalibrated" state. Malformed data is rejected
    /// as an error value and any previously loaded calibration is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedCalibration`] for unparseable or invalid
    /// records, or a storage error if the read fails.
    pub fn load(&mut self, store: &dyn KeyValueStore) -> Result<Option<&CalibrationRecord>> {
        let Some(payload) = store.read(CALIBRATION_STORAGE_KEY)? else {
            return Ok(None);
        };

        let record: CalibrationRecord = serde_json::from_str(&payload).map_err(|e| {
            warn!("Rejecting malformed calibration record: {e}");
            Error::MalformedCalibration(e.to_string())
        })?;
        record.validate()?;

        self.record = Some(record);
        Ok(self.record.as_ref())
    }

    /// Drop the in-memory calibration (persisted record is untouched)
    pub fn clear(&mut self) {
        self.record = None;
    }
}
