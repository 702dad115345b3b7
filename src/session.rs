//! Reading-mode session: lifecycle and the per-frame pipeline.
//!
//! One session owns every pipeline stage and all shared mutable state
//! (calibration, smoothing buffer, presentation state). Frames drive the
//! pipeline synchronously to completion through [`ReadingSession::process_frame`];
//! there is no hidden reentrancy and no overlapping in-flight frames. The only
//! async boundary is camera/model setup behind [`ReadingSession::start`].

use crate::alignment::{AlignmentClassifier, AlignmentStatus};
use crate::calibration::{CalibrationManager, CalibrationRecord};
use crate::config::Config;
use crate::constants::{BASE_BACKGROUND, BASE_TEXT, CONTRAST_MIN_APPLY_DELTA};
use crate::distance::{DistanceCalculator, DistanceSample};
use crate::face_metrics::FaceMetrics;
use crate::landmarks::{Camera, DetectorOptions, Frame, LandmarkSource};
use crate::presentation::contrast::ContrastMapper;
use crate::presentation::font::FontMapper;
use crate::presentation::{FeatureSettings, PresentationState, ReadingSurface};
use crate::smoothing::MetricsSmoother;
use crate::storage::KeyValueStore;
use crate::{Error, Result};
use log::{info, warn};
use std::time::{Duration, Instant};

/// Callback invoked when a setup failure is surfaced
pub type ErrorCallback = Box<dyn FnMut(&Error)>;

/// Single active reading-mode session.
///
/// Constructed with injected storage, capture, detection, and surface
/// dependencies; no ambient singletons.
pub struct ReadingSession {
    config: Config,
    camera: Box<dyn Camera>,
    landmark_source: Box<dyn LandmarkSource>,
    store: Box<dyn KeyValueStore>,
    surface: Box<dyn ReadingSurface>,

    smoother: MetricsSmoother,
    classifier: AlignmentClassifier,
    distance_calculator: DistanceCalculator,
    font_mapper: FontMapper,
    contrast_mapper: ContrastMapper,
    calibration: CalibrationManager,
    settings: FeatureSettings,

    state: PresentationState,
    last_smoothed: Option<FaceMetrics>,
    last_applied_ratio: Option<f64>,
    running: bool,
    started_at: Option<Instant>,
    error_callback: Option<ErrorCallback>,
}

impl ReadingSession {
    /// Create a session from its injected collaborators.
    ///
    /// Loads persisted settings and calibration; a malformed calibration
    /// record degrades to the uncalibrated state with a warning rather than
    /// failing construction.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails validation.
    pub fn new(
        config: Config,
        camera: Box<dyn Camera>,
        landmark_source: Box<dyn LandmarkSource>,
        store: Box<dyn KeyValueStore>,
        surface: Box<dyn ReadingSurface>,
    ) -> Result<Self> {
        config.validate()?;

        let settings = FeatureSettings::load_or_default(store.as_ref());

        let mut calibration = CalibrationManager::new();
        match calibration.load(store.as_ref()) {
            Ok(Some(record)) => info!(
                "Loaded calibration: reference width {:.1}px, base font {:.1}px",
                record.reference_face_width, record.reference_font_size
            ),
            Ok(None) => info!("No calibration on record, starting uncalibrated"),
            Err(e) => warn!("Ignoring persisted calibration: {e}"),
        }

        let base_font_px = calibration
            .record()
            .map_or(config.font.base_size_px, |record| record.reference_font_size);

        let smoother = MetricsSmoother::new(
            config.smoothing.window,
            Duration::from_millis(config.smoothing.no_face_grace_ms),
        );
        let classifier = AlignmentClassifier::new(
            config.alignment.target_face_ratio,
            config.alignment.position_tolerance,
            config.alignment.stability_threshold,
        );
        let distance_calculator = DistanceCalculator::new(config.distance.scale);
        let font_mapper = FontMapper::new(
            base_font_px,
            config.font.dead_zone_radius,
            Duration::from_millis(config.font.dead_zone_stable_ms),
            config.font.change_threshold,
        );
        let contrast_mapper = ContrastMapper::new(BASE_BACKGROUND.into(), BASE_TEXT.into());

        Ok(Self {
            config,
            camera,
            landmark_source,
            store,
            surface,
            smoother,
            classifier,
            distance_calculator,
            font_mapper,
            contrast_mapper,
            calibration,
            settings,
            state: PresentationState {
                font_size_px: base_font_px,
                background: BASE_BACKGROUND.into(),
                text: BASE_TEXT.into(),
            },
            last_smoothed: None,
            last_applied_ratio: None,
            running: false,
            started_at: None,
            error_callback: None,
        })
    }

    /// Register the single error callback for surfaced setup failures
    pub fn set_error_callback(&mut self, callback: ErrorCallback) {
        self.error_callback = Some(callback);
    }

    /// Acquire the camera, configure the landmark model, and begin accepting
    /// frames. No automatic retry: a failure must be re-triggered explicitly.
    ///
    /// # Errors
    ///
    /// Propagates camera and model initialization failures; each is also
    /// reported through the error callback.
    pub fn start(&mut self, now: Instant) -> Result<()> {
        if self.running {
            return Ok(());
        }
        info!("Starting reading session");

        if let Err(e) = self.camera.acquire() {
            self.report(&e);
            return Err(e);
        }

        let options = DetectorOptions {
            max_faces: self.config.detector.max_faces,
            detection_confidence: self.config.detector.detection_confidence,
            tracking_confidence: self.config.detector.tracking_confidence,
        };
        if let Err(e) = self.landmark_source.configure(&options) {
            self.camera.release();
            self.report(&e);
            return Err(e);
        }

        self.running = true;
        self.started_at = Some(now);
        self.apply_presentation_state();
        Ok(())
    }

    /// Halt frame processing, release the capture device, and reset the
    /// presentation surface to base values. Late frame callbacks after this
    /// point are no-ops.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        info!("Stopping reading session");

        self.running = false;
        self.started_at = None;
        self.camera.release();

        self.smoother.reset();
        self.classifier.reset();
        self.font_mapper.reset();
        self.last_smoothed = None;
        self.last_applied_ratio = None;

        let (background, text) = self.contrast_mapper.base_colors();
        self.state = PresentationState {
            font_size_px: self.font_mapper.current_font_px(),
            background,
            text,
        };
        self.apply_presentation_state();
    }

    /// Process one camera frame synchronously through the whole pipeline.
    ///
    /// Returns `None` when the session is not running (late callbacks after
    /// teardown are required to be no-ops), otherwise the frame's
    /// [`DistanceSample`].
    pub fn process_frame(&mut self, frame: &Frame, now: Instant) -> Option<DistanceSample> {
        if !self.running {
            return None;
        }

        match FaceMetrics::from_frame(frame, now) {
            Some(metrics) => self.smoother.push(metrics),
            None => self.smoother.note_no_face(now),
        }

        let smoothed = self.smoother.average();
        self.last_smoothed = smoothed;

        let previously_stable = self.classifier.stable_status();
        let status = self.classifier.classify(smoothed.as_ref());
        if let Some(stable) = self.classifier.stable_status() {
            if previously_stable != Some(stable) {
                self.surface
                    .show_status(&format!("{stable}: {}", stable.instruction()));
            }
        }

        let sample = self
            .distance_calculator
            .sample(smoothed.as_ref(), self.calibration.record(), status);

        if sample.is_calibrated && sample.face_detected {
            if self.settings.dynamic_font_enabled {
                if let Some(px) = self.font_mapper.update(sample.distance, now) {
                    self.state.font_size_px = px;
                    self.surface.set_font_size(px);
                }
            }

            if self.settings.dynamic_contrast_enabled {
                let target = self.contrast_mapper.target_ratio(sample.distance);
                let moved_enough = self
                    .last_applied_ratio
                    .map_or(true, |last| (target - last).abs() >= CONTRAST_MIN_APPLY_DELTA);
                if moved_enough {
                    let colors = self.contrast_mapper.colors_for_ratio(target);
                    self.state.background = colors.background;
                    self.state.text = colors.text;
                    self.surface.set_colors(colors.background, colors.text);
                    self.last_applied_ratio = Some(target);
                }
            }
        }

        Some(sample)
    }

    /// Capture a calibration at the current position.
    ///
    /// Requires the raw alignment status against the latest smoothed metrics
    /// to be `good`; otherwise fails with the specific blocking misalignment
    /// and its corrective instruction. On success the record is persisted and
    /// the supplied font size becomes the mapping base.
    ///
    /// # Errors
    ///
    /// [`Error::Misaligned`] when not aligned, [`Error::InvalidInput`] for a
    /// non-positive font size, or a storage error from persisting the record.
    pub fn calibrate(&mut self, font_size_px: f64) -> Result<CalibrationRecord> {
        if !(font_size_px.is_finite() && font_size_px > 0.0) {
            return Err(Error::InvalidInput(format!(
                "calibration font size must be positive, got {font_size_px}"
            )));
        }

        let status = self.classifier.peek(self.last_smoothed.as_ref());
        if status != AlignmentStatus::Good {
            return Err(Error::Misaligned(status));
        }
        let Some(smoothed) = self.last_smoothed.as_ref() else {
            return Err(Error::Misaligned(AlignmentStatus::NoFace));
        };

        let record = CalibrationRecord::new(smoothed.face_width, font_size_px);
        self.calibration.store(record.clone(), self.store.as_mut())?;

        self.font_mapper.set_base_font(font_size_px);
        self.last_applied_ratio = None;
        self.state.font_size_px = font_size_px;
        self.surface.set_font_size(font_size_px);
        self.surface.show_status("Calibration complete");

        Ok(record)
    }

    /// Toggle distance-driven font sizing; persisted immediately
    ///
    /// # Errors
    ///
    /// Returns a storage error if the settings record cannot be written.
    pub fn set_dynamic_font_enabled(&mut self, enabled: bool) -> Result<()> {
        self.settings.dynamic_font_enabled = enabled;
        self.settings.save(self.store.as_mut())
    }

    /// Toggle distance-driven contrast; persisted immediately
    ///
    /// # Errors
    ///
    /// Returns a storage error if the settings record cannot be written.
    pub fn set_dynamic_contrast_enabled(&mut self, enabled: bool) -> Result<()> {
        self.settings.dynamic_contrast_enabled = enabled;
        self.settings.save(self.store.as_mut())
    }

    /// Whether the session is accepting frames
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a valid calibration is loaded
    #[must_use]
    pub fn is_calibrated(&self) -> bool {
        self.calibration.is_calibrated()
    }

    /// Active feature toggles
    #[must_use]
    pub const fn settings(&self) -> FeatureSettings {
        self.settings
    }

    /// Current presentation values
    #[must_use]
    pub const fn presentation_state(&self) -> PresentationState {
        self.state
    }

    /// Elapsed reading time since the session started
    #[must_use]
    pub fn reading_time(&self, now: Instant) -> Option<Duration> {
        self.started_at.map(|started| now.duration_since(started))
    }

    fn apply_presentation_state(&mut self) {
        self.surface.set_font_size(self.state.font_size_px);
        self.surface.set_colors(self.state.background, self.state.text);
    }

    fn report(&mut self, error: &Error) {
        warn!("Session setup failure: {error}");
        if let Some(callback) = &mut self.error_callback {
            callback(error);
        }
    }
}
