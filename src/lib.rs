//! Distance-adaptive reading presentation engine.
//!
//! This library converts noisy per-frame facial landmark geometry from a
//! webcam into a stable relative-distance signal, then maps that signal into
//! font-size and color-contrast adjustments for a reading view:
//! 1. Face metrics extraction from a frame's landmark set
//! 2. Temporal smoothing over a rolling window
//! 3. Alignment classification against the calibration-frame geometry
//! 4. Relative distance from the calibration reference width
//! 5. Presentation mapping with dead-zone and threshold hysteresis
//!
//! The landmark model, camera, key-value store, and rendering surface are
//! external collaborators injected through narrow traits; the pipeline itself
//! is single-threaded and driven synchronously one frame at a time.
//!
//! # Examples
//!
//! ## Per-frame metrics and smoothing
//!
//! ```
//! use reading_lens::face_metrics::FaceMetrics;
//! use reading_lens::landmarks::{Frame, Landmark};
//! use reading_lens::smoothing::MetricsSmoother;
//! use std::time::{Duration, Instant};
//!
//! let mut smoother = MetricsSmoother::new(5, Duration::from_millis(500));
//!
//! let landmarks = vec![Landmark::new(0.5, 0.5); 468];
//! let frame = Frame::with_landmarks(landmarks, 640, 480);
//!
//! if let Some(metrics) = FaceMetrics::from_frame(&frame, Instant::now()) {
//!     smoother.push(metrics);
//! }
//! let smoothed = smoother.average();
//! ```
//!
//! ## Alignment classification with debounced notification
//!
//! ```
//! use reading_lens::alignment::{AlignmentClassifier, AlignmentStatus};
//!
//! let mut classifier = AlignmentClassifier::new(0.5, 0.2, 3);
//! classifier.add_listener(Box::new(|status| {
//!     println!("alignment settled on {status}");
//! }));
//!
//! // Raw status comes back immediately; listeners fire only after the same
//! // status has held for three consecutive frames.
//! let status = classifier.classify(None);
//! assert_eq!(status, AlignmentStatus::NoFace);
//! ```
//!
//! ## Distance to font size
//!
//! ```
//! use reading_lens::presentation::font::FontMapper;
//! use std::time::{Duration, Instant};
//!
//! let mut mapper = FontMapper::new(18.0, 2.0, Duration::from_millis(1000), 0.5);
//!
//! // Small movements inside the dead zone never change the font
//! assert!(mapper.update(1.0, Instant::now()).is_none());
//!
//! // A deliberate move commits one clamped update
//! if let Some(px) = mapper.update(15.0, Instant::now()) {
//!     assert!((12.0..=32.0).contains(&px));
//! }
//! ```

/// Landmark source, camera capability, and frame types
pub mod landmarks;

/// Face metrics extraction from per-frame landmarks
pub mod face_metrics;

/// Temporal smoothing of face metrics
pub mod smoothing;

/// Alignment classification and debounce
pub mod alignment;

/// Calibration record management and persistence
pub mod calibration;

/// Relative distance derivation
pub mod distance;

/// Presentation mapping: font sizing, contrast, color math
pub mod presentation;

/// Persistent key-value storage seam
pub mod storage;

/// Reading-mode session lifecycle and pipeline
pub mod session;

/// Error types and result handling
pub mod error;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
