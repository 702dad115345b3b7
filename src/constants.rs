//! Constants used throughout the application

/// Landmark index for the left ear (MediaPipe FaceMesh convention)
pub const LANDMARK_LEFT_EAR: usize = 234;

/// Landmark index for the right ear
pub const LANDMARK_RIGHT_EAR: usize = 454;

/// Landmark index for the forehead (top of face oval)
pub const LANDMARK_FOREHEAD: usize = 10;

/// Landmark index for the chin (bottom of face oval)
pub const LANDMARK_CHIN: usize = 152;

/// Minimum landmark count for the indices above to be addressable
pub const MIN_LANDMARK_COUNT: usize = 468;

/// Default smoothing window size (frames)
pub const DEFAULT_SMOOTHING_WINDOW: usize = 5;

/// Grace period without a face before the smoothing buffer is cleared (ms)
pub const DEFAULT_NO_FACE_GRACE_MS: u64 = 500;

/// Target face-width-to-image ratio at the calibration distance
pub const DEFAULT_TARGET_FACE_RATIO: f64 = 0.5;

/// Tolerance for normalized face-center offset before flagging misalignment
pub const DEFAULT_POSITION_TOLERANCE: f64 = 0.2;

/// Consecutive identical frames required before an alignment change is emitted
pub const DEFAULT_STABILITY_THRESHOLD: u32 = 3;

/// Too-far threshold as a fraction of the target face ratio
pub const FAR_RATIO_FACTOR: f64 = 0.5;

/// Too-close threshold as a fraction of the target face ratio
pub const CLOSE_RATIO_FACTOR: f64 = 1.5;

/// Scale applied to the relative distance signal (1/ratio - 1)
pub const DEFAULT_DISTANCE_SCALE: f64 = 100.0;

/// Dead zone radius around the current distance center (scaled units)
pub const DEFAULT_DEAD_ZONE_RADIUS: f64 = 2.0;

/// Time outside the dead zone before it recenters (ms)
pub const DEFAULT_DEAD_ZONE_STABLE_MS: u64 = 1000;

/// Minimum distance delta from the last stable distance before a font update
pub const DEFAULT_FONT_CHANGE_THRESHOLD: f64 = 0.5;

/// Minimum committed font-size delta (px); smaller changes are skipped
pub const FONT_MIN_COMMIT_DELTA: f64 = 0.2;

/// Font multiplier slope terms: multiplier = 1 + d * GAIN * DAMPING / 100
pub const FONT_DISTANCE_GAIN: f64 = 1.5;
pub const FONT_DISTANCE_DAMPING: f64 = 0.8;

/// Font multiplier clamp bounds
pub const FONT_MULTIPLIER_MIN: f64 = 0.6;
pub const FONT_MULTIPLIER_MAX: f64 = 2.5;

/// Absolute font size clamp bounds (px)
pub const FONT_SIZE_MIN_PX: f64 = 12.0;
pub const FONT_SIZE_MAX_PX: f64 = 32.0;

/// Default base font size (px)
pub const DEFAULT_BASE_FONT_SIZE_PX: f64 = 18.0;

/// Contrast ratio band and base
pub const CONTRAST_RATIO_MIN: f64 = 3.5;
pub const CONTRAST_RATIO_MAX: f64 = 9.0;
pub const CONTRAST_RATIO_BASE: f64 = 6.0;

/// Distance scale term for the contrast mapping: (d * SCALE) / 100
pub const CONTRAST_DISTANCE_SCALE: f64 = 2.0;

/// Normalization window half-width for the contrast mapping
pub const CONTRAST_NORMALIZATION_WINDOW: f64 = 0.5;

/// Background adjustment slopes per ratio unit below/above the base ratio
pub const CONTRAST_BG_SLOPE_BELOW: f64 = 0.03;
pub const CONTRAST_BG_SLOPE_ABOVE: f64 = 0.02;

/// Minimum target-ratio movement before surface colors are rewritten
pub const CONTRAST_MIN_APPLY_DELTA: f64 = 0.05;

/// Base reading-view background color (warm off-white)
pub const BASE_BACKGROUND: (u8, u8, u8) = (250, 247, 240);

/// Base reading-view text color (dark gray)
pub const BASE_TEXT: (u8, u8, u8) = (51, 51, 51);

/// Default landmark detector options
pub const DEFAULT_MAX_FACES: usize = 1;
pub const DEFAULT_DETECTION_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_TRACKING_CONFIDENCE: f64 = 0.5;

/// Storage keys for the persisted records
pub const CALIBRATION_STORAGE_KEY: &str = "reading-lens-calibration";
pub const SETTINGS_STORAGE_KEY: &str = "reading-lens-settings";

/// Numeric precision epsilon
pub const EPSILON: f64 = 1e-10;
