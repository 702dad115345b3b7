//! Shared helpers for integration tests: frame builders and recording stand-ins
//! for the injected session collaborators.

use reading_lens::landmarks::{Camera, DetectorOptions, Frame, Landmark, LandmarkSource};
use reading_lens::presentation::color::Rgb;
use reading_lens::presentation::ReadingSurface;
use reading_lens::storage::{KeyValueStore, MemoryStore};
use reading_lens::{Error, Result};
use std::cell::RefCell;
use std::rc::Rc;

pub const LANDMARK_COUNT: usize = 468;
const LEFT_EAR: usize = 234;
const RIGHT_EAR: usize = 454;
const FOREHEAD: usize = 10;
const CHIN: usize = 152;

/// Frame whose face has the given width-to-image ratio and normalized center
pub fn face_frame(width_ratio: f64, center_x: f64, center_y: f64) -> Frame {
    let cx = center_x / 2.0 + 0.5;
    let cy = center_y / 2.0 + 0.5;
    let height_ratio = width_ratio * 1.2;

    let mut points = vec![Landmark::new(0.5, 0.5); LANDMARK_COUNT];
    points[LEFT_EAR] = Landmark::new(cx - width_ratio / 2.0, cy);
    points[RIGHT_EAR] = Landmark::new(cx + width_ratio / 2.0, cy);
    points[FOREHEAD] = Landmark::new(cx, cy - height_ratio / 2.0);
    points[CHIN] = Landmark::new(cx, cy + height_ratio / 2.0);

    Frame::with_landmarks(points, 640, 480)
}

pub fn no_face_frame() -> Frame {
    Frame::without_face(640, 480)
}

/// What the session wrote to the surface, in order
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Font(f64),
    Colors(Rgb, Rgb),
    Status(String),
}

/// Surface stand-in recording every write into a shared log
pub struct RecordingSurface(pub Rc<RefCell<Vec<SurfaceEvent>>>);

impl RecordingSurface {
    pub fn new() -> (Self, Rc<RefCell<Vec<SurfaceEvent>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        (Self(Rc::clone(&log)), log)
    }
}

impl ReadingSurface for RecordingSurface {
    fn set_font_size(&mut self, px: f64) {
        self.0.borrow_mut().push(SurfaceEvent::Font(px));
    }

    fn set_colors(&mut self, background: Rgb, text: Rgb) {
        self.0.borrow_mut().push(SurfaceEvent::Colors(background, text));
    }

    fn show_status(&mut self, status: &str) {
        self.0.borrow_mut().push(SurfaceEvent::Status(status.to_string()));
    }
}

/// Camera stand-in with scriptable acquire failures
pub struct StubCamera {
    pub fail_with: Option<fn() -> Error>,
    pub released: Rc<RefCell<u32>>,
}

impl StubCamera {
    pub fn ok() -> Self {
        Self {
            fail_with: None,
            released: Rc::new(RefCell::new(0)),
        }
    }

    pub fn failing(fail_with: fn() -> Error) -> Self {
        Self {
            fail_with: Some(fail_with),
            released: Rc::new(RefCell::new(0)),
        }
    }
}

impl Camera for StubCamera {
    fn acquire(&mut self) -> Result<()> {
        match self.fail_with {
            Some(make_error) => Err(make_error()),
            None => Ok(()),
        }
    }

    fn release(&mut self) {
        *self.released.borrow_mut() += 1;
    }
}

/// Landmark source stand-in with scriptable init failure
pub struct StubDetector {
    pub fail: bool,
}

impl LandmarkSource for StubDetector {
    fn configure(&mut self, _options: &DetectorOptions) -> Result<()> {
        if self.fail {
            Err(Error::ModelInit("stub model refused to load".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Store handle that stays readable after the session takes ownership
#[derive(Clone, Default)]
pub struct SharedStore(pub Rc<RefCell<MemoryStore>>);

impl SharedStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for SharedStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.0.borrow().read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.0.borrow_mut().write(key, value)
    }
}
