pub mod controller;
pub mod frame;
pub mod grid;
pub mod layout;
pub mod ring;
pub mod value;

pub use controller::{DispatchAction, MultiRingController};
pub use frame::RingFrame;
pub use grid::{Segment, StepGrid};
pub use layout::{RadiusBounds, resolve_radii};
pub use ring::{RingState, SliderRing};
pub use value::{SliderValue, format_value};

pub const FULL_TURN_DEGREES: f64 = 360.0;
pub const MIN_STEP_DEGREES: f64 = 1.0; // adjacent steps closer than this are indistinguishable
pub const MIN_RING_RADIUS: f64 = 150.0; // innermost radius a ring may be assigned
pub const MAX_DECIMAL_PRECISION: usize = 17; // digits an f64 can still tell apart

pub const DEFAULT_RING_THICKNESS: f64 = 40.0;
pub const DEFAULT_RING_GAP: f64 = 1.0; // degrees
pub const DEFAULT_MIN_RING_MARGIN: f64 = 10.0;
pub const DEFAULT_PROGRESS_ALPHA: f64 = 0.75;
pub const DEFAULT_BUTTON_STROKE_WIDTH: f64 = 5.0;
