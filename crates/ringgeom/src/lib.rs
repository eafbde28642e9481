//! Geometry shared by the arcdial slider engine: screen points, the angle
//! convention used by every ring, and annulus hit-testing.

pub mod angle;
pub mod hit;
pub mod macros;
pub mod point;

pub use angle::{ZERO_ANGLE, to_degrees, to_radians};
pub use hit::is_within_ring;
pub use point::{Point, SurfaceBounds};
