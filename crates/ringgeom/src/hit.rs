use crate::point::Point;

/// True when `point` lies on the annulus `radius ± tolerance` around `center`.
pub fn is_within_ring(point: Point, center: Point, radius: f64, tolerance: f64) -> bool {
    (point.distance_to(center) - radius).abs() <= tolerance
}
