#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        let (dx, dy) = (self.x - other.x, self.y - other.y);
        dx.hypot(dy)
    }

    /// Screen angle of `self` seen from `center`, in `(-PI, PI]`.
    pub fn angle_from(&self, center: Point) -> f64 {
        (self.y - center.y).atan2(self.x - center.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Bounding rectangle of the drawing surface in page space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A surface anchored at the page origin.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn shorter_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Translates a page-space point into surface-local space.
    pub fn to_local(&self, page: Point) -> Point {
        Point::new(page.x - self.left, page.y - self.top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_angle_from_cardinal_directions() {
        let c = Point::new(100.0, 100.0);
        assert_eq!(Point::new(200.0, 100.0).angle_from(c), 0.0);
        assert_eq!(Point::new(100.0, 200.0).angle_from(c), FRAC_PI_2);
        assert_eq!(Point::new(100.0, 0.0).angle_from(c), -FRAC_PI_2);
        assert_eq!(Point::new(0.0, 100.0).angle_from(c), PI);
    }

    #[test]
    fn test_to_local_subtracts_origin() {
        let bounds = SurfaceBounds::new(30.0, 45.0, 640.0, 480.0);
        assert_eq!(bounds.to_local(Point::new(130.0, 145.0)), Point::new(100.0, 100.0));
        assert_eq!(bounds.center(), Point::new(320.0, 240.0));
        assert_eq!(bounds.shorter_side(), 480.0);
    }
}
