use super::grid::{Segment, StepGrid};
use crate::config::{ButtonStyle, ColorToken};
use ringgeom::Point;
use ringgeom::angle::ZERO_ANGLE;

/// Everything a renderer needs to paint one ring for one frame: the base
/// track as step segments, the progress arc from 12 o'clock to the handle,
/// and the handle itself.
#[derive(Debug, Clone, Copy)]
pub struct RingFrame<'a> {
    pub center: Point,
    pub radius: f64,
    pub grid: &'a StepGrid,
    /// Snapped handle angle, or the zero angle while the ring is unset.
    pub angle: f64,
    pub color: &'a ColorToken,
    pub base_color: &'a ColorToken,
    pub thickness: f64,
    pub gap: f64,
    pub progress_alpha: f64,
    pub button: &'a ButtonStyle,
}

impl RingFrame<'_> {
    pub fn base_segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.grid.segments(self.gap)
    }

    pub fn progress_arc(&self) -> Segment {
        Segment {
            start: ZERO_ANGLE,
            end: self.angle,
        }
    }

    pub fn handle_position(&self) -> Point {
        Point::new(
            self.center.x + self.angle.cos() * self.radius,
            self.center.y + self.angle.sin() * self.radius,
        )
    }
}
