use super::FULL_TURN_DEGREES;
use crate::config::{ConfigError, RangeSpec};
use ringgeom::angle::to_radians;
use std::f64::consts::{FRAC_PI_2, PI};
use std::iter;

// 360 / 3.6 must count as 100 full steps, not 101
const STEP_COUNT_EPSILON: f64 = 1e-9;

/// Arc of one painted step, in screen radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
}

/// The discrete angles a ring's handle can rest on.
///
/// Entries are screen angles for the slider degrees `0, s, 2s, ...` below 360
/// followed by a final 360° entry, so a step that does not divide the full
/// turn leaves a shorter last segment.
#[derive(Debug, Clone, PartialEq)]
pub struct StepGrid {
    step_degrees: f64,
    angles: Vec<f64>,
}

impl StepGrid {
    /// Caller guarantees `1 < step_degrees <= 360`.
    pub(crate) fn new(step_degrees: f64) -> Self {
        let full_steps = (FULL_TURN_DEGREES / step_degrees - STEP_COUNT_EPSILON).ceil() as usize;
        let angles = (0..full_steps)
            .map(|k| to_radians(k as f64 * step_degrees))
            .chain(iter::once(to_radians(FULL_TURN_DEGREES)))
            .collect();

        Self {
            step_degrees,
            angles,
        }
    }

    pub fn from_spec(spec: &RangeSpec) -> Result<Self, ConfigError> {
        spec.validate()?;
        Ok(Self::new(spec.step_degrees()))
    }

    pub fn step_degrees(&self) -> f64 {
        self.step_degrees
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// Nearest grid angle to `theta`, or `None` when there is no position yet.
    ///
    /// `atan2` jumps from `-PI` to `PI` at 9 o'clock while the grid runs from
    /// `-PI/2` up to `3PI/2`, so angles left of 12 o'clock are folded onto the
    /// upper end of the grid before comparing. Ties go to the earlier entry.
    pub fn snap(&self, theta: f64) -> Option<f64> {
        if theta.is_nan() {
            return None;
        }
        let theta = if theta < -FRAC_PI_2 {
            PI + (PI + theta).abs()
        } else {
            theta
        };

        let mut best = None::<(f64, f64)>;
        for &angle in &self.angles {
            let distance = (theta - angle).abs();
            match best {
                Some((best_distance, _)) if distance >= best_distance => {}
                _ => best = Some((distance, angle)),
            }
        }
        best.map(|(_, angle)| angle)
    }

    /// Painted step segments with `gap_degrees` left out at the end of each.
    pub fn segments(&self, gap_degrees: f64) -> impl Iterator<Item = Segment> + '_ {
        let gap = gap_degrees.to_radians();
        self.angles
            .windows(2)
            .map(move |pair| Segment {
                start: pair[0],
                end: pair[1] - gap,
            })
            .filter(|segment| segment.end > segment.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringgeom::angle::{ZERO_ANGLE, to_degrees};

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_grid_for_hundred_steps() {
        let spec = RangeSpec::new("a", "red", 0.0, 1000.0, 10.0);
        let grid = StepGrid::from_spec(&spec).unwrap();

        assert_close(grid.step_degrees(), 3.6);
        assert_eq!(grid.len(), 101);
        assert_close(grid.angles()[0], ZERO_ANGLE);
        assert_close(to_degrees(grid.angles()[1]), 3.6);
        assert_close(to_degrees(grid.angles()[100]), 360.0);
    }

    #[test]
    fn test_partial_last_segment() {
        let grid = StepGrid::new(7.0);
        // ceil(360 / 7) + 1
        assert_eq!(grid.len(), 53);
        let n = grid.len();
        assert_close(to_degrees(grid.angles()[n - 2]), 357.0);
        assert_close(to_degrees(grid.angles()[n - 1]), 360.0);
    }

    #[test]
    fn test_single_step_grid() {
        let grid = StepGrid::new(360.0);
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_grid_is_increasing_and_deterministic() {
        let spec = RangeSpec::new("a", "red", 500.0, 1500.0, 50.0);
        let grid = StepGrid::from_spec(&spec).unwrap();
        assert_eq!(grid, StepGrid::from_spec(&spec).unwrap());
        assert!(grid.angles().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_invalid_spec_builds_no_grid() {
        let spec = RangeSpec::new("a", "red", 0.0, 1000.0, 1.0);
        assert!(StepGrid::from_spec(&spec).is_err());
    }

    #[test]
    fn test_snap_returns_grid_member() {
        let grid = StepGrid::new(3.6);
        for i in -400..=400 {
            let theta = i as f64 * 0.01;
            let snapped = grid.snap(theta).unwrap();
            assert!(grid.angles().contains(&snapped), "{theta} snapped off-grid");
        }
    }

    #[test]
    fn test_snap_without_position() {
        assert_eq!(StepGrid::new(3.6).snap(f64::NAN), None);
    }

    #[test]
    fn test_snap_twelve_oclock_is_first_entry() {
        let grid = StepGrid::new(3.6);
        assert_eq!(grid.snap(-FRAC_PI_2), Some(grid.angles()[0]));
    }

    #[test]
    fn test_snap_just_left_of_twelve_oclock_goes_to_full_turn() {
        let grid = StepGrid::new(3.6);
        let last = *grid.angles().last().unwrap();
        assert_eq!(grid.snap(-FRAC_PI_2 - 0.01), Some(last));
    }

    #[test]
    fn test_snap_near_nine_oclock() {
        let grid = StepGrid::new(18.0);
        // both sides of the atan2 seam land on 270°
        let below = grid.snap(-PI + 0.001).unwrap();
        let above = grid.snap(PI - 0.001).unwrap();
        assert_eq!(below, above);
        assert_close(to_degrees(below), 270.0);
    }

    #[test]
    fn test_snap_tie_picks_earlier_entry() {
        let grid = StepGrid::new(90.0);
        let first = grid.angles()[0];
        assert_eq!(grid.angles()[1], 0.0);
        // exactly halfway between 0° and 90°
        assert_eq!(grid.snap(first / 2.0), Some(first));
    }

    #[test]
    fn test_segments_leave_gap() {
        let grid = StepGrid::new(90.0);
        let segments: Vec<_> = grid.segments(1.0).collect();
        assert_eq!(segments.len(), 4);
        for segment in segments {
            assert_close(segment.end - segment.start, 89f64.to_radians());
        }
    }

    #[test]
    fn test_segments_skip_slivers() {
        // the last 360/7 segment is 3° wide, a 5° gap swallows it
        let grid = StepGrid::new(7.0);
        assert_eq!(grid.segments(5.0).count(), grid.len() - 2);
    }
}
