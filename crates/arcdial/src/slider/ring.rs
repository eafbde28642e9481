use super::grid::StepGrid;
use super::value::SliderValue;
use super::{FULL_TURN_DEGREES, MAX_DECIMAL_PRECISION};
use crate::config::{ComponentOptions, ConfigError, DragMode, RangeSpec};
use crate::events::{Phase, PointerEvent, TouchEvent};
use ringgeom::angle::{ZERO_ANGLE, to_degrees};
use ringgeom::{Point, SurfaceBounds, is_within_ring};

/// Mutable part of a ring: where the pointer was last seen and whether a
/// drag is in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RingState {
    pub location: Option<Point>,
    pub holding: bool,
}

/// One circular slider track.
///
/// The ring does not own the shared center; every operation that needs it
/// takes it from the controller.
#[derive(Debug, Clone)]
pub struct SliderRing {
    spec: RangeSpec,
    radius: f64,
    tolerance: f64,
    grid: StepGrid,
    state: RingState,
    precision: usize,
    drag_mode: DragMode,
}

impl SliderRing {
    pub fn new(
        spec: RangeSpec,
        radius: f64,
        options: &ComponentOptions,
    ) -> Result<Self, ConfigError> {
        let grid = StepGrid::from_spec(&spec)?;

        let precision = options.decimal_precision.min(MAX_DECIMAL_PRECISION);
        let resolution = 10f64.powi(-(precision as i32));
        if spec.step < resolution * (1.0 - 1e-9) {
            log::warn!(
                "[{}] step {} is finer than {} decimal place(s), neighbouring steps will display alike",
                spec.name,
                spec.step,
                precision
            );
        }

        Ok(Self {
            spec,
            radius,
            tolerance: options.ring_thickness / 2.0,
            grid,
            state: RingState::default(),
            precision: options.decimal_precision,
            drag_mode: options.drag_mode,
        })
    }

    pub fn spec(&self) -> &RangeSpec {
        &self.spec
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn grid(&self) -> &StepGrid {
        &self.grid
    }

    pub fn state(&self) -> RingState {
        self.state
    }

    pub fn is_holding(&self) -> bool {
        self.state.holding
    }

    pub fn contains(&self, point: Point, center: Point) -> bool {
        is_within_ring(point, center, self.radius, self.tolerance)
    }

    /// Returns whether the event was consumed by this ring.
    pub fn handle_pointer_event(&mut self, event: PointerEvent, center: Point) -> bool {
        match event.phase {
            Phase::Press => self.press(event.position, center),
            Phase::Move => self.drag_to(event.position, center),
            Phase::Release => self.release(),
        }
    }

    pub fn handle_touch_event(
        &mut self,
        event: TouchEvent,
        bounds: &SurfaceBounds,
        center: Point,
    ) -> bool {
        self.handle_pointer_event(event.to_local(bounds), center)
    }

    fn press(&mut self, point: Point, center: Point) -> bool {
        if !self.contains(point, center) {
            self.state.holding = false;
            return false;
        }
        log::debug!("[{}] begin drag at ({:.1}, {:.1})", self.spec.name, point.x, point.y);
        self.state.location = Some(point);
        self.state.holding = true;
        true
    }

    fn drag_to(&mut self, point: Point, center: Point) -> bool {
        if !self.state.holding || !point.is_finite() {
            return false;
        }
        if self.drag_mode == DragMode::Constrained && !self.contains(point, center) {
            return false;
        }
        self.state.location = Some(point);
        true
    }

    fn release(&mut self) -> bool {
        let was_holding = self.state.holding;
        self.state.holding = false;
        if was_holding {
            log::debug!("[{}] end drag", self.spec.name);
        }
        was_holding
    }

    /// Raw pointer angle around `center`, `None` until a position is recorded.
    pub fn current_angle(&self, center: Point) -> Option<f64> {
        self.state.location.map(|p| p.angle_from(center))
    }

    pub fn snapped_angle(&self, center: Point) -> Option<f64> {
        self.current_angle(center)
            .and_then(|theta| self.grid.snap(theta))
    }

    /// Angle the handle is drawn at; the zero position until a value exists.
    pub fn render_angle(&self, center: Point) -> f64 {
        self.snapped_angle(center).unwrap_or(ZERO_ANGLE)
    }

    /// Domain value for slider degrees in `[0, 360]`.
    pub fn value_for_degrees(&self, degrees: f64) -> f64 {
        degrees * self.spec.span() / FULL_TURN_DEGREES + self.spec.min_value
    }

    /// Snaps `angle` and maps it into the ring's range. `None` while the
    /// ring has no position, in which case no value is known.
    pub fn value_at(&self, angle: Option<f64>) -> Option<SliderValue> {
        let snapped = self.grid.snap(angle?)?;
        let value = self.value_for_degrees(to_degrees(snapped));
        Some(self.make_value(value))
    }

    pub fn initial_value(&self) -> SliderValue {
        self.make_value(self.spec.min_value)
    }

    fn make_value(&self, value: f64) -> SliderValue {
        SliderValue::new(
            self.spec.name.clone(),
            self.spec.color.clone(),
            value,
            self.precision,
        )
    }
}
