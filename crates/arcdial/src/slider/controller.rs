use super::frame::RingFrame;
use super::layout::{self, RadiusBounds};
use super::ring::SliderRing;
use super::value::SliderValue;
use crate::config::{self, ComponentOptions, Config, ConfigError, RangeSpec};
use crate::events::InputEvent;
use ringgeom::{Point, SurfaceBounds};

/// Outcome of one dispatched input event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchAction {
    pub consumed: bool,
    pub should_redraw: bool,
    /// New values when the displayed snapshot changed.
    pub changed: Option<Vec<SliderValue>>,
}

/// A set of concentric rings sharing one center.
#[derive(Debug, Clone)]
pub struct MultiRingController {
    rings: Vec<SliderRing>,
    center: Point,
    bounds: SurfaceBounds,
    options: ComponentOptions,
    snapshot: Vec<SliderValue>,
    init_pending: bool,
}

impl MultiRingController {
    /// Validates the whole set before building anything.
    pub fn new(
        specs: &[RangeSpec],
        options: ComponentOptions,
        bounds: SurfaceBounds,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        config::validate_specs(specs)?;

        let radius_bounds = RadiusBounds::for_surface(&bounds, &options);
        let radii = layout::resolve_radii(specs, &options, radius_bounds)?;

        let rings = specs
            .iter()
            .zip(radii)
            .map(|(spec, radius)| SliderRing::new(spec.clone(), radius, &options))
            .collect::<Result<Vec<_>, _>>()?;
        let snapshot = rings.iter().map(SliderRing::initial_value).collect();

        let center = bounds.center();
        log::info!(
            "{} ring(s) around ({:.1}, {:.1}), radii {:?}",
            rings.len(),
            center.x,
            center.y,
            rings.iter().map(SliderRing::radius).collect::<Vec<_>>()
        );

        Ok(Self {
            rings,
            center,
            bounds,
            options,
            snapshot,
            init_pending: true,
        })
    }

    pub fn from_config(config: &Config, bounds: SurfaceBounds) -> Result<Self, ConfigError> {
        Self::new(&config.rings, config.options.clone(), bounds)
    }

    pub fn rings(&self) -> &[SliderRing] {
        &self.rings
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn bounds(&self) -> SurfaceBounds {
        self.bounds
    }

    pub fn options(&self) -> &ComponentOptions {
        &self.options
    }

    /// Last reported values, in ring order.
    pub fn values(&self) -> &[SliderValue] {
        &self.snapshot
    }

    /// The starting values (each ring's minimum). Yields them only once.
    pub fn take_init(&mut self) -> Option<Vec<SliderValue>> {
        if !self.init_pending {
            return None;
        }
        self.init_pending = false;
        Some(self.rings.iter().map(SliderRing::initial_value).collect())
    }

    /// New surface size: the center moves, radii stay as assigned.
    pub fn resize(&mut self, bounds: SurfaceBounds) {
        self.bounds = bounds;
        self.center = bounds.center();
        log::debug!("center moved to ({:.1}, {:.1})", self.center.x, self.center.y);
    }

    /// Offers the event to every ring. Touch coordinates are translated once
    /// so all rings see the same position.
    pub fn dispatch(&mut self, event: InputEvent) -> DispatchAction {
        let pointer = match event {
            InputEvent::Pointer(pointer) => pointer,
            InputEvent::Touch(touch) => touch.to_local(&self.bounds),
        };

        let center = self.center;
        let mut consumed = false;
        for ring in &mut self.rings {
            consumed |= ring.handle_pointer_event(pointer, center);
        }

        if !consumed {
            return DispatchAction::default();
        }

        DispatchAction {
            consumed,
            should_redraw: true,
            changed: self.detect_change(),
        }
    }

    /// Current values in ring order. A ring without a position keeps its
    /// last reported value.
    pub fn evaluate(&self) -> Vec<SliderValue> {
        self.rings
            .iter()
            .zip(&self.snapshot)
            .map(|(ring, last)| {
                ring.value_at(ring.current_angle(self.center))
                    .unwrap_or_else(|| last.clone())
            })
            .collect()
    }

    fn detect_change(&mut self) -> Option<Vec<SliderValue>> {
        let values = self.evaluate();
        if values == self.snapshot {
            return None;
        }
        log::debug!(
            "values changed: {}",
            values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        );
        self.snapshot.clone_from(&values);
        Some(values)
    }

    pub fn frames(&self) -> Vec<RingFrame<'_>> {
        self.rings
            .iter()
            .map(|ring| RingFrame {
                center: self.center,
                radius: ring.radius(),
                grid: ring.grid(),
                angle: ring.render_angle(self.center),
                color: &ring.spec().color,
                base_color: &self.options.base_color,
                thickness: self.options.ring_thickness,
                gap: self.options.ring_gap,
                progress_alpha: self.options.progress_alpha,
                button: &self.options.button,
            })
            .collect()
    }
}
