//! Radius assignment for a set of concentric rings.
//!
//! Either every ring names its radius, and each one is checked against the
//! surface, or the whole set is laid out from the outermost ring inward.

use crate::config::{ComponentOptions, ConfigError, RangeSpec};
use ringgeom::SurfaceBounds;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusBounds {
    pub min: f64,
    pub max: f64,
}

impl RadiusBounds {
    /// Largest radius whose painted band plus margin still fits the surface.
    pub fn for_surface(bounds: &SurfaceBounds, options: &ComponentOptions) -> Self {
        let max = bounds.shorter_side() / 2.0 - options.ring_thickness / 2.0 - options.min_ring_margin;
        Self {
            min: options.min_radius,
            max,
        }
    }

    pub fn contains(&self, radius: f64) -> bool {
        radius >= self.min && radius <= self.max
    }
}

pub fn resolve_radii(
    specs: &[RangeSpec],
    options: &ComponentOptions,
    bounds: RadiusBounds,
) -> Result<Vec<f64>, ConfigError> {
    if specs.iter().any(|s| s.radius.is_none()) {
        assign_radii(specs, options.ring_pitch(), bounds)
    } else {
        check_radii(specs, bounds)
    }
}

fn assign_radii(
    specs: &[RangeSpec],
    pitch: f64,
    bounds: RadiusBounds,
) -> Result<Vec<f64>, ConfigError> {
    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let radius = bounds.max - i as f64 * pitch;
            if radius < bounds.min {
                return Err(ConfigError::RadiusUnderflow {
                    name: spec.name.clone(),
                    radius,
                    min: bounds.min,
                });
            }
            Ok(radius)
        })
        .collect()
}

fn check_radii(specs: &[RangeSpec], bounds: RadiusBounds) -> Result<Vec<f64>, ConfigError> {
    specs
        .iter()
        .map(|spec| match spec.radius {
            Some(radius) if bounds.contains(radius) => Ok(radius),
            radius => Err(ConfigError::RadiusOutOfBounds {
                name: spec.name.clone(),
                radius: radius.unwrap_or(f64::NAN),
                min: bounds.min,
                max: bounds.max,
            }),
        })
        .collect()
}
