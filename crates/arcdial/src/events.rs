use crate::slider::SliderValue;
use ringgeom::{Point, SurfaceBounds};
use std::fmt;
use strum::{Display as StrumDisplay, EnumString};

/// Phase of a pointer or touch interaction, parsed from DOM-style names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum Phase {
    #[strum(
        to_string = "down",
        serialize = "press",
        serialize = "mousedown",
        serialize = "pointerdown",
        serialize = "touchstart"
    )]
    Press,
    #[strum(
        to_string = "move",
        serialize = "mousemove",
        serialize = "pointermove",
        serialize = "touchmove"
    )]
    Move,
    #[strum(
        to_string = "up",
        serialize = "release",
        serialize = "mouseup",
        serialize = "pointerup",
        serialize = "touchend",
        serialize = "touchcancel"
    )]
    Release,
}

/// Pointer event in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: Phase,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(phase: Phase, x: f64, y: f64) -> Self {
        Self {
            phase,
            position: Point::new(x, y),
        }
    }
}

/// Touch event in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchEvent {
    pub phase: Phase,
    pub page: Point,
}

impl TouchEvent {
    pub fn new(phase: Phase, x: f64, y: f64) -> Self {
        Self {
            phase,
            page: Point::new(x, y),
        }
    }

    pub fn to_local(&self, bounds: &SurfaceBounds) -> PointerEvent {
        PointerEvent {
            phase: self.phase,
            position: bounds.to_local(self.page),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Touch(TouchEvent),
}

/// Notifications for whoever displays the values.
#[derive(Debug, Clone, PartialEq)]
pub enum SliderEvent {
    Init(Vec<SliderValue>),
    Change(Vec<SliderValue>),
    /// Answer to an explicit query, not a change.
    Snapshot(Vec<SliderValue>),
}

impl SliderEvent {
    pub fn values(&self) -> &[SliderValue] {
        match self {
            Self::Init(v) | Self::Change(v) | Self::Snapshot(v) => v,
        }
    }
}

impl fmt::Display for SliderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Init(_) => "init",
            Self::Change(_) => "change",
            Self::Snapshot(_) => "values",
        };
        write!(f, "{label}")?;
        for value in self.values() {
            write!(f, " {value}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Input(InputEvent),
    Resize(SurfaceBounds),
    Values,
    ConfigReload,
}
