use crate::config::{self, Config, ConfigError};
use crate::events::{AppEvent, SliderEvent};
use crate::slider::{MultiRingController, RingFrame};
use ringgeom::SurfaceBounds;

/// Owns the controller and turns host events into slider notifications.
pub struct App {
    controller: MultiRingController,
}

impl App {
    pub fn new(config: &Config, bounds: SurfaceBounds) -> Result<Self, ConfigError> {
        Ok(Self {
            controller: MultiRingController::from_config(config, bounds)?,
        })
    }

    pub fn controller(&self) -> &MultiRingController {
        &self.controller
    }

    /// The init notification. `None` once it has been taken.
    pub fn start(&mut self) -> Option<SliderEvent> {
        self.controller.take_init().map(SliderEvent::Init)
    }

    pub fn update(&mut self, event: AppEvent) -> Option<SliderEvent> {
        match event {
            AppEvent::Input(input) => {
                let action = self.controller.dispatch(input);
                if action.should_redraw {
                    self.redraw();
                }
                action.changed.map(SliderEvent::Change)
            }
            AppEvent::Resize(bounds) => {
                self.controller.resize(bounds);
                self.redraw();
                None
            }
            AppEvent::Values => Some(SliderEvent::Snapshot(self.controller.values().to_vec())),
            AppEvent::ConfigReload => match config::load_config() {
                Ok(new_config) => self.reload(&new_config),
                Err(e) => {
                    log::error!("Failed to reload config: {}", e);
                    None
                }
            },
        }
    }

    /// Rebuilds the controller on the current surface. On failure the
    /// running controller stays in place.
    pub fn reload(&mut self, config: &Config) -> Option<SliderEvent> {
        match MultiRingController::from_config(config, self.controller.bounds()) {
            Ok(controller) => {
                self.controller = controller;
                log::info!("Configuration reloaded");
                self.redraw();
                self.start()
            }
            Err(e) => {
                log::error!("Failed to apply reloaded config: {}", e);
                None
            }
        }
    }

    pub fn frames(&self) -> Vec<RingFrame<'_>> {
        self.controller.frames()
    }

    fn redraw(&self) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }
        for frame in self.frames() {
            let handle = frame.handle_position();
            log::debug!(
                "ring r={:.1} color={} handle=({:.1}, {:.1})",
                frame.radius,
                frame.color,
                handle.x,
                handle.y
            );
        }
    }
}
