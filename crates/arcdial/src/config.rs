use crate::events::AppEvent;
use crate::slider::{
    DEFAULT_BUTTON_STROKE_WIDTH, DEFAULT_MIN_RING_MARGIN, DEFAULT_PROGRESS_ALPHA,
    DEFAULT_RING_GAP, DEFAULT_RING_THICKNESS, FULL_TURN_DEGREES, MAX_DECIMAL_PRECISION,
    MIN_RING_RADIUS, MIN_STEP_DEGREES,
};
use async_channel::{Receiver, Sender};
use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct RingName(String);

ringgeom::impl_string_newtype!(RingName);

/// Opaque color token handed to the renderer as-is (`"#6c3483"`, `"gray"`, ...).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ColorToken(String);

ringgeom::impl_string_newtype!(ColorToken);

/// Whether a drag keeps following the pointer once it leaves the annulus.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum DragMode {
    /// Moves are accepted anywhere until release.
    #[default]
    #[strum(to_string = "free", serialize = "rubberband")]
    Free,
    /// Moves outside the annulus are ignored, the drag stays active.
    #[strum(to_string = "constrained", serialize = "strict")]
    Constrained,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ButtonStyle {
    pub fill: ColorToken,
    pub stroke: ColorToken,
    pub stroke_width: f64,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            fill: ColorToken::new("#ffffff"),
            stroke: ColorToken::new("gray"),
            stroke_width: DEFAULT_BUTTON_STROKE_WIDTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ComponentOptions {
    /// Width of the painted band, in pixels. Half of it is the hit tolerance.
    pub ring_thickness: f64,
    /// Degrees of arc left out at the end of every step segment.
    pub ring_gap: f64,
    pub base_color: ColorToken,
    pub progress_alpha: f64,
    pub button: ButtonStyle,
    pub decimal_precision: usize,
    pub min_ring_margin: f64,
    pub min_radius: f64,
    pub drag_mode: DragMode,
}

impl Default for ComponentOptions {
    fn default() -> Self {
        Self {
            ring_thickness: DEFAULT_RING_THICKNESS,
            ring_gap: DEFAULT_RING_GAP,
            base_color: ColorToken::new("gray"),
            progress_alpha: DEFAULT_PROGRESS_ALPHA,
            button: ButtonStyle::default(),
            decimal_precision: 0,
            min_ring_margin: DEFAULT_MIN_RING_MARGIN,
            min_radius: MIN_RING_RADIUS,
            drag_mode: DragMode::default(),
        }
    }
}

impl ComponentOptions {
    /// Distance between the radii of two neighbouring rings.
    pub fn ring_pitch(&self) -> f64 {
        self.ring_thickness + self.min_ring_margin
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("ring_thickness", self.ring_thickness, self.ring_thickness > 0.0),
            ("ring_gap", self.ring_gap, self.ring_gap >= 0.0),
            (
                "progress_alpha",
                self.progress_alpha,
                (0.0..=1.0).contains(&self.progress_alpha),
            ),
            (
                "decimal_precision",
                self.decimal_precision as f64,
                self.decimal_precision <= MAX_DECIMAL_PRECISION,
            ),
            ("min_ring_margin", self.min_ring_margin, self.min_ring_margin >= 0.0),
            ("min_radius", self.min_radius, self.min_radius > 0.0),
            (
                "button.stroke_width",
                self.button.stroke_width,
                self.button.stroke_width >= 0.0,
            ),
        ];

        match checks
            .into_iter()
            .find(|(_, value, ok)| !ok || !value.is_finite())
        {
            Some((option, value, _)) => Err(ConfigError::InvalidOption { option, value }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RangeSpec {
    pub name: RingName,
    pub color: ColorToken,
    pub min_value: f64,
    pub max_value: f64,
    pub step: f64,
    #[serde(default)]
    pub radius: Option<f64>,
}

impl RangeSpec {
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        min_value: f64,
        max_value: f64,
        step: f64,
    ) -> Self {
        Self {
            name: RingName::new(name),
            color: ColorToken::new(color),
            min_value,
            max_value,
            step,
            radius: None,
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn span(&self) -> f64 {
        self.max_value - self.min_value
    }

    /// Angle covered by one step, in degrees.
    pub fn step_degrees(&self) -> f64 {
        self.step * FULL_TURN_DEGREES / self.span()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        let finite = self.min_value.is_finite() && self.max_value.is_finite();
        if !finite || self.min_value >= self.max_value {
            return Err(ConfigError::InvalidRange {
                name: self.name.clone(),
                min: self.min_value,
                max: self.max_value,
            });
        }
        if self.step.is_nan() || self.step <= 0.0 || self.step.is_infinite() {
            return Err(ConfigError::NonPositiveStep {
                name: self.name.clone(),
                step: self.step,
            });
        }

        let degrees = self.step_degrees();
        if degrees <= MIN_STEP_DEGREES {
            return Err(ConfigError::StepTooFine {
                name: self.name.clone(),
                degrees,
            });
        }
        if degrees > FULL_TURN_DEGREES {
            return Err(ConfigError::StepTooCoarse {
                name: self.name.clone(),
                degrees,
            });
        }
        Ok(())
    }
}

/// Validates every spec of a set plus the uniqueness of their names.
pub fn validate_specs(specs: &[RangeSpec]) -> Result<(), ConfigError> {
    if specs.is_empty() {
        return Err(ConfigError::NoRings);
    }
    let mut seen = HashSet::new();
    for spec in specs {
        spec.validate()?;
        if !seen.insert(spec.name.as_str()) {
            return Err(ConfigError::DuplicateName(spec.name.clone()));
        }
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub options: ComponentOptions,
    #[serde(default)]
    pub rings: Vec<RangeSpec>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("At least one ring must be configured")]
    NoRings,
    #[error("Ring names must not be empty")]
    EmptyName,
    #[error("Ring '{0}' is configured more than once")]
    DuplicateName(RingName),
    #[error("Ring '{name}': min value {min} must be below max value {max}")]
    InvalidRange { name: RingName, min: f64, max: f64 },
    #[error("Ring '{name}': step {step} must be positive")]
    NonPositiveStep { name: RingName, step: f64 },
    #[error("Ring '{name}': a step of {degrees:.3}° is too fine, it must exceed 1°")]
    StepTooFine { name: RingName, degrees: f64 },
    #[error("Ring '{name}': a step of {degrees:.3}° exceeds a full turn")]
    StepTooCoarse { name: RingName, degrees: f64 },
    #[error("Ring '{name}': radius {radius} is outside [{min}, {max}]")]
    RadiusOutOfBounds {
        name: RingName,
        radius: f64,
        min: f64,
        max: f64,
    },
    #[error("Ring '{name}' would get radius {radius}, below the minimum of {min}")]
    RadiusUnderflow { name: RingName, radius: f64, min: f64 },
    #[error("Invalid value {value} for option '{option}'")]
    InvalidOption { option: &'static str, value: f64 },
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "arcdial", "arcdial").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("ARCDIAL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

/// The configuration shipped with the binary.
pub fn default_config() -> Config {
    let parsed = config::Config::builder()
        .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
        .build()
        .and_then(|c| c.try_deserialize());

    match parsed {
        Ok(c) => c,
        Err(e) => {
            log::error!("Bundled default config is invalid: {}", e);
            Config::default()
        }
    }
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) if !c.rings.is_empty() => c,
        Ok(_) => {
            log::info!("No rings configured, using bundled defaults");
            default_config()
        }
        Err(e) => {
            log::error!("Failed to load config: {}, using bundled defaults", e);
            default_config()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Editors often write a file in several steps; changes closer together
/// than this are folded into one reload.
pub const RELOAD_DEBOUNCE: Duration = Duration::from_millis(250);

/// Watches the config directory and sends one `ConfigReload` per burst of
/// changes to the config file.
pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(Path::to_path_buf) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (fs_tx, fs_rx) = async_channel::unbounded();
    let watcher = RecommendedWatcher::new(
        move |res| {
            let _ = fs_tx.send_blocking(res);
        },
        notify::Config::default(),
    )
    .and_then(|mut w| w.watch(&config_dir, RecursiveMode::NonRecursive).map(|()| w));

    // dropping the watcher closes `fs_rx`
    let _watcher = match watcher {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to watch {}: {}", config_dir.display(), ConfigError::from(e));
            return;
        }
    };
    log::info!("Watching {}", config_path.display());

    forward_reloads(fs_rx, &config_path, RELOAD_DEBOUNCE, tx).await;
}

/// Whether a file system event touches the config file itself.
pub fn is_config_change(event: &notify::Event, config_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == config_path)
}

/// Turns raw watcher events into debounced reload requests. Returns once
/// either channel closes; a pending burst is still reported.
pub async fn forward_reloads(
    events: Receiver<notify::Result<notify::Event>>,
    config_path: &Path,
    debounce: Duration,
    tx: Sender<AppEvent>,
) {
    let is_change = |res: notify::Result<notify::Event>| match res {
        Ok(event) => is_config_change(&event, config_path),
        Err(e) => {
            log::error!("Watch error: {}", e);
            false
        }
    };

    while let Ok(res) = events.recv().await {
        if !is_change(res) {
            continue;
        }

        let mut closed = false;
        let mut folded = 0usize;
        loop {
            match tokio::time::timeout(debounce, events.recv()).await {
                Ok(Ok(res)) => folded += usize::from(is_change(res)),
                Ok(Err(_)) => {
                    closed = true;
                    break;
                }
                Err(_) => break,
            }
        }

        log::debug!("config changed ({} event(s) folded)", folded + 1);
        if tx.send(AppEvent::ConfigReload).await.is_err() || closed {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget() -> RangeSpec {
        RangeSpec::new("Budget", "#1e8449", 500.0, 1500.0, 50.0)
    }

    #[test]
    fn test_drag_mode_deserialization() {
        let cases = vec![
            ("\"free\"", DragMode::Free),
            ("\"Free\"", DragMode::Free),
            ("\"rubberband\"", DragMode::Free),
            ("\"constrained\"", DragMode::Constrained),
            ("\"STRICT\"", DragMode::Constrained),
        ];

        for (json, expected) in cases {
            let deserialized: DragMode = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<DragMode>("\"sticky\"").is_err());
    }

    #[test]
    fn test_step_degrees() {
        assert_eq!(budget().step_degrees(), 18.0);
        let fine = RangeSpec::new("a", "red", 0.0, 100.0, 0.5);
        assert!((fine.step_degrees() - 1.8).abs() < 1e-12);
        assert!(fine.validate().is_ok());
    }

    #[test]
    fn test_step_too_fine_is_rejected() {
        let spec = RangeSpec::new("a", "red", 0.0, 1000.0, 1.0);
        assert!(matches!(
            spec.validate(),
            Err(ConfigError::StepTooFine { degrees, .. }) if (degrees - 0.36).abs() < 1e-12
        ));
        // exactly one degree is still too fine
        let spec = RangeSpec::new("a", "red", 0.0, 360.0, 1.0);
        assert!(matches!(spec.validate(), Err(ConfigError::StepTooFine { .. })));
    }

    #[test]
    fn test_invalid_specs_are_rejected() {
        let reversed = RangeSpec::new("a", "red", 10.0, 10.0, 1.0);
        assert!(matches!(reversed.validate(), Err(ConfigError::InvalidRange { .. })));

        let zero_step = RangeSpec::new("a", "red", 0.0, 10.0, 0.0);
        assert!(matches!(zero_step.validate(), Err(ConfigError::NonPositiveStep { .. })));

        let nan_step = RangeSpec::new("a", "red", 0.0, 10.0, f64::NAN);
        assert!(matches!(nan_step.validate(), Err(ConfigError::NonPositiveStep { .. })));

        let coarse = RangeSpec::new("a", "red", 0.0, 10.0, 20.0);
        assert!(matches!(coarse.validate(), Err(ConfigError::StepTooCoarse { .. })));

        let unnamed = RangeSpec::new("  ", "red", 0.0, 10.0, 1.0);
        assert!(matches!(unnamed.validate(), Err(ConfigError::EmptyName)));
    }

    #[test]
    fn test_whole_range_as_one_step_is_valid() {
        let spec = RangeSpec::new("a", "red", 0.0, 10.0, 10.0);
        assert_eq!(spec.step_degrees(), 360.0);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let specs = vec![budget(), budget()];
        assert!(matches!(
            validate_specs(&specs),
            Err(ConfigError::DuplicateName(name)) if name.as_str() == "Budget"
        ));
        assert!(matches!(validate_specs(&[]), Err(ConfigError::NoRings)));
    }

    #[test]
    fn test_option_validation() {
        assert!(ComponentOptions::default().validate().is_ok());

        let options = ComponentOptions {
            progress_alpha: 1.5,
            ..ComponentOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ConfigError::InvalidOption { option: "progress_alpha", .. })
        ));

        let options = ComponentOptions {
            ring_thickness: f64::INFINITY,
            ..ComponentOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ConfigError::InvalidOption { option: "ring_thickness", .. })
        ));
    }

    #[test]
    fn test_decimal_precision_is_bounded() {
        let options = ComponentOptions {
            decimal_precision: MAX_DECIMAL_PRECISION,
            ..ComponentOptions::default()
        };
        assert!(options.validate().is_ok());

        let options = ComponentOptions {
            decimal_precision: 70_000,
            ..ComponentOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ConfigError::InvalidOption { option: "decimal_precision", value }) if value == 70_000.0
        ));

        let surface = ringgeom::SurfaceBounds::sized(800.0, 800.0);
        assert!(matches!(
            crate::slider::MultiRingController::new(&[budget()], options, surface),
            Err(ConfigError::InvalidOption { option: "decimal_precision", .. })
        ));
    }

    #[test]
    fn test_partial_options_fall_back_to_defaults() {
        let json = r#"{
            "options": { "ring_thickness": 30.0, "button": { "fill": "black" } },
            "rings": [
                { "name": "Food", "color": "red", "min_value": 0, "max_value": 100, "step": 5, "radius": 200 }
            ]
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.options.ring_thickness, 30.0);
        assert_eq!(config.options.ring_gap, DEFAULT_RING_GAP);
        assert_eq!(config.options.button.fill.as_str(), "black");
        assert_eq!(config.options.button.stroke.as_str(), "gray");
        assert_eq!(config.options.drag_mode, DragMode::Free);
        assert_eq!(config.rings[0].radius, Some(200.0));
    }

    #[test]
    fn test_bundled_default_config_is_valid() {
        let config = default_config();
        assert!(!config.rings.is_empty());
        assert!(config.options.validate().is_ok());
        assert!(validate_specs(&config.rings).is_ok());

        // every bundled step shows as a distinct value
        let resolution = 10f64.powi(-(config.options.decimal_precision as i32));
        assert!(config.rings.iter().all(|r| r.step >= resolution));
    }

    fn change(kind: EventKind, path: &Path) -> notify::Result<notify::Event> {
        Ok(notify::Event::new(kind).add_path(path.to_path_buf()))
    }

    fn modified(path: &Path) -> notify::Result<notify::Event> {
        change(EventKind::Modify(notify::event::ModifyKind::Any), path)
    }

    async fn reloads_for(events: Vec<notify::Result<notify::Event>>, config_path: &Path) -> usize {
        let (fs_tx, fs_rx) = async_channel::unbounded();
        for event in events {
            fs_tx.send(event).await.unwrap();
        }
        drop(fs_tx);

        let (tx, rx) = async_channel::unbounded();
        forward_reloads(fs_rx, config_path, Duration::from_secs(5), tx).await;

        let mut count = 0;
        while let Ok(event) = rx.try_recv() {
            assert!(matches!(event, AppEvent::ConfigReload));
            count += 1;
        }
        count
    }

    #[test]
    fn test_only_config_file_changes_count() {
        let config_path = Path::new("/tmp/arcdial/config.toml");
        let other = Path::new("/tmp/arcdial/config.toml~");

        assert!(is_config_change(&modified(config_path).unwrap(), config_path));
        assert!(!is_config_change(&modified(other).unwrap(), config_path));

        let access = change(EventKind::Access(notify::event::AccessKind::Any), config_path);
        assert!(!is_config_change(&access.unwrap(), config_path));
    }

    #[tokio::test]
    async fn test_burst_of_writes_reloads_once() {
        let config_path = Path::new("/tmp/arcdial/config.toml");
        let burst = vec![
            change(EventKind::Create(notify::event::CreateKind::File), config_path),
            modified(config_path),
            modified(config_path),
        ];
        assert_eq!(reloads_for(burst, config_path).await, 1);
    }

    #[tokio::test]
    async fn test_unrelated_events_never_reload() {
        let config_path = Path::new("/tmp/arcdial/config.toml");
        let noise = vec![
            modified(Path::new("/tmp/arcdial/notes.txt")),
            Err(notify::Error::generic("watch lost")),
        ];
        assert_eq!(reloads_for(noise, config_path).await, 0);
    }
}
