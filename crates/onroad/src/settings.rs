//! Application settings
//!
//! Layered: built-in defaults, then an optional TOML file, then `ONROAD__*`
//! environment variables (e.g. `ONROAD__TICK_HZ=10`,
//! `ONROAD__PARAMS__IS_METRIC=true`).

use std::path::{Path, PathBuf};

use alerting::AlertConfig;
use config::{Config, Environment, File};
use hud::{CanvasSize, LayoutPreset};
use hud_state::{UiParams, UI_FREQ};
use render::CameraKind;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::OnroadError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// UI tick rate (Hz)
    pub tick_hz: u32,
    pub canvas: CanvasSize,
    /// Directory holding `img/` and `fonts/`
    pub assets_dir: PathBuf,
    /// JSON-lines message recording to play back
    pub replay_path: Option<PathBuf>,
    /// Still image used as the camera view
    pub background_path: Option<PathBuf>,
    /// Where to write the last rendered frame
    pub snapshot_path: Option<PathBuf>,
    pub layout: LayoutPreset,
    pub camera: CameraKind,
    pub params: UiParams,
    pub alert: AlertConfig,
    /// Stop after this many ticks
    pub max_ticks: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_hz: UI_FREQ,
            canvas: CanvasSize::default(),
            assets_dir: PathBuf::from("assets"),
            replay_path: None,
            background_path: None,
            snapshot_path: None,
            layout: LayoutPreset::default(),
            camera: CameraKind::default(),
            params: UiParams::default(),
            alert: AlertConfig::default(),
            max_ticks: None,
        }
    }
}

impl Settings {
    /// Load settings, with `path` as the optional TOML layer
    pub fn load(path: Option<&Path>) -> Result<Self, OnroadError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);
        if let Some(path) = path {
            info!("Loading settings from {}", path.display());
            builder = builder.add_source(File::from(path).required(false));
        }

        let settings: Settings = builder
            .add_source(
                Environment::with_prefix("ONROAD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), OnroadError> {
        if self.tick_hz == 0 {
            return Err(OnroadError::Settings("tick_hz must be positive".into()));
        }
        if !self.canvas.is_valid() {
            return Err(OnroadError::Settings(format!(
                "canvas {}x{} is empty",
                self.canvas.width, self.canvas.height
            )));
        }
        self.alert.validate()?;
        Ok(())
    }

    /// Alert configuration running at the UI tick rate
    pub fn alert_config(&self) -> AlertConfig {
        AlertConfig {
            tick_hz: self.tick_hz,
            ..self.alert.clone()
        }
    }
}
