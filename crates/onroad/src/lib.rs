//! Onroad Application
//!
//! Runs the HUD at a fixed tick rate:
//! - Onroad window state (status border, alert overlay, offroad transitions)
//! - Gesture shell emitting commands over a queue
//! - Layered settings (defaults, TOML file, environment)
//! - Replay source feeding recorded topic messages
//! - The tick driver tying state, compositor and render backend together

pub mod driver;
pub mod gesture;
pub mod replay;
pub mod settings;
pub mod window;

pub use driver::{Driver, DriverStats};
pub use gesture::{GestureShell, ShellCommand};
pub use replay::{ReplaySource, StateSource};
pub use settings::Settings;
pub use window::{OnroadWindow, WindowUpdate};

use alerting::AlertError;
use hud::HudError;
use render::RenderError;
use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Onroad error types
#[derive(Error, Debug)]
pub enum OnroadError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid settings: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HUD error: {0}")]
    Hud(#[from] HudError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Alert error: {0}")]
    Alert(#[from] AlertError),

    #[error("Logging error: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Initialize logging
pub fn init_logging() -> Result<(), OnroadError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
