//! Alerting System
//!
//! Resolves the driver alert shown over the road view each tick, including the
//! watchdog that turns missing or stale controls data into an alert, and
//! decides when the alert overlay needs repainting.

mod alert;
mod presenter;
mod resolver;

pub use alert::{Alert, AlertKind};
pub use hud_state::{AlertSize, AudibleAlert};
pub use presenter::AlertPresenter;
pub use resolver::{AlertConfig, AlertResolver};

use thiserror::Error;

/// Alerting error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlertError {
    #[error("Invalid alert configuration: {0}")]
    InvalidConfig(String),
}
