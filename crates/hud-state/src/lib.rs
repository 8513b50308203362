//! HUD State
//!
//! Everything the onroad HUD knows about the vehicle for one tick:
//! - Topic messages as published by the control and perception processes
//! - A latest-value topic bus with per-topic "updated this tick" flags
//! - Immutable per-tick state snapshots
//! - Valid ranges for sensor readings that gate what gets drawn

pub mod bus;
pub mod messages;
pub mod snapshot;
pub mod validator;

pub use bus::TopicBus;
pub use messages::{
    AlertSize, AlertStatus, AudibleAlert, CarControl, CarParams, CarState, ControlsState,
    DeviceState, GpsLocation, LaneMode, LeadData, Message, ModelV2, Point, RadarLead, RadarState,
    Tpms, Topic,
};
pub use snapshot::{
    ControlsAlert, ControlsLink, CruiseState, DebugReadout, LeadTrack, Scene, SpeedLimitState,
    StateSnapshot, UiParams, UiStatus,
};
pub use validator::SensorRanges;

use thiserror::Error;

/// Fixed UI tick rate (Hz)
pub const UI_FREQ: u32 = 20;

/// m/s to km/h
pub const MS_TO_KPH: f32 = 3.6;

/// m/s to mph
pub const MS_TO_MPH: f32 = 2.236_936_3;

/// km/h to mph
pub const KM_TO_MILE: f32 = 0.621_371;

/// State error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("{field} value {value} is out of range [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}
