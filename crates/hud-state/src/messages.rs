//! Topic messages consumed by the HUD
//!
//! Each struct mirrors the subset of a published record the HUD reads.
//! Missing fields deserialize to their defaults so partial records from a
//! replay are accepted.

use serde::{Deserialize, Serialize};

/// Screen-space point (canvas pixels)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Published topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Topic {
    CarState,
    ControlsState,
    ModelV2,
    RadarState,
    CarControl,
    CarParams,
    GpsLocationExternal,
    DeviceState,
}

impl Topic {
    pub const ALL: [Topic; 8] = [
        Topic::CarState,
        Topic::ControlsState,
        Topic::ModelV2,
        Topic::RadarState,
        Topic::CarControl,
        Topic::CarParams,
        Topic::GpsLocationExternal,
        Topic::DeviceState,
    ];
}

/// Alert display size
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertSize {
    #[default]
    None,
    Small,
    Mid,
    Full,
}

/// Audible alert categories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AudibleAlert {
    #[default]
    None,
    Engage,
    Disengage,
    Refuse,
    Prompt,
    PromptRepeat,
    PromptDistracted,
    WarningSoft,
    WarningImmediate,
}

/// Alert status reported by controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AlertStatus {
    #[default]
    Normal,
    UserPrompt,
    Critical,
}

/// Lane selection mode for lateral control
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LaneMode {
    #[default]
    Auto,
    Manual,
}

/// Tire pressure per wheel (psi)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tpms {
    pub fl: f32,
    pub fr: f32,
    pub rl: f32,
    pub rr: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarState {
    /// Cluster speed (m/s)
    pub clu_speed_ms: f32,
    pub left_blinker: bool,
    pub right_blinker: bool,
    pub left_blindspot: bool,
    pub right_blindspot: bool,
    pub tpms: Tpms,
    pub cruise_gap: i32,
    pub brake_lights: bool,
    /// -1 unsupported, 0 off, 1 active, 2 warning
    pub auto_hold: i32,
    pub steering_pressed: bool,
}

impl Default for CarState {
    fn default() -> Self {
        Self {
            clu_speed_ms: 0.0,
            left_blinker: false,
            right_blinker: false,
            left_blindspot: false,
            right_blindspot: false,
            tpms: Tpms::default(),
            cruise_gap: 0,
            brake_lights: false,
            auto_hold: -1,
            steering_pressed: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsState {
    pub enabled: bool,
    pub alert_text1: String,
    pub alert_text2: String,
    pub alert_type: String,
    pub alert_size: AlertSize,
    pub alert_sound: AudibleAlert,
    pub alert_status: AlertStatus,
    pub lane_mode: LaneMode,

    pub scc_stock_cam_act: i32,
    pub scc_stock_cam_status: i32,

    pub steer_ratio: f32,
    pub steer_rate_cost: f32,
    pub steer_actuator_delay: f32,
    pub scc_gas_factor: f32,
    pub scc_brake_factor: f32,
    pub scc_curvature_factor: f32,
    pub longitudinal_actuator_delay_lower_bound: f32,
    pub longitudinal_actuator_delay_upper_bound: f32,

    pub apply_accel: f32,
    pub a_req_value: f32,
    pub a_req_value_min: f32,
    pub a_req_value_max: f32,
    /// 0 off, 1 pid, 2 stopping, 3 starting
    pub long_control_state: u8,
    pub v_pid: f32,
    pub up_accel_cmd: f32,
    pub ui_accel_cmd: f32,
    pub uf_accel_cmd: f32,
}

/// One lead prediction from the driving model
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadData {
    /// Longitudinal distance
    pub x: f32,
    /// Relative velocity (negative when closing)
    pub v: f32,
    pub prob: f32,
    /// Projected screen position of the lead
    pub anchor: Point,
}

/// Driving model output, already projected into canvas space
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelV2 {
    pub lane_lines: [Vec<Point>; 4],
    pub lane_line_probs: [f32; 4],
    pub road_edges: [Vec<Point>; 2],
    pub road_edge_stds: [f32; 2],
    pub track: Vec<Point>,
    pub leads: [LeadData; 2],
    pub end_to_end: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarLead {
    pub status: bool,
    pub radar: bool,
    pub d_rel: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarState {
    pub lead_one: RadarLead,
    pub lead_two: RadarLead,
}

/// Cruise smoother output published with car control
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarControl {
    pub long_control: bool,
    /// km/h
    pub apply_max_speed: f32,
    /// km/h, 255 when unset
    pub cruise_max_speed: f32,
    pub auto_tr_gap: i32,
    /// 0 inactive, 1 NDA, 2 HDA
    pub road_limit_speed_active: i32,
    pub road_limit_speed: i32,
    /// meters
    pub road_limit_speed_left_dist: i32,
    pub accel: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarParams {
    pub scc_bus: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpsLocation {
    /// Horizontal accuracy (m)
    pub accuracy: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceState {
    pub started: bool,
}

/// A record delivered on one topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "topic", content = "data", rename_all = "camelCase")]
pub enum Message {
    CarState(CarState),
    ControlsState(ControlsState),
    ModelV2(ModelV2),
    RadarState(RadarState),
    CarControl(CarControl),
    CarParams(CarParams),
    GpsLocationExternal(GpsLocation),
    DeviceState(DeviceState),
}

impl Message {
    pub fn topic(&self) -> Topic {
        match self {
            Message::CarState(_) => Topic::CarState,
            Message::ControlsState(_) => Topic::ControlsState,
            Message::ModelV2(_) => Topic::ModelV2,
            Message::RadarState(_) => Topic::RadarState,
            Message::CarControl(_) => Topic::CarControl,
            Message::CarParams(_) => Topic::CarParams,
            Message::GpsLocationExternal(_) => Topic::GpsLocationExternal,
            Message::DeviceState(_) => Topic::DeviceState,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_record_defaults() {
        let msg: Message =
            serde_json::from_str(r#"{"topic":"carState","data":{"left_blinker":true}}"#).unwrap();
        match msg {
            Message::CarState(cs) => {
                assert!(cs.left_blinker);
                assert!(!cs.right_blinker);
                assert_eq!(cs.cruise_gap, 0);
                // Autohold is unsupported unless reported
                assert_eq!(cs.auto_hold, -1);
            }
            other => panic!("unexpected message {:?}", other),
        }
    }

    #[test]
    fn test_topic_tags() {
        let msg: Message =
            serde_json::from_str(r#"{"topic":"gpsLocationExternal","data":{"accuracy":3.5}}"#)
                .unwrap();
        assert_eq!(msg.topic(), Topic::GpsLocationExternal);

        let msg: Message = serde_json::from_str(r#"{"topic":"modelV2","data":{}}"#).unwrap();
        assert_eq!(msg.topic(), Topic::ModelV2);
    }

    #[test]
    fn test_alert_enums_parse() {
        let cs: ControlsState = serde_json::from_str(
            r#"{"alert_size":"full","alert_sound":"warningImmediate","alert_status":"critical"}"#,
        )
        .unwrap();
        assert_eq!(cs.alert_size, AlertSize::Full);
        assert_eq!(cs.alert_sound, AudibleAlert::WarningImmediate);
        assert_eq!(cs.alert_status, AlertStatus::Critical);
    }
}
