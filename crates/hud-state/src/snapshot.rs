//! Per-tick state snapshot
//!
//! A snapshot is captured once per tick from the topic bus and is never
//! mutated afterwards; every consumer in the tick reads the same values.

use serde::{Deserialize, Serialize};

use crate::bus::TopicBus;
use crate::messages::{
    AlertSize, AlertStatus, AudibleAlert, ControlsState, LaneMode, Point, RadarLead, Topic, Tpms,
};

/// Engagement status, drives the background tint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UiStatus {
    #[default]
    Disengaged,
    Engaged,
    Warning,
    Alert,
}

impl UiStatus {
    pub fn from_controls(controls: &ControlsState) -> Self {
        if !controls.enabled {
            return UiStatus::Disengaged;
        }
        match controls.alert_status {
            AlertStatus::Normal => UiStatus::Engaged,
            AlertStatus::UserPrompt => UiStatus::Warning,
            AlertStatus::Critical => UiStatus::Alert,
        }
    }
}

/// Persisted UI flags, read on transitions rather than per frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiParams {
    pub is_metric: bool,
    pub wide_camera: bool,
    pub show_debug: bool,
    /// Hides the alert overlay when the stock openpilot view is in use
    pub openpilot_view_enabled: bool,
}

/// Freshness of the controls topic, the input of the stale watchdog
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlsLink {
    /// Delivered in this tick
    pub updated: bool,
    /// Frame of the last delivery (0 if never)
    pub last_frame: u64,
    /// Time of the last delivery (ns)
    pub last_time_ns: u64,
    /// Time of this tick (ns)
    pub now_ns: u64,
}

impl ControlsLink {
    /// Seconds since controls were last heard from
    pub fn seconds_since_last(&self) -> f64 {
        self.now_ns.saturating_sub(self.last_time_ns) as f64 / 1e9
    }
}

/// Alert fields as published by controls
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlsAlert {
    pub text1: String,
    pub text2: String,
    pub alert_type: String,
    pub size: AlertSize,
    pub sound: AudibleAlert,
}

/// A lead vehicle track
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LeadTrack {
    /// Longitudinal distance
    pub d_rel: f32,
    /// Relative velocity (negative when closing)
    pub v_rel: f32,
    pub prob: f32,
    /// Screen position of the lead
    pub anchor: Point,
    /// Confirmed by radar
    pub radar: bool,
}

/// Cruise smoother state
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CruiseState {
    pub long_control: bool,
    /// km/h
    pub apply_max_speed: f32,
    /// km/h, 255 when unset
    pub cruise_max_speed: f32,
    pub gap: i32,
    pub auto_tr_gap: i32,
}

impl CruiseState {
    pub fn is_set(&self) -> bool {
        self.cruise_max_speed > 0.0 && self.cruise_max_speed < 255.0
    }
}

/// Road speed limit and stock camera readings
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpeedLimitState {
    /// 0 inactive, 1 NDA, 2 HDA
    pub nda_active: i32,
    pub limit_speed: i32,
    /// meters
    pub left_dist: i32,
    pub stock_cam_act: i32,
    pub stock_cam_status: i32,
}

/// Tuning and longitudinal debug numbers
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DebugReadout {
    pub steer_ratio: f32,
    pub steer_rate_cost: f32,
    pub steer_actuator_delay: f32,
    pub scc_bus: i32,
    pub scc_gas_factor: f32,
    pub scc_brake_factor: f32,
    pub scc_curvature_factor: f32,
    pub long_delay_lower: f32,
    pub long_delay_upper: f32,

    pub long_control_state: u8,
    pub v_pid: f32,
    pub up_accel_cmd: f32,
    pub ui_accel_cmd: f32,
    pub uf_accel_cmd: f32,
    pub accel: f32,
    pub apply_accel: f32,
    pub a_req_value: f32,
    pub a_req_value_min: f32,
    pub a_req_value_max: f32,
    /// Radar lead distance, 0 without a radar lead
    pub radar_dist: f32,
    /// Vision lead distance, 0 without a vision lead
    pub vision_dist: f32,
}

/// Read-only view of everything drawn in one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub lane_lines: [Vec<Point>; 4],
    pub lane_line_probs: [f32; 4],
    pub road_edges: [Vec<Point>; 2],
    pub road_edge_stds: [f32; 2],
    pub track: Vec<Point>,
    pub leads: [LeadTrack; 2],
    pub end_to_end: bool,
    pub world_objects_visible: bool,

    pub steer_override: bool,
    pub lane_mode: LaneMode,

    /// m/s
    pub speed_ms: f32,
    pub is_metric: bool,
    pub left_blinker: bool,
    pub right_blinker: bool,
    pub left_blindspot: bool,
    pub right_blindspot: bool,
    pub gps_accuracy: f32,
    pub tpms: Tpms,
    pub brake_lights: bool,
    pub auto_hold: i32,
    pub cruise: CruiseState,
    pub limit: SpeedLimitState,
    pub debug: DebugReadout,
    pub show_debug: bool,
}

/// Immutable per-tick bundle of vehicle, model and control readings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    pub frame: u64,
    pub started: bool,
    pub status: UiStatus,
    pub controls: ControlsLink,
    pub controls_alert: ControlsAlert,
    pub openpilot_view_enabled: bool,
    pub scene: Scene,
}

fn radar_confirmed(lead: &RadarLead) -> bool {
    lead.status && lead.radar
}

impl StateSnapshot {
    /// Capture the latest value of every topic
    pub fn capture(bus: &TopicBus, params: &UiParams) -> Self {
        let controls = bus.controls_state().cloned().unwrap_or_default();
        let car = bus.car_state().cloned().unwrap_or_default();
        let model = bus.model().cloned().unwrap_or_default();
        let radar = bus.radar_state().cloned().unwrap_or_default();
        let cc = bus.car_control().cloned().unwrap_or_default();
        let scc_bus = bus.car_params().map(|p| p.scc_bus).unwrap_or_default();
        let gps_accuracy = bus.gps().map(|g| g.accuracy).unwrap_or_default();
        let started = bus.device_state().is_some_and(|d| d.started);

        let leads = [0, 1].map(|i| {
            let lead = &model.leads[i];
            let radar_lead = if i == 0 { &radar.lead_one } else { &radar.lead_two };
            LeadTrack {
                d_rel: lead.x,
                v_rel: lead.v,
                prob: lead.prob,
                anchor: lead.anchor,
                radar: radar_confirmed(radar_lead),
            }
        });

        let radar_dist = if radar_confirmed(&radar.lead_one) {
            radar.lead_one.d_rel
        } else {
            0.0
        };
        let vision_dist = if model.leads[0].prob > 0.5 {
            model.leads[0].x - 1.5
        } else {
            0.0
        };

        let scene = Scene {
            lane_lines: model.lane_lines,
            lane_line_probs: model.lane_line_probs,
            road_edges: model.road_edges,
            road_edge_stds: model.road_edge_stds,
            track: model.track,
            leads,
            end_to_end: model.end_to_end,
            world_objects_visible: bus.rcv_frame(Topic::ModelV2) > 0,
            steer_override: car.steering_pressed,
            lane_mode: controls.lane_mode,
            speed_ms: car.clu_speed_ms,
            is_metric: params.is_metric,
            left_blinker: car.left_blinker,
            right_blinker: car.right_blinker,
            left_blindspot: car.left_blindspot,
            right_blindspot: car.right_blindspot,
            gps_accuracy,
            tpms: car.tpms,
            brake_lights: car.brake_lights,
            auto_hold: car.auto_hold,
            cruise: CruiseState {
                long_control: cc.long_control,
                apply_max_speed: cc.apply_max_speed,
                cruise_max_speed: cc.cruise_max_speed,
                gap: car.cruise_gap,
                auto_tr_gap: cc.auto_tr_gap,
            },
            limit: SpeedLimitState {
                nda_active: cc.road_limit_speed_active,
                limit_speed: cc.road_limit_speed,
                left_dist: cc.road_limit_speed_left_dist,
                stock_cam_act: controls.scc_stock_cam_act,
                stock_cam_status: controls.scc_stock_cam_status,
            },
            debug: DebugReadout {
                steer_ratio: controls.steer_ratio,
                steer_rate_cost: controls.steer_rate_cost,
                steer_actuator_delay: controls.steer_actuator_delay,
                scc_bus,
                scc_gas_factor: controls.scc_gas_factor,
                scc_brake_factor: controls.scc_brake_factor,
                scc_curvature_factor: controls.scc_curvature_factor,
                long_delay_lower: controls.longitudinal_actuator_delay_lower_bound,
                long_delay_upper: controls.longitudinal_actuator_delay_upper_bound,
                long_control_state: controls.long_control_state,
                v_pid: controls.v_pid,
                up_accel_cmd: controls.up_accel_cmd,
                ui_accel_cmd: controls.ui_accel_cmd,
                uf_accel_cmd: controls.uf_accel_cmd,
                accel: cc.accel,
                apply_accel: controls.apply_accel,
                a_req_value: controls.a_req_value,
                a_req_value_min: controls.a_req_value_min,
                a_req_value_max: controls.a_req_value_max,
                radar_dist,
                vision_dist,
            },
            show_debug: params.show_debug,
        };

        Self {
            frame: bus.frame(),
            started,
            status: UiStatus::from_controls(&controls),
            controls: ControlsLink {
                updated: bus.updated(Topic::ControlsState),
                last_frame: bus.rcv_frame(Topic::ControlsState),
                last_time_ns: bus.rcv_time_ns(Topic::ControlsState),
                now_ns: bus.now_ns(),
            },
            controls_alert: ControlsAlert {
                text1: controls.alert_text1,
                text2: controls.alert_text2,
                alert_type: controls.alert_type,
                size: controls.alert_size,
                sound: controls.alert_sound,
            },
            openpilot_view_enabled: params.openpilot_view_enabled,
            scene,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{CarState, LeadData, Message, ModelV2, RadarState};

    #[test]
    fn test_status_from_controls() {
        let mut cs = ControlsState::default();
        assert_eq!(UiStatus::from_controls(&cs), UiStatus::Disengaged);

        cs.enabled = true;
        assert_eq!(UiStatus::from_controls(&cs), UiStatus::Engaged);

        cs.alert_status = AlertStatus::UserPrompt;
        assert_eq!(UiStatus::from_controls(&cs), UiStatus::Warning);

        cs.alert_status = AlertStatus::Critical;
        assert_eq!(UiStatus::from_controls(&cs), UiStatus::Alert);
    }

    #[test]
    fn test_capture_empty_bus() {
        let bus = TopicBus::new();
        let snap = StateSnapshot::capture(&bus, &UiParams::default());
        assert_eq!(snap.status, UiStatus::Disengaged);
        assert!(!snap.controls.updated);
        assert_eq!(snap.controls.last_frame, 0);
        assert!(!snap.scene.world_objects_visible);
        assert_eq!(snap.scene.leads.len(), 2);
        assert_eq!(snap.scene.lane_line_probs.len(), 4);
        // No car state yet: autohold icon stays hidden
        assert_eq!(snap.scene.auto_hold, -1);
    }

    #[test]
    fn test_capture_leads_and_radar() {
        let mut bus = TopicBus::new();
        let mut model = ModelV2::default();
        model.leads[0] = LeadData {
            x: 20.0,
            v: -1.0,
            prob: 0.9,
            anchor: Point::new(500.0, 400.0),
        };
        let mut radar = RadarState::default();
        radar.lead_one = RadarLead {
            status: true,
            radar: true,
            d_rel: 19.5,
        };
        bus.update(
            [
                Message::ModelV2(model),
                Message::RadarState(radar),
                Message::CarState(CarState {
                    clu_speed_ms: 10.0,
                    ..Default::default()
                }),
            ],
            1_000_000,
        );

        let params = UiParams {
            is_metric: true,
            ..Default::default()
        };
        let snap = StateSnapshot::capture(&bus, &params);
        assert!(snap.scene.world_objects_visible);
        assert!(snap.scene.leads[0].radar);
        assert!(!snap.scene.leads[1].radar);
        assert_eq!(snap.scene.leads[0].d_rel, 20.0);
        assert_eq!(snap.scene.debug.radar_dist, 19.5);
        assert_eq!(snap.scene.debug.vision_dist, 18.5);
        assert!(snap.scene.is_metric);
        assert_eq!(snap.scene.speed_ms, 10.0);
    }

    #[test]
    fn test_controls_link() {
        let mut bus = TopicBus::new();
        bus.update([Message::ControlsState(ControlsState::default())], 1_000_000_000);
        bus.update([], 3_500_000_000);
        let snap = StateSnapshot::capture(&bus, &UiParams::default());
        assert!(!snap.controls.updated);
        assert_eq!(snap.controls.last_frame, 1);
        assert!((snap.controls.seconds_since_last() - 2.5).abs() < 1e-9);
    }
}
