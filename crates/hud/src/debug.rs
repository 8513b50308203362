//! Tuning info line and the longitudinal debug panel

use hud_state::{DebugReadout, MS_TO_KPH};

use crate::directive::{Color, DrawDirective, FontSpec, FontWeight, TextPlacement};
use crate::CanvasSize;

/// Narrower canvases have no room for the debug panel
pub const DEBUG_MIN_WIDTH: i32 = 1200;

const LONG_STATES: [&str; 4] = ["off", "pid", "stopping", "starting"];

pub fn long_state_name(state: u8) -> &'static str {
    LONG_STATES.get(usize::from(state)).copied().unwrap_or("unknown")
}

/// Steering and longitudinal tuning summary
pub fn info_text(d: &DebugReadout) -> String {
    format!(
        "SR({:.2}) SRC({:.2}) SAD({:.2}) SCC({}) (A{:.2}/B{:.2}/C{:.2}/D{:.2}/{:.2})",
        d.steer_ratio,
        d.steer_rate_cost,
        d.steer_actuator_delay,
        d.scc_bus,
        d.scc_gas_factor,
        d.scc_brake_factor,
        d.scc_curvature_factor,
        d.long_delay_lower,
        d.long_delay_upper,
    )
}

pub fn info_line(d: &DebugReadout, canvas: CanvasSize) -> DrawDirective {
    DrawDirective::text(
        info_text(d),
        FontSpec::new(34.0, FontWeight::Regular),
        Color::rgba(255, 255, 255, 220),
        TextPlacement::Baseline {
            x: 120,
            y: canvas.height - 15,
        },
    )
}

pub fn debug_lines(d: &DebugReadout) -> Vec<String> {
    vec![
        format!("State: {}", long_state_name(d.long_control_state)),
        format!("vPid: {:.3}({:.1})", d.v_pid, d.v_pid * MS_TO_KPH),
        format!("P: {:.3}", d.up_accel_cmd),
        format!("I: {:.3}", d.ui_accel_cmd),
        format!("F: {:.3}", d.uf_accel_cmd),
        format!("Accel: {:.3}", d.accel),
        format!("Apply: {:.3}, Stock: {:.3}", d.apply_accel, d.a_req_value),
        format!(
            "{:.3} ({:.3}/{:.3})",
            d.a_req_value, d.a_req_value_min, d.a_req_value_max
        ),
        format!(
            "Lead: {:.1}/{:.1}/{:.1}",
            d.radar_dist,
            d.vision_dist,
            d.radar_dist - d.vision_dist
        ),
    ]
}

/// Debug panel right of center; empty unless enabled and the canvas is wide enough
pub fn debug_panel(d: &DebugReadout, enabled: bool, canvas: CanvasSize) -> Vec<DrawDirective> {
    if !enabled || canvas.width <= DEBUG_MIN_WIDTH {
        return Vec::new();
    }

    let x = canvas.width / 2 + 250;
    debug_lines(d)
        .into_iter()
        .zip((80..).step_by(60))
        .map(|(line, y)| {
            DrawDirective::text(
                line,
                FontSpec::new(35.0, FontWeight::Regular),
                Color::rgba(255, 255, 255, 200),
                TextPlacement::Baseline { x, y },
            )
        })
        .collect()
}
