//! Onroad HUD
//!
//! Turns a per-tick state snapshot into an ordered list of draw directives:
//! - Lane lines, road edges and the driving path
//! - Lead vehicle markers
//! - Speed, max-speed, speed-limit and NDA badges
//! - Turn signal chevrons with a per-indicator blink animation
//! - GPS, tire pressure, cruise gap, brake, autohold and blind-spot icons
//! - Alert banner and debug text
//!
//! The compositor never draws anything itself; a render backend executes the
//! directives in order.

pub mod alert_overlay;
pub mod config;
pub mod debug;
pub mod directive;
pub mod lanes;
pub mod lead;
pub mod limit;
pub mod palette;
pub mod speed;
pub mod status;
pub mod turn_signal;

pub use alert_overlay::alert_overlay;
pub use config::{HudLayout, LayoutPreset};
pub use directive::{
    BoxAlign, Color, DrawDirective, FontSpec, FontWeight, Icon, Paint, Rect, Stroke,
    TextPlacement,
};
pub use turn_signal::{BlinkAnimation, BlinkPhase, BlinkerInput, Side, TurnSignalIndicator};

use hud_state::{SensorRanges, StateSnapshot};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// HUD error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HudError {
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

/// Drawing area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: i32,
    pub height: i32,
}

impl CanvasSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(2160, 1080)
    }
}

/// Builds the HUD directive list for each tick
pub struct HudCompositor {
    layout: HudLayout,
    ranges: SensorRanges,
    left: TurnSignalIndicator,
    right: TurnSignalIndicator,
}

impl HudCompositor {
    pub fn new(layout: HudLayout, tick_hz: u32) -> Result<Self, HudError> {
        layout.validate()?;
        debug!(
            draw_count = layout.turn_signal.draw_count,
            tick_hz, "HUD compositor created"
        );
        Ok(Self {
            left: TurnSignalIndicator::new(Side::Left, &layout.turn_signal, tick_hz),
            right: TurnSignalIndicator::new(Side::Right, &layout.turn_signal, tick_hz),
            ranges: SensorRanges::default(),
            layout,
        })
    }

    pub fn with_ranges(mut self, ranges: SensorRanges) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn layout(&self) -> &HudLayout {
        &self.layout
    }

    pub fn turn_signals(&self) -> (&TurnSignalIndicator, &TurnSignalIndicator) {
        (&self.left, &self.right)
    }

    /// Darkened band behind the top badges
    fn header_gradient(&self, canvas: CanvasSize) -> DrawDirective {
        let header_h = self.layout.header_h;
        DrawDirective::FillRect {
            rect: Rect::new(0, 0, canvas.width, header_h),
            paint: Paint::VerticalGradient {
                y0: header_h as f32 - header_h as f32 / 2.5,
                y1: header_h as f32,
                from: Color::rgb_alpha(0, 0, 0, 0.45),
                to: Color::rgb_alpha(0, 0, 0, 0.0),
            },
        }
    }

    /// Compose one frame
    ///
    /// Advances the blink animations, so it must be called exactly once per tick.
    pub fn compose(
        &mut self,
        snapshot: &StateSnapshot,
        canvas: CanvasSize,
        now_ms: u64,
    ) -> Vec<DrawDirective> {
        if !canvas.is_valid() {
            warn!(width = canvas.width, height = canvas.height, "Invalid canvas, skipping frame");
            return Vec::new();
        }

        let scene = &snapshot.scene;
        let mut out = vec![self.header_gradient(canvas)];

        out.extend(lanes::lane_lines(scene, snapshot.status, canvas));
        if scene.world_objects_visible {
            out.extend(lead::leads(scene, canvas));
        }

        out.extend(speed::max_speed_badge(&scene.cruise, scene.is_metric));
        out.push(speed::speed_readout(scene.speed_ms, scene.is_metric, canvas));
        out.extend(limit::speed_limit(&scene.limit, canvas, self.layout.border));

        let blinkers = BlinkerInput {
            left: scene.left_blinker,
            right: scene.right_blinker,
        };
        out.extend(self.left.frame(blinkers, now_ms, &self.layout.turn_signal, canvas));
        out.extend(self.right.frame(blinkers, now_ms, &self.layout.turn_signal, canvas));

        out.extend(status::gps_badge(scene.gps_accuracy, &self.ranges, canvas));
        out.extend(status::bottom_icons(scene, &self.ranges, &self.layout, canvas));
        out.extend(debug::debug_panel(&scene.debug, scene.show_debug, canvas));
        out.push(debug::info_line(&scene.debug, canvas));

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hud_state::{CruiseState, Scene, UiStatus};

    const CANVAS: CanvasSize = CanvasSize::new(2120, 1040);

    fn snapshot() -> StateSnapshot {
        StateSnapshot {
            status: UiStatus::Disengaged,
            scene: Scene {
                speed_ms: 25.0,
                is_metric: true,
                auto_hold: -1,
                cruise: CruiseState {
                    gap: 3,
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_directive_order() {
        let mut hud = HudCompositor::new(HudLayout::default(), 20).unwrap();
        let out = hud.compose(&snapshot(), CANVAS, 1000);

        assert!(matches!(
            out[0],
            DrawDirective::FillRect {
                paint: Paint::VerticalGradient { .. },
                ..
            }
        ));
        let texts: Vec<_> = out.iter().filter_map(|d| d.as_text()).collect();
        assert_eq!(texts[0], "MAX");
        assert_eq!(texts[1], "N/A");
        assert_eq!(texts[2], "90");
        assert_eq!(texts[3], "3");
        assert!(texts[4].starts_with("SR("));
        assert_eq!(texts.len(), 5);
        assert!(out.last().and_then(|d| d.as_text()).is_some());
    }

    #[test]
    fn test_gap_label_color_in_frame() {
        let mut hud = HudCompositor::new(HudLayout::default(), 20).unwrap();
        let out = hud.compose(&snapshot(), CANVAS, 1000);
        let gap = out
            .iter()
            .find(|d| d.as_text() == Some("3"))
            .cloned()
            .unwrap();
        match gap {
            DrawDirective::Text { color, .. } => assert_eq!(color, palette::gap_numeric()),
            other => panic!("unexpected directive {:?}", other),
        }
    }

    #[test]
    fn test_invalid_canvas_draws_nothing() {
        let mut hud = HudCompositor::new(HudLayout::default(), 20).unwrap();
        assert!(hud.compose(&snapshot(), CanvasSize::new(0, 1040), 0).is_empty());
    }

    #[test]
    fn test_blinker_advances_once_per_compose() {
        let mut hud = HudCompositor::new(HudLayout::default(), 20).unwrap();
        let mut snap = snapshot();
        snap.scene.left_blinker = true;

        let chevrons = |out: &[DrawDirective]| {
            out.iter()
                .filter(|d| matches!(d, DrawDirective::Icon { icon: Icon::TurnSignalLeft, .. }))
                .count()
        };
        let out = hud.compose(&snap, CANVAS, 100);
        assert_eq!(chevrons(&out), 8);
        hud.compose(&snap, CANVAS, 200);
        assert_eq!(hud.turn_signals().0.animation().index(), 2);
        assert_eq!(hud.turn_signals().1.animation().phase(), BlinkPhase::Idle);
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let mut layout = HudLayout::default();
        layout.icon_radius = 0;
        assert!(HudCompositor::new(layout, 20).is_err());
    }
}
