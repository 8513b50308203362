//! Speed readout and max-speed badge

use hud_state::{CruiseState, KM_TO_MILE, MS_TO_KPH, MS_TO_MPH};

use crate::directive::{Color, DrawDirective, FontSpec, FontWeight, Paint, Rect, Stroke, TextPlacement};
use crate::CanvasSize;

/// Badge outline
pub const MAX_SPEED_RECT: Rect = Rect::new(30, 30, 184, 202);

/// Current speed in display units, rounded half away from zero
pub fn display_speed(speed_ms: f32, is_metric: bool) -> i32 {
    let factor = if is_metric { MS_TO_KPH } else { MS_TO_MPH };
    (speed_ms * factor).max(0.0).round() as i32
}

/// A km/h value in display units, rounded half away from zero
pub fn kph_to_display(kph: f32, is_metric: bool) -> i32 {
    if is_metric {
        kph.round() as i32
    } else {
        (kph * KM_TO_MILE).round() as i32
    }
}

/// Large centered speed text
pub fn speed_readout(speed_ms: f32, is_metric: bool, canvas: CanvasSize) -> DrawDirective {
    DrawDirective::text(
        display_speed(speed_ms, is_metric).to_string(),
        FontSpec::new(176.0, FontWeight::Bold),
        Color::WHITE,
        TextPlacement::BottomCenter {
            x: canvas.width / 2,
            y: 230,
        },
    )
}

/// Text lines of the max-speed badge: (top, bottom, alpha)
pub fn max_speed_labels(cruise: &CruiseState, is_metric: bool) -> (String, String, u8) {
    if cruise.is_set() {
        (
            kph_to_display(cruise.apply_max_speed, is_metric).to_string(),
            kph_to_display(cruise.cruise_max_speed, is_metric).to_string(),
            255,
        )
    } else {
        let placeholder = if cruise.long_control { "OP" } else { "MAX" };
        (placeholder.to_string(), "N/A".to_string(), 100)
    }
}

/// Rounded badge with the set cruise speed, or a placeholder when cruise is unset
pub fn max_speed_badge(cruise: &CruiseState, is_metric: bool) -> Vec<DrawDirective> {
    let rc = MAX_SPEED_RECT;
    let (top, bottom, alpha) = max_speed_labels(cruise, is_metric);
    let color = Color::rgba(255, 255, 255, alpha);

    let weight = if cruise.is_set() {
        FontWeight::Bold
    } else {
        FontWeight::SemiBold
    };
    let top_size = if cruise.is_set() { 45.0 } else { 48.0 };

    vec![
        DrawDirective::RoundedRect {
            rect: rc,
            radius: 20.0,
            fill: Paint::Solid(Color::rgba(0, 0, 0, 100)),
            stroke: Some(Stroke {
                color: Color::rgba(255, 255, 255, 100),
                width: 10.0,
            }),
        },
        DrawDirective::text(
            top,
            FontSpec::new(top_size, weight),
            color,
            TextPlacement::BottomCenter {
                x: rc.center_x(),
                y: 100,
            },
        ),
        DrawDirective::text(
            bottom,
            FontSpec::new(76.0, weight),
            color,
            TextPlacement::BottomCenter {
                x: rc.center_x(),
                y: 195,
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_speed_units() {
        // 25 m/s = 90 km/h = 55.9 mph
        assert_eq!(display_speed(25.0, true), 90);
        assert_eq!(display_speed(25.0, false), 56);
        assert_eq!(display_speed(-3.0, true), 0);
    }

    #[test]
    fn test_display_speed_rounds_half_away_from_zero() {
        // 0.625 m/s * 3.6 = 2.25, 0.6944 m/s * 3.6 ~ 2.5
        assert_eq!(display_speed(0.625, true), 2);
        assert_eq!(kph_to_display(2.5, true), 3);
        assert_eq!(kph_to_display(3.5, true), 4);
    }

    #[test]
    fn test_cruise_set_labels() {
        let cruise = CruiseState {
            apply_max_speed: 87.4,
            cruise_max_speed: 100.0,
            ..Default::default()
        };
        assert_eq!(
            max_speed_labels(&cruise, true),
            ("87".to_string(), "100".to_string(), 255)
        );
        assert_eq!(
            max_speed_labels(&cruise, false),
            ("54".to_string(), "62".to_string(), 255)
        );
    }

    #[test]
    fn test_unset_cruise_placeholder() {
        let mut cruise = CruiseState {
            cruise_max_speed: 255.0,
            ..Default::default()
        };
        assert_eq!(max_speed_labels(&cruise, true).0, "MAX");
        assert_eq!(max_speed_labels(&cruise, true).1, "N/A");

        cruise.long_control = true;
        cruise.cruise_max_speed = 0.0;
        assert_eq!(max_speed_labels(&cruise, true).0, "OP");
    }

    #[test]
    fn test_badge_directives() {
        let out = max_speed_badge(&CruiseState::default(), true);
        assert_eq!(out.len(), 3);
        assert!(matches!(out[0], DrawDirective::RoundedRect { .. }));
        assert_eq!(out[1].as_text(), Some("MAX"));
        assert_eq!(out[2].as_text(), Some("N/A"));
    }

    #[test]
    fn test_speed_readout_centered() {
        let canvas = CanvasSize {
            width: 2000,
            height: 1000,
        };
        match speed_readout(10.0, true, canvas) {
            DrawDirective::Text {
                text, placement, ..
            } => {
                assert_eq!(text, "36");
                assert_eq!(placement, TextPlacement::BottomCenter { x: 1000, y: 230 });
            }
            other => panic!("unexpected directive {:?}", other),
        }
    }
}
