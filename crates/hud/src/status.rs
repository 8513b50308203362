//! GPS badge and the bottom row: tire pressure, cruise gap, brake, autohold,
//! blind spots

use hud_state::{CruiseState, Scene, SensorRanges, Tpms};

use crate::config::HudLayout;
use crate::directive::{
    BoxAlign, Color, DrawDirective, FontSpec, FontWeight, Icon, Paint, Rect, TextPlacement,
};
use crate::palette;
use crate::CanvasSize;

/// Below this pressure (psi) a tire is flagged
pub const TPMS_LOW_PSI: f32 = 31.0;

/// Satellite icon with the horizontal accuracy below it
///
/// Nothing is drawn without a usable fix.
pub fn gps_badge(accuracy: f32, ranges: &SensorRanges, canvas: CanvasSize) -> Vec<DrawDirective> {
    let Ok(accuracy) = ranges.gps_accuracy(accuracy) else {
        return Vec::new();
    };

    let (w, h) = (120, 100);
    let icon = Rect::new(canvas.width - w - 30, 30, w, h);
    let label = Rect::new(icon.x, icon.y + h + 10, w, 40).adjusted(-30, 0, 30, 0);

    vec![
        DrawDirective::Icon {
            icon: Icon::Satellite,
            rect: icon,
            opacity: 0.8,
        },
        DrawDirective::text(
            format!("{:.1}m", accuracy),
            FontSpec::new(40.0, FontWeight::Bold),
            Color::rgba(255, 255, 255, 200),
            TextPlacement::Boxed {
                rect: label,
                align: BoxAlign::TopCenter,
            },
        ),
    ]
}

/// Rounded pressure, empty when the sensor reading is not plausible
pub fn tpms_text(psi: f32, ranges: &SensorRanges) -> String {
    match ranges.tire_pressure(psi) {
        Ok(psi) => format!("{}", psi.round() as i32),
        Err(_) => String::new(),
    }
}

pub fn tpms_color(psi: f32, ranges: &SensorRanges) -> Color {
    match ranges.tire_pressure(psi) {
        Ok(psi) if psi < TPMS_LOW_PSI => palette::tpms_low(),
        _ => palette::tpms_normal(),
    }
}

/// Car outline with a pressure reading at each wheel
pub fn tire_pressure(
    tpms: &Tpms,
    ranges: &SensorRanges,
    layout: &HudLayout,
    canvas: CanvasSize,
) -> Vec<DrawDirective> {
    let (w, h) = (58, 126);
    let x = canvas.width - layout.bottom_icons.tpms_from_right;
    let y = canvas.height - h - 10;

    let mut out = vec![DrawDirective::Icon {
        icon: Icon::TirePressure,
        rect: Rect::new(x, y, w, h),
        opacity: 0.8,
    }];

    let (digit_w, digit_h) = layout.bottom_icons.tpms_digit;
    let center_x = x + 4;
    let center_y = y + h / 2;
    let margin_x = (digit_w as f32 * 2.7) as i32;
    let margin_y = ((h / 2 - digit_h) as f32 * 0.7) as i32;

    let wheels = [
        (tpms.fl, center_x - margin_x, center_y - margin_y - digit_h),
        (tpms.fr, center_x + margin_x, center_y - margin_y - digit_h),
        (tpms.rl, center_x - margin_x, center_y + margin_y),
        (tpms.rr, center_x + margin_x, center_y + margin_y),
    ];
    for (psi, x, y) in wheels {
        let text = tpms_text(psi, ranges);
        if text.is_empty() {
            continue;
        }
        out.push(DrawDirective::text(
            text,
            FontSpec::new(38.0, FontWeight::Bold),
            tpms_color(psi, ranges),
            TextPlacement::TopLeft { x, y },
        ));
    }

    out
}

/// Cruise gap label: text, color and font size
#[derive(Debug, Clone, PartialEq)]
pub struct GapLabel {
    pub text: String,
    pub color: Color,
    pub font_size: f32,
}

impl GapLabel {
    pub fn new(cruise: &CruiseState) -> Self {
        if cruise.gap <= 0 {
            Self {
                text: "N/A".into(),
                color: Color::rgba(255, 255, 255, 200),
                font_size: 50.0,
            }
        } else if cruise.long_control && cruise.gap == cruise.auto_tr_gap {
            Self {
                text: "AUTO".into(),
                color: Color::rgba(255, 255, 255, 250),
                font_size: 50.0,
            }
        } else {
            Self {
                text: cruise.gap.to_string(),
                color: palette::gap_numeric(),
                font_size: 26.0,
            }
        }
    }
}

/// Center x of bottom row slot `n`
fn slot_x(layout: &HudLayout, n: i32) -> i32 {
    layout.icon_radius / 2 + layout.border * 2 + (layout.icon_radius + layout.bottom_icons.spacing) * n
}

/// Center y of the bottom row
fn row_y(layout: &HudLayout, canvas: CanvasSize) -> i32 {
    (canvas.height - 1) - layout.footer_h / 2 - 10
}

/// Disc with an icon centered on (x, y)
fn disc_icon(
    layout: &HudLayout,
    x: i32,
    y: i32,
    icon: Icon,
    disc_alpha: f32,
    opacity: f32,
) -> [DrawDirective; 2] {
    let r = layout.icon_radius;
    let img = layout.icon_img_size();
    [
        DrawDirective::Ellipse {
            rect: Rect::new(x - r / 2, y - r / 2, r, r),
            paint: Paint::Solid(Color::rgba(0, 0, 0, (255.0 * disc_alpha) as u8)),
        },
        DrawDirective::Icon {
            icon,
            rect: Rect::new(x - img / 2, y - img / 2, img, img),
            opacity,
        },
    ]
}

fn cruise_gap(cruise: &CruiseState, layout: &HudLayout, canvas: CanvasSize) -> DrawDirective {
    let label = GapLabel::new(cruise);
    let (dx, dy) = layout.bottom_icons.gap_label_offset;
    DrawDirective::text(
        label.text,
        FontSpec::new(label.font_size, FontWeight::Bold),
        label.color,
        TextPlacement::BottomCenter {
            x: slot_x(layout, 1) + dx,
            y: row_y(layout, canvas) + dy,
        },
    )
}

/// Icon opacity and disc alpha for an on/off indicator
fn activity(on: bool) -> (f32, f32) {
    if on {
        (1.0, 0.3)
    } else {
        (0.15, 0.1)
    }
}

fn blind_spots(scene: &Scene, layout: &HudLayout, canvas: CanvasSize) -> Vec<DrawDirective> {
    let size = 150;
    let y = canvas.height / 2 - size / 2;
    let mut out = Vec::new();
    if scene.left_blindspot {
        out.push(DrawDirective::Icon {
            icon: Icon::BlindSpotLeft,
            rect: Rect::new(layout.border * 2, y, size, size),
            opacity: 1.0,
        });
    }
    if scene.right_blindspot {
        out.push(DrawDirective::Icon {
            icon: Icon::BlindSpotRight,
            rect: Rect::new(canvas.width - layout.border * 2 - size, y, size, size),
            opacity: 1.0,
        });
    }
    out
}

/// Everything in the footer row plus the blind-spot indicators
pub fn bottom_icons(
    scene: &Scene,
    ranges: &SensorRanges,
    layout: &HudLayout,
    canvas: CanvasSize,
) -> Vec<DrawDirective> {
    let mut out = tire_pressure(&scene.tpms, ranges, layout, canvas);
    out.push(cruise_gap(&scene.cruise, layout, canvas));

    let y = row_y(layout, canvas);

    let (opacity, disc) = activity(scene.brake_lights);
    out.extend(disc_icon(layout, slot_x(layout, 2), y, Icon::Brake, disc, opacity));

    if scene.auto_hold >= 0 {
        let (opacity, disc) = activity(scene.auto_hold > 0);
        let icon = if scene.auto_hold > 1 {
            Icon::AutoholdWarning
        } else {
            Icon::AutoholdActive
        };
        out.extend(disc_icon(layout, slot_x(layout, 3), y, icon, disc, opacity));
    }

    out.extend(blind_spots(scene, layout, canvas));
    out
}
