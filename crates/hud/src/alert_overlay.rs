//! Alert banner drawn over the bottom of the road view

use alerting::{Alert, AlertSize};

use crate::directive::{
    BoxAlign, Color, DrawDirective, FontSpec, FontWeight, Paint, Rect, TextPlacement,
};
use crate::CanvasSize;

/// Full-size alerts switch to the smaller font above this many characters
const FULL_LONG_TEXT: usize = 15;

/// Banner height for an alert size, `None` when nothing is shown
pub fn alert_height(size: AlertSize, canvas: CanvasSize) -> Option<i32> {
    match size {
        AlertSize::None => None,
        AlertSize::Small => Some(271),
        AlertSize::Mid => Some(420),
        AlertSize::Full => Some(canvas.height),
    }
}

fn boxed(
    text: &str,
    size: f32,
    weight: FontWeight,
    rect: Rect,
    align: BoxAlign,
) -> DrawDirective {
    DrawDirective::text(
        text,
        FontSpec::new(size, weight),
        Color::WHITE,
        TextPlacement::Boxed { rect, align },
    )
}

/// Banner directives: shading gradient, status tint, then the alert text
pub fn alert_overlay(alert: &Alert, bg: Color, canvas: CanvasSize) -> Vec<DrawDirective> {
    let Some(h) = alert_height(alert.size, canvas) else {
        return Vec::new();
    };
    let w = canvas.width;
    let r = Rect::new(0, canvas.height - h, w, h);

    let mut out = vec![
        DrawDirective::FillRect {
            rect: r,
            paint: Paint::VerticalGradient {
                y0: r.y as f32,
                y1: r.bottom() as f32,
                from: Color::rgb_alpha(0, 0, 0, 0.05),
                to: Color::rgb_alpha(0, 0, 0, 0.35),
            },
        },
        DrawDirective::FillRect {
            rect: r,
            paint: Paint::Solid(bg),
        },
    ];

    let cy = r.center_y();
    match alert.size {
        AlertSize::Small => {
            out.push(boxed(&alert.text1, 74.0, FontWeight::SemiBold, r, BoxAlign::Center));
        }
        AlertSize::Mid => {
            out.push(boxed(
                &alert.text1,
                88.0,
                FontWeight::Bold,
                Rect::new(0, cy - 125, w, 150),
                BoxAlign::TopCenter,
            ));
            out.push(boxed(
                &alert.text2,
                66.0,
                FontWeight::Regular,
                Rect::new(0, cy + 21, w, 90),
                BoxAlign::TopCenter,
            ));
        }
        AlertSize::Full => {
            let long = alert.text1.chars().count() > FULL_LONG_TEXT;
            out.push(boxed(
                &alert.text1,
                if long { 132.0 } else { 177.0 },
                FontWeight::Bold,
                Rect::new(0, r.y + if long { 240 } else { 270 }, w, 600),
                BoxAlign::TopCenterWrap,
            ));
            out.push(boxed(
                &alert.text2,
                88.0,
                FontWeight::Regular,
                Rect::new(0, r.h - if long { 361 } else { 420 }, w, 300),
                BoxAlign::TopCenterWrap,
            ));
        }
        AlertSize::None => {}
    }

    out
}
