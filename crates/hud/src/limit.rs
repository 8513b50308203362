//! Road speed limit, fixed-camera and NDA/HDA badges

use hud_state::SpeedLimitState;

use crate::directive::{
    BoxAlign, Color, DrawDirective, FontSpec, FontWeight, Icon, Paint, Rect, TextPlacement,
};
use crate::CanvasSize;

/// Bounding box of the circular badge
pub const BADGE_RECT: Rect = Rect::new(30, 270, 192, 192);

/// Red ring thickness
const RING: i32 = 14;

/// Limits at or below this are not real road limits
const MIN_LIMIT: i32 = 10;

/// What the circular badge shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LimitBadge {
    Limit { speed: String, distance: String },
    Camera,
    Hidden,
}

/// Remaining distance: meters below 1 km, kilometers with one decimal above
pub fn format_left_dist(meters: i32) -> String {
    if meters >= 1000 {
        format!("{:.1}km", meters as f32 / 1000.0)
    } else {
        format!("{}m", meters)
    }
}

/// Pick the badge; the limit and camera badges are mutually exclusive
pub fn limit_badge(limit: &SpeedLimitState) -> LimitBadge {
    if limit.limit_speed > MIN_LIMIT && limit.left_dist > 0 {
        LimitBadge::Limit {
            speed: limit.limit_speed.to_string(),
            distance: format_left_dist(limit.left_dist),
        }
    } else if limit.stock_cam_act == 2 && limit.stock_cam_status == 2 {
        LimitBadge::Camera
    } else {
        LimitBadge::Hidden
    }
}

fn badge_disc(out: &mut Vec<DrawDirective>) -> Rect {
    out.push(DrawDirective::Ellipse {
        rect: BADGE_RECT,
        paint: Paint::Solid(Color::rgb(255, 0, 0)),
    });
    let inner = BADGE_RECT.adjusted(RING, RING, -RING, -RING);
    out.push(DrawDirective::Ellipse {
        rect: inner,
        paint: Paint::Solid(Color::WHITE),
    });
    inner
}

/// NDA/HDA icon and the limit or camera badge
pub fn speed_limit(limit: &SpeedLimitState, canvas: CanvasSize, border: i32) -> Vec<DrawDirective> {
    let mut out = Vec::new();

    if limit.nda_active > 0 {
        let (w, h) = (120, 54);
        out.push(DrawDirective::Icon {
            icon: if limit.nda_active == 1 { Icon::Nda } else { Icon::Hda },
            rect: Rect::new((canvas.width + border * 2) / 2 - w / 2 - border, 40 - border, w, h),
            opacity: 1.0,
        });
    }

    match limit_badge(limit) {
        LimitBadge::Limit { speed, distance } => {
            let inner = badge_disc(&mut out);
            out.push(DrawDirective::text(
                speed,
                FontSpec::new(80.0, FontWeight::Bold),
                Color::rgba(0, 0, 0, 230),
                TextPlacement::Boxed {
                    rect: inner,
                    align: BoxAlign::Center,
                },
            ));
            let below = inner
                .translated(0, BADGE_RECT.w / 2 + 45)
                .adjusted(-30, 0, 30, 0);
            out.push(DrawDirective::text(
                distance,
                FontSpec::new(60.0, FontWeight::Bold),
                Color::rgba(255, 255, 255, 230),
                TextPlacement::Boxed {
                    rect: below,
                    align: BoxAlign::Center,
                },
            ));
        }
        LimitBadge::Camera => {
            let inner = badge_disc(&mut out);
            out.push(DrawDirective::text(
                "CAM",
                FontSpec::new(70.0, FontWeight::Bold),
                Color::rgba(0, 0, 0, 230),
                TextPlacement::Boxed {
                    rect: inner,
                    align: BoxAlign::Center,
                },
            ));
        }
        LimitBadge::Hidden => {}
    }

    out
}
