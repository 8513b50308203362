//! Draw directives
//!
//! The compositor's output: backend-independent drawing instructions in
//! canvas pixel coordinates, executed in order by a render backend.

use hud_state::Point;
use serde::{Deserialize, Serialize};

/// 8-bit RGB color with a float alpha in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub alpha: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, alpha: 1.0 }
    }

    /// Color with an 8-bit alpha
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r,
            g,
            b,
            alpha: f32::from(a) / 255.0,
        }
    }

    /// Color with a float alpha, clamped to [0, 1]
    pub fn rgb_alpha(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self {
            r,
            g,
            b,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self::rgb_alpha(self.r, self.g, self.b, alpha)
    }

    pub fn alpha_u8(&self) -> u8 {
        (self.alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    pub fn is_transparent(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// Axis-aligned rectangle (x, y is the top-left corner)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Move the left/top edges by (dx1, dy1) and the right/bottom edges by (dx2, dy2)
    pub fn adjusted(&self, dx1: i32, dy1: i32, dx2: i32, dy2: i32) -> Self {
        Self {
            x: self.x + dx1,
            y: self.y + dy1,
            w: self.w - dx1 + dx2,
            h: self.h - dy1 + dy2,
        }
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }
}

/// Fill style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Paint {
    Solid(Color),
    /// Linear gradient along the y axis, `from` at `y0` and `to` at `y1`
    VerticalGradient {
        y0: f32,
        y1: f32,
        from: Color,
        to: Color,
    },
}

impl Paint {
    /// Color at a given row
    pub fn color_at(&self, y: f32) -> Color {
        match *self {
            Paint::Solid(c) => c,
            Paint::VerticalGradient { y0, y1, from, to } => {
                let t = if (y1 - y0).abs() < f32::EPSILON {
                    0.0
                } else {
                    ((y - y0) / (y1 - y0)).clamp(0.0, 1.0)
                };
                let lerp = |a: u8, b: u8| (f32::from(a) + (f32::from(b) - f32::from(a)) * t).round() as u8;
                Color {
                    r: lerp(from.r, to.r),
                    g: lerp(from.g, to.g),
                    b: lerp(from.b, to.b),
                    alpha: from.alpha + (to.alpha - from.alpha) * t,
                }
            }
        }
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}

/// Outline style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    Regular,
    SemiBold,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Pixel size
    pub size: f32,
    pub weight: FontWeight,
}

impl FontSpec {
    pub const fn new(size: f32, weight: FontWeight) -> Self {
        Self { size, weight }
    }
}

/// Alignment of text inside a box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoxAlign {
    Center,
    TopCenter,
    /// Top-centered, wrapping at word boundaries to the box width
    TopCenterWrap,
}

/// Where a text run goes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TextPlacement {
    /// Horizontally centered on `x`, text bottom at `y`
    BottomCenter { x: i32, y: i32 },
    /// Text box top-left corner
    TopLeft { x: i32, y: i32 },
    /// Baseline origin
    Baseline { x: i32, y: i32 },
    /// Aligned inside a box
    Boxed { rect: Rect, align: BoxAlign },
}

/// Image assets drawn by the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    Brake,
    AutoholdWarning,
    AutoholdActive,
    Nda,
    Hda,
    TirePressure,
    TurnSignalLeft,
    TurnSignalRight,
    Satellite,
    BlindSpotLeft,
    BlindSpotRight,
}

impl Icon {
    pub const ALL: [Icon; 11] = [
        Icon::Brake,
        Icon::AutoholdWarning,
        Icon::AutoholdActive,
        Icon::Nda,
        Icon::Hda,
        Icon::TirePressure,
        Icon::TurnSignalLeft,
        Icon::TurnSignalRight,
        Icon::Satellite,
        Icon::BlindSpotLeft,
        Icon::BlindSpotRight,
    ];

    /// Asset file name relative to the image directory
    pub fn file_name(&self) -> &'static str {
        match self {
            Icon::Brake => "img_brake_disc.png",
            Icon::AutoholdWarning => "img_autohold_warning.png",
            Icon::AutoholdActive => "img_autohold_active.png",
            Icon::Nda => "img_nda.png",
            Icon::Hda => "img_hda.png",
            Icon::TirePressure => "img_tire_pressure.png",
            Icon::TurnSignalLeft => "turn_signal_l.png",
            Icon::TurnSignalRight => "turn_signal_r.png",
            Icon::Satellite => "satellite.png",
            Icon::BlindSpotLeft => "img_bsd_l.png",
            Icon::BlindSpotRight => "img_bsd_r.png",
        }
    }
}

/// One drawing instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawDirective {
    FillRect {
        rect: Rect,
        paint: Paint,
    },
    FillPolygon {
        points: Vec<Point>,
        paint: Paint,
    },
    /// Ellipse inscribed in `rect`
    Ellipse {
        rect: Rect,
        paint: Paint,
    },
    RoundedRect {
        rect: Rect,
        radius: f32,
        fill: Paint,
        stroke: Option<Stroke>,
    },
    Icon {
        icon: Icon,
        rect: Rect,
        opacity: f32,
    },
    Text {
        text: String,
        font: FontSpec,
        color: Color,
        placement: TextPlacement,
    },
}

impl DrawDirective {
    pub fn text(
        text: impl Into<String>,
        font: FontSpec,
        color: Color,
        placement: TextPlacement,
    ) -> Self {
        DrawDirective::Text {
            text: text.into(),
            font,
            color,
            placement,
        }
    }

    /// Text content, for text directives
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DrawDirective::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_alpha() {
        assert_eq!(Color::rgba(0, 0, 0, 255).alpha, 1.0);
        assert_eq!(Color::rgba(0, 0, 0, 0).alpha, 0.0);
        assert_eq!(Color::rgba(0, 0, 0, 100).alpha_u8(), 100);
        assert_eq!(Color::rgb_alpha(1, 2, 3, 1.7).alpha, 1.0);
        assert!(Color::WHITE.with_alpha(0.0).is_transparent());
    }

    #[test]
    fn test_rect_adjust() {
        let r = Rect::new(30, 270, 192, 192).adjusted(14, 14, -14, -14);
        assert_eq!(r, Rect::new(44, 284, 164, 164));
        assert_eq!(r.translated(0, 10).y, 294);
        assert!(Rect::new(0, 0, 0, 5).is_empty());
    }

    #[test]
    fn test_gradient_endpoints() {
        let paint = Paint::VerticalGradient {
            y0: 100.0,
            y1: 0.0,
            from: Color::rgba(255, 255, 255, 200),
            to: Color::rgba(255, 255, 255, 0),
        };
        assert_eq!(paint.color_at(100.0).alpha_u8(), 200);
        assert_eq!(paint.color_at(0.0).alpha_u8(), 0);
        assert_eq!(paint.color_at(-50.0).alpha_u8(), 0);
        assert_eq!(paint.color_at(50.0).alpha_u8(), 100);
    }
}
