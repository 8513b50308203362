//! Lead vehicle markers

use hud_state::{LeadTrack, Point, Scene};

use crate::directive::{DrawDirective, Paint};
use crate::palette;
use crate::CanvasSize;

/// Distance below which the chevron starts filling in
pub const LEAD_BUFFER: f32 = 40.0;

/// Closing speed that adds a full opacity step
pub const SPEED_BUFFER: f32 = 10.0;

/// Minimum detection probability for a lead to be drawn
pub const MIN_PROB: f32 = 0.5;

/// Minimum separation for the second lead to be drawn separately
pub const MIN_LEAD_SEPARATION: f32 = 3.0;

/// Chevron fill alpha (0..=255) for a lead at distance `d_rel` closing at `v_rel`
pub fn fill_alpha(d_rel: f32, v_rel: f32) -> f32 {
    if d_rel >= LEAD_BUFFER {
        return 0.0;
    }
    let mut alpha = 255.0 * (1.0 - d_rel / LEAD_BUFFER);
    if v_rel < 0.0 {
        alpha += 255.0 * (-v_rel / SPEED_BUFFER);
    }
    alpha.min(255.0).trunc()
}

/// Marker size for a lead at distance `d_rel`
pub fn marker_size(d_rel: f32) -> f32 {
    (750.0 / (d_rel / 3.0 + 30.0)).clamp(15.0, 30.0) * 2.35
}

/// Geometry of one lead marker
#[derive(Debug, Clone, PartialEq)]
pub struct LeadMarker {
    pub glow: [Point; 3],
    pub chevron: [Point; 3],
    pub radar: bool,
    pub fill_alpha: f32,
}

fn bound(v: f32, lo: f32, hi: f32) -> f32 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}

impl LeadMarker {
    pub fn new(lead: &LeadTrack, canvas: CanvasSize) -> Self {
        let sz = marker_size(lead.d_rel);
        let x = bound(lead.anchor.x, 0.0, canvas.width as f32 - sz / 2.0);
        let y = lead.anchor.y.min(canvas.height as f32 - sz * 0.6);

        let g_xo = sz / 5.0;
        let g_yo = sz / 10.0;

        Self {
            glow: [
                Point::new(x + sz * 1.35 + g_xo, y + sz + g_yo),
                Point::new(x, y - g_xo),
                Point::new(x - sz * 1.35 - g_xo, y + sz + g_yo),
            ],
            chevron: [
                Point::new(x + sz * 1.25, y + sz),
                Point::new(x, y),
                Point::new(x - sz * 1.25, y + sz),
            ],
            radar: lead.radar,
            fill_alpha: fill_alpha(lead.d_rel, lead.v_rel),
        }
    }

    pub fn directives(&self) -> [DrawDirective; 2] {
        let glow = if self.radar {
            palette::LEAD_GLOW_RADAR
        } else {
            palette::LEAD_GLOW_VISION
        };
        [
            DrawDirective::FillPolygon {
                points: self.glow.to_vec(),
                paint: Paint::Solid(glow),
            },
            DrawDirective::FillPolygon {
                points: self.chevron.to_vec(),
                paint: Paint::Solid(palette::red(self.fill_alpha as u8)),
            },
        ]
    }
}

/// Markers for the leads worth showing
///
/// The second lead is only drawn when it is a distinct vehicle, i.e. further
/// than `MIN_LEAD_SEPARATION` from the first.
pub fn leads(scene: &Scene, canvas: CanvasSize) -> Vec<DrawDirective> {
    let [first, second] = &scene.leads;
    let mut out = Vec::new();

    if first.prob > MIN_PROB {
        out.extend(LeadMarker::new(first, canvas).directives());
    }
    if second.prob > MIN_PROB && (second.d_rel - first.d_rel).abs() > MIN_LEAD_SEPARATION {
        out.extend(LeadMarker::new(second, canvas).directives());
    }

    out
}
