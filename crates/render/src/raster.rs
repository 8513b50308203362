//! Software raster backend
//!
//! Every shape is first rasterized into a coverage mask over its clipped
//! bounding box, then composited onto the RGBA canvas with the paint's color
//! at each row, so gradients and partial alpha share one blending path.

use std::borrow::Cow;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use hud::{
    BoxAlign, CanvasSize, Color, DrawDirective, FontSpec, Icon, Paint, Rect, Stroke, TextPlacement,
};
use hud_state::Point;
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_ellipse_mut, draw_filled_rect_mut, draw_polygon_mut,
    draw_text_mut, text_size,
};
use imageproc::point::Point as PxPoint;
use imageproc::rect::Rect as PxRect;
use tracing::trace;

use crate::assets::AssetStore;
use crate::frame::{CameraKind, FrameTransform, VideoFrame};
use crate::{RenderBackend, RenderError};

const FULL: Luma<u8> = Luma([255]);

/// Sensor size the camera intrinsics refer to
const SENSOR_SIZE: (f32, f32) = (1928.0, 1208.0);

/// Coverage mask over a canvas region
struct Coverage {
    x: i32,
    y: i32,
    mask: GrayImage,
}

impl Coverage {
    /// Mask over the part of `bounds` inside the canvas, `None` if fully outside
    fn new(bounds: Rect, canvas: &RgbaImage) -> Option<Self> {
        let x0 = bounds.x.max(0);
        let y0 = bounds.y.max(0);
        let x1 = bounds.x.saturating_add(bounds.w).min(canvas.width() as i32);
        let y1 = bounds.y.saturating_add(bounds.h).min(canvas.height() as i32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            x: x0,
            y: y0,
            mask: GrayImage::new((x1 - x0) as u32, (y1 - y0) as u32),
        })
    }

    fn fill_rect(&mut self, r: Rect) {
        if r.is_empty() {
            return;
        }
        draw_filled_rect_mut(
            &mut self.mask,
            PxRect::at(r.x - self.x, r.y - self.y).of_size(r.w as u32, r.h as u32),
            FULL,
        );
    }

    fn fill_ellipse(&mut self, r: Rect) {
        let (rx, ry) = (r.w / 2, r.h / 2);
        if rx <= 0 || ry <= 0 {
            return;
        }
        draw_filled_ellipse_mut(
            &mut self.mask,
            (r.x + rx - self.x, r.y + ry - self.y),
            rx,
            ry,
            FULL,
        );
    }

    fn fill_rounded_rect(&mut self, r: Rect, radius: i32) {
        if r.is_empty() {
            return;
        }
        let rad = radius.min(r.w / 2).min(r.h / 2).max(0);
        if rad == 0 {
            self.fill_rect(r);
            return;
        }
        self.fill_rect(Rect::new(r.x + rad, r.y, r.w - 2 * rad, r.h));
        self.fill_rect(Rect::new(r.x, r.y + rad, r.w, r.h - 2 * rad));

        let (left, top) = (r.x + rad, r.y + rad);
        let (right, bottom) = (r.x + r.w - rad - 1, r.y + r.h - rad - 1);
        for (cx, cy) in [(left, top), (right, top), (left, bottom), (right, bottom)] {
            draw_filled_circle_mut(&mut self.mask, (cx - self.x, cy - self.y), rad, FULL);
        }
    }

    fn fill_polygon(&mut self, points: &[PxPoint<i32>]) {
        let local: Vec<_> = points
            .iter()
            .map(|p| PxPoint::new(p.x - self.x, p.y - self.y))
            .collect();
        draw_polygon_mut(&mut self.mask, &local, FULL);
    }

    /// Remove another mask of the same region
    fn subtract(&mut self, other: &Coverage) {
        for (a, b) in self.mask.pixels_mut().zip(other.mask.pixels()) {
            a.0[0] = a.0[0].saturating_sub(b.0[0]);
        }
    }
}

/// Source-over blend of one pixel
fn blend(dst: &mut Rgba<u8>, color: Color, alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    let a = alpha.min(1.0);
    let inv = 1.0 - a;
    let mix = |s: u8, d: u8| (f32::from(s) * a + f32::from(d) * inv).round() as u8;
    let out_alpha = a + f32::from(dst.0[3]) / 255.0 * inv;
    dst.0 = [
        mix(color.r, dst.0[0]),
        mix(color.g, dst.0[1]),
        mix(color.b, dst.0[2]),
        (out_alpha * 255.0).round() as u8,
    ];
}

fn composite(image: &mut RgbaImage, cov: &Coverage, paint: &Paint) {
    for (mx, my, px) in cov.mask.enumerate_pixels() {
        let cover = px.0[0];
        if cover == 0 {
            continue;
        }
        let (x, y) = (cov.x as u32 + mx, cov.y as u32 + my);
        let color = paint.color_at(y as f32);
        blend(image.get_pixel_mut(x, y), color, color.alpha * f32::from(cover) / 255.0);
    }
}

/// Clip a polygon to `[lo, hi]` on one axis (Sutherland-Hodgman)
fn clip_axis(points: &[(f32, f32)], axis: usize, lo: f32, hi: f32) -> Vec<(f32, f32)> {
    let coord = |p: &(f32, f32)| if axis == 0 { p.0 } else { p.1 };
    let lerp = |a: &(f32, f32), b: &(f32, f32), edge: f32| {
        let t = (edge - coord(a)) / (coord(b) - coord(a));
        (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
    };

    let mut out = points.to_vec();
    for (edge, keep_above) in [(lo, true), (hi, false)] {
        let inside = |p: &(f32, f32)| {
            if keep_above {
                coord(p) >= edge
            } else {
                coord(p) <= edge
            }
        };
        let input = std::mem::take(&mut out);
        for (i, cur) in input.iter().enumerate() {
            let prev = &input[(i + input.len() - 1) % input.len()];
            match (inside(prev), inside(cur)) {
                (true, true) => out.push(*cur),
                (true, false) => out.push(lerp(prev, cur, edge)),
                (false, true) => {
                    out.push(lerp(prev, cur, edge));
                    out.push(*cur);
                }
                (false, false) => {}
            }
        }
    }
    out
}

/// Integer polygon clipped to one pixel around the canvas, without repeated
/// vertices or a closing duplicate
fn polygon_points(points: &[Point], width: u32, height: u32) -> Vec<PxPoint<i32>> {
    let finite: Vec<(f32, f32)> = points
        .iter()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .map(|p| (p.x, p.y))
        .collect();
    if finite.len() < 3 {
        return Vec::new();
    }
    let clipped = clip_axis(&finite, 0, -1.0, width as f32 + 1.0);
    let clipped = clip_axis(&clipped, 1, -1.0, height as f32 + 1.0);

    let mut out: Vec<PxPoint<i32>> = Vec::with_capacity(clipped.len());
    for (x, y) in clipped {
        let q = PxPoint::new(x.round() as i32, y.round() as i32);
        if out.last() != Some(&q) {
            out.push(q);
        }
    }
    while out.len() > 1 && out.first() == out.last() {
        out.pop();
    }
    out
}

/// Bounding box of a point set, limited to the canvas
fn bounds_of(points: &[PxPoint<i32>], width: u32, height: u32) -> Rect {
    let (mut x0, mut y0, mut x1, mut y1) = (i64::MAX, i64::MAX, i64::MIN, i64::MIN);
    for p in points {
        x0 = x0.min(i64::from(p.x));
        y0 = y0.min(i64::from(p.y));
        x1 = x1.max(i64::from(p.x));
        y1 = y1.max(i64::from(p.y));
    }
    let x0 = x0.clamp(0, i64::from(width));
    let y0 = y0.clamp(0, i64::from(height));
    let x1 = (x1 + 1).clamp(x0, i64::from(width));
    let y1 = (y1 + 1).clamp(y0, i64::from(height));
    Rect::new(x0 as i32, y0 as i32, (x1 - x0) as i32, (y1 - y0) as i32)
}

/// Greedy word wrap to `max_w` pixels
fn wrap_words(font: &FontVec, scale: PxScale, text: &str, max_w: i32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if !current.is_empty() && text_size(scale, font, &candidate).0 as i32 > max_w {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Top-left corner of a text line of width `w` and font height `h`
fn text_origin(placement: TextPlacement, w: i32, h: i32, ascent: i32, line_offset: i32) -> (i32, i32) {
    match placement {
        TextPlacement::BottomCenter { x, y } => (x - w / 2, y - h + line_offset),
        TextPlacement::TopLeft { x, y } => (x, y + line_offset),
        TextPlacement::Baseline { x, y } => (x, y - ascent + line_offset),
        TextPlacement::Boxed { rect, align } => match align {
            BoxAlign::Center => (rect.center_x() - w / 2, rect.center_y() - h / 2 + line_offset),
            BoxAlign::TopCenter | BoxAlign::TopCenterWrap => {
                (rect.center_x() - w / 2, rect.y + line_offset)
            }
        },
    }
}

/// RGBA canvas backend
pub struct RasterSurface {
    image: RgbaImage,
    assets: AssetStore,
    camera: CameraKind,
    in_frame: bool,
}

impl RasterSurface {
    pub fn new(assets: AssetStore, camera: CameraKind) -> Self {
        Self {
            image: RgbaImage::new(0, 0),
            assets,
            camera,
            in_frame: false,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Write the current canvas as a PNG
    pub fn save_png(&self, path: &std::path::Path) -> Result<(), RenderError> {
        self.image.save(path)?;
        Ok(())
    }

    fn paint_background(&mut self, frame: Option<&VideoFrame>) {
        let Some(frame) = frame.filter(|f| f.width > 0 && f.height > 0) else {
            for px in self.image.pixels_mut() {
                *px = Rgba([0, 0, 0, 255]);
            }
            return;
        };

        let (w, h) = self.image.dimensions();
        let transform = FrameTransform::new(self.camera, w as i32, h as i32);
        let sx = frame.width as f32 / SENSOR_SIZE.0;
        let sy = frame.height as f32 / SENSOR_SIZE.1;

        for (x, y, px) in self.image.enumerate_pixels_mut() {
            let (cx, cy) = transform.to_camera(x as f32, y as f32);
            let (fx, fy) = (cx * sx, cy * sy);
            let rgb = if fx >= 0.0 && fy >= 0.0 {
                frame.get_pixel(fx as u32, fy as u32)
            } else {
                None
            };
            let [r, g, b] = rgb.unwrap_or([0, 0, 0]);
            *px = Rgba([r, g, b, 255]);
        }
    }

    fn fill_shape(&mut self, bounds: Rect, paint: &Paint, shape: impl FnOnce(&mut Coverage)) {
        if let Some(mut cov) = Coverage::new(bounds, &self.image) {
            shape(&mut cov);
            composite(&mut self.image, &cov, paint);
        }
    }

    fn stroke_rounded_rect(&mut self, rect: Rect, radius: f32, stroke: Stroke) {
        let half = (stroke.width / 2.0).round() as i32;
        if half <= 0 {
            return;
        }
        let outer = rect.adjusted(-half, -half, half, half);
        let inner = rect.adjusted(half, half, -half, -half);
        let (Some(mut ring), Some(mut hole)) = (
            Coverage::new(outer, &self.image),
            Coverage::new(outer, &self.image),
        ) else {
            return;
        };
        ring.fill_rounded_rect(outer, radius.round() as i32 + half);
        hole.fill_rounded_rect(inner, (radius.round() as i32 - half).max(0));
        ring.subtract(&hole);
        composite(&mut self.image, &ring, &Paint::Solid(stroke.color));
    }

    fn draw_icon(&mut self, icon: Icon, rect: Rect, opacity: f32) {
        if rect.is_empty() || opacity <= 0.0 {
            return;
        }
        let Some(img) = self.assets.icon(icon) else {
            trace!(?icon, "icon not loaded");
            return;
        };
        let (w, h) = (rect.w as u32, rect.h as u32);
        let scaled = if img.dimensions() == (w, h) {
            Cow::Borrowed(img)
        } else {
            Cow::Owned(imageops::resize(img, w, h, FilterType::Triangle))
        };

        let (cw, ch) = (self.image.width() as i32, self.image.height() as i32);
        for (ix, iy, px) in scaled.enumerate_pixels() {
            let (x, y) = (rect.x + ix as i32, rect.y + iy as i32);
            if x < 0 || y < 0 || x >= cw || y >= ch {
                continue;
            }
            let [r, g, b, a] = px.0;
            blend(
                self.image.get_pixel_mut(x as u32, y as u32),
                Color::rgb(r, g, b),
                f32::from(a) / 255.0 * opacity,
            );
        }
    }

    fn draw_text(&mut self, text: &str, style: FontSpec, color: Color, placement: TextPlacement) {
        if text.is_empty() || color.is_transparent() {
            return;
        }
        let Some(font) = self.assets.font(style.weight) else {
            trace!(weight = ?style.weight, "font not loaded");
            return;
        };

        let scale = PxScale::from(style.size);
        let scaled = font.as_scaled(scale);
        let ascent = scaled.ascent().round() as i32;
        let height = scaled.height().ceil() as i32;
        let line_h = (scaled.height() + scaled.line_gap()).ceil() as i32;

        let lines = match placement {
            TextPlacement::Boxed {
                rect,
                align: BoxAlign::TopCenterWrap,
            } => wrap_words(font, scale, text, rect.w),
            _ => vec![text.to_string()],
        };

        let pad = (style.size / 2.0).ceil() as i32;
        for (i, line) in lines.iter().enumerate() {
            let w = text_size(scale, font, line).0 as i32;
            let (x, y) = text_origin(placement, w, height, ascent, i as i32 * line_h);
            let bounds = Rect::new(x - pad, y - pad, w + 2 * pad, line_h + 2 * pad);
            if let Some(mut cov) = Coverage::new(bounds, &self.image) {
                draw_text_mut(&mut cov.mask, FULL, x - cov.x, y - cov.y, scale, font, line);
                composite(&mut self.image, &cov, &Paint::Solid(color));
            }
        }
    }
}

impl RenderBackend for RasterSurface {
    fn begin_frame(
        &mut self,
        canvas: CanvasSize,
        background: Option<&VideoFrame>,
    ) -> Result<(), RenderError> {
        if !canvas.is_valid() {
            return Err(RenderError::InvalidCanvas(canvas));
        }
        let (w, h) = (canvas.width as u32, canvas.height as u32);
        if self.image.dimensions() != (w, h) {
            self.image = RgbaImage::new(w, h);
        }
        self.paint_background(background);
        self.in_frame = true;
        Ok(())
    }

    fn draw(&mut self, directive: &DrawDirective) -> Result<(), RenderError> {
        if !self.in_frame {
            return Err(RenderError::NoFrame);
        }
        match directive {
            DrawDirective::FillRect { rect, paint } => {
                self.fill_shape(*rect, paint, |cov| cov.fill_rect(*rect));
            }
            DrawDirective::FillPolygon { points, paint } => {
                let (w, h) = self.image.dimensions();
                let points = polygon_points(points, w, h);
                if points.len() < 3 {
                    return Ok(());
                }
                self.fill_shape(bounds_of(&points, w, h), paint, |cov| {
                    cov.fill_polygon(&points)
                });
            }
            DrawDirective::Ellipse { rect, paint } => {
                self.fill_shape(*rect, paint, |cov| cov.fill_ellipse(*rect));
            }
            DrawDirective::RoundedRect {
                rect,
                radius,
                fill,
                stroke,
            } => {
                let r = radius.round() as i32;
                self.fill_shape(*rect, fill, |cov| cov.fill_rounded_rect(*rect, r));
                if let Some(stroke) = stroke {
                    self.stroke_rounded_rect(*rect, *radius, *stroke);
                }
            }
            DrawDirective::Icon {
                icon,
                rect,
                opacity,
            } => self.draw_icon(*icon, *rect, *opacity),
            DrawDirective::Text {
                text,
                font,
                color,
                placement,
            } => self.draw_text(text, *font, *color, *placement),
        }
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        if !self.in_frame {
            return Err(RenderError::NoFrame);
        }
        self.in_frame = false;
        Ok(())
    }
}
