//! Road camera frames and the camera-to-canvas transform

use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};

use crate::RenderError;

/// Decoded RGB video frame
#[derive(Debug, Clone)]
pub struct VideoFrame {
    /// RGB pixel data (width * height * 3)
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl VideoFrame {
    /// Create a frame from raw RGB data
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(RenderError::Frame(format!(
                "{}x{} frame needs {} bytes, got {}",
                width,
                height,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Single-color frame
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self {
            data,
            width,
            height,
        }
    }

    /// Load a still image as the road view
    pub fn open(path: &std::path::Path) -> Result<Self, RenderError> {
        let img = image::open(path)?;
        Ok(Self::from_image(img))
    }

    pub fn from_image(img: DynamicImage) -> Self {
        let rgb: RgbImage = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        Self {
            data: rgb.into_raw(),
            width,
            height,
        }
    }

    /// Get pixel at (x, y)
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }
}

/// Which road camera feeds the view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraKind {
    #[default]
    Road,
    Wide,
}

impl CameraKind {
    /// Focal length and principal point (px) of the camera intrinsics
    pub fn intrinsics(&self) -> (f32, f32, f32) {
        match self {
            CameraKind::Road => (2648.0, 1928.0 / 2.0, 1208.0 / 2.0),
            CameraKind::Wide => (567.0, 1928.0 / 2.0, 1208.0 / 2.0),
        }
    }
}

/// Maps camera pixels onto the canvas
///
/// The principal point lands at the canvas center shifted down by
/// `Y_OFFSET`, scaled by `ZOOM / focal` (halved for the wide camera).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTransform {
    pub zoom: f32,
    pub origin: (f32, f32),
    pub principal: (f32, f32),
}

impl FrameTransform {
    pub const ZOOM: f32 = 2912.8;
    pub const Y_OFFSET: f32 = 150.0;

    pub fn new(camera: CameraKind, canvas_w: i32, canvas_h: i32) -> Self {
        let (focal, px, py) = camera.intrinsics();
        let mut zoom = Self::ZOOM / focal;
        if camera == CameraKind::Wide {
            zoom *= 0.5;
        }
        Self {
            zoom,
            origin: (
                (canvas_w / 2) as f32,
                (canvas_h / 2) as f32 + Self::Y_OFFSET,
            ),
            principal: (px, py),
        }
    }

    /// Camera pixel to canvas pixel
    pub fn to_canvas(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.origin.0 + (x - self.principal.0) * self.zoom,
            self.origin.1 + (y - self.principal.1) * self.zoom,
        )
    }

    /// Canvas pixel to camera pixel
    pub fn to_camera(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (x - self.origin.0) / self.zoom + self.principal.0,
            (y - self.origin.1) / self.zoom + self.principal.1,
        )
    }
}
