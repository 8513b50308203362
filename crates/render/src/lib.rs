//! Render Surface
//!
//! Executes HUD draw directives over the road camera view:
//! - `RenderBackend`, the seam between the compositor and a drawing target
//! - Software raster backend on an RGBA image
//! - Counting backend for headless runs
//! - Camera frame, camera-to-canvas transform, assets and frame pacing

pub mod assets;
pub mod frame;
pub mod null;
pub mod raster;
pub mod timer;

pub use assets::AssetStore;
pub use frame::{CameraKind, FrameTransform, VideoFrame};
pub use null::NullSurface;
pub use raster::RasterSurface;
pub use timer::FrameTimer;

use hud::{CanvasSize, DrawDirective};
use thiserror::Error;

/// Render error types
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid canvas {0:?}")]
    InvalidCanvas(CanvasSize),

    #[error("Draw call outside of a frame")]
    NoFrame,

    #[error("Invalid video frame: {0}")]
    Frame(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// A drawing target for HUD directives
///
/// Directives are executed strictly in order; later ones paint over earlier
/// ones.
pub trait RenderBackend {
    /// Start a frame, painting the camera view (or black) as background
    fn begin_frame(
        &mut self,
        canvas: CanvasSize,
        background: Option<&VideoFrame>,
    ) -> Result<(), RenderError>;

    fn draw(&mut self, directive: &DrawDirective) -> Result<(), RenderError>;

    fn end_frame(&mut self) -> Result<(), RenderError>;

    /// Draw a whole frame
    fn render(
        &mut self,
        canvas: CanvasSize,
        background: Option<&VideoFrame>,
        directives: &[DrawDirective],
    ) -> Result<(), RenderError> {
        self.begin_frame(canvas, background)?;
        for directive in directives {
            self.draw(directive)?;
        }
        self.end_frame()
    }
}
