//! Backend that only counts what it is asked to draw

use hud::{CanvasSize, DrawDirective};

use crate::frame::VideoFrame;
use crate::{RenderBackend, RenderError};

#[derive(Debug, Default)]
pub struct NullSurface {
    frames: u64,
    directives: u64,
    last_frame: usize,
    in_frame: bool,
}

impl NullSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed frames
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Directives drawn over all frames
    pub fn directives(&self) -> u64 {
        self.directives
    }

    /// Directives in the last completed frame
    pub fn last_frame_len(&self) -> usize {
        self.last_frame
    }
}

impl RenderBackend for NullSurface {
    fn begin_frame(
        &mut self,
        canvas: CanvasSize,
        _background: Option<&VideoFrame>,
    ) -> Result<(), RenderError> {
        if !canvas.is_valid() {
            return Err(RenderError::InvalidCanvas(canvas));
        }
        self.in_frame = true;
        self.last_frame = 0;
        Ok(())
    }

    fn draw(&mut self, _directive: &DrawDirective) -> Result<(), RenderError> {
        if !self.in_frame {
            return Err(RenderError::NoFrame);
        }
        self.last_frame += 1;
        self.directives += 1;
        Ok(())
    }

    fn end_frame(&mut self) -> Result<(), RenderError> {
        if !self.in_frame {
            return Err(RenderError::NoFrame);
        }
        self.in_frame = false;
        self.frames += 1;
        Ok(())
    }
}
