//! Frame pacing diagnostics

use tracing::warn;

/// Frames further apart than this are reported (ms)
pub const SLOW_FRAME_MS: f64 = 66.0;

/// Tracks the time between rendered frames
#[derive(Debug, Default)]
pub struct FrameTimer {
    prev_ms: Option<u64>,
    slow_frames: u64,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished frame; returns the gap to the previous one (ms)
    pub fn frame_done(&mut self, now_ms: u64) -> Option<f64> {
        let dt = self
            .prev_ms
            .map(|prev| now_ms.saturating_sub(prev) as f64);
        self.prev_ms = Some(now_ms);

        if let Some(dt) = dt.filter(|dt| *dt > SLOW_FRAME_MS) {
            self.slow_frames += 1;
            warn!("slow frame time: {:.2}", dt);
        }
        dt
    }

    pub fn slow_frames(&self) -> u64 {
        self.slow_frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slow_frames_counted() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.frame_done(1000), None);
        assert_eq!(timer.frame_done(1050), Some(50.0));
        assert_eq!(timer.frame_done(1116), Some(66.0));
        assert_eq!(timer.slow_frames(), 0);
        assert_eq!(timer.frame_done(1200), Some(84.0));
        assert_eq!(timer.slow_frames(), 1);
    }
}
