//! Turn signal chevrons and their blink animation
//!
//! Each indicator owns its animation state, so the left and right chevrons
//! advance independently and two compositors never share a blink position.

use tracing::trace;

use crate::config::TurnSignalLayout;
use crate::directive::{DrawDirective, Icon, Rect};
use crate::CanvasSize;

/// Blinker lamps for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlinkerInput {
    pub left: bool,
    pub right: bool,
}

impl BlinkerInput {
    pub fn any(&self) -> bool {
        self.left || self.right
    }

    /// Keep only the lamp on `side`
    pub fn only(self, side: Side) -> Self {
        match side {
            Side::Left => Self {
                left: self.left,
                right: false,
            },
            Side::Right => Self {
                left: false,
                right: self.right,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPhase {
    Idle,
    Blinking,
    /// Sweep finished, waiting before the next one
    Holding,
}

/// Sweep position of a chevron row
#[derive(Debug, Clone)]
pub struct BlinkAnimation {
    index: usize,
    wait_countdown: u32,
    prev_advance_ms: u64,
    draw_count: usize,
    interval_ms: u64,
    hold_ticks: u32,
    active: bool,
}

impl BlinkAnimation {
    pub fn new(draw_count: usize, tick_hz: u32) -> Self {
        Self {
            index: 0,
            wait_countdown: 0,
            prev_advance_ms: 0,
            draw_count: draw_count.max(1),
            interval_ms: u64::from(900 / tick_hz.max(1)),
            hold_ticks: (tick_hz / 4).max(1),
            active: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn wait_countdown(&self) -> u32 {
        self.wait_countdown
    }

    pub fn phase(&self) -> BlinkPhase {
        if self.wait_countdown > 0 {
            BlinkPhase::Holding
        } else if self.active {
            BlinkPhase::Blinking
        } else {
            BlinkPhase::Idle
        }
    }

    fn reset(&mut self) {
        self.index = 0;
        self.wait_countdown = 0;
        self.active = false;
    }

    /// Advance one tick; returns the index to draw, or `None` when nothing is drawn
    pub fn tick(&mut self, input: BlinkerInput, now_ms: u64) -> Option<usize> {
        if !input.any() {
            self.reset();
            return None;
        }

        if self.wait_countdown > 0 {
            self.wait_countdown -= 1;
            if self.wait_countdown == 0 {
                self.index = 0;
                self.active = false;
            }
            return None;
        }

        self.active = true;
        let drawn = self.index;

        if now_ms.saturating_sub(self.prev_advance_ms) > self.interval_ms {
            self.prev_advance_ms = now_ms;
            self.index += 1;
        }

        if self.index >= self.draw_count {
            self.index = self.draw_count - 1;
            self.wait_countdown = self.hold_ticks;
            trace!(index = self.index, "blink sweep complete");
        }

        Some(drawn)
    }
}

/// Opacity of chevron `slot` while the sweep is at `index`
pub fn chevron_alpha(base: f32, index: usize, slot: usize) -> f32 {
    let d = index.abs_diff(slot);
    base / (2 * d).max(1) as f32
}

/// One side's chevron row
#[derive(Debug, Clone)]
pub struct TurnSignalIndicator {
    side: Side,
    animation: BlinkAnimation,
}

impl TurnSignalIndicator {
    pub fn new(side: Side, layout: &TurnSignalLayout, tick_hz: u32) -> Self {
        Self {
            side,
            animation: BlinkAnimation::new(layout.draw_count, tick_hz),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn animation(&self) -> &BlinkAnimation {
        &self.animation
    }

    /// Advance the animation and lay out the chevrons for this tick
    pub fn frame(
        &mut self,
        input: BlinkerInput,
        now_ms: u64,
        layout: &TurnSignalLayout,
        canvas: CanvasSize,
    ) -> Vec<DrawDirective> {
        match self.animation.tick(input.only(self.side), now_ms) {
            Some(index) => chevrons(self.side, index, layout, canvas),
            None => Vec::new(),
        }
    }
}

/// Chevron row with the sweep at `index`, moving outwards from the center
pub fn chevrons(
    side: Side,
    index: usize,
    layout: &TurnSignalLayout,
    canvas: CanvasSize,
) -> Vec<DrawDirective> {
    let fb_w = canvas.width / 2 - layout.side_inset;
    let w = fb_w / layout.width_divisor;
    let gap = w;
    let h = layout.height;
    let margin = (fb_w as f32 / layout.margin_divisor) as i32;
    let base_y = (canvas.height - h) / 2;
    let dc = layout.draw_count as f32;

    let mut x = canvas.width / 2;
    let mut out = Vec::with_capacity(layout.draw_count);

    for slot in 0..layout.draw_count {
        let factor = dc / (slot as f32 + dc);
        let sw = (w as f32 * factor) as i32;
        let sh = (h as f32 * factor) as i32;
        let y = base_y + ((h as f32 - h as f32 * factor) / 2.0) as i32;

        let (icon, rx) = match side {
            Side::Left => (Icon::TurnSignalLeft, x - w - margin),
            Side::Right => (Icon::TurnSignalRight, x + margin),
        };
        out.push(DrawDirective::Icon {
            icon,
            rect: Rect::new(rx, y, sw, sh),
            opacity: chevron_alpha(layout.base_alpha, index, slot),
        });

        match side {
            Side::Left => x -= gap + w,
            Side::Right => x += gap + w,
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEFT: BlinkerInput = BlinkerInput {
        left: true,
        right: false,
    };

    const CANVAS: CanvasSize = CanvasSize {
        width: 2120,
        height: 1040,
    };

    #[test]
    fn test_sweep_then_hold() {
        let mut anim = BlinkAnimation::new(8, 20);
        let mut now = 0;
        let mut drawn = Vec::new();
        for _ in 0..8 {
            now += 50;
            drawn.push(anim.tick(LEFT, now));
        }
        assert_eq!(drawn, (0..8).map(Some).collect::<Vec<_>>());
        assert_eq!(anim.index(), 7);
        assert_eq!(anim.phase(), BlinkPhase::Holding);
        assert_eq!(anim.wait_countdown(), 5);

        for _ in 0..4 {
            now += 50;
            assert_eq!(anim.tick(LEFT, now), None);
            assert_eq!(anim.index(), 7);
        }
        now += 50;
        assert_eq!(anim.tick(LEFT, now), None);
        assert_eq!(anim.index(), 0);
        assert_eq!(anim.phase(), BlinkPhase::Idle);

        now += 50;
        assert_eq!(anim.tick(LEFT, now), Some(0));
        assert_eq!(anim.phase(), BlinkPhase::Blinking);
    }

    #[test]
    fn test_no_advance_within_interval() {
        let mut anim = BlinkAnimation::new(8, 20);
        assert_eq!(anim.tick(LEFT, 100), Some(0));
        // 900 / 20 = 45 ms; a gap of exactly 45 does not advance
        assert_eq!(anim.tick(LEFT, 145), Some(1));
        assert_eq!(anim.index(), 1);
        assert_eq!(anim.tick(LEFT, 146), Some(1));
        assert_eq!(anim.index(), 2);
    }

    #[test]
    fn test_blinker_off_resets_immediately() {
        let mut anim = BlinkAnimation::new(8, 20);
        for t in 1..=10 {
            anim.tick(LEFT, t * 50);
        }
        assert_eq!(anim.phase(), BlinkPhase::Holding);

        assert_eq!(anim.tick(BlinkerInput::default(), 2000), None);
        assert_eq!(anim.phase(), BlinkPhase::Idle);
        assert_eq!(anim.index(), 0);
        assert_eq!(anim.wait_countdown(), 0);
    }

    #[test]
    fn test_chevron_alpha() {
        assert_eq!(chevron_alpha(0.8, 3, 3), 0.8);
        assert_eq!(chevron_alpha(0.8, 3, 2), 0.4);
        assert_eq!(chevron_alpha(0.8, 0, 4), 0.1);
    }

    #[test]
    fn test_indicators_are_independent() {
        let layout = TurnSignalLayout::default();
        let mut left = TurnSignalIndicator::new(Side::Left, &layout, 20);
        let mut right = TurnSignalIndicator::new(Side::Right, &layout, 20);

        for t in 1..=4 {
            left.frame(LEFT, t * 50, &layout, CANVAS);
            right.frame(LEFT, t * 50, &layout, CANVAS);
        }
        assert_eq!(left.animation().index(), 4);
        assert_eq!(right.animation().index(), 0);
        assert_eq!(right.animation().phase(), BlinkPhase::Idle);

        let both = BlinkerInput {
            left: true,
            right: true,
        };
        let out = right.frame(both, 250, &layout, CANVAS);
        assert_eq!(out.len(), 8);
        assert_eq!(right.animation().index(), 1);
        assert_eq!(left.animation().index(), 4);
    }

    #[test]
    fn test_chevron_geometry() {
        let layout = TurnSignalLayout::default();
        let out = chevrons(Side::Right, 0, &layout, CANVAS);
        // fb_w = 860, w = 34, margin = 226, base_y = 440
        assert_eq!(
            out[0],
            DrawDirective::Icon {
                icon: Icon::TurnSignalRight,
                rect: Rect::new(1060 + 226, 440, 34, 160),
                opacity: 0.8,
            }
        );
        match out[1] {
            DrawDirective::Icon { rect, .. } => assert_eq!(rect.x, 1060 + 68 + 226),
            ref other => panic!("unexpected directive {:?}", other),
        }

        let out = chevrons(Side::Left, 0, &layout, CANVAS);
        match out[0] {
            DrawDirective::Icon { icon, rect, .. } => {
                assert_eq!(icon, Icon::TurnSignalLeft);
                assert_eq!(rect.x, 1060 - 34 - 226);
            }
            ref other => panic!("unexpected directive {:?}", other),
        }
    }
}
