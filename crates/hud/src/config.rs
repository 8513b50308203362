//! HUD layout configuration
//!
//! Two layout presets exist for the bottom icons and turn signals; which one
//! applies is a deployment choice, so both are plain configuration.

use serde::{Deserialize, Serialize};

use crate::HudError;

/// Named layout preset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutPreset {
    #[default]
    Wide,
    Compact,
}

/// Turn signal chevron layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnSignalLayout {
    /// Chevrons per side
    pub draw_count: usize,
    /// Chevron height (px)
    pub height: i32,
    /// Horizontal space kept free around the center on each side (px)
    pub side_inset: i32,
    /// Chevron width and gap as a fraction of the free half width
    pub width_divisor: i32,
    /// Distance of the first chevron from the center, as a divisor of the free half width
    pub margin_divisor: f32,
    /// Opacity of the current chevron
    pub base_alpha: f32,
}

impl Default for TurnSignalLayout {
    fn default() -> Self {
        Self {
            draw_count: 8,
            height: 160,
            side_inset: 200,
            width_divisor: 25,
            margin_divisor: 3.8,
            base_alpha: 0.8,
        }
    }
}

impl TurnSignalLayout {
    pub fn compact() -> Self {
        Self {
            draw_count: 7,
            height: 140,
            margin_divisor: 4.2,
            ..Default::default()
        }
    }
}

/// Bottom row icons (cruise gap, brake, autohold) and tire pressure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BottomIconLayout {
    /// Horizontal space between icon discs (px)
    pub spacing: i32,
    /// Cruise gap label offset from its slot center
    pub gap_label_offset: (i32, i32),
    /// Tire pressure widget left edge, measured from the canvas right edge
    pub tpms_from_right: i32,
    /// Glyph box of a digit in the tire pressure font
    pub tpms_digit: (i32, i32),
}

impl Default for BottomIconLayout {
    fn default() -> Self {
        Self {
            spacing: 50,
            gap_label_offset: (-280, 130),
            tpms_from_right: 210,
            tpms_digit: (21, 52),
        }
    }
}

impl BottomIconLayout {
    pub fn compact() -> Self {
        Self {
            spacing: 30,
            gap_label_offset: (-240, 120),
            tpms_from_right: 180,
            ..Default::default()
        }
    }
}

/// HUD layout constants
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HudLayout {
    /// Border around the road view (px)
    pub border: i32,
    pub header_h: i32,
    pub footer_h: i32,
    /// Radius of the bottom icon discs
    pub icon_radius: i32,
    pub turn_signal: TurnSignalLayout,
    pub bottom_icons: BottomIconLayout,
}

impl Default for HudLayout {
    fn default() -> Self {
        Self {
            border: 20,
            header_h: 420,
            footer_h: 280,
            icon_radius: 192,
            turn_signal: TurnSignalLayout::default(),
            bottom_icons: BottomIconLayout::default(),
        }
    }
}

impl HudLayout {
    pub fn preset(preset: LayoutPreset) -> Self {
        match preset {
            LayoutPreset::Wide => Self::default(),
            LayoutPreset::Compact => Self {
                turn_signal: TurnSignalLayout::compact(),
                bottom_icons: BottomIconLayout::compact(),
                ..Default::default()
            },
        }
    }

    /// Side of the icon image inside a disc
    pub fn icon_img_size(&self) -> i32 {
        ((self.icon_radius / 2) as f32 * 1.5) as i32
    }

    pub fn validate(&self) -> Result<(), HudError> {
        if self.turn_signal.draw_count == 0 {
            return Err(HudError::InvalidLayout("turn_signal.draw_count must be positive".into()));
        }
        if self.turn_signal.width_divisor <= 0 || self.turn_signal.margin_divisor <= 0.0 {
            return Err(HudError::InvalidLayout("turn_signal divisors must be positive".into()));
        }
        if self.icon_radius <= 0 {
            return Err(HudError::InvalidLayout("icon_radius must be positive".into()));
        }
        Ok(())
    }
}
