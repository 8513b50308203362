//! HUD color policy

use hud_state::{LaneMode, UiStatus};

use crate::directive::Color;

/// Background tint for an engagement status
pub fn status_color(status: UiStatus) -> Color {
    match status {
        UiStatus::Disengaged => Color::rgba(0x00, 0x00, 0x00, 0xff),
        UiStatus::Engaged => Color::rgba(0x87, 0xce, 0xeb, 0x30),
        UiStatus::Warning => Color::rgba(0x80, 0x80, 0x80, 0x0f),
        UiStatus::Alert => Color::rgba(0xc9, 0x22, 0x31, 0x65),
    }
}

/// HUD red (alerts, lead chevrons, steering override)
pub fn red(alpha: u8) -> Color {
    Color::rgba(201, 34, 49, alpha)
}

/// Lead glow when confirmed by radar
pub const LEAD_GLOW_RADAR: Color = Color::rgb(86, 121, 216);

/// Lead glow for vision-only tracks
pub const LEAD_GLOW_VISION: Color = Color::rgb(218, 202, 37);

/// Path color while engaged, by lane selection mode
pub fn engaged_path(mode: LaneMode) -> Color {
    match mode {
        LaneMode::Auto => Color::rgb(0, 100, 255),
        LaneMode::Manual => Color::rgb(0, 160, 255),
    }
}

/// Tire pressure below the warning threshold
pub fn tpms_low() -> Color {
    Color::rgba(255, 90, 90, 220)
}

/// Tire pressure normal or not available
pub fn tpms_normal() -> Color {
    Color::rgba(255, 255, 255, 220)
}

/// Cruise gap shown as a number
pub fn gap_numeric() -> Color {
    Color::rgba(120, 255, 120, 200)
}
