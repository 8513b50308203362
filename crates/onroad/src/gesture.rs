//! Press/release gestures on the road view

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Horizontal displacement above which a gesture is a drag (px)
pub const DRAG_X: i32 = 250;

/// Vertical displacement above which a gesture is a drag (px)
pub const DRAG_Y: i32 = 200;

/// Delay between a calibration reset and the restart it triggers
pub const RESET_RESTART_DELAY: Duration = Duration::from_millis(1500);

/// Delay before a requested soft restart
pub const SOFT_RESTART_DELAY: Duration = Duration::from_millis(500);

/// What a gesture means, before side panel state is considered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureAction {
    /// Short tap or small motion
    Tap,
    /// Large upward drag
    ResetCalibration,
    /// Large downward drag
    SoftRestart,
    /// Large horizontal drag, either direction
    ToggleRecording,
    /// Large diagonal drag with equal displacement on both axes
    Ignored,
}

/// Command for the owning application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    ToggleSidePanel,
    ResetCalibration { restart_after: Duration },
    SoftRestart { after: Duration },
    ToggleRecording,
}

/// Classify a displacement between press and release
pub fn classify(dx: i32, dy: i32) -> GestureAction {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax <= DRAG_X && ay <= DRAG_Y {
        return GestureAction::Tap;
    }
    if ax < ay {
        if dy < 0 {
            GestureAction::ResetCalibration
        } else {
            GestureAction::SoftRestart
        }
    } else if ax > ay {
        GestureAction::ToggleRecording
    } else {
        GestureAction::Ignored
    }
}

/// Turns raw pointer events into shell commands
pub struct GestureShell {
    start: Option<(i32, i32)>,
    has_side_panel: bool,
    sidebar_visible: bool,
    commands: mpsc::Sender<ShellCommand>,
}

impl GestureShell {
    pub fn new(commands: mpsc::Sender<ShellCommand>) -> Self {
        Self {
            start: None,
            has_side_panel: false,
            sidebar_visible: false,
            commands,
        }
    }

    /// Whether a side panel (e.g. a map) exists to toggle
    pub fn set_side_panel(&mut self, present: bool) {
        self.has_side_panel = present;
    }

    pub fn set_sidebar_visible(&mut self, visible: bool) {
        self.sidebar_visible = visible;
    }

    pub fn press(&mut self, x: i32, y: i32) {
        self.start = Some((x, y));
    }

    /// Finish a gesture; the command, if any, is also queued for the application
    pub fn release(&mut self, x: i32, y: i32) -> Option<ShellCommand> {
        let (sx, sy) = self.start.take()?;
        let action = classify(x - sx, y - sy);
        debug!(?action, dx = x - sx, dy = y - sy, "gesture");

        let command = match action {
            GestureAction::Tap if self.has_side_panel && !self.sidebar_visible => {
                Some(ShellCommand::ToggleSidePanel)
            }
            GestureAction::Tap | GestureAction::Ignored => None,
            GestureAction::ResetCalibration => {
                info!("Calibration reset requested");
                Some(ShellCommand::ResetCalibration {
                    restart_after: RESET_RESTART_DELAY,
                })
            }
            GestureAction::SoftRestart => Some(ShellCommand::SoftRestart {
                after: SOFT_RESTART_DELAY,
            }),
            GestureAction::ToggleRecording => Some(ShellCommand::ToggleRecording),
        }?;

        if let Err(e) = self.commands.try_send(command) {
            warn!("Dropping shell command {:?}: {}", command, e);
        }
        Some(command)
    }
}
