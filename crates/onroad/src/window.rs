//! Onroad window: status border, alert overlay and offroad transitions

use alerting::{Alert, AlertConfig, AlertKind, AlertPresenter, AlertResolver};
use hud::palette::status_color;
use hud::{CanvasSize, Color, DrawDirective, Paint, Rect};
use hud_state::{StateSnapshot, UiStatus};
use tracing::{debug, info};

/// What changed in one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowUpdate {
    pub alert_repaint: bool,
    pub border_repaint: bool,
    pub hud_repaint: bool,
}

impl WindowUpdate {
    pub fn needs_render(&self) -> bool {
        self.alert_repaint || self.border_repaint || self.hud_repaint
    }
}

/// Per-tick window state around the HUD
pub struct OnroadWindow {
    resolver: AlertResolver,
    presenter: AlertPresenter<Color>,
    bg: Color,
    border: i32,
    started: bool,
    started_frame: u64,
    recording: bool,
}

impl OnroadWindow {
    pub fn new(alert: AlertConfig, border: i32) -> Self {
        let bg = status_color(UiStatus::Disengaged);
        Self {
            resolver: AlertResolver::new(alert),
            presenter: AlertPresenter::new(bg),
            bg,
            border,
            started: false,
            started_frame: 0,
            recording: false,
        }
    }

    pub fn background(&self) -> Color {
        self.bg
    }

    pub fn alert(&self) -> &Alert {
        self.presenter.alert()
    }

    pub fn started_frame(&self) -> u64 {
        self.started_frame
    }

    pub fn is_recording(&self) -> bool {
        self.recording
    }

    pub fn toggle_recording(&mut self) -> bool {
        self.recording = !self.recording;
        info!(recording = self.recording, "Recording toggled");
        self.recording
    }

    /// Entering or leaving a drive; returns true when the alert overlay must
    /// be repainted
    pub fn offroad_transition(&mut self, offroad: bool, frame: u64) -> bool {
        if offroad {
            if self.recording {
                self.recording = false;
                info!("Recording stopped on offroad transition");
            }
        } else {
            self.started_frame = frame;
        }
        let repaint = self.presenter.update_alert(&Alert::none(), &self.bg);
        info!(offroad, frame, "Offroad transition");
        repaint
    }

    /// Apply one snapshot
    pub fn update_state(&mut self, snapshot: &StateSnapshot) -> WindowUpdate {
        let mut update = WindowUpdate::default();
        if snapshot.started != self.started {
            self.started = snapshot.started;
            update.alert_repaint = self.offroad_transition(!snapshot.started, snapshot.frame);
        }

        let mut bg = status_color(snapshot.status);
        let alert = self
            .resolver
            .resolve(snapshot, self.started_frame, snapshot.frame);

        if snapshot.controls.updated || !alert.is_empty() {
            if alert.kind == AlertKind::ControlsUnresponsive {
                bg = status_color(UiStatus::Alert);
            }
            if !snapshot.openpilot_view_enabled {
                update.alert_repaint |= self.presenter.update_alert(&alert, &bg);
            }
        }

        if self.bg != bg {
            debug!(?bg, "border color changed");
            self.bg = bg;
            update.border_repaint = true;
        }

        update.hud_repaint = snapshot.scene.world_objects_visible || self.recording;
        update
    }

    /// Status-colored frame around the road view
    pub fn border_directives(&self, canvas: CanvasSize) -> Vec<DrawDirective> {
        let b = self.border;
        if b <= 0 {
            return Vec::new();
        }
        let paint = Paint::Solid(self.bg.with_alpha(1.0));
        let (w, h) = (canvas.width, canvas.height);
        [
            Rect::new(0, 0, w, b),
            Rect::new(0, h - b, w, b),
            Rect::new(0, b, b, h - 2 * b),
            Rect::new(w - b, b, b, h - 2 * b),
        ]
        .into_iter()
        .map(|rect| DrawDirective::FillRect { rect, paint })
        .collect()
    }

    /// Alert banner for the alert on screen
    pub fn alert_directives(&self, canvas: CanvasSize) -> Vec<DrawDirective> {
        if !self.presenter.is_visible() {
            return Vec::new();
        }
        hud::alert_overlay(self.presenter.alert(), *self.presenter.background(), canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hud_state::{AlertSize, ControlsAlert, ControlsLink, Scene};

    const SEC: u64 = 1_000_000_000;

    fn snapshot(frame: u64, status: UiStatus, controls: ControlsLink) -> StateSnapshot {
        StateSnapshot {
            frame,
            started: true,
            status,
            controls,
            ..Default::default()
        }
    }

    #[test]
    fn test_start_records_frame() {
        let mut window = OnroadWindow::new(AlertConfig::default(), 20);
        window.update_state(&snapshot(7, UiStatus::Disengaged, ControlsLink::default()));
        assert_eq!(window.started_frame(), 7);
    }

    #[test]
    fn test_unresponsive_forces_alert_background() {
        let mut window = OnroadWindow::new(AlertConfig::default(), 20);
        window.update_state(&snapshot(1, UiStatus::Engaged, ControlsLink::default()));

        // Controls last heard at frame 2, then silent for 6 s
        let link = ControlsLink {
            updated: false,
            last_frame: 2,
            last_time_ns: SEC,
            now_ns: 7 * SEC,
        };
        let update = window.update_state(&snapshot(200, UiStatus::Engaged, link));
        assert_eq!(window.alert().kind, AlertKind::ControlsUnresponsive);
        assert_eq!(window.background(), status_color(UiStatus::Alert));
        assert!(update.alert_repaint);
        assert!(update.border_repaint);

        // Same state again: nothing to repaint
        let update = window.update_state(&snapshot(201, UiStatus::Engaged, link));
        assert!(!update.alert_repaint);
        assert!(!update.border_repaint);
    }

    #[test]
    fn test_openpilot_view_hides_alerts() {
        let mut window = OnroadWindow::new(AlertConfig::default(), 20);
        let mut snap = snapshot(
            1,
            UiStatus::Warning,
            ControlsLink {
                updated: true,
                last_frame: 1,
                ..Default::default()
            },
        );
        snap.controls_alert = ControlsAlert {
            text1: "Steer Override".into(),
            size: AlertSize::Small,
            ..Default::default()
        };
        snap.openpilot_view_enabled = true;
        let update = window.update_state(&snap);
        assert!(!update.alert_repaint);
        assert!(window.alert().is_empty());
        assert!(window.alert_directives(CanvasSize::new(2160, 1080)).is_empty());

        snap.openpilot_view_enabled = false;
        snap.frame = 2;
        let update = window.update_state(&snap);
        assert!(update.alert_repaint);
        assert_eq!(window.alert_directives(CanvasSize::new(2160, 1080)).len(), 3);
    }

    #[test]
    fn test_offroad_clears_alert_and_recording() {
        let mut window = OnroadWindow::new(AlertConfig::default(), 20);
        let mut snap = snapshot(
            1,
            UiStatus::Engaged,
            ControlsLink {
                updated: true,
                last_frame: 1,
                ..Default::default()
            },
        );
        snap.controls_alert.text1 = "Lane Change".into();
        snap.controls_alert.size = AlertSize::Small;
        window.update_state(&snap);
        window.toggle_recording();
        assert!(!window.alert().is_empty());

        snap.started = false;
        snap.controls.updated = false;
        let update = window.update_state(&snap);
        assert!(window.alert().is_empty());
        assert!(!window.is_recording());
        assert!(!update.hud_repaint);
        // The banner must be cleared from the screen
        assert!(update.alert_repaint);
        assert!(update.needs_render());
        assert!(window.alert_directives(CanvasSize::new(2160, 1080)).is_empty());
    }

    #[test]
    fn test_hud_repaint_rules() {
        let mut window = OnroadWindow::new(AlertConfig::default(), 20);
        let mut snap = snapshot(1, UiStatus::Disengaged, ControlsLink::default());
        assert!(!window.update_state(&snap).hud_repaint);

        snap.scene = Scene {
            world_objects_visible: true,
            ..Default::default()
        };
        assert!(window.update_state(&snap).hud_repaint);

        snap.scene.world_objects_visible = false;
        window.toggle_recording();
        assert!(window.update_state(&snap).hud_repaint);
    }

    #[test]
    fn test_border_directives() {
        let window = OnroadWindow::new(AlertConfig::default(), 20);
        let out = window.border_directives(CanvasSize::new(200, 100));
        assert_eq!(out.len(), 4);
        assert_eq!(
            out[1],
            DrawDirective::FillRect {
                rect: Rect::new(0, 80, 200, 20),
                paint: Paint::Solid(Color::rgb(0, 0, 0)),
            }
        );
    }
}
