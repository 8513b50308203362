//! Alert overlay presentation state
//!
//! Holds the alert currently on screen and its background color; a repaint is
//! requested only when either actually changed.

use tracing::debug;

use crate::alert::Alert;

/// Currently displayed alert and background
#[derive(Debug, Clone, Default)]
pub struct AlertPresenter<C> {
    alert: Alert,
    bg: C,
}

impl<C: Clone + PartialEq + std::fmt::Debug> AlertPresenter<C> {
    pub fn new(bg: C) -> Self {
        Self {
            alert: Alert::none(),
            bg,
        }
    }

    /// Store a new alert; returns true when the overlay must be repainted
    pub fn update_alert(&mut self, alert: &Alert, bg: &C) -> bool {
        if self.alert != *alert || self.bg != *bg {
            debug!("Alert changed: {:?} on {:?}", alert.text1, bg);
            self.alert = alert.clone();
            self.bg = bg.clone();
            true
        } else {
            false
        }
    }

    pub fn alert(&self) -> &Alert {
        &self.alert
    }

    pub fn background(&self) -> &C {
        &self.bg
    }

    /// Size None alerts are never drawn
    pub fn is_visible(&self) -> bool {
        self.alert.is_visible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hud_state::AlertSize;

    #[test]
    fn test_repaint_on_change() {
        let mut presenter = AlertPresenter::new(0u32);
        assert!(!presenter.is_visible());

        assert!(presenter.update_alert(&Alert::controls_waiting(), &0));
        assert!(presenter.is_visible());
        assert!(!presenter.update_alert(&Alert::controls_waiting(), &0));
    }

    #[test]
    fn test_size_only_change_does_not_repaint() {
        let mut presenter = AlertPresenter::new(0u32);
        let alert = Alert::controls_unresponsive();
        assert!(presenter.update_alert(&alert, &7));

        let mut resized = alert.clone();
        resized.size = AlertSize::Mid;
        assert!(!presenter.update_alert(&resized, &7));
        // The stored alert keeps its original size
        assert_eq!(presenter.alert().size, AlertSize::Full);
    }

    #[test]
    fn test_size_change_with_background_change_repaints() {
        let mut presenter = AlertPresenter::new(0u32);
        let alert = Alert::controls_unresponsive();
        presenter.update_alert(&alert, &7);

        let mut resized = alert.clone();
        resized.size = AlertSize::Mid;
        assert!(presenter.update_alert(&resized, &8));
        assert_eq!(presenter.alert().size, AlertSize::Mid);
        assert_eq!(*presenter.background(), 8);
    }
}
