//! Alert value type

use hud_state::{AlertSize, AudibleAlert, ControlsAlert};
use serde::{Deserialize, Serialize};

/// Alert category
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    /// Alert published by controls, with its type tag
    Normal(String),
    /// Drive started but controls never reported
    ControlsWaiting,
    /// Controls stopped reporting
    ControlsUnresponsive,
}

impl Default for AlertKind {
    fn default() -> Self {
        AlertKind::Normal(String::new())
    }
}

/// Driver alert, recomputed every tick
///
/// Equality covers text, kind and sound only. The size is display-only, so an
/// alert whose size alone changed compares equal and does not cause a repaint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Alert {
    pub text1: String,
    pub text2: String,
    pub kind: AlertKind,
    pub size: AlertSize,
    pub sound: AudibleAlert,
}

impl PartialEq for Alert {
    fn eq(&self, other: &Self) -> bool {
        self.text1 == other.text1
            && self.text2 == other.text2
            && self.kind == other.kind
            && self.sound == other.sound
    }
}

impl Eq for Alert {}

impl Alert {
    /// The empty alert (nothing shown)
    pub fn none() -> Self {
        Self::default()
    }

    pub fn controls_waiting() -> Self {
        Self {
            text1: "openpilot Unavailable".to_string(),
            text2: "Waiting for controls to start".to_string(),
            kind: AlertKind::ControlsWaiting,
            size: AlertSize::Mid,
            sound: AudibleAlert::None,
        }
    }

    pub fn controls_unresponsive() -> Self {
        Self {
            text1: "TAKE CONTROL IMMEDIATELY".to_string(),
            text2: "Controls Unresponsive".to_string(),
            kind: AlertKind::ControlsUnresponsive,
            size: AlertSize::Full,
            sound: AudibleAlert::WarningImmediate,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::none()
    }

    pub fn is_visible(&self) -> bool {
        self.size != AlertSize::None
    }
}

impl From<&ControlsAlert> for Alert {
    fn from(cs: &ControlsAlert) -> Self {
        Self {
            text1: cs.text1.clone(),
            text2: cs.text2.clone(),
            kind: AlertKind::Normal(cs.alert_type.clone()),
            size: cs.size,
            sound: cs.sound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_size() {
        let mut a = Alert::controls_unresponsive();
        let b = a.clone();
        assert_eq!(a, a);

        a.size = AlertSize::Small;
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_covers_text_kind_sound() {
        let base = Alert::controls_waiting();

        let mut other = base.clone();
        other.text2 = "Something else".to_string();
        assert_ne!(base, other);

        let mut other = base.clone();
        other.kind = AlertKind::ControlsUnresponsive;
        assert_ne!(base, other);

        let mut other = base.clone();
        other.sound = AudibleAlert::Prompt;
        assert_ne!(base, other);
    }

    #[test]
    fn test_empty_alert() {
        assert!(Alert::none().is_empty());
        assert!(!Alert::none().is_visible());
        assert!(!Alert::controls_waiting().is_empty());
        assert!(Alert::controls_waiting().is_visible());
    }

    #[test]
    fn test_from_controls() {
        let cs = ControlsAlert {
            text1: "Steer Saturated".to_string(),
            text2: "Take Control".to_string(),
            alert_type: "steerSaturated/warning".to_string(),
            size: AlertSize::Mid,
            sound: AudibleAlert::PromptRepeat,
        };
        let alert = Alert::from(&cs);
        assert_eq!(alert.kind, AlertKind::Normal("steerSaturated/warning".to_string()));
        assert_eq!(alert.size, AlertSize::Mid);
        assert_eq!(alert.sound, AudibleAlert::PromptRepeat);
    }
}
