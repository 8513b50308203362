//! Alert Resolver Implementation

use hud_state::{StateSnapshot, UI_FREQ};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::alert::Alert;
use crate::AlertError;

/// Alert resolver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// UI tick rate (Hz)
    pub tick_hz: u32,
    /// Grace period after drive start before the watchdog applies (seconds)
    pub startup_grace_s: u32,
    /// Controls silence that counts as unresponsive (seconds)
    pub controls_timeout_s: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            tick_hz: UI_FREQ,
            startup_grace_s: 5,
            controls_timeout_s: 5.0,
        }
    }
}

impl AlertConfig {
    pub fn validate(&self) -> Result<(), AlertError> {
        if self.tick_hz == 0 {
            return Err(AlertError::InvalidConfig("tick_hz must be positive".into()));
        }
        if self.controls_timeout_s <= 0.0 {
            return Err(AlertError::InvalidConfig(
                "controls_timeout_s must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Ticks after drive start before the watchdog applies
    pub fn grace_frames(&self) -> u64 {
        u64::from(self.startup_grace_s) * u64::from(self.tick_hz)
    }
}

/// Derives the current driver alert from a snapshot
#[derive(Debug, Clone, Default)]
pub struct AlertResolver {
    config: AlertConfig,
}

impl AlertResolver {
    pub fn new(config: AlertConfig) -> Self {
        info!("Creating alert resolver with config: {:?}", config);
        Self { config }
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Resolve the alert for this tick
    ///
    /// Controls data delivered this tick always wins. Otherwise, once the
    /// startup grace period has passed, missing or stale controls produce the
    /// waiting/unresponsive alerts. Anything else is the empty alert.
    pub fn resolve(
        &self,
        snapshot: &StateSnapshot,
        started_frame: u64,
        current_frame: u64,
    ) -> Alert {
        let link = &snapshot.controls;

        if link.updated {
            return Alert::from(&snapshot.controls_alert);
        }

        if current_frame.saturating_sub(started_frame) > self.config.grace_frames() {
            if link.last_frame < started_frame {
                debug!("Controls not seen since drive start (frame {})", started_frame);
                return Alert::controls_waiting();
            }

            let silence = link.seconds_since_last();
            if silence > self.config.controls_timeout_s {
                warn!("Controls unresponsive for {:.1}s", silence);
                return Alert::controls_unresponsive();
            }
        }

        Alert::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertKind;
    use hud_state::{AlertSize, AudibleAlert, ControlsAlert, ControlsLink};
    use proptest::prelude::*;

    const SEC: u64 = 1_000_000_000;

    fn snapshot(link: ControlsLink) -> StateSnapshot {
        StateSnapshot {
            controls: link,
            ..Default::default()
        }
    }

    #[test]
    fn test_updated_controls_win() {
        let resolver = AlertResolver::default();
        let mut snap = snapshot(ControlsLink {
            updated: true,
            last_frame: 300,
            last_time_ns: 15 * SEC,
            now_ns: 15 * SEC,
        });
        snap.controls_alert = ControlsAlert {
            text1: "Brake Hold Active".to_string(),
            text2: String::new(),
            alert_type: "brakeHold/normal".to_string(),
            size: AlertSize::Small,
            sound: AudibleAlert::None,
        };

        let alert = resolver.resolve(&snap, 100, 300);
        assert_eq!(alert.text1, "Brake Hold Active");
        assert_eq!(alert.size, AlertSize::Small);
        assert_eq!(alert.kind, AlertKind::Normal("brakeHold/normal".to_string()));
    }

    #[test]
    fn test_grace_period() {
        let resolver = AlertResolver::default();
        // Never seen, but only 100 frames (exactly 5s) since start
        let snap = snapshot(ControlsLink {
            now_ns: 10 * SEC,
            ..Default::default()
        });
        assert!(resolver.resolve(&snap, 10, 110).is_empty());
        assert!(!resolver.resolve(&snap, 10, 111).is_empty());
    }

    #[test]
    fn test_controls_waiting() {
        let resolver = AlertResolver::default();
        // Last heard before this drive started
        let snap = snapshot(ControlsLink {
            updated: false,
            last_frame: 5,
            last_time_ns: SEC,
            now_ns: 20 * SEC,
        });
        let alert = resolver.resolve(&snap, 10, 200);
        assert_eq!(alert, Alert::controls_waiting());
        assert_eq!(alert.size, AlertSize::Mid);
        assert_eq!(alert.sound, AudibleAlert::None);
    }

    #[test]
    fn test_controls_unresponsive_after_six_seconds() {
        let resolver = AlertResolver::default();
        // Drive started at frame 10, now frame 250 (12s elapsed), controls
        // last heard 6s ago
        let snap = snapshot(ControlsLink {
            updated: false,
            last_frame: 130,
            last_time_ns: 6 * SEC,
            now_ns: 12 * SEC,
        });
        let alert = resolver.resolve(&snap, 10, 250);
        assert_eq!(alert.kind, AlertKind::ControlsUnresponsive);
        assert_eq!(alert.text1, "TAKE CONTROL IMMEDIATELY");
        assert_eq!(alert.text2, "Controls Unresponsive");
        assert_eq!(alert.size, AlertSize::Full);
        assert_eq!(alert.sound, AudibleAlert::WarningImmediate);
    }

    #[test]
    fn test_recent_controls_no_alert() {
        let resolver = AlertResolver::default();
        let snap = snapshot(ControlsLink {
            updated: false,
            last_frame: 240,
            last_time_ns: 11 * SEC,
            now_ns: 12 * SEC,
        });
        assert!(resolver.resolve(&snap, 10, 250).is_empty());
    }

    #[test]
    fn test_timeout_boundary_is_exclusive() {
        let resolver = AlertResolver::default();
        let snap = snapshot(ControlsLink {
            updated: false,
            last_frame: 150,
            last_time_ns: 7 * SEC,
            now_ns: 12 * SEC,
        });
        assert!(resolver.resolve(&snap, 10, 250).is_empty());
    }

    #[test]
    fn test_config_validation() {
        assert!(AlertConfig::default().validate().is_ok());
        let config = AlertConfig {
            tick_hz: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(AlertConfig::default().grace_frames(), 100);
    }

    proptest! {
        #[test]
        fn prop_no_watchdog_alert_during_grace(
            started in 0u64..10_000,
            elapsed in 0u64..=100,
            last_frame in 0u64..20_000,
            silence_s in 0u64..60,
        ) {
            let resolver = AlertResolver::default();
            let snap = snapshot(ControlsLink {
                updated: false,
                last_frame,
                last_time_ns: 0,
                now_ns: silence_s * SEC,
            });
            prop_assert!(resolver.resolve(&snap, started, started + elapsed).is_empty());
        }
    }
}
