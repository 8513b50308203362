//! Valid ranges for sensor readings
//!
//! Values outside their range are treated as "not available" by the HUD: the
//! corresponding element is suppressed, never reported as a failure.

use serde::{Deserialize, Serialize};

use crate::StateError;

/// Valid ranges for displayed sensor readings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorRanges {
    /// GPS horizontal accuracy with a usable fix (m)
    pub gps_accuracy: (f32, f32),
    /// Tire pressure a sensor can plausibly report (psi)
    pub tire_pressure: (f32, f32),
}

impl Default for SensorRanges {
    fn default() -> Self {
        Self {
            gps_accuracy: (0.01, 20.0),
            tire_pressure: (5.0, 60.0),
        }
    }
}

impl SensorRanges {
    /// Validate a single value against a range (inclusive)
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f32,
        range: (f32, f32),
    ) -> Result<f32, StateError> {
        if value < range.0 || value > range.1 {
            Err(StateError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(value)
        }
    }

    pub fn gps_accuracy(&self, accuracy: f32) -> Result<f32, StateError> {
        self.validate_range("gps_accuracy", accuracy, self.gps_accuracy)
    }

    pub fn tire_pressure(&self, psi: f32) -> Result<f32, StateError> {
        self.validate_range("tire_pressure", psi, self.tire_pressure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gps_accuracy_range() {
        let ranges = SensorRanges::default();
        assert!(ranges.gps_accuracy(0.01).is_ok());
        assert!(ranges.gps_accuracy(5.0).is_ok());
        assert!(ranges.gps_accuracy(20.0).is_ok());
        assert!(ranges.gps_accuracy(0.0).is_err());
        assert!(ranges.gps_accuracy(20.5).is_err());
    }

    #[test]
    fn test_tire_pressure_range() {
        let ranges = SensorRanges::default();
        assert_eq!(ranges.tire_pressure(35.0), Ok(35.0));
        assert_eq!(
            ranges.tire_pressure(3.0),
            Err(StateError::OutOfRange {
                field: "tire_pressure",
                value: 3.0,
                min: 5.0,
                max: 60.0,
            })
        );
        assert!(ranges.tire_pressure(61.0).is_err());
    }
}
