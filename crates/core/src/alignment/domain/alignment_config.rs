use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::shared::constants::{
    DEFAULT_DESIRED_LEFT_EYE_X, DEFAULT_DESIRED_LEFT_EYE_Y, DEFAULT_MIN_EYE_DISTANCE,
};
use crate::shared::error::CoreError;
use crate::shared::json_file::{read_json, RecordError};

/// Where the eyes should land in the output crop.
///
/// The right eye mirrors the left one about the vertical center line, so a
/// single `(x, y)` pair describes both.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    pub desired_left_eye_x: f64,
    pub desired_left_eye_y: f64,
    pub min_eye_distance: f64,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            desired_left_eye_x: DEFAULT_DESIRED_LEFT_EYE_X,
            desired_left_eye_y: DEFAULT_DESIRED_LEFT_EYE_Y,
            min_eye_distance: DEFAULT_MIN_EYE_DISTANCE,
        }
    }
}

impl AlignmentConfig {
    /// Loads a JSON config; missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, RecordError> {
        let config: Self = read_json(path)?;
        config.validate().map_err(|e| RecordError::Config {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let x = self.desired_left_eye_x;
        if !(x > 0.0 && x < 0.5) {
            return Err(CoreError::InvalidConfiguration(format!(
                "desired_left_eye_x must be in (0, 0.5), got {x}"
            )));
        }
        let y = self.desired_left_eye_y;
        if !(0.0..=1.0).contains(&y) {
            return Err(CoreError::InvalidConfiguration(format!(
                "desired_left_eye_y must be in [0, 1], got {y}"
            )));
        }
        if self.min_eye_distance.is_nan() || self.min_eye_distance < 0.0 {
            return Err(CoreError::InvalidConfiguration(format!(
                "min_eye_distance must be non-negative, got {}",
                self.min_eye_distance
            )));
        }
        Ok(())
    }

    /// Eye separation in the output crop, in pixels.
    pub fn desired_eye_distance(&self, width: u32) -> f64 {
        (1.0 - 2.0 * self.desired_left_eye_x) * width as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AlignmentConfig::default();
        assert_relative_eq!(config.desired_left_eye_x, 0.33);
        assert_relative_eq!(config.desired_left_eye_y, 0.30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_desired_eye_distance() {
        let config = AlignmentConfig::default();
        assert_relative_eq!(config.desired_eye_distance(128), 43.52, epsilon = 1e-9);
    }

    #[rstest]
    #[case::x_zero(0.0, 0.3)]
    #[case::x_half(0.5, 0.3)]
    #[case::x_negative(-0.1, 0.3)]
    #[case::x_nan(f64::NAN, 0.3)]
    #[case::y_above_one(0.33, 1.2)]
    #[case::y_negative(0.33, -0.01)]
    fn test_out_of_range_is_rejected(#[case] x: f64, #[case] y: f64) {
        let config = AlignmentConfig {
            desired_left_eye_x: x,
            desired_left_eye_y: y,
            ..AlignmentConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_boundary_y_values_are_valid() {
        for y in [0.0, 1.0] {
            let config = AlignmentConfig {
                desired_left_eye_y: y,
                ..AlignmentConfig::default()
            };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_load_fills_missing_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("align.json");
        fs::write(&path, r#"{ "desired_left_eye_x": 0.35 }"#).unwrap();
        let config = AlignmentConfig::load(&path).unwrap();
        assert_relative_eq!(config.desired_left_eye_x, 0.35);
        assert_relative_eq!(config.desired_left_eye_y, DEFAULT_DESIRED_LEFT_EYE_Y);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("align.json");
        fs::write(&path, r#"{ "desired_left_eye_x": 0.7 }"#).unwrap();
        assert!(matches!(
            AlignmentConfig::load(&path),
            Err(RecordError::Config { .. })
        ));
    }
}
