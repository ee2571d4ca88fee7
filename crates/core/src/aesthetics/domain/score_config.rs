use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::shared::constants::{DEFAULT_MIN_PROBABILITY_MASS, NIMA_BUCKET_COUNT};
use crate::shared::error::CoreError;
use crate::shared::json_file::{read_json, RecordError};

/// Scoring parameters.
///
/// `bucket_count: None` (the default, `null` in JSON) accepts distributions
/// of any length. Set it to pin the length a specific engine emits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub bucket_count: Option<usize>,
    pub min_probability_mass: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            bucket_count: None,
            min_probability_mass: DEFAULT_MIN_PROBABILITY_MASS,
        }
    }
}

impl ScoreConfig {
    /// Rejects anything but the 10 buckets of a NIMA head.
    pub fn nima() -> Self {
        Self {
            bucket_count: Some(NIMA_BUCKET_COUNT),
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<Self, RecordError> {
        let config: Self = read_json(path)?;
        config.validate().map_err(|e| RecordError::Config {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.bucket_count == Some(0) {
            return Err(CoreError::InvalidConfiguration(
                "bucket_count must be at least 1".into(),
            ));
        }
        let m = self.min_probability_mass;
        if m.is_nan() || m < 0.0 {
            return Err(CoreError::InvalidConfiguration(format!(
                "min_probability_mass must be non-negative, got {m}"
            )));
        }
        Ok(())
    }
}
