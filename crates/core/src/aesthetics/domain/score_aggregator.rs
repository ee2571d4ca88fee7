//! Expected-value reduction of a quality distribution.
//!
//! `score = Σ p[i]·(i + 1) / Σ p[i]`, computed in one pass. Bucket weights
//! are ranks, so the score always lies in `[1, N]`.

use crate::shared::error::CoreError;

use super::quality_distribution::QualityDistribution;
use super::score_config::ScoreConfig;

#[derive(Clone, Debug, Default)]
pub struct ScoreAggregator {
    config: ScoreConfig,
}

impl ScoreAggregator {
    pub fn new(config: ScoreConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    pub fn aggregate(&self, distribution: &QualityDistribution) -> Result<f64, CoreError> {
        self.aggregate_slice(distribution.as_slice())
    }

    pub fn aggregate_slice(&self, probabilities: &[f32]) -> Result<f64, CoreError> {
        if let Some(expected) = self.config.bucket_count {
            if probabilities.len() != expected {
                return Err(CoreError::BucketCountMismatch {
                    expected,
                    actual: probabilities.len(),
                });
            }
        }

        let mut mass = 0.0;
        let mut weighted = 0.0;
        for (index, &p) in probabilities.iter().enumerate() {
            let p = p as f64;
            if !p.is_finite() || p < 0.0 {
                return Err(CoreError::InvalidProbability { index, value: p });
            }
            mass += p;
            weighted += p * (index + 1) as f64;
        }

        if mass == 0.0 || mass < self.config.min_probability_mass {
            return Err(CoreError::ZeroProbabilityMass { mass });
        }
        Ok(weighted / mass)
    }
}
