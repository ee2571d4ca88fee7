use serde::{Deserialize, Serialize};

use crate::shared::constants::{MTCNN_MIN_SIZE, MTCNN_SCALE_FACTOR, MTCNN_SCORE_THRESHOLDS};
use crate::shared::error::CoreError;

/// Tuning values for a cascaded (MTCNN-style) detection engine.
///
/// A standalone, serializable config: the core only supplies defaults and
/// validation. Nothing in this crate consumes it; a
/// [`FaceDetector`](super::face_detector::FaceDetector) implementation that
/// wraps such an engine takes it at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorOptions {
    /// Smallest face edge searched for, in pixels.
    pub min_size: f32,
    /// Image pyramid downscale per level, in `(0, 1)`.
    pub scale_factor: f32,
    /// One score threshold per cascade stage.
    pub score_thresholds: Vec<f32>,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            min_size: MTCNN_MIN_SIZE,
            scale_factor: MTCNN_SCALE_FACTOR,
            score_thresholds: MTCNN_SCORE_THRESHOLDS.to_vec(),
        }
    }
}

impl DetectorOptions {
    /// Overrides only the values that are set: non-positive numbers and
    /// `None` keep the current setting.
    pub fn configure(
        mut self,
        scale_factor: f32,
        min_size: f32,
        score_thresholds: Option<Vec<f32>>,
    ) -> Self {
        if scale_factor > 0.0 {
            self.scale_factor = scale_factor;
        }
        if min_size > 0.0 {
            self.min_size = min_size;
        }
        if let Some(thresholds) = score_thresholds {
            self.score_thresholds = thresholds;
        }
        self
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if !(self.scale_factor > 0.0 && self.scale_factor < 1.0) {
            return Err(CoreError::InvalidConfiguration(format!(
                "scale_factor must be in (0, 1), got {}",
                self.scale_factor
            )));
        }
        if !(self.min_size.is_finite() && self.min_size > 0.0) {
            return Err(CoreError::InvalidConfiguration(format!(
                "min_size must be positive, got {}",
                self.min_size
            )));
        }
        if self.score_thresholds.is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "score_thresholds must not be empty".into(),
            ));
        }
        if let Some(t) = self
            .score_thresholds
            .iter()
            .find(|t| !(0.0..=1.0).contains(*t))
        {
            return Err(CoreError::InvalidConfiguration(format!(
                "score threshold {t} is outside [0, 1]"
            )));
        }
        Ok(())
    }

    /// Threshold of the last cascade stage, which gates the emitted faces.
    pub fn final_threshold(&self) -> f32 {
        self.score_thresholds.last().copied().unwrap_or(0.0)
    }
}
