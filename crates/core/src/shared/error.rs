use thiserror::Error;

/// Value-level failures of the geometry and scoring core.
///
/// Every variant is reported to the caller as-is; nothing is coerced to
/// NaN or zero and nothing is retried.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("expected {expected} landmark values, got {actual}")]
    InvalidLandmarks { expected: usize, actual: usize },
    #[error("landmark value at index {index} is not finite")]
    NonFiniteLandmark { index: usize },
    #[error("eye distance {distance} is too small to derive a scale")]
    DegenerateEyeDistance { distance: f64 },
    #[error("crop dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("probability mass {mass} is too small to normalize")]
    ZeroProbabilityMass { mass: f64 },
    #[error("bucket {index} has invalid probability {value}")]
    InvalidProbability { index: usize, value: f64 },
    #[error("detection probability {value} is outside [0, 1]")]
    ProbabilityOutOfRange { value: f64 },
    #[error("expected {expected} quality buckets, got {actual}")]
    BucketCountMismatch { expected: usize, actual: usize },
    #[error("bounding box ({y0}, {x0}, {y1}, {x1}) is inverted or not finite")]
    InvalidBoundingBox { y0: f32, x0: f32, y1: f32, x1: f32 },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("transform with determinant {determinant} is not invertible")]
    SingularTransform { determinant: f64 },
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_values() {
        let err = CoreError::InvalidLandmarks {
            expected: 10,
            actual: 9,
        };
        assert_eq!(err.to_string(), "expected 10 landmark values, got 9");

        let err = CoreError::InvalidDimensions {
            width: 0,
            height: 128,
        };
        assert_eq!(err.to_string(), "crop dimensions must be positive, got 0x128");
    }

    #[test]
    fn test_is_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::ZeroProbabilityMass { mass: 0.0 });
        assert!(err.to_string().contains("probability mass"));
    }
}
