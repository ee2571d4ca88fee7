/// Target horizontal position of the left eye, as a fraction of crop width.
pub const DEFAULT_DESIRED_LEFT_EYE_X: f64 = 0.33;

/// Target vertical position of both eyes, as a fraction of crop height.
pub const DEFAULT_DESIRED_LEFT_EYE_Y: f64 = 0.30;

/// Eye separations below this (in source pixels) cannot yield a scale.
pub const DEFAULT_MIN_EYE_DISTANCE: f64 = 1e-6;

/// Side length of the square crop produced when no size is given.
pub const DEFAULT_CROP_SIZE: u32 = 256;

/// Five `(x, y)` landmark pairs.
pub const LANDMARK_VALUES: usize = 10;

/// Number of quality buckets emitted by the NIMA aesthetics head.
pub const NIMA_BUCKET_COUNT: usize = 10;

/// Probability mass below this is treated as an empty distribution.
pub const DEFAULT_MIN_PROBABILITY_MASS: f64 = 1e-9;

/// Determinants below this make a transform non-invertible.
pub const SINGULAR_DETERMINANT_EPS: f64 = 1e-12;

/// MTCNN pyramid defaults: smallest face edge in pixels.
pub const MTCNN_MIN_SIZE: f32 = 30.0;

/// MTCNN pyramid defaults: per-level downscale factor.
pub const MTCNN_SCALE_FACTOR: f32 = 0.709;

/// MTCNN per-stage score thresholds (P-Net, R-Net, O-Net).
pub const MTCNN_SCORE_THRESHOLDS: [f32; 3] = [0.6, 0.7, 0.8];
