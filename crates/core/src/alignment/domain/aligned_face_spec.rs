use crate::shared::affine_transform::AffineTransform;

/// What the resampler needs to produce one aligned crop.
///
/// `transform` maps source pixels to crop pixels; a resampler walks the
/// crop and pulls from `transform.inverse()`. No pixel data lives here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlignedFaceSpec {
    pub transform: AffineTransform,
    pub width: u32,
    pub height: u32,
}

impl AlignedFaceSpec {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether a destination pixel center lies inside the crop.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f64 && y < self.height as f64
    }
}
