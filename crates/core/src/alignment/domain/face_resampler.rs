use crate::shared::image_tensor::ImageTensor;

use super::aligned_face_spec::AlignedFaceSpec;

/// Domain interface for producing an aligned crop from a source image.
///
/// Implementations must return a tensor of exactly `spec.width × spec.height`
/// and sample by inverting `spec.transform` per destination pixel. The
/// interpolation kernel is theirs to choose.
pub trait FaceResampler: Send {
    fn resample(
        &self,
        image: &ImageTensor,
        spec: &AlignedFaceSpec,
    ) -> Result<ImageTensor, Box<dyn std::error::Error>>;
}
