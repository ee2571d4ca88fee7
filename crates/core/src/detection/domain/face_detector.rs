use crate::shared::image_tensor::ImageTensor;

use super::face_detection::FaceDetection;

/// Domain interface for face detection engines.
///
/// Implementations own their inference session and release it on drop.
/// `&mut self` lets a runtime that is not re-entrant be driven safely: the
/// borrow checker serializes calls for the caller.
pub trait FaceDetector: Send {
    fn detect(
        &mut self,
        image: &ImageTensor,
    ) -> Result<Vec<FaceDetection>, Box<dyn std::error::Error>>;
}
