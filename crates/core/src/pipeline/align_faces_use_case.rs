use std::time::Instant;

use crate::alignment::domain::aligned_face_spec::AlignedFaceSpec;
use crate::alignment::domain::face_resampler::FaceResampler;
use crate::alignment::domain::geometric_aligner::GeometricAligner;
use crate::detection::domain::face_detection::FaceDetection;
use crate::detection::domain::face_detector::FaceDetector;
use crate::detection::domain::face_results::FaceResults;
use crate::shared::image_tensor::ImageTensor;

/// One aligned crop together with the detection and transform behind it.
#[derive(Clone, Debug)]
pub struct AlignedFace {
    pub detection: FaceDetection,
    pub spec: AlignedFaceSpec,
    pub crop: ImageTensor,
}

/// Single-image alignment pipeline: detect → filter → align → resample.
pub struct AlignFacesUseCase {
    detector: Box<dyn FaceDetector>,
    resampler: Box<dyn FaceResampler>,
    aligner: GeometricAligner,
    crop_width: u32,
    crop_height: u32,
    min_probability: f32,
}

impl AlignFacesUseCase {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        resampler: Box<dyn FaceResampler>,
        aligner: GeometricAligner,
        crop_width: u32,
        crop_height: u32,
        min_probability: f32,
    ) -> Self {
        Self {
            detector,
            resampler,
            aligner,
            crop_width,
            crop_height,
            min_probability,
        }
    }

    /// Detects faces and returns one aligned crop per usable face.
    ///
    /// Faces whose geometry cannot be aligned are skipped with a warning.
    /// Detector and resampler errors abort the run unchanged.
    pub fn execute(
        &mut self,
        image: &ImageTensor,
    ) -> Result<Vec<AlignedFace>, Box<dyn std::error::Error>> {
        let start = Instant::now();
        let faces = FaceResults::new(self.detector.detect(image)?).above(self.min_probability);
        log::debug!(
            "Detected {} faces in {:.1}ms",
            faces.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        let mut aligned = Vec::with_capacity(faces.len());
        for (detection, spec) in faces
            .iter()
            .zip(faces.align_all(&self.aligner, self.crop_width, self.crop_height))
        {
            let spec = match spec {
                Ok(spec) => spec,
                Err(e) => {
                    log::warn!("Skipping face ({detection}): {e}");
                    continue;
                }
            };

            let crop = self.resampler.resample(image, &spec)?;
            if crop.dimensions() != spec.dimensions() {
                return Err(format!(
                    "Resampler returned {}x{} crop, expected {}x{}",
                    crop.width(),
                    crop.height(),
                    spec.width,
                    spec.height
                )
                .into());
            }

            aligned.push(AlignedFace {
                detection: detection.clone(),
                spec,
                crop,
            });
        }

        log::info!(
            "Aligned {} of {} faces in {:.1}ms",
            aligned.len(),
            faces.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(aligned)
    }
}
