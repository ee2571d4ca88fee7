//! Similarity alignment from eye landmarks.
//!
//! Rotates about the eye midpoint until the eye line is level, scales so the
//! eyes sit a configured distance apart, then moves the midpoint to the crop's
//! eye anchor `(width / 2, height · desired_left_eye_y)`.

use crate::detection::domain::face_detection::FaceDetection;
use crate::detection::domain::face_geometry::FaceGeometry;
use crate::shared::affine_transform::AffineTransform;
use crate::shared::error::CoreError;

use super::aligned_face_spec::AlignedFaceSpec;
use super::alignment_config::AlignmentConfig;

#[derive(Clone, Debug, Default)]
pub struct GeometricAligner {
    config: AlignmentConfig,
}

impl GeometricAligner {
    pub fn new(config: AlignmentConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AlignmentConfig {
        &self.config
    }

    pub fn align(
        &self,
        geometry: &FaceGeometry,
        width: u32,
        height: u32,
    ) -> Result<AlignedFaceSpec, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height });
        }

        let angle = geometry.inter_eye_angle();
        let dist = geometry.inter_eye_distance();
        if !dist.is_finite() || dist == 0.0 || dist < self.config.min_eye_distance {
            return Err(CoreError::DegenerateEyeDistance { distance: dist });
        }

        let scale = self.config.desired_eye_distance(width) / dist;
        let (cx, cy) = geometry.eyes_center();
        let target_x = width as f64 * 0.5;
        let target_y = height as f64 * self.config.desired_left_eye_y;

        let transform = AffineTransform::rotation_scale_2d(cx, cy, angle, scale)
            .adjust_translation(target_x - cx, target_y - cy);

        log::debug!(
            "Aligned face: angle={angle:.4} rad, scale={scale:.4}, crop={width}x{height}"
        );

        Ok(AlignedFaceSpec {
            transform,
            width,
            height,
        })
    }

    pub fn align_detection(
        &self,
        detection: &FaceDetection,
        width: u32,
        height: u32,
    ) -> Result<AlignedFaceSpec, CoreError> {
        self.align(detection.geometry(), width, height)
    }
}
