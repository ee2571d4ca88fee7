use std::fmt;

use crate::shared::error::CoreError;

use super::face_geometry::{FaceGeometry, LandmarkLayout};

/// Face bounding box in source pixels, stored `(y0, x0, y1, x1)` as the
/// detection graph emits it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub y0: f32,
    pub x0: f32,
    pub y1: f32,
    pub x1: f32,
}

impl BoundingBox {
    pub fn from_yxyx(values: [f32; 4]) -> Result<Self, CoreError> {
        let [y0, x0, y1, x1] = values;
        let finite = values.iter().all(|v| v.is_finite());
        if !finite || y1 < y0 || x1 < x0 {
            return Err(CoreError::InvalidBoundingBox { y0, x0, y1, x1 });
        }
        Ok(Self { y0, x0, y1, x1 })
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    pub fn center(&self) -> (f32, f32) {
        ((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    pub fn to_yxyx(&self) -> [f32; 4] {
        [self.y0, self.x0, self.y1, self.x1]
    }
}

/// One detected face. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceDetection {
    probability: f32,
    bbox: BoundingBox,
    geometry: FaceGeometry,
}

impl FaceDetection {
    pub fn new(probability: f32, bbox: BoundingBox, geometry: FaceGeometry) -> Result<Self, CoreError> {
        if !(0.0..=1.0).contains(&probability) {
            return Err(CoreError::ProbabilityOutOfRange {
                value: probability as f64,
            });
        }
        Ok(Self {
            probability,
            bbox,
            geometry,
        })
    }

    /// Builds a detection from raw engine values, validating every field.
    pub fn from_raw(
        probability: f32,
        bbox: [f32; 4],
        landmarks: &[f32],
        layout: LandmarkLayout,
    ) -> Result<Self, CoreError> {
        let bbox = BoundingBox::from_yxyx(bbox)?;
        let geometry = FaceGeometry::from_layout(landmarks, layout)?;
        Self::new(probability, bbox, geometry)
    }

    pub fn probability(&self) -> f32 {
        self.probability
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn geometry(&self) -> &FaceGeometry {
        &self.geometry
    }
}

impl fmt::Display for FaceDetection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Probability: {:.4} \t Angle: {:.4}",
            self.probability,
            self.geometry.inter_eye_angle()
        )
    }
}
