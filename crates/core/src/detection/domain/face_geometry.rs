//! 5-point face geometry: eyes, nose and mouth corners in source pixels.
//!
//! Detectors disagree on how they lay out the ten landmark values, so the
//! layout is named explicitly at construction and the stored points always
//! follow the semantic order `[left_eye, right_eye, nose, left_mouth, right_mouth]`.

use serde::{Deserialize, Serialize};

use crate::shared::constants::LANDMARK_VALUES;
use crate::shared::error::CoreError;

const LEFT_EYE: usize = 0;
const RIGHT_EYE: usize = 1;
const NOSE: usize = 2;
const LEFT_MOUTH: usize = 3;
const RIGHT_MOUTH: usize = 4;

/// Storage order of a raw 10-value landmark vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandmarkLayout {
    /// `[x0, y0, x1, y1, …, x4, y4]`.
    #[default]
    Interleaved,
    /// `[y0, …, y4, x0, …, x4]`, as emitted by the MTCNN graph.
    Planar,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FaceGeometry {
    points: [(f64, f64); 5],
}

impl FaceGeometry {
    /// Points in semantic order. A non-finite coordinate is reported at its
    /// interleaved index (`2·point` for x, `2·point + 1` for y).
    pub fn new(points: [(f64, f64); 5]) -> Result<Self, CoreError> {
        let bad = points.iter().enumerate().find_map(|(i, (x, y))| {
            if !x.is_finite() {
                Some(2 * i)
            } else if !y.is_finite() {
                Some(2 * i + 1)
            } else {
                None
            }
        });
        match bad {
            Some(index) => Err(CoreError::NonFiniteLandmark { index }),
            None => Ok(Self { points }),
        }
    }

    /// Validates an interleaved `[x, y]×5` vector.
    pub fn from_landmarks(values: &[f32]) -> Result<Self, CoreError> {
        Self::from_layout(values, LandmarkLayout::Interleaved)
    }

    pub fn from_layout(values: &[f32], layout: LandmarkLayout) -> Result<Self, CoreError> {
        if values.len() != LANDMARK_VALUES {
            return Err(CoreError::InvalidLandmarks {
                expected: LANDMARK_VALUES,
                actual: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(CoreError::NonFiniteLandmark { index });
        }

        let half = LANDMARK_VALUES / 2;
        let mut points = [(0.0, 0.0); 5];
        for (i, point) in points.iter_mut().enumerate() {
            let (x, y) = match layout {
                LandmarkLayout::Interleaved => (values[2 * i], values[2 * i + 1]),
                LandmarkLayout::Planar => (values[half + i], values[i]),
            };
            *point = (x as f64, y as f64);
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[(f64, f64); 5] {
        &self.points
    }

    /// Flattened back to the interleaved layout.
    pub fn to_landmarks(&self) -> [f32; LANDMARK_VALUES] {
        let mut out = [0.0; LANDMARK_VALUES];
        for (i, (x, y)) in self.points.iter().enumerate() {
            out[2 * i] = *x as f32;
            out[2 * i + 1] = *y as f32;
        }
        out
    }

    pub fn left_eye(&self) -> (f64, f64) {
        self.points[LEFT_EYE]
    }

    pub fn right_eye(&self) -> (f64, f64) {
        self.points[RIGHT_EYE]
    }

    pub fn nose(&self) -> (f64, f64) {
        self.points[NOSE]
    }

    pub fn left_mouth(&self) -> (f64, f64) {
        self.points[LEFT_MOUTH]
    }

    pub fn right_mouth(&self) -> (f64, f64) {
        self.points[RIGHT_MOUTH]
    }

    pub fn eyes_center(&self) -> (f64, f64) {
        let (x1, y1) = self.left_eye();
        let (x2, y2) = self.right_eye();
        ((x1 + x2) / 2.0, (y1 + y2) / 2.0)
    }

    /// Angle of the left→right eye line in radians; 0 when the eyes are level.
    pub fn inter_eye_angle(&self) -> f64 {
        let (dx, dy) = self.eye_delta();
        dy.atan2(dx)
    }

    pub fn inter_eye_distance(&self) -> f64 {
        let (dx, dy) = self.eye_delta();
        dx.hypot(dy)
    }

    fn eye_delta(&self) -> (f64, f64) {
        let (x1, y1) = self.left_eye();
        let (x2, y2) = self.right_eye();
        (x2 - x1, y2 - y1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;
    use std::f64::consts::FRAC_PI_4;

    fn frontal_landmarks() -> Vec<f32> {
        vec![
            440.0, 350.0, // left_eye
            560.0, 350.0, // right_eye
            500.0, 420.0, // nose
            460.0, 470.0, // left_mouth
            540.0, 470.0, // right_mouth
        ]
    }

    // ── Validation ──────────────────────────────────────────────────

    #[rstest]
    #[case::empty(0)]
    #[case::nine(9)]
    #[case::eleven(11)]
    #[case::sixty_eight_points(136)]
    fn test_wrong_length_is_invalid(#[case] len: usize) {
        let err = FaceGeometry::from_landmarks(&vec![1.0; len]).unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidLandmarks {
                expected: 10,
                actual: len
            }
        );
    }

    #[test]
    fn test_non_finite_value_is_rejected() {
        let mut values = frontal_landmarks();
        values[7] = f32::NAN;
        assert_eq!(
            FaceGeometry::from_landmarks(&values).unwrap_err(),
            CoreError::NonFiniteLandmark { index: 7 }
        );
    }

    #[rstest]
    #[case::nan_x(0, (f64::NAN, 20.0), 0)]
    #[case::nan_y(1, (10.0, f64::NAN), 3)]
    #[case::infinite_mouth(4, (f64::INFINITY, 20.0), 8)]
    fn test_new_rejects_non_finite_points(
        #[case] point: usize,
        #[case] value: (f64, f64),
        #[case] index: usize,
    ) {
        let mut points = [(10.0, 20.0); 5];
        points[point] = value;
        assert_eq!(
            FaceGeometry::new(points).unwrap_err(),
            CoreError::NonFiniteLandmark { index }
        );
    }

    // ── Layouts ─────────────────────────────────────────────────────

    #[test]
    fn test_interleaved_accessors() {
        let g = FaceGeometry::from_landmarks(&frontal_landmarks()).unwrap();
        assert_eq!(g.left_eye(), (440.0, 350.0));
        assert_eq!(g.right_eye(), (560.0, 350.0));
        assert_eq!(g.nose(), (500.0, 420.0));
        assert_eq!(g.left_mouth(), (460.0, 470.0));
        assert_eq!(g.right_mouth(), (540.0, 470.0));
    }

    #[test]
    fn test_planar_layout_matches_interleaved() {
        let planar = [
            350.0, 350.0, 420.0, 470.0, 470.0, // ys
            440.0, 560.0, 500.0, 460.0, 540.0, // xs
        ];
        let from_planar = FaceGeometry::from_layout(&planar, LandmarkLayout::Planar).unwrap();
        let from_interleaved = FaceGeometry::from_landmarks(&frontal_landmarks()).unwrap();
        assert_eq!(from_planar, from_interleaved);
    }

    #[test]
    fn test_to_landmarks_is_interleaved() {
        let g = FaceGeometry::from_landmarks(&frontal_landmarks()).unwrap();
        assert_eq!(g.to_landmarks().to_vec(), frontal_landmarks());
    }

    #[test]
    fn test_layout_deserializes_lowercase() {
        let layout: LandmarkLayout = serde_json::from_str("\"planar\"").unwrap();
        assert_eq!(layout, LandmarkLayout::Planar);
        assert_eq!(LandmarkLayout::default(), LandmarkLayout::Interleaved);
    }

    // ── Derived measurements ────────────────────────────────────────

    #[test]
    fn test_eyes_center_is_midpoint() {
        let g = FaceGeometry::from_landmarks(&frontal_landmarks()).unwrap();
        assert_eq!(g.eyes_center(), (500.0, 350.0));
    }

    #[test]
    fn test_level_eyes_have_zero_angle() {
        let g = FaceGeometry::from_landmarks(&frontal_landmarks()).unwrap();
        assert_relative_eq!(g.inter_eye_angle(), 0.0);
        assert_relative_eq!(g.inter_eye_distance(), 120.0);
    }

    #[test]
    fn test_tilted_eyes() {
        // Right eye 30px right and 30px lower than the left eye
        let g = FaceGeometry::new([
            (100.0, 100.0),
            (130.0, 130.0),
            (115.0, 140.0),
            (105.0, 160.0),
            (125.0, 160.0),
        ])
        .unwrap();
        assert_relative_eq!(g.inter_eye_angle(), FRAC_PI_4, epsilon = 1e-12);
        assert_relative_eq!(g.inter_eye_distance(), 30.0 * 2f64.sqrt(), epsilon = 1e-12);
        assert_eq!(g.eyes_center(), (115.0, 115.0));
    }

    #[test]
    fn test_coincident_eyes_have_zero_distance() {
        let g = FaceGeometry::new([(50.0, 50.0); 5]).unwrap();
        assert_relative_eq!(g.inter_eye_distance(), 0.0);
    }
}
