use std::fmt;

use crate::alignment::domain::aligned_face_spec::AlignedFaceSpec;
use crate::alignment::domain::geometric_aligner::GeometricAligner;
use crate::shared::error::CoreError;

use super::face_detection::FaceDetection;

/// All faces found in one image, in engine order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FaceResults {
    faces: Vec<FaceDetection>,
}

impl FaceResults {
    pub fn new(faces: Vec<FaceDetection>) -> Self {
        Self { faces }
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FaceDetection> {
        self.faces.iter()
    }

    pub fn as_slice(&self) -> &[FaceDetection] {
        &self.faces
    }

    /// Faces at or above `min_probability`, order preserved.
    pub fn above(&self, min_probability: f32) -> Self {
        Self::new(
            self.faces
                .iter()
                .filter(|f| f.probability() >= min_probability)
                .cloned()
                .collect(),
        )
    }

    /// Most confident first. Ties keep engine order.
    pub fn sorted_by_probability(&self) -> Self {
        let mut faces = self.faces.clone();
        faces.sort_by(|a, b| b.probability().total_cmp(&a.probability()));
        Self::new(faces)
    }

    pub fn best(&self) -> Option<&FaceDetection> {
        self.faces
            .iter()
            .reduce(|best, f| if f.probability() > best.probability() { f } else { best })
    }

    /// One alignment per face, same order. A degenerate face fails alone
    /// without affecting the others.
    pub fn align_all(
        &self,
        aligner: &GeometricAligner,
        width: u32,
        height: u32,
    ) -> Vec<Result<AlignedFaceSpec, CoreError>> {
        self.faces
            .iter()
            .map(|f| aligner.align_detection(f, width, height))
            .collect()
    }
}

impl From<Vec<FaceDetection>> for FaceResults {
    fn from(faces: Vec<FaceDetection>) -> Self {
        Self::new(faces)
    }
}

impl IntoIterator for FaceResults {
    type Item = FaceDetection;
    type IntoIter = std::vec::IntoIter<FaceDetection>;

    fn into_iter(self) -> Self::IntoIter {
        self.faces.into_iter()
    }
}

impl<'a> IntoIterator for &'a FaceResults {
    type Item = &'a FaceDetection;
    type IntoIter = std::slice::Iter<'a, FaceDetection>;

    fn into_iter(self) -> Self::IntoIter {
        self.faces.iter()
    }
}

impl fmt::Display for FaceResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for face in &self.faces {
            writeln!(f, "{face}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::face_geometry::LandmarkLayout;

    fn face(probability: f32, left_eye_x: f32) -> FaceDetection {
        FaceDetection::from_raw(
            probability,
            [0.0, 0.0, 100.0, 100.0],
            &[
                left_eye_x, 40.0, 70.0, 40.0, 50.0, 55.0, 35.0, 70.0, 65.0, 70.0,
            ],
            LandmarkLayout::Interleaved,
        )
        .unwrap()
    }

    fn results() -> FaceResults {
        FaceResults::new(vec![face(0.7, 30.0), face(0.95, 20.0), face(0.4, 10.0)])
    }

    #[test]
    fn test_above_filters_and_keeps_order() {
        let kept = results().above(0.5);
        assert_eq!(kept.len(), 2);
        let probs: Vec<f32> = kept.iter().map(|f| f.probability()).collect();
        assert_eq!(probs, vec![0.7, 0.95]);
    }

    #[test]
    fn test_above_threshold_is_inclusive() {
        assert_eq!(results().above(0.7).len(), 2);
    }

    #[test]
    fn test_sorted_by_probability() {
        let sorted = results().sorted_by_probability();
        let probs: Vec<f32> = sorted.iter().map(|f| f.probability()).collect();
        assert_eq!(probs, vec![0.95, 0.7, 0.4]);
    }

    #[test]
    fn test_best() {
        assert_eq!(results().best().unwrap().probability(), 0.95);
        assert!(FaceResults::default().best().is_none());
    }

    #[test]
    fn test_align_all_isolates_degenerate_faces() {
        // Second face has both eyes at x=70
        let faces = FaceResults::new(vec![face(0.9, 30.0), face(0.9, 70.0)]);
        let specs = faces.align_all(&GeometricAligner::default(), 128, 128);
        assert_eq!(specs.len(), 2);
        assert!(specs[0].is_ok());
        assert!(matches!(
            specs[1],
            Err(CoreError::DegenerateEyeDistance { .. })
        ));
    }

    #[test]
    fn test_display_one_line_per_face() {
        let text = results().to_string();
        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("Probability: 0.7000"));
    }

    #[test]
    fn test_into_iter() {
        let owned: Vec<FaceDetection> = results().into_iter().collect();
        assert_eq!(owned.len(), 3);
        let borrowed = results();
        assert_eq!((&borrowed).into_iter().count(), 3);
    }
}
