//! Decoding of raw MTCNN graph outputs into validated detections.
//!
//! The graph returns three tensors per image: `prob` `[N]`, `landmarks`
//! `[N, 10]` and `box` `[N, 4]` with boxes as `(y0, x0, y1, x1)`.

use ndarray::{ArrayView1, ArrayView2};

use crate::detection::domain::face_detection::FaceDetection;
use crate::detection::domain::face_geometry::LandmarkLayout;
use crate::detection::domain::face_results::FaceResults;
use crate::shared::constants::LANDMARK_VALUES;
use crate::shared::error::CoreError;

pub fn decode_mtcnn_outputs(
    prob: ArrayView1<'_, f32>,
    landmarks: ArrayView2<'_, f32>,
    boxes: ArrayView2<'_, f32>,
    layout: LandmarkLayout,
) -> Result<FaceResults, CoreError> {
    let n = prob.len();
    if landmarks.nrows() != n || boxes.nrows() != n {
        return Err(CoreError::ShapeMismatch(format!(
            "{n} probabilities but {} landmark rows and {} box rows",
            landmarks.nrows(),
            boxes.nrows()
        )));
    }
    if boxes.ncols() != 4 {
        return Err(CoreError::ShapeMismatch(format!(
            "box rows need 4 values, got {}",
            boxes.ncols()
        )));
    }
    if landmarks.ncols() != LANDMARK_VALUES {
        return Err(CoreError::InvalidLandmarks {
            expected: LANDMARK_VALUES,
            actual: landmarks.ncols(),
        });
    }

    let mut faces = Vec::with_capacity(n);
    for ((p, lm_row), box_row) in prob.iter().zip(landmarks.rows()).zip(boxes.rows()) {
        let lm: Vec<f32> = lm_row.iter().copied().collect();
        let bbox = [box_row[0], box_row[1], box_row[2], box_row[3]];
        faces.push(FaceDetection::from_raw(*p, bbox, &lm, layout)?);
    }

    log::debug!("Decoded {} faces from MTCNN outputs", faces.len());
    Ok(FaceResults::new(faces))
}
