use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detection::domain::face_detection::FaceDetection;
use crate::detection::domain::face_geometry::LandmarkLayout;
use crate::detection::domain::face_results::FaceResults;
use crate::shared::error::CoreError;
use crate::shared::json_file::{read_json, RecordError};

/// One face as a detection engine serializes it.
///
/// ```json
/// { "probability": 0.99, "bbox": [y0, x0, y1, x1], "landmarks": [10 values], "layout": "planar" }
/// ```
///
/// `layout` is optional and defaults to interleaved `(x, y)` pairs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    pub probability: f32,
    pub bbox: [f32; 4],
    pub landmarks: Vec<f32>,
    #[serde(default)]
    pub layout: LandmarkLayout,
}

impl TryFrom<&DetectionRecord> for FaceDetection {
    type Error = CoreError;

    fn try_from(record: &DetectionRecord) -> Result<Self, Self::Error> {
        FaceDetection::from_raw(
            record.probability,
            record.bbox,
            &record.landmarks,
            record.layout,
        )
    }
}

/// Reads a JSON array of [`DetectionRecord`]s and validates every entry.
///
/// The first invalid record fails the whole file; its index is reported.
pub fn read_detections(path: &Path) -> Result<FaceResults, RecordError> {
    let records: Vec<DetectionRecord> = read_json(path)?;
    let faces = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            FaceDetection::try_from(record).map_err(|e| RecordError::Invalid {
                path: path.to_path_buf(),
                index,
                source: e,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("Read {} detections from {}", faces.len(), path.display());
    Ok(FaceResults::new(faces))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(tmp: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = tmp.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_reads_interleaved_and_planar_records() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            &tmp,
            "faces.json",
            r#"[
                {"probability": 0.99, "bbox": [10, 20, 90, 80],
                 "landmarks": [30, 40, 70, 40, 50, 55, 35, 70, 65, 70]},
                {"probability": 0.8, "bbox": [10, 20, 90, 80], "layout": "planar",
                 "landmarks": [40, 40, 55, 70, 70, 30, 70, 50, 35, 65]}
            ]"#,
        );
        let faces = read_detections(&path).unwrap();
        assert_eq!(faces.len(), 2);
        assert_eq!(faces.as_slice()[0].geometry(), faces.as_slice()[1].geometry());
    }

    #[test]
    fn test_invalid_record_reports_index() {
        let tmp = TempDir::new().unwrap();
        let path = write(
            &tmp,
            "faces.json",
            r#"[
                {"probability": 0.9, "bbox": [0, 0, 10, 10],
                 "landmarks": [1, 1, 5, 1, 3, 3, 2, 5, 4, 5]},
                {"probability": 0.9, "bbox": [0, 0, 10, 10],
                 "landmarks": [1, 1, 5, 1, 3, 3, 2, 5, 4]}
            ]"#,
        );
        let err = read_detections(&path).unwrap_err();
        match err {
            RecordError::Invalid { index, source, .. } => {
                assert_eq!(index, 1);
                assert!(matches!(source, CoreError::InvalidLandmarks { actual: 9, .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_array_is_no_faces() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "none.json", "[]");
        assert!(read_detections(&path).unwrap().is_empty());
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let record = DetectionRecord {
            probability: 0.5,
            bbox: [1.0, 2.0, 3.0, 4.0],
            landmarks: vec![0.0; 10],
            layout: LandmarkLayout::Planar,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"planar\""));
        let back: DetectionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
