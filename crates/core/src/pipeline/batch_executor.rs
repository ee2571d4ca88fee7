use std::path::{Path, PathBuf};

use crate::alignment::domain::aligned_face_spec::AlignedFaceSpec;
use crate::alignment::domain::geometric_aligner::GeometricAligner;
use crate::detection::domain::face_detection::FaceDetection;
use crate::detection::infrastructure::json_detection_reader::read_detections;
use crate::shared::error::CoreError;
use crate::shared::json_file::RecordError;

/// Crop size and filtering shared by every file of a batch run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BatchConfig {
    pub width: u32,
    pub height: u32,
    pub min_probability: f32,
}

/// A detection paired with its alignment outcome.
#[derive(Debug)]
pub struct AlignedDetection {
    pub detection: FaceDetection,
    pub spec: Result<AlignedFaceSpec, CoreError>,
}

/// Outcome for one detection file. A file that cannot be read or parsed
/// does not stop the rest of the batch.
#[derive(Debug)]
pub struct BatchItem {
    pub path: PathBuf,
    pub faces: Result<Vec<AlignedDetection>, RecordError>,
}

/// Abstracts how a batch of detection files is aligned.
///
/// This is a port (application-layer interface). Infrastructure provides
/// concrete implementations (e.g. threaded, sequential). Items come back in
/// input order regardless of how the work was scheduled.
pub trait BatchExecutor: Send {
    fn execute(
        &self,
        paths: &[PathBuf],
        aligner: &GeometricAligner,
        config: BatchConfig,
    ) -> Result<Vec<BatchItem>, Box<dyn std::error::Error>>;
}

/// Reads one detection file and aligns every face above the threshold.
pub fn align_record_file(path: &Path, aligner: &GeometricAligner, config: BatchConfig) -> BatchItem {
    let faces = read_detections(path).map(|results| {
        let results = results.above(config.min_probability);
        let specs = results.align_all(aligner, config.width, config.height);
        results
            .into_iter()
            .zip(specs)
            .map(|(detection, spec)| AlignedDetection { detection, spec })
            .collect()
    });
    BatchItem {
        path: path.to_path_buf(),
        faces,
    }
}

/// Runs every file on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialBatchExecutor;

impl BatchExecutor for SequentialBatchExecutor {
    fn execute(
        &self,
        paths: &[PathBuf],
        aligner: &GeometricAligner,
        config: BatchConfig,
    ) -> Result<Vec<BatchItem>, Box<dyn std::error::Error>> {
        Ok(paths
            .iter()
            .map(|path| align_record_file(path, aligner, config))
            .collect())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Level eyes 40px apart at y=40, optionally with a second face whose
    /// eyes coincide.
    pub fn write_records(dir: &Path, name: &str, probability: f32, degenerate: bool) -> PathBuf {
        let good = format!(
            r#"{{ "probability": {probability}, "bbox": [20, 20, 90, 80],
                 "landmarks": [30, 40, 70, 40, 50, 55, 35, 70, 65, 70] }}"#
        );
        let bad = r#"{ "probability": 0.9, "bbox": [20, 20, 90, 80],
                 "landmarks": [50, 40, 50, 40, 50, 55, 35, 70, 65, 70] }"#;
        let body = if degenerate {
            format!("[{good}, {bad}]")
        } else {
            format!("[{good}]")
        };
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }
}
