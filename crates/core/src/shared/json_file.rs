use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::error::CoreError;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid record {index} in {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        index: usize,
        #[source]
        source: CoreError,
    },
    #[error("invalid contents of {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: CoreError,
    },
}

/// Reads and deserializes a whole JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, RecordError> {
    let text = fs::read_to_string(path).map_err(|e| RecordError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| RecordError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_json_parses_document() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("values.json");
        fs::write(&path, "[1.0, 2.5]").unwrap();
        let values: Vec<f32> = read_json(&path).unwrap();
        assert_eq!(values, vec![1.0, 2.5]);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let result: Result<Vec<f32>, _> = read_json(&tmp.path().join("missing.json"));
        assert!(matches!(result, Err(RecordError::Read { .. })));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        let result: Result<Vec<f32>, _> = read_json(&path);
        let err = result.unwrap_err();
        assert!(matches!(err, RecordError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
