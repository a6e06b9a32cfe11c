//! Dataset file loaders
//!
//! Both source datasets are required inputs: a missing file or a malformed
//! top-level document aborts the merge before any output is written.

use crate::core::{PrimaryDataset, SecondaryDataset};
use crate::{CatalogError, Result};
use std::fs;
use std::path::Path;

/// Load the primary (stats/mechanics) dataset: `{"data": [...]}`
pub fn load_primary(path: &Path) -> Result<PrimaryDataset> {
    let content = read_required(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load the secondary (localized-text) dataset: a mapping whose wrapper keys
/// are discarded downstream
pub fn load_secondary(path: &Path) -> Result<SecondaryDataset> {
    let content = read_required(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn read_required(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CatalogError::MissingInput(path.to_path_buf()));
    }
    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_fatal() {
        let err = load_primary(Path::new("/nonexistent/json1.json")).unwrap_err();
        assert!(matches!(err, CatalogError::MissingInput(_)));
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("json1.json");
        fs::write(&path, "{not json").unwrap();
        let err = load_primary(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn test_primary_without_data_key_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("json1.json");
        fs::write(&path, "{}").unwrap();
        let dataset = load_primary(&path).unwrap();
        assert!(dataset.data.is_empty());
    }
}
