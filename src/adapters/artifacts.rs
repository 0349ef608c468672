use crate::adapters::models::{EstimatorArtifact, ScalerArtifact};
use crate::domain::model::ReferenceColumns;
use crate::domain::ports::{ConfigProvider, Scaler, Storage};
use crate::utils::error::{EstimatorError, Result};
use serde::de::DeserializeOwned;

/// Everything the predictor needs, loaded once at startup.
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub estimator: EstimatorArtifact,
    pub scaler: ScalerArtifact,
    pub columns: ReferenceColumns,
}

impl ModelArtifacts {
    pub fn load<S: Storage, C: ConfigProvider>(storage: &S, config: &C) -> Result<Self> {
        let names: Vec<String> =
            load_json(storage, "reference columns", config.reference_columns_path())?;
        let columns = ReferenceColumns::new(names)?;
        let scaler: ScalerArtifact = load_json(storage, "scaler", config.scaler_path())?;
        scaler.check()?;
        let estimator: EstimatorArtifact =
            load_json(storage, "estimator", config.estimator_path())?;

        tracing::info!(
            "Loaded artifacts: {} reference columns, scaler width {:?}",
            columns.len(),
            scaler.width()
        );

        Ok(Self {
            estimator,
            scaler,
            columns,
        })
    }
}

fn load_json<S: Storage, T: DeserializeOwned>(storage: &S, artifact: &str, path: &str) -> Result<T> {
    let missing = |reason: String| EstimatorError::MissingArtifact {
        artifact: artifact.to_string(),
        path: path.to_string(),
        reason,
    };

    tracing::debug!("Loading {} from {}", artifact, path);
    let bytes = storage.read_file(path).map_err(|e| missing(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| missing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::UnknownCategoryPolicy;
    use std::collections::HashMap;

    struct MemoryStorage {
        files: HashMap<String, Vec<u8>>,
    }

    impl Storage for MemoryStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.get(path).cloned().ok_or_else(|| {
                EstimatorError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }
    }

    struct Paths;

    impl ConfigProvider for Paths {
        fn estimator_path(&self) -> &str {
            "model.json"
        }
        fn scaler_path(&self) -> &str {
            "scaler.json"
        }
        fn reference_columns_path(&self) -> &str {
            "columns.json"
        }
        fn dataset_path(&self) -> Option<&str> {
            None
        }
        fn unknown_category_policy(&self) -> UnknownCategoryPolicy {
            UnknownCategoryPolicy::Zero
        }
        fn other_label(&self) -> &str {
            "Other"
        }
    }

    fn storage(files: &[(&str, &str)]) -> MemoryStorage {
        MemoryStorage {
            files: files
                .iter()
                .map(|(k, v)| (k.to_string(), v.as_bytes().to_vec()))
                .collect(),
        }
    }

    #[test]
    fn test_load_all_artifacts() {
        let storage = storage(&[
            ("columns.json", r#"["Year", "Brand_Maruti"]"#),
            ("scaler.json", r#"{"kind": "identity"}"#),
            ("model.json", r#"{"kind": "constant", "value": 1.0}"#),
        ]);

        let artifacts = ModelArtifacts::load(&storage, &Paths).unwrap();
        assert_eq!(artifacts.columns.len(), 2);
        assert_eq!(artifacts.scaler, ScalerArtifact::Identity);
    }

    #[test]
    fn test_missing_file_is_missing_artifact() {
        let storage = storage(&[
            ("columns.json", r#"["Year"]"#),
            ("scaler.json", r#"{"kind": "identity"}"#),
        ]);

        match ModelArtifacts::load(&storage, &Paths) {
            Err(EstimatorError::MissingArtifact { artifact, path, .. }) => {
                assert_eq!(artifact, "estimator");
                assert_eq!(path, "model.json");
            }
            other => panic!("expected MissingArtifact, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_reference_columns_are_a_mismatch() {
        let storage = storage(&[
            ("columns.json", r#"["Year", "Year"]"#),
            ("scaler.json", r#"{"kind": "identity"}"#),
            ("model.json", r#"{"kind": "constant", "value": 1.0}"#),
        ]);

        assert!(matches!(
            ModelArtifacts::load(&storage, &Paths),
            Err(EstimatorError::ColumnMismatch { .. })
        ));
    }

    #[test]
    fn test_malformed_json_is_missing_artifact() {
        let storage = storage(&[
            ("columns.json", "not json"),
            ("scaler.json", r#"{"kind": "identity"}"#),
            ("model.json", r#"{"kind": "constant", "value": 1.0}"#),
        ]);

        assert!(matches!(
            ModelArtifacts::load(&storage, &Paths),
            Err(EstimatorError::MissingArtifact { .. })
        ));
    }
}
