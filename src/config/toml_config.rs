use crate::core::aligner::DEFAULT_OTHER_LABEL;
use crate::core::ConfigProvider;
use crate::domain::model::UnknownCategoryPolicy;
use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    pub dataset: Option<DatasetConfig>,
    pub alignment: Option<AlignmentConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    pub estimator: String,
    pub scaler: String,
    pub reference_columns: String,
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            estimator: "models/model.json".to_string(),
            scaler: "models/scaler.json".to_string(),
            reference_columns: "models/reference_columns.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentConfig {
    pub unknown_category: Option<UnknownCategoryPolicy>,
    pub other_label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: Option<String>,
    pub log_format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EstimatorError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EstimatorError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODEL_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| EstimatorError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("artifacts.estimator", &self.artifacts.estimator)?;
        validate_path("artifacts.scaler", &self.artifacts.scaler)?;
        validate_path(
            "artifacts.reference_columns",
            &self.artifacts.reference_columns,
        )?;

        if let Some(dataset) = &self.dataset {
            validate_path("dataset.path", &dataset.path)?;
        }

        if let Some(label) = self.alignment.as_ref().and_then(|a| a.other_label.as_deref()) {
            validate_non_empty_string("alignment.other_label", label)?;
        }

        if let Some(format) = self.log_format() {
            let valid_formats = ["compact", "json"];
            if !valid_formats.contains(&format) {
                return Err(EstimatorError::InvalidConfigValueError {
                    field: "monitoring.log_format".to_string(),
                    value: format.to_string(),
                    reason: format!(
                        "Unsupported format. Valid formats: {}",
                        valid_formats.join(", ")
                    ),
                });
            }
        }

        Ok(())
    }

    pub fn set_unknown_category_policy(&mut self, policy: UnknownCategoryPolicy) {
        self.alignment
            .get_or_insert(AlignmentConfig {
                unknown_category: None,
                other_label: None,
            })
            .unknown_category = Some(policy);
    }

    pub fn set_dataset_path(&mut self, path: String) {
        self.dataset = Some(DatasetConfig { path });
    }

    pub fn log_level(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_level.as_deref())
    }

    pub fn log_format(&self) -> Option<&str> {
        self.monitoring.as_ref().and_then(|m| m.log_format.as_deref())
    }
}

impl ConfigProvider for TomlConfig {
    fn estimator_path(&self) -> &str {
        &self.artifacts.estimator
    }

    fn scaler_path(&self) -> &str {
        &self.artifacts.scaler
    }

    fn reference_columns_path(&self) -> &str {
        &self.artifacts.reference_columns
    }

    fn dataset_path(&self) -> Option<&str> {
        self.dataset.as_ref().map(|d| d.path.as_str())
    }

    fn unknown_category_policy(&self) -> UnknownCategoryPolicy {
        self.alignment
            .as_ref()
            .and_then(|a| a.unknown_category)
            .unwrap_or_default()
    }

    fn other_label(&self) -> &str {
        self.alignment
            .as_ref()
            .and_then(|a| a.other_label.as_deref())
            .unwrap_or(DEFAULT_OTHER_LABEL)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
