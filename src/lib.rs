pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{EstimatorArtifact, LocalStorage, ModelArtifacts, ScalerArtifact};
pub use crate::core::{aligner::FeatureAligner, catalog::Catalog, predictor::PricePredictor};
pub use domain::model::{CarAttributeRecord, ReferenceColumns, UnknownCategoryPolicy};
pub use utils::error::{EstimatorError, Result};
