// Adapters layer: concrete implementations for external systems (file storage,
// JSON model artifacts exported by the training environment).

pub mod artifacts;
pub mod models;
pub mod storage;

pub use artifacts::ModelArtifacts;
pub use models::{EstimatorArtifact, ScalerArtifact};
pub use storage::LocalStorage;
