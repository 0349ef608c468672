use crate::adapters::artifacts::ModelArtifacts;
use crate::core::aligner::FeatureAligner;
use crate::domain::model::{CarAttributeRecord, PriceEstimate};
use crate::domain::ports::{ConfigProvider, Estimator, Scaler, Storage};
use crate::utils::error::{EstimatorError, Result};

/// Scales an aligned feature vector and runs the estimator on it.
pub fn predict(features: &[f64], scaler: &dyn Scaler, estimator: &dyn Estimator) -> Result<f64> {
    let scaled = scaler.transform(features)?;
    if scaled.len() != features.len() {
        return Err(EstimatorError::ColumnMismatch {
            context: "scaler output".to_string(),
            expected: features.len(),
            actual: scaled.len(),
        });
    }
    estimator.predict(&scaled)
}

/// Process-wide prediction state: built once, then only read.
pub struct PricePredictor {
    aligner: FeatureAligner,
    scaler: Box<dyn Scaler>,
    estimator: Box<dyn Estimator>,
}

impl PricePredictor {
    /// Fails with `ColumnMismatch` when the scaler or estimator was fitted on a
    /// different number of columns than the aligner produces.
    pub fn new(
        aligner: FeatureAligner,
        scaler: Box<dyn Scaler>,
        estimator: Box<dyn Estimator>,
    ) -> Result<Self> {
        let expected = aligner.columns().len();

        for (context, width) in [("scaler", scaler.width()), ("estimator", estimator.width())] {
            if let Some(actual) = width {
                if actual != expected {
                    return Err(EstimatorError::ColumnMismatch {
                        context: context.to_string(),
                        expected,
                        actual,
                    });
                }
            }
        }

        Ok(Self {
            aligner,
            scaler,
            estimator,
        })
    }

    pub fn from_artifacts<C: ConfigProvider>(artifacts: ModelArtifacts, config: &C) -> Result<Self> {
        let aligner = FeatureAligner::new(artifacts.columns)
            .with_policy(config.unknown_category_policy())
            .with_other_label(config.other_label());
        Self::new(
            aligner,
            Box::new(artifacts.scaler),
            Box::new(artifacts.estimator),
        )
    }

    pub fn load<S: Storage, C: ConfigProvider>(storage: &S, config: &C) -> Result<Self> {
        let artifacts = ModelArtifacts::load(storage, config)?;
        Self::from_artifacts(artifacts, config)
    }

    pub fn aligner(&self) -> &FeatureAligner {
        &self.aligner
    }

    pub fn estimate(&self, record: &CarAttributeRecord) -> Result<PriceEstimate> {
        let aligned = self.aligner.align(record)?;
        tracing::debug!("Aligned {} features", aligned.len());

        let price = predict(aligned.values(), self.scaler.as_ref(), self.estimator.as_ref())?;
        tracing::info!(
            "Estimated {} {} ({}): {:.2}",
            record.brand,
            record.model,
            record.year,
            price
        );

        Ok(PriceEstimate {
            price,
            unseen: aligned.unseen,
        })
    }
}
