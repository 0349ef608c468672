use crate::domain::ports::{Estimator, Scaler};
use crate::utils::error::{EstimatorError, Result};
use serde::{Deserialize, Serialize};

fn check_width(context: &str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(EstimatorError::ColumnMismatch {
            context: context.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// Scaler exported from the training environment as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    /// `(x - mean) / scale`, per column.
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `x * scale + min`, per column.
    MinMax { min: Vec<f64>, scale: Vec<f64> },
    Identity,
}

impl ScalerArtifact {
    /// Checks that the per-column parameter vectors agree with each other.
    pub fn check(&self) -> Result<()> {
        match self {
            ScalerArtifact::Standard { mean, scale } => {
                check_width("standard scaler scale", mean.len(), scale.len())
            }
            ScalerArtifact::MinMax { min, scale } => {
                check_width("min-max scaler scale", min.len(), scale.len())
            }
            ScalerArtifact::Identity => Ok(()),
        }
    }
}

impl Scaler for ScalerArtifact {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>> {
        if let Some(width) = self.width() {
            check_width("scaler input", width, features.len())?;
        }

        let scaled = match self {
            ScalerArtifact::Standard { mean, scale } => features
                .iter()
                .zip(mean.iter().zip(scale))
                .map(|(x, (m, s))| {
                    // Constant columns were fitted with a zero scale.
                    let s = if *s == 0.0 { 1.0 } else { *s };
                    (x - m) / s
                })
                .collect(),
            ScalerArtifact::MinMax { min, scale } => features
                .iter()
                .zip(min.iter().zip(scale))
                .map(|(x, (m, s))| x * s + m)
                .collect(),
            ScalerArtifact::Identity => features.to_vec(),
        };

        Ok(scaled)
    }

    fn width(&self) -> Option<usize> {
        match self {
            ScalerArtifact::Standard { mean, .. } => Some(mean.len()),
            ScalerArtifact::MinMax { min, .. } => Some(min.len()),
            ScalerArtifact::Identity => None,
        }
    }
}

/// Regression estimator exported from the training environment as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimatorArtifact {
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
    /// Always predicts `value`.
    Constant { value: f64 },
}

impl Estimator for EstimatorArtifact {
    fn predict(&self, features: &[f64]) -> Result<f64> {
        match self {
            EstimatorArtifact::Linear {
                intercept,
                coefficients,
            } => {
                check_width("estimator input", coefficients.len(), features.len())?;
                Ok(intercept
                    + features
                        .iter()
                        .zip(coefficients)
                        .map(|(x, c)| x * c)
                        .sum::<f64>())
            }
            EstimatorArtifact::Constant { value } => Ok(*value),
        }
    }

    fn width(&self) -> Option<usize> {
        match self {
            EstimatorArtifact::Linear { coefficients, .. } => Some(coefficients.len()),
            EstimatorArtifact::Constant { .. } => None,
        }
    }
}
