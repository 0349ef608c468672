use crate::domain::model::UnknownCategoryPolicy;
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
}

/// Fitted feature scaler. Output has the same length and order as the input.
pub trait Scaler: Send + Sync {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>>;

    /// Number of columns the scaler was fitted on, when it is fixed.
    fn width(&self) -> Option<usize>;
}

/// Fitted regression estimator returning a single price.
pub trait Estimator: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<f64>;

    fn width(&self) -> Option<usize>;
}

pub trait ConfigProvider: Send + Sync {
    fn estimator_path(&self) -> &str;
    fn scaler_path(&self) -> &str;
    fn reference_columns_path(&self) -> &str;
    fn dataset_path(&self) -> Option<&str>;
    fn unknown_category_policy(&self) -> UnknownCategoryPolicy;
    fn other_label(&self) -> &str;
}
