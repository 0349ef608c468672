pub mod aligner;
pub mod catalog;
pub mod predictor;

pub use crate::domain::model::{AlignedFeatures, CarAttributeRecord, PriceEstimate};
pub use crate::domain::ports::{ConfigProvider, Estimator, Scaler, Storage};
pub use crate::utils::error::Result;
