use crate::utils::error::{EstimatorError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

pub const YEAR_MIN: i32 = 1995;
pub const YEAR_MAX: i32 = 2025;
pub const AGE_MIN: i32 = 0;
pub const AGE_MAX: i32 = 30;
pub const KM_DRIVEN_MIN: u32 = 0;
pub const KM_DRIVEN_MAX: u32 = 300_000;

/// Input attributes of a car, named after the training-time columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    Brand,
    Model,
    Year,
    Age,
    KmDriven,
    Transmission,
    Owner,
    FuelType,
}

impl Attribute {
    pub const CATEGORICAL: [Attribute; 5] = [
        Attribute::Brand,
        Attribute::Model,
        Attribute::Transmission,
        Attribute::Owner,
        Attribute::FuelType,
    ];

    pub const NUMERIC: [Attribute; 3] = [Attribute::Year, Attribute::Age, Attribute::KmDriven];

    /// Column name used by the training data, and the prefix of indicator columns.
    pub fn column_name(&self) -> &'static str {
        match self {
            Attribute::Brand => "Brand",
            Attribute::Model => "model",
            Attribute::Year => "Year",
            Attribute::Age => "Age",
            Attribute::KmDriven => "kmDriven",
            Attribute::Transmission => "Transmission",
            Attribute::Owner => "Owner",
            Attribute::FuelType => "FuelType",
        }
    }

    pub fn is_categorical(&self) -> bool {
        Self::CATEGORICAL.contains(self)
    }

    /// Name of the indicator column for `value`, e.g. `Brand_Maruti`.
    pub fn indicator_column(&self, value: &str) -> String {
        format!("{}_{}", self.column_name(), value)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One car as entered by a user. Built per submission and consumed once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarAttributeRecord {
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "model")]
    pub model: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Age")]
    pub age: i32,
    #[serde(rename = "kmDriven")]
    pub km_driven: u32,
    #[serde(rename = "Transmission")]
    pub transmission: String,
    #[serde(rename = "Owner")]
    pub owner: String,
    #[serde(rename = "FuelType")]
    pub fuel_type: String,
}

impl CarAttributeRecord {
    pub fn categorical_value(&self, attribute: Attribute) -> Option<&str> {
        match attribute {
            Attribute::Brand => Some(&self.brand),
            Attribute::Model => Some(&self.model),
            Attribute::Transmission => Some(&self.transmission),
            Attribute::Owner => Some(&self.owner),
            Attribute::FuelType => Some(&self.fuel_type),
            Attribute::Year | Attribute::Age | Attribute::KmDriven => None,
        }
    }

    pub fn numeric_value(&self, attribute: Attribute) -> Option<f64> {
        match attribute {
            Attribute::Year => Some(f64::from(self.year)),
            Attribute::Age => Some(f64::from(self.age)),
            Attribute::KmDriven => Some(f64::from(self.km_driven)),
            _ => None,
        }
    }

    /// Conventional age of a car built in `year`, kept inside the accepted age bounds.
    pub fn default_age(year: i32, current_year: i32) -> i32 {
        (current_year - year).clamp(AGE_MIN, AGE_MAX)
    }
}

impl Validate for CarAttributeRecord {
    fn validate(&self) -> Result<()> {
        for attribute in Attribute::CATEGORICAL {
            if let Some(value) = self.categorical_value(attribute) {
                validate_non_empty_string(attribute.column_name(), value)?;
            }
        }
        validate_range("Year", self.year, YEAR_MIN, YEAR_MAX)?;
        validate_range("Age", self.age, AGE_MIN, AGE_MAX)?;
        validate_range("kmDriven", self.km_driven, KM_DRIVEN_MIN, KM_DRIVEN_MAX)?;
        Ok(())
    }
}

/// Ordered feature names the estimator was fitted on. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReferenceColumns {
    names: Vec<String>,
}

impl ReferenceColumns {
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(EstimatorError::ColumnMismatch {
                context: "reference columns".to_string(),
                expected: 1,
                actual: 0,
            });
        }

        let unique: HashSet<&str> = names.iter().map(String::as_str).collect();
        if unique.len() != names.len() {
            return Err(EstimatorError::ColumnMismatch {
                context: "reference columns (duplicate names)".to_string(),
                expected: unique.len(),
                actual: names.len(),
            });
        }

        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

impl<'de> Deserialize<'de> for ReferenceColumns {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let names = Vec::<String>::deserialize(deserializer)?;
        ReferenceColumns::new(names).map_err(serde::de::Error::custom)
    }
}

/// What the aligner does with a categorical value that has no indicator column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCategoryPolicy {
    /// Leave every indicator of the attribute at 0 and report the value.
    #[default]
    Zero,
    /// Fail the submission with `UnknownCategory`.
    Reject,
    /// Set the attribute's "other" indicator if the reference columns have one.
    Other,
}

impl FromStr for UnknownCategoryPolicy {
    type Err = EstimatorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" => Ok(UnknownCategoryPolicy::Zero),
            "reject" => Ok(UnknownCategoryPolicy::Reject),
            "other" => Ok(UnknownCategoryPolicy::Other),
            _ => Err(EstimatorError::InvalidConfigValueError {
                field: "unknown_category".to_string(),
                value: s.to_string(),
                reason: "Valid policies: zero, reject, other".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnseenCategory {
    pub attribute: Attribute,
    pub value: String,
}

/// Feature vector in reference column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedFeatures {
    pub values: Vec<f64>,
    /// Categorical values that set no indicator column.
    pub unseen: Vec<UnseenCategory>,
}

impl AlignedFeatures {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceEstimate {
    pub price: f64,
    pub unseen: Vec<UnseenCategory>,
}
