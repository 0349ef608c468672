//! One-hot encoding of a single record into the reference feature space.
//!
//! The `(attribute, value) -> column` table is built once from the reference
//! columns, so aligning a record is a handful of lookups into a zeroed vector.

use crate::domain::model::{
    AlignedFeatures, Attribute, CarAttributeRecord, ReferenceColumns, UnknownCategoryPolicy,
    UnseenCategory,
};
use crate::utils::error::{EstimatorError, Result};
use std::collections::HashMap;

pub const DEFAULT_OTHER_LABEL: &str = "Other";

#[derive(Debug, Clone)]
pub struct FeatureAligner {
    columns: ReferenceColumns,
    indicators: HashMap<Attribute, HashMap<String, usize>>,
    numeric: HashMap<Attribute, usize>,
    policy: UnknownCategoryPolicy,
    other_label: String,
}

impl FeatureAligner {
    pub fn new(columns: ReferenceColumns) -> Self {
        let mut indicators: HashMap<Attribute, HashMap<String, usize>> = HashMap::new();
        let mut numeric = HashMap::new();

        for (index, name) in columns.names().iter().enumerate() {
            if let Some(attribute) = Attribute::NUMERIC
                .into_iter()
                .find(|a| a.column_name() == name.as_str())
            {
                numeric.insert(attribute, index);
                continue;
            }

            let indicator = Attribute::CATEGORICAL.into_iter().find_map(|attribute| {
                name.strip_prefix(attribute.column_name())
                    .and_then(|rest| rest.strip_prefix('_'))
                    .map(|value| (attribute, value))
            });

            match indicator {
                Some((attribute, value)) => {
                    indicators
                        .entry(attribute)
                        .or_default()
                        .insert(value.to_string(), index);
                }
                None => tracing::debug!("Reference column '{}' has no source attribute", name),
            }
        }

        tracing::debug!(
            "Built feature index: {} columns, {} numeric, {} indicators",
            columns.len(),
            numeric.len(),
            indicators.values().map(HashMap::len).sum::<usize>()
        );

        Self {
            columns,
            indicators,
            numeric,
            policy: UnknownCategoryPolicy::default(),
            other_label: DEFAULT_OTHER_LABEL.to_string(),
        }
    }

    pub fn with_policy(mut self, policy: UnknownCategoryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_other_label(mut self, label: impl Into<String>) -> Self {
        self.other_label = label.into();
        self
    }

    pub fn columns(&self) -> &ReferenceColumns {
        &self.columns
    }

    pub fn policy(&self) -> UnknownCategoryPolicy {
        self.policy
    }

    pub fn indicator_index(&self, attribute: Attribute, value: &str) -> Option<usize> {
        self.indicators
            .get(&attribute)
            .and_then(|values| values.get(value))
            .copied()
    }

    /// All column positions holding indicators of `attribute`, ascending.
    pub fn indicator_indices(&self, attribute: Attribute) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .indicators
            .get(&attribute)
            .map(|values| values.values().copied().collect())
            .unwrap_or_default();
        indices.sort_unstable();
        indices
    }

    pub fn numeric_index(&self, attribute: Attribute) -> Option<usize> {
        self.numeric.get(&attribute).copied()
    }

    pub fn align(&self, record: &CarAttributeRecord) -> Result<AlignedFeatures> {
        let mut values = vec![0.0; self.columns.len()];
        let mut unseen = Vec::new();

        for attribute in Attribute::NUMERIC {
            match (self.numeric_index(attribute), record.numeric_value(attribute)) {
                (Some(index), Some(value)) => values[index] = value,
                (None, _) => tracing::trace!("Dropping {}: not a reference column", attribute),
                (Some(_), None) => {}
            }
        }

        for attribute in Attribute::CATEGORICAL {
            let Some(value) = record.categorical_value(attribute) else {
                continue;
            };

            if let Some(index) = self.indicator_index(attribute, value) {
                values[index] = 1.0;
                continue;
            }

            match self.policy {
                UnknownCategoryPolicy::Reject => {
                    return Err(EstimatorError::UnknownCategory {
                        attribute: attribute.to_string(),
                        value: value.to_string(),
                    });
                }
                UnknownCategoryPolicy::Other => {
                    if let Some(index) = self.indicator_index(attribute, &self.other_label) {
                        tracing::info!(
                            "Unseen {} '{}' mapped to '{}'",
                            attribute,
                            value,
                            attribute.indicator_column(&self.other_label)
                        );
                        values[index] = 1.0;
                        continue;
                    }
                    tracing::warn!(
                        "Unseen {} '{}' and no '{}' column; all indicators left at 0",
                        attribute,
                        value,
                        attribute.indicator_column(&self.other_label)
                    );
                }
                UnknownCategoryPolicy::Zero => {
                    tracing::warn!(
                        "Unseen {} '{}'; all indicators left at 0",
                        attribute,
                        value
                    );
                }
            }

            unseen.push(UnseenCategory {
                attribute,
                value: value.to_string(),
            });
        }

        if values.len() != self.columns.len() {
            return Err(EstimatorError::ColumnMismatch {
                context: "aligned features".to_string(),
                expected: self.columns.len(),
                actual: values.len(),
            });
        }

        Ok(AlignedFeatures { values, unseen })
    }
}

/// Aligns `record` against `columns` with the default unknown-category policy.
pub fn align(record: &CarAttributeRecord, columns: &ReferenceColumns) -> Result<Vec<f64>> {
    FeatureAligner::new(columns.clone())
        .align(record)
        .map(|aligned| aligned.values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> ReferenceColumns {
        ReferenceColumns::new(
            [
                "Year",
                "Age",
                "kmDriven",
                "Brand_Hyundai",
                "Brand_Maruti",
                "Brand_Other",
                "model_i20",
                "model_Swift",
                "Transmission_Automatic",
                "Transmission_Manual",
                "Owner_First",
                "Owner_Second",
                "FuelType_Diesel",
                "FuelType_Petrol",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
        .unwrap()
    }

    fn record() -> CarAttributeRecord {
        CarAttributeRecord {
            brand: "Maruti".to_string(),
            model: "Swift".to_string(),
            year: 2019,
            age: 6,
            km_driven: 50_000,
            transmission: "Manual".to_string(),
            owner: "First".to_string(),
            fuel_type: "Petrol".to_string(),
        }
    }

    #[test]
    fn test_align_sets_numeric_and_indicators() {
        let aligned = FeatureAligner::new(columns()).align(&record()).unwrap();

        assert_eq!(
            aligned.values,
            vec![
                2019.0, 6.0, 50_000.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0
            ]
        );
        assert!(aligned.unseen.is_empty());
    }

    #[test]
    fn test_column_order_follows_reference() {
        let reordered = ReferenceColumns::new(
            ["FuelType_Petrol", "kmDriven", "Brand_Maruti", "Year"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
        .unwrap();

        let values = align(&record(), &reordered).unwrap();
        assert_eq!(values, vec![1.0, 50_000.0, 1.0, 2019.0]);
    }

    #[test]
    fn test_extra_expansion_columns_are_dropped() {
        let narrow = ReferenceColumns::new(vec!["Year".to_string(), "Brand_Maruti".to_string()])
            .unwrap();
        let values = align(&record(), &narrow).unwrap();
        assert_eq!(values, vec![2019.0, 1.0]);
    }

    #[test]
    fn test_unseen_value_zeroes_indicators_by_default() {
        let aligner = FeatureAligner::new(columns());
        let r = CarAttributeRecord {
            brand: "Tata".to_string(),
            ..record()
        };

        let aligned = aligner.align(&r).unwrap();
        for index in aligner.indicator_indices(Attribute::Brand) {
            assert_eq!(aligned.values[index], 0.0);
        }
        assert_eq!(
            aligned.unseen,
            vec![UnseenCategory {
                attribute: Attribute::Brand,
                value: "Tata".to_string()
            }]
        );
    }

    #[test]
    fn test_reject_policy_fails_on_unseen_value() {
        let aligner = FeatureAligner::new(columns()).with_policy(UnknownCategoryPolicy::Reject);
        let r = CarAttributeRecord {
            fuel_type: "Electric".to_string(),
            ..record()
        };

        match aligner.align(&r) {
            Err(EstimatorError::UnknownCategory { attribute, value }) => {
                assert_eq!(attribute, "FuelType");
                assert_eq!(value, "Electric");
            }
            other => panic!("expected UnknownCategory, got {:?}", other),
        }
    }

    #[test]
    fn test_other_policy_uses_other_bucket_when_present() {
        let aligner = FeatureAligner::new(columns()).with_policy(UnknownCategoryPolicy::Other);
        let r = CarAttributeRecord {
            brand: "Tata".to_string(),
            model: "Nexon".to_string(),
            ..record()
        };

        let aligned = aligner.align(&r).unwrap();
        let other = aligner.indicator_index(Attribute::Brand, "Other").unwrap();
        assert_eq!(aligned.values[other], 1.0);

        // No model_Other column: falls back to all zeros and reports it.
        for index in aligner.indicator_indices(Attribute::Model) {
            assert_eq!(aligned.values[index], 0.0);
        }
        assert_eq!(aligned.unseen.len(), 1);
        assert_eq!(aligned.unseen[0].attribute, Attribute::Model);
    }

    #[test]
    fn test_values_with_underscores_keep_their_suffix() {
        let cols = ReferenceColumns::new(vec![
            "Owner_Test_Drive_Car".to_string(),
            "model_Grand_i10".to_string(),
        ])
        .unwrap();
        let aligner = FeatureAligner::new(cols);

        assert_eq!(aligner.indicator_index(Attribute::Owner, "Test_Drive_Car"), Some(0));
        assert_eq!(aligner.indicator_index(Attribute::Model, "Grand_i10"), Some(1));
    }

    #[test]
    fn test_unrelated_reference_columns_stay_zero() {
        let cols = ReferenceColumns::new(vec!["Year".to_string(), "Seats".to_string()]).unwrap();
        let values = align(&record(), &cols).unwrap();
        assert_eq!(values, vec![2019.0, 0.0]);
    }
}
