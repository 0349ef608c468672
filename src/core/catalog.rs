//! Choice lists derived from the reference dataset.

use crate::domain::ports::Storage;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct DatasetRow {
    #[serde(rename = "Brand")]
    brand: Option<String>,
    #[serde(rename = "model")]
    model: Option<String>,
    #[serde(rename = "Transmission")]
    transmission: Option<String>,
    #[serde(rename = "Owner")]
    owner: Option<String>,
    #[serde(rename = "FuelType")]
    fuel_type: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    models_by_brand: BTreeMap<String, BTreeSet<String>>,
    transmissions: BTreeSet<String>,
    owners: BTreeSet<String>,
    fuel_types: BTreeSet<String>,
}

impl Catalog {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut catalog = Catalog::default();
        let mut rows = 0usize;

        for row in csv_reader.deserialize::<DatasetRow>() {
            let row = row?;
            rows += 1;

            if let Some(brand) = present(row.brand) {
                let models = catalog.models_by_brand.entry(brand).or_default();
                if let Some(model) = present(row.model) {
                    models.insert(model);
                }
            }
            if let Some(transmission) = present(row.transmission) {
                catalog.transmissions.insert(transmission);
            }
            if let Some(owner) = present(row.owner) {
                catalog.owners.insert(owner);
            }
            if let Some(fuel_type) = present(row.fuel_type) {
                catalog.fuel_types.insert(fuel_type);
            }
        }

        tracing::debug!(
            "Catalog built from {} rows: {} brands",
            rows,
            catalog.models_by_brand.len()
        );
        Ok(catalog)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_storage<S: Storage>(storage: &S, path: &str) -> Result<Self> {
        let bytes = storage.read_file(path)?;
        Self::from_reader(bytes.as_slice())
    }

    pub fn brands(&self) -> Vec<&str> {
        self.models_by_brand.keys().map(String::as_str).collect()
    }

    /// Models seen with `brand`, sorted. Empty for a brand not in the dataset.
    pub fn valid_models(&self, brand: &str) -> Vec<&str> {
        self.models_by_brand
            .get(brand)
            .map(|models| models.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn contains_model(&self, brand: &str, model: &str) -> bool {
        self.models_by_brand
            .get(brand)
            .is_some_and(|models| models.contains(model))
    }

    pub fn transmissions(&self) -> Vec<&str> {
        self.transmissions.iter().map(String::as_str).collect()
    }

    pub fn owners(&self) -> Vec<&str> {
        self.owners.iter().map(String::as_str).collect()
    }

    pub fn fuel_types(&self) -> Vec<&str> {
        self.fuel_types.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = "\
Brand,model,Year,Age,kmDriven,Transmission,Owner,FuelType,AskPrice
Maruti,Swift,2019,6,50000,Manual,First,Petrol,500000
Maruti,Baleno,2018,7,42000,Manual,Second,Petrol,480000
Hyundai,i20,2020,5,30000,Automatic,First,Diesel,650000
Maruti,Swift,2017,8,80000,Manual,First,Petrol,400000
,Ghost,2015,10,10000,,,,100000
Honda,,2016,9,60000,Manual,Third,CNG,300000
";

    #[test]
    fn test_choice_lists_are_sorted_and_unique() {
        let catalog = Catalog::from_reader(DATASET.as_bytes()).unwrap();

        assert_eq!(catalog.brands(), vec!["Honda", "Hyundai", "Maruti"]);
        assert_eq!(catalog.transmissions(), vec!["Automatic", "Manual"]);
        assert_eq!(catalog.owners(), vec!["First", "Second", "Third"]);
        assert_eq!(catalog.fuel_types(), vec!["CNG", "Diesel", "Petrol"]);
    }

    #[test]
    fn test_valid_models_depend_on_brand() {
        let catalog = Catalog::from_reader(DATASET.as_bytes()).unwrap();

        assert_eq!(catalog.valid_models("Maruti"), vec!["Baleno", "Swift"]);
        assert_eq!(catalog.valid_models("Hyundai"), vec!["i20"]);
        assert!(catalog.valid_models("Honda").is_empty());
        assert!(catalog.valid_models("Tata").is_empty());

        assert!(catalog.contains_model("Maruti", "Swift"));
        assert!(!catalog.contains_model("Hyundai", "Swift"));
    }

    #[test]
    fn test_blank_brand_rows_are_skipped() {
        let catalog = Catalog::from_reader(DATASET.as_bytes()).unwrap();
        assert!(!catalog.brands().contains(&""));
        assert!(!catalog.brands().iter().any(|b| catalog.contains_model(b, "Ghost")));
    }
}
