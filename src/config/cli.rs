use crate::config::toml_config::TomlConfig;
use crate::domain::model::{CarAttributeRecord, UnknownCategoryPolicy};
use crate::utils::error::Result;
use chrono::Datelike;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "car-price-estimator")]
#[command(about = "Estimate the ask price of a used car from its attributes")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub brand: String,

    #[arg(long)]
    pub model: String,

    /// Year of manufacture
    #[arg(long, default_value = "2019")]
    pub year: i32,

    /// Car age in years (defaults to current year minus --year)
    #[arg(long)]
    pub age: Option<i32>,

    #[arg(long, default_value = "50000")]
    pub km_driven: u32,

    #[arg(long)]
    pub transmission: String,

    #[arg(long)]
    pub owner: String,

    #[arg(long)]
    pub fuel_type: String,

    /// Override how unseen categories are handled: zero, reject or other
    #[arg(long)]
    pub unknown_category: Option<UnknownCategoryPolicy>,

    /// Override the reference dataset used for brand/model checks
    #[arg(long)]
    pub dataset: Option<String>,

    /// Print the estimate as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn to_record(&self) -> CarAttributeRecord {
        self.to_record_at(chrono::Local::now().year())
    }

    pub fn to_record_at(&self, current_year: i32) -> CarAttributeRecord {
        CarAttributeRecord {
            brand: self.brand.clone(),
            model: self.model.clone(),
            year: self.year,
            age: self
                .age
                .unwrap_or_else(|| CarAttributeRecord::default_age(self.year, current_year)),
            km_driven: self.km_driven,
            transmission: self.transmission.clone(),
            owner: self.owner.clone(),
            fuel_type: self.fuel_type.clone(),
        }
    }

    /// Loads the config file, if any, and applies command-line overrides.
    pub fn resolve_config(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(policy) = self.unknown_category {
            config.set_unknown_category_policy(policy);
        }
        if let Some(dataset) = &self.dataset {
            config.set_dataset_path(dataset.clone());
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;

    fn args(extra: &[&str]) -> CliConfig {
        let mut argv = vec![
            "car-price-estimator",
            "--brand",
            "Maruti",
            "--model",
            "Swift",
            "--transmission",
            "Manual",
            "--owner",
            "First",
            "--fuel-type",
            "Petrol",
        ];
        argv.extend_from_slice(extra);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_match_form_defaults() {
        let cli = args(&[]);
        let record = cli.to_record_at(2025);

        assert_eq!(record.year, 2019);
        assert_eq!(record.age, 6);
        assert_eq!(record.km_driven, 50_000);
    }

    #[test]
    fn test_explicit_age_is_not_cross_checked() {
        let cli = args(&["--year", "2010", "--age", "0"]);
        assert_eq!(cli.to_record_at(2025).age, 0);
    }

    #[test]
    fn test_policy_override() {
        let cli = args(&["--unknown-category", "reject", "--dataset", "cars.csv"]);
        let config = cli.resolve_config().unwrap();

        assert_eq!(config.unknown_category_policy(), UnknownCategoryPolicy::Reject);
        assert_eq!(config.dataset_path(), Some("cars.csv"));
    }

    #[test]
    fn test_invalid_policy_is_rejected_by_parser() {
        let result = CliConfig::try_parse_from([
            "car-price-estimator",
            "--brand",
            "Maruti",
            "--model",
            "Swift",
            "--transmission",
            "Manual",
            "--owner",
            "First",
            "--fuel-type",
            "Petrol",
            "--unknown-category",
            "guess",
        ]);
        assert!(result.is_err());
    }
}
