use car_price_estimator::core::ConfigProvider;
use car_price_estimator::utils::error::EstimatorError;
use car_price_estimator::utils::format::format_price;
use car_price_estimator::utils::{logger, validation::Validate};
use car_price_estimator::{Catalog, CliConfig, LocalStorage, PricePredictor, TomlConfig};
use clap::Parser;

fn main() {
    let cli = CliConfig::parse();

    // 載入 TOML 配置
    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "❌ Failed to load config file '{}': {}",
                cli.config.as_deref().unwrap_or("-"),
                e
            );
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    logger::init_logger(config.log_format(), cli.verbose, config.log_level());

    tracing::info!("Starting car-price-estimator");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = run(&cli, &config) {
        tracing::error!(
            "❌ Estimation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = e.severity().exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run(cli: &CliConfig, config: &TomlConfig) -> Result<(), EstimatorError> {
    config.validate()?;

    let record = cli.to_record();
    record.validate()?;

    let storage = LocalStorage::default();

    if let Some(dataset) = config.dataset_path() {
        let catalog = Catalog::from_storage(&storage, dataset)?;
        if !catalog.contains_model(&record.brand, &record.model) {
            return Err(EstimatorError::ValidationError {
                message: format!(
                    "model '{}' is not listed for brand '{}' (known: {})",
                    record.model,
                    record.brand,
                    catalog.valid_models(&record.brand).join(", ")
                ),
            });
        }
    }

    let predictor = PricePredictor::load(&storage, config)?;
    let estimate = predictor.estimate(&record)?;

    if cli.json {
        let summary = serde_json::json!({
            "record": record,
            "price": estimate.price,
            "formatted": format_price(estimate.price),
            "unseen_categories": estimate.unseen,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("💰 Estimated Ask Price: {}", format_price(estimate.price));
        for unseen in &estimate.unseen {
            println!(
                "⚠️  {} '{}' was not seen in training; the estimate may be less accurate",
                unseen.attribute, unseen.value
            );
        }
    }

    Ok(())
}
