use car_price_estimator::core::ConfigProvider;
use car_price_estimator::utils::logger;
use car_price_estimator::{Catalog, TomlConfig};
use clap::Parser;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "List the choices available for each car attribute")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Reference dataset CSV (overrides [dataset] path)
    #[arg(short, long)]
    dataset: Option<String>,

    /// Only list the models of this brand
    #[arg(short, long)]
    brand: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose, None);

    let config = match &args.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => TomlConfig::default(),
    };

    let Some(dataset) = args.dataset.as_deref().or(config.dataset_path()) else {
        eprintln!("❌ No reference dataset: pass --dataset or set [dataset] path");
        std::process::exit(1);
    };

    tracing::info!("📁 Loading reference dataset from: {}", dataset);
    let catalog = match Catalog::from_path(dataset) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.severity().exit_code());
        }
    };

    match &args.brand {
        Some(brand) => {
            let models = catalog.valid_models(brand);
            if models.is_empty() {
                println!("No models found for brand '{}'", brand);
            }
            for model in models {
                println!("{}", model);
            }
        }
        None => display_catalog(&catalog),
    }
}

fn display_catalog(catalog: &Catalog) {
    println!("📋 Available choices:");
    println!("  Brands: {}", catalog.brands().join(", "));
    for brand in catalog.brands() {
        println!("    {}: {}", brand, catalog.valid_models(brand).join(", "));
    }
    println!("  Transmissions: {}", catalog.transmissions().join(", "));
    println!("  Owners: {}", catalog.owners().join(", "));
    println!("  Fuel types: {}", catalog.fuel_types().join(", "));
}
