use clap::Parser;
use profile_etl::core::ConfigProvider;
use profile_etl::utils::{logger, validation::Validate};
use profile_etl::{EtlEngine, LocalStorage, ProfilePipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-profile-etl")]
#[command(about = "Profile ETL with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "profile-etl.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Show what would be requested without executing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based profile ETL");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No request will be sent");
        perform_dry_run(config);
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = ProfilePipeline::new(storage, config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Profile ETL completed successfully!");
            println!("✅ Profile data saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Profile ETL failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = e.severity().exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Profile: {}", config.profile_url());
    println!("  Source: {}", config.api_endpoint());
    println!("  Output: {}/{}", config.output_path(), config.table_file());
    println!("  Download Images: {}", config.download_images());
    println!("  Save JSON: {}", config.save_json());

    if let Some(timeout) = config.timeout_seconds() {
        println!("  Timeout: {}s", timeout);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: TomlConfig) {
    let output_path = config.output_path().to_string();
    let download_images = config.download_images();
    let save_json = config.save_json();
    let table_file = config.table_file().to_string();
    let pipeline = ProfilePipeline::new(LocalStorage::new(output_path.clone()), config);

    println!("🔍 Dry Run Analysis:");
    println!();
    println!("📡 Request:");
    println!("  GET with bearer authorization");
    for (key, value) in pipeline.query_parameters() {
        println!("  {} = {}", key, value);
    }

    println!();
    println!("💾 Output:");
    println!("  Table: {}/{}", output_path, table_file);
    if download_images {
        println!("  Images: {}/<Full_Name>/profile_pic.jpg, background_cover.jpg", output_path);
    }
    if save_json {
        println!("  Snapshot: {}/<Full_Name>/profile.json", output_path);
    }

    println!();
    println!("✅ Dry run analysis complete.");
}
