use clap::Parser;
use velocity_zones::domain::ports::{Environment, ServerSettings};
use velocity_zones::utils::{logger, validation::Validate};
use velocity_zones::{ApiServer, AppContainer, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-server")]
#[command(about = "velocity-zones API server with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "velocity-zones.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override environment setting from config
    #[arg(long, value_enum)]
    environment: Option<Environment>,

    /// Dry run - open the store and show what would be served without binding
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(config.json_logs(), args.verbose || config.verbose());

    tracing::info!("🚀 Starting TOML-based velocity-zones server");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(environment) = args.environment {
        config.environment = Some(environment);
        tracing::info!("🔧 Environment overridden to: {:?}", environment);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - the server will not be started");
        perform_dry_run(&config).await?;
        return Ok(());
    }

    ApiServer::new(config).run().await?;
    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    println!("📋 Configuration Summary:");
    println!("  Listen: {}", config.bind_address());
    println!("  Storage: {:?}", config.storage_backend());
    println!("  Data dir: {}", config.data_dir().display());
    println!("  Atomic writes: {}", config.atomic_writes());
    println!("  CORS origin: {}", config.cors_origin());
    println!("  Environment: {:?}", config.environment());
    println!("  Body limit: {} bytes", config.body_limit_bytes());
}

async fn perform_dry_run(config: &TomlConfig) -> velocity_zones::Result<()> {
    let container = AppContainer::from_settings(config).await?;
    let zones = container.get_zones.execute().await?;
    let reps = container.reps.find_all().await?;

    println!("🔍 Dry run:");
    println!("  Stored reps: {}", reps.len());
    for zone in zones {
        println!(
            "  {:<16} [{:.2}, {:.2}] m/s  reps: {}",
            zone.name, zone.min_velocity, zone.max_velocity, zone.rep_count
        );
    }
    Ok(())
}
