use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::Path;
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use design_tokens::{build_execution, common, config, figma, primitive};

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch color styles from Figma and write them as primitive color tokens
    Generate {
        #[clap(short, long, default_value = primitive::DEFAULT_OUTPUT)]
        output: String,
    },
    /// Build CSS, SCSS, JS and TypeScript outputs from token files
    Build {
        #[clap(short, long, default_value = "tokens.yaml")]
        config: String,
        #[clap(short, long)]
        watch: bool,
    },
    /// Write the default build configuration
    Init {
        #[clap(short, long, default_value = "tokens.yaml")]
        config: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Generate { output } => {
            if let Ok(path) = dotenvy::dotenv() {
                info!("Loaded environment from {}", path.display());
            }
            info!("Generating primitive colors: {}", output);
            let client = figma::FigmaClient::from_env();
            primitive::generate_primitive_colors(&client, Path::new(&output)).await?;
        }
        Commands::Build { config, watch } => {
            info!("Building tokens: {}", config);
            build_execution::execute_build(config, watch)?;
        }
        Commands::Init { config: config_path } => {
            info!("Initializing build config: {}", config_path);
            let build_config = config::BuildConfig::default();
            let serialized = serde_yaml::to_string(&build_config)?;
            common::write_string_to_file(Path::new(&config_path), &serialized)?;
        }
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("handlebars=off,{}", log_level)))
        .without_time()
        .init();
}
