mod commands;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fleetdetect_lib::{DetectionConfig, Pipeline};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "fleetdetect")]
#[command(about = "Flag likely fleet and undercover vehicles from Finnik vehicle pages")]
struct Cli {
    /// Output format: table, json or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Detection config TOML (falls back to FLEETDETECT_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a vehicle page by identifier and analyze it
    Analyze(commands::analyze::AnalyzeArgs),
    /// Analyze a saved vehicle page
    Parse(commands::parse::ParseArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fleetdetect=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "markdown" | "md" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let config = load_config(cli.config)?;
    let pipeline = Pipeline::new(config).context("invalid detection config")?;

    match &cli.command {
        Commands::Analyze(args) => commands::analyze::run(args, pipeline, &format).await?,
        Commands::Parse(args) => commands::parse::run(args, &pipeline, &format)?,
    }

    Ok(())
}

fn load_config(flag: Option<PathBuf>) -> Result<DetectionConfig> {
    let path = flag.or_else(|| std::env::var_os("FLEETDETECT_CONFIG").map(PathBuf::from));
    match path {
        Some(path) => Ok(DetectionConfig::from_file(&path)?),
        None => Ok(DetectionConfig::default()),
    }
}
