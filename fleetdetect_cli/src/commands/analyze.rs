use anyhow::Result;
use clap::Args;
use fleetdetect_lib::finnik_api::Client;
use fleetdetect_lib::{Analyzer, Pipeline};

use crate::output::{print_json, print_record_markdown, print_record_table, OutputFormat};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Registration identifier, e.g. AB123C
    pub identifier: String,

    /// Override the Finnik base URL (also read from FINNIK_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,
}

pub async fn run(args: &AnalyzeArgs, pipeline: Pipeline, format: &OutputFormat) -> Result<()> {
    let base_url = args
        .base_url
        .clone()
        .or_else(|| std::env::var("FINNIK_BASE_URL").ok());
    let client = match base_url {
        Some(url) => Client::with_base_url(&url),
        None => Client::new(),
    };

    let analyzer = Analyzer::new(client, pipeline);
    let record = analyzer.analyze(&args.identifier).await?;

    match format {
        OutputFormat::Table => print_record_table(&record),
        OutputFormat::Json => print_json(&record),
        OutputFormat::Markdown => print_record_markdown(&record),
    }

    Ok(())
}
