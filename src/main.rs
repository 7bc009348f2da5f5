use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, warn};

use ads_pipeline::config::PipelineConfig;
use ads_pipeline::constants;
use ads_pipeline::error::PipelineError;
use ads_pipeline::logging;
use ads_pipeline::pipeline::{MergeSummary, NormalizeSummary, Pipeline};

#[derive(Parser)]
#[command(name = "ads_pipeline")]
#[command(about = "Ad performance data normalization and merge pipeline")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize raw source files into canonical tables
    Normalize {
        /// Specific sources to run (comma-separated). Available: search, social, video
        #[arg(long)]
        sources: Option<String>,
    },
    /// Merge the normalized tables and derive the KPI columns
    Merge,
    /// Run the full pipeline (normalize + merge) sequentially
    Run {
        /// Specific sources to run (comma-separated)
        #[arg(long)]
        sources: Option<String>,
    },
}

fn parse_sources(arg: Option<String>) -> Vec<String> {
    match arg {
        Some(list) => list
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        None => constants::supported_sources()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

fn print_normalize_summary(summary: &NormalizeSummary) {
    println!("\n📊 Normalization results for {}:", summary.source_id);
    println!("   Rows read: {}", summary.rows_read);
    println!("   Rows kept: {}", summary.rows_kept);
    println!("   Rows dropped: {}", summary.rows_dropped);
    if let Some(shift) = summary.shift_days {
        println!("   Date shift applied: {} days", shift);
    }
    println!("   Output file: {}", summary.output_file);
}

fn print_merge_summary(summary: &MergeSummary) {
    println!("\n📦 Merge results:");
    println!("   Sources merged: {}", summary.sources_merged.join(", "));
    if !summary.sources_skipped.is_empty() {
        println!("   Sources skipped: {}", summary.sources_skipped.join(", "));
    }
    println!("   Total rows: {}", summary.rows);
    println!("   Output file: {}", summary.output_file);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();
    let config = PipelineConfig::load_or_default(cli.config.as_deref())?;
    let pipeline = Pipeline::new(config);

    match cli.command {
        Commands::Normalize { sources } => {
            println!("🔄 Running source normalizers...");

            let summaries = pipeline.normalize_sources(&parse_sources(sources))?;
            for summary in &summaries {
                print_normalize_summary(summary);
            }
            if summaries.is_empty() {
                warn!("No sources were normalized");
                println!("⚠️  No sources were normalized");
            }
        }
        Commands::Merge => {
            println!("🔗 Merging normalized tables...");

            match pipeline.merge() {
                Ok(summary) => print_merge_summary(&summary),
                Err(e @ PipelineError::NoInputData) => {
                    error!("Merge failed: {}", e);
                    println!("❌ Merge failed: {}", e);
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
        Commands::Run { sources } => {
            println!("🚀 Running full pipeline (normalize + merge)...");

            match pipeline.run(&parse_sources(sources)) {
                Ok(summary) => {
                    for normalize_summary in &summary.normalized {
                        print_normalize_summary(normalize_summary);
                    }
                    print_merge_summary(&summary.merge);
                    println!("\n✅ Full pipeline completed successfully!");
                }
                Err(e @ PipelineError::NoInputData) => {
                    error!("Pipeline failed: {}", e);
                    println!("❌ Pipeline failed: {}", e);
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}
