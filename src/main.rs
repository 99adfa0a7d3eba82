use clap::Parser;
use foodgraph::graph::relationalize;
use foodgraph::sink::TsvSink;
use foodgraph::source::JsonlSource;
use foodgraph::{Catalog, Config};
use std::path::PathBuf;
use std::time::Instant;
use anyhow::{Context, Result};

#[derive(Parser, Debug)]
#[command(name = "foodgraph")]
#[command(about = "Derive a bulk-importable graph dataset from food product records")]
struct Args {
    /// Newline-delimited JSON file of product records (overrides config)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output TSV file (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip records that carry a code but no ingredient text or tags
    #[arg(long)]
    require_content: bool,
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or("RUST_LOG", "info")
    ).init();

    let args = Args::parse();

    log::info!("Starting foodgraph relationalization");

    // Load configuration; CLI flags win over config values
    let config = Config::load()?;
    let input = args
        .input
        .unwrap_or_else(|| config.products_path().to_path_buf());
    let output = args
        .output
        .unwrap_or_else(|| config.output_path().to_path_buf());
    log::info!("Product records: {}", input.display());
    log::info!("Output file: {}", output.display());

    let catalog = Catalog::new();
    let source = JsonlSource::open(&input)
        .with_context(|| format!("Failed to open product records: {}", input.display()))?;
    let mut sink = TsvSink::create(&output)
        .with_context(|| format!("Failed to create output file: {}", output.display()))?;

    let start = Instant::now();
    let stats = relationalize(&catalog, source, &mut sink, args.require_content)
        .context("Relationalization aborted; discard the partial output file")?;
    let elapsed = start.elapsed();

    // Report final statistics
    log::info!("=== Relationalization Complete ===");
    log::info!("Products processed: {}", stats.processed);
    log::info!("Records rejected (missing/invalid code): {}", stats.rejected);
    if args.require_content {
        log::info!("Records skipped (no content): {}", stats.skipped_no_content);
    }
    log::info!("Node rows written: {}", stats.nodes_written);
    log::info!("Relationship rows written: {}", stats.relationships_written);
    log::info!("Time: {:?}", elapsed);

    if stats.rejected > 0 {
        log::warn!("Some records were rejected. Check logs above for details.");
    }

    Ok(())
}
