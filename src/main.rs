mod clean;
mod error;
mod fetcher;
mod load;
mod parser;
mod pipeline;
mod records;
mod table;
mod transform;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::pipeline::ScrapeReport;
use crate::table::Dataset;

#[derive(Parser)]
#[command(
    name = "fashion_etl",
    about = "Scrape the Fashion Studio catalog into a clean product dataset"
)]
struct Cli {
    /// Page range to scrape, inclusive
    #[arg(long, num_args = 2, value_names = ["START", "END"], default_values_t = [1, 50])]
    pages: Vec<u32>,

    /// Output CSV file
    #[arg(long, default_value = "products.csv")]
    csv: PathBuf,

    /// Optional SQLite database file to load into
    #[arg(long)]
    db: Option<PathBuf>,

    /// Table name for the SQLite destination
    #[arg(long, default_value = "products")]
    table: String,

    /// Source-to-local currency conversion rate
    #[arg(long, default_value_t = clean::DEFAULT_RATE)]
    rate: f64,

    /// Optional JSON run report file
    #[arg(long)]
    report: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let (start_page, end_page) = (cli.pages[0], cli.pages[1]);

    let client = fetcher::build_client()?;

    println!("Scraping pages {} to {}...", start_page, end_page);
    let scrape = pipeline::scrape_pages(&client, start_page, end_page).await?;
    println!(
        "Extracted {} raw records from {} pages",
        scrape.records.len(),
        scrape.pages_ok
    );
    for skip in &scrape.skipped {
        println!("  page {} skipped: {}", skip.page, skip.reason);
    }

    let dataset = transform::transform(&scrape.records, cli.rate)?;
    transform::validate(&dataset)?;
    println!(
        "{} clean records after transform ({} removed)",
        dataset.len(),
        scrape.records.len() - dataset.len()
    );

    let mut destinations: Vec<(String, Result<String>)> = Vec::new();
    destinations.push((
        "csv".into(),
        load::write_csv(&dataset, &cli.csv).map(|p| p.display().to_string()),
    ));
    if let Some(db) = &cli.db {
        destinations.push((
            "sqlite".into(),
            load::write_sqlite(&dataset, db, &cli.table)
                .map(|n| format!("{} rows into '{}'", n, cli.table)),
        ));
    }

    println!("\nLoad destinations:");
    let mut any_ok = false;
    for (name, outcome) in &destinations {
        match outcome {
            Ok(detail) => {
                any_ok = true;
                println!("  ok {}: {}", name, detail);
            }
            Err(e) => println!("  failed {}: {:#}", name, e),
        }
    }

    if let Some(path) = &cli.report {
        let report = RunReport::build(&scrape, &dataset, &destinations);
        std::fs::write(path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Run report written to {}", path.display());
    }

    println!("\nDone in {:.1}s", t0.elapsed().as_secs_f64());

    if !any_ok {
        bail!("all load destinations failed");
    }
    Ok(())
}

// ── Run report ──

#[derive(Serialize)]
struct RunReport {
    extract: ExtractSummary,
    transform: TransformSummary,
    load: Vec<DestinationSummary>,
}

#[derive(Serialize)]
struct ExtractSummary {
    records: usize,
    pages_ok: usize,
    pages_skipped: Vec<SkipSummary>,
}

#[derive(Serialize)]
struct SkipSummary {
    page: u32,
    reason: String,
}

#[derive(Serialize)]
struct TransformSummary {
    records: usize,
    columns: Vec<String>,
}

#[derive(Serialize)]
struct DestinationSummary {
    destination: String,
    success: bool,
    detail: String,
}

impl RunReport {
    fn build(
        scrape: &ScrapeReport,
        dataset: &Dataset,
        destinations: &[(String, Result<String>)],
    ) -> Self {
        RunReport {
            extract: ExtractSummary {
                records: scrape.records.len(),
                pages_ok: scrape.pages_ok,
                pages_skipped: scrape
                    .skipped
                    .iter()
                    .map(|s| SkipSummary {
                        page: s.page,
                        reason: s.reason.clone(),
                    })
                    .collect(),
            },
            transform: TransformSummary {
                records: dataset.len(),
                columns: dataset.columns.clone(),
            },
            load: destinations
                .iter()
                .map(|(name, outcome)| DestinationSummary {
                    destination: name.clone(),
                    success: outcome.is_ok(),
                    detail: match outcome {
                        Ok(detail) => detail.clone(),
                        Err(e) => format!("{:#}", e),
                    },
                })
                .collect(),
        }
    }
}
