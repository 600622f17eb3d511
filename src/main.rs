mod catalog;
mod export;
mod fetch;
mod model;
mod parser;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use catalog::Catalog;
use fetch::{Fetcher, RiverLink};
use model::{MileMarker, River};
use settings::Settings;

#[derive(Parser)]
#[command(name = "floatmissouri_scraper", about = "River mile-marker catalog from floatmissouri.com")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover river pages, scrape each one and write the JSON catalog
    Run {
        /// Max river pages to scrape (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        /// Output directory (default: FLOAT_OUTPUT_DIR or ".")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Parse a saved river page and print its catalog entry as JSON
    Parse {
        /// Path to the saved HTML page
        file: PathBuf,
        /// River identifier, e.g. "current-river"
        #[arg(long)]
        id: String,
        /// Display name (default: the id)
        #[arg(long)]
        name: Option<String>,
        /// Source URL recorded on the river
        #[arg(long, default_value = "")]
        url: String,
    },
    /// Summarize the JSON written by a previous run
    Stats {
        /// Directory holding the run output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
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
    let settings = Settings::load()?;

    let result = match cli.command {
        Commands::Run { limit, output } => {
            let fetcher = Fetcher::new(&settings)?;
            let mut links = fetcher.river_links().await?;
            if links.is_empty() {
                println!("No river pages found on the index.");
                return Ok(());
            }
            if let Some(n) = limit {
                links.truncate(n);
            }

            println!("Scraping {} river pages...", links.len());
            let (rivers, markers) = scrape_rivers(&fetcher, &links, &settings).await;
            println!("Scraped {} rivers, {} mile markers", rivers.len(), markers.len());

            let catalog = Catalog::build(&rivers, &markers);
            let dir = output.unwrap_or(settings.output_dir);
            for path in export::write_all(&dir, &rivers, &markers, &catalog)? {
                println!("Saved: {}", path.display());
            }
            println!();
            export::print_summary(&catalog);
            Ok(())
        }
        Commands::Parse { file, id, name, url } => {
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let link = RiverLink {
                name: name.unwrap_or_else(|| id.clone()),
                url,
                id,
            };
            let data = parser::process_page(&link, &html);
            let catalog = Catalog::build(&[data.river], &data.markers);
            println!("{}", serde_json::to_string_pretty(&catalog.rivers)?);
            Ok(())
        }
        Commands::Stats { output } => {
            let dir = output.unwrap_or(settings.output_dir);
            let (rivers, markers) = export::load_run(&dir)?;
            let catalog = Catalog::build(&rivers, &markers);
            export::print_summary(&catalog);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

/// Fetch and parse pages one at a time. A page that fails to fetch is
/// logged and skipped.
async fn scrape_rivers(
    fetcher: &Fetcher,
    links: &[RiverLink],
    settings: &Settings,
) -> (Vec<River>, Vec<MileMarker>) {
    let pb = ProgressBar::new(links.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("=> "));
    }

    let mut rivers = Vec::new();
    let mut markers = Vec::new();
    let mut errors = 0usize;

    for (i, link) in links.iter().enumerate() {
        pb.set_message(link.name.clone());
        match fetcher.get(&link.url).await {
            Ok(html) => {
                let data = parser::process_page(link, &html);
                info!("{}: {} mile markers", link.name, data.markers.len());
                rivers.push(data.river);
                markers.extend(data.markers);
            }
            Err(e) => {
                errors += 1;
                warn!("Skipping {}: {}", link.name, e);
            }
        }
        pb.inc(1);

        if i + 1 < links.len() {
            tokio::time::sleep(settings.request_delay()).await;
        }
    }

    pb.finish_and_clear();
    if errors > 0 {
        warn!("{} of {} pages failed", errors, links.len());
    }
    (rivers, markers)
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
