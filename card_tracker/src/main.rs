//! Card Tracker CLI
//!
//! Resolves card image files against the Pokémon TCG catalog, prints the
//! collection table and optionally exports it as CSV.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use card_tracker::console::{ConsolePrompt, TableRenderer};
use card_tracker::{CardTracker, SortField, TrackerConfig};
use clap::Parser;

/// Trading card collection tracker - match card images and value the collection
#[derive(Parser, Debug)]
#[command(name = "card_tracker")]
#[command(version, about, long_about = None)]
struct Args {
    /// Card image files to add (only the file names are used)
    files: Vec<PathBuf>,

    /// Catalog API base URL (default: $POKEMONTCG_API_URL or the public API)
    #[arg(long)]
    api_url: Option<String>,

    /// Catalog API key (default: $POKEMONTCG_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Never contact the catalog, simulate all lookups
    #[arg(long, default_value_t = false)]
    offline: bool,

    /// Seed for simulated cards and estimated prices
    #[arg(long)]
    seed: Option<u64>,

    /// Start with an empty collection instead of the demo cards
    #[arg(long, default_value_t = false)]
    no_demo: bool,

    /// Maximum number of search results per lookup
    #[arg(long, default_value_t = 10)]
    page_size: usize,

    /// Skip every ambiguous match instead of asking
    #[arg(long, default_value_t = false)]
    non_interactive: bool,

    /// Show only cards whose name, set or rarity contains this text
    #[arg(short, long, default_value = "")]
    search: String,

    /// Show only cards from this set id (e.g. swsh4)
    #[arg(long = "set", default_value = "")]
    set_id: String,

    /// Show only cards of this rarity
    #[arg(long, default_value = "")]
    rarity: String,

    /// Sort column (name, set, number, rarity, condition, price); repeat to flip direction
    #[arg(long, value_parser = parse_sort_field)]
    sort: Vec<SortField>,

    /// Write the collection as CSV to this file
    #[arg(long)]
    export: Option<PathBuf>,
}

fn parse_sort_field(s: &str) -> Result<SortField, String> {
    SortField::parse(s).ok_or_else(|| format!("unknown sort field '{s}'"))
}

impl Args {
    fn config(&self) -> TrackerConfig {
        let mut config = TrackerConfig::from_env();
        if let Some(url) = &self.api_url {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(key) = &self.api_key {
            config.api_key = key.clone();
        }
        config.offline = self.offline;
        config.seed = self.seed;
        config.load_demo = !self.no_demo;
        config.page_size = self.page_size;
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logger. Set RUST_LOG environment variable to control log level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Starting card_tracker...");

    let mut tracker = match CardTracker::new(args.config()) {
        Ok(tracker) => tracker,
        Err(e) => {
            log::error!("Failed to start tracker: {}", e);
            std::process::exit(1);
        }
    };
    tracker.init().await;

    if !args.files.is_empty() {
        let mut prompt =
            ConsolePrompt::new(io::stdin().lock(), io::stdout(), !args.non_interactive);
        let summary = tracker
            .upload(args.files.clone(), &mut prompt, |progress| {
                println!(
                    "[{}/{}] Processing {}... ({:.0}%)",
                    progress.index,
                    progress.total,
                    progress.file_name,
                    progress.percent()
                );
            })
            .await;
        println!(
            "Added {} card(s), skipped {}, no match for {}, duplicate files {}",
            summary.added.len(),
            summary.skipped,
            summary.abandoned,
            summary.duplicates
        );
    }

    let view = tracker.view_mut();
    view.set_query(&args.search);
    view.set_set_filter(&args.set_id);
    view.set_rarity_filter(&args.rarity);
    for field in &args.sort {
        tracker.sort_by(*field);
    }
    let stdout = io::stdout();
    let color = stdout.is_terminal();
    tracker.refresh(&mut TableRenderer::new(stdout, color));

    if let Some(path) = &args.export {
        match tracker.export_to(path) {
            Ok(rows) => println!("Exported {} card(s) to {}", rows, path.display()),
            Err(e) => {
                log::error!("Failed to export collection: {}", e);
                std::process::exit(1);
            }
        }
    }
}
