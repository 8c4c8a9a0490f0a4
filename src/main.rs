//! Item Forge - Entry Point
//!
//! Loads a catalog dump, applies every spec fragment under a directory,
//! optional outfits and trader offers, and writes the patched catalog back out.

use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use item_forge::catalog::Catalog;
use item_forge::core::config::GeneratorConfig;
use item_forge::core::error::Result;
use item_forge::generator::ItemGenerator;
use item_forge::services::RagfairBlacklist;
use item_forge::spec::{OfferFile, OutfitBottomSpec, OutfitTopSpec};

/// Clone-and-propagate item generator
#[derive(Parser, Debug)]
#[command(name = "item-forge")]
#[command(about = "Generate new catalog entities from declarative spec fragments")]
struct Args {
    /// Catalog dump (JSON)
    #[arg(long)]
    catalog: PathBuf,

    /// Directory of spec fragments (.json / .toml), searched recursively
    #[arg(long)]
    specs: PathBuf,

    /// Generator configuration (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Outfit definitions (JSON with `tops` and `bottoms` lists)
    #[arg(long)]
    outfits: Option<PathBuf>,

    /// Trader offers (.json / .toml with an `Offers` list)
    #[arg(long)]
    offers: Option<PathBuf>,

    /// Random seed for deterministic preset assembly
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the patched catalog (defaults to stdout)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Where to write the market blacklist additions
    #[arg(long)]
    blacklist_output: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct OutfitFile {
    #[serde(default)]
    tops: Vec<OutfitTopSpec>,
    #[serde(default)]
    bottoms: Vec<OutfitBottomSpec>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "item_forge=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };

    let mut catalog = Catalog::from_json_file(&args.catalog)?;
    tracing::info!(
        "Loaded catalog {} ({} items)",
        args.catalog.display(),
        catalog.templates.items.len()
    );

    let mut generator = ItemGenerator::new(config);
    if let Some(seed) = args.seed {
        generator = generator.with_seed(seed);
    }

    let mut blacklist = RagfairBlacklist::default();
    let report = generator.generate_entities(&mut catalog, &mut blacklist, &args.specs)?;

    if let Some(path) = &args.outfits {
        let outfits: OutfitFile = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        for top in &outfits.tops {
            if let Err(e) = generator.create_clothing_top(&mut catalog, top) {
                tracing::error!("Failed to create outfit {}: {}", top.set_id, e);
            }
        }
        for bottom in &outfits.bottoms {
            if let Err(e) = generator.create_clothing_bottom(&mut catalog, bottom) {
                tracing::error!("Failed to create outfit {}: {}", bottom.set_id, e);
            }
        }
    }

    let offers = match &args.offers {
        Some(path) => generator.create_offers(&mut catalog, &OfferFile::load(path)?.offers),
        None => Vec::new(),
    };

    eprintln!(
        "Generated {}/{} entities, {} directives skipped, {} fragments rejected",
        report.generated(),
        report.specs.len(),
        report.skipped_directives(),
        report.rejected_fragments.len()
    );
    for failed in report.failed() {
        if let Some(error) = &failed.error {
            eprintln!("  {}: {}", failed.id, error);
        }
    }
    for rejected in &report.rejected_fragments {
        eprintln!("  rejected: {}", rejected);
    }
    if !offers.is_empty() {
        eprintln!(
            "Offers: {} committed, {} duplicates, {} failed",
            offers.iter().filter(|o| o.committed()).count(),
            offers.iter().filter(|o| o.duplicate()).count(),
            offers.iter().filter(|o| o.outcome.is_err()).count()
        );
        for offer in &offers {
            if let Err(error) = &offer.outcome {
                eprintln!("  {} on {}: {}", offer.item, offer.trader, error);
            }
        }
    }

    let json = catalog.to_json_pretty()?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, json)?;
            tracing::info!("Patched catalog written to {}", path.display());
        }
        None => println!("{}", json),
    }

    if let Some(path) = &args.blacklist_output {
        std::fs::write(path, serde_json::to_string_pretty(&blacklist)?)?;
    }

    Ok(())
}
