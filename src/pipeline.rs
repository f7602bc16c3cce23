// Batch pipeline: load catalog, stream listings through the matcher, write results
use crate::catalog::load_catalog;
use crate::config::AppConfig;
use crate::matcher::Matcher;
use crate::model::{AppError, MatchReport};
use crate::storage::write_results;
use crate::utils::{create_writer, open_reader};
use chrono::Utc;
use tracing::{info, warn};

/// Runs one full matching pass described by `config`.
///
/// All three files are opened up front so I/O problems show before any
/// work is done.
pub fn run(config: &AppConfig) -> Result<MatchReport, AppError> {
    let started_at = Utc::now();

    let products = open_reader(&config.product_file)?;
    let listings = open_reader(&config.listing_file)?;
    let output = create_writer(&config.result_file)?;

    info!("Loading products from {}", config.product_file.display());
    let (catalog, mut results) = load_catalog(products, &config.product_file)?;
    if catalog.is_empty() {
        warn!("No products in {}, every listing will go unmatched", config.product_file.display());
    }

    info!("Matching listings from {}", config.listing_file.display());
    let matcher = Matcher::new(&catalog, config.on_malformed_listing);
    let stats = matcher.match_all(listings, &config.listing_file, &mut results)?;

    let written = write_results(&results, output, &config.result_file)?;
    info!(
        "Results written to {} ({} products, {} listings).",
        config.result_file.display(),
        written,
        results.total_matched()
    );

    Ok(MatchReport {
        products: catalog.len(),
        manufacturer_groups: catalog.groups().len(),
        listings_read: stats.read,
        matched: stats.matched,
        unmatched: stats.unmatched,
        skipped: stats.skipped,
        started_at,
        finished_at: Utc::now(),
    })
}
