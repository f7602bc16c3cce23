use listing_matcher::config::{load_config, AppConfig, DEFAULT_CONFIG_FILE};
use listing_matcher::model::AppError;
use listing_matcher::pipeline;
use std::path::{Path, PathBuf};
use tracing::{error, info};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Config path may be given as the only argument
    let explicit = std::env::args().nth(1).map(PathBuf::from);

    let config = match resolve_config(explicit.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            std::process::exit(1);
        }
    };

    match pipeline::run(&config) {
        Ok(report) => {
            info!(
                "Done: {} products ({} manufacturers), {} listings read, {} matched, {} unmatched, {} skipped in {} ms",
                report.products,
                report.manufacturer_groups,
                report.listings_read,
                report.matched,
                report.unmatched,
                report.skipped,
                report.elapsed().num_milliseconds()
            );
        }
        Err(e) => {
            error!("Matching failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// An explicitly named config must load. The default one is optional.
fn resolve_config(explicit: Option<&Path>) -> Result<AppConfig, AppError> {
    if let Some(path) = explicit {
        info!("Using config {}", path.display());
        return load_config(path);
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.exists() {
        info!("Using config {}", default_path.display());
        load_config(default_path)
    } else {
        info!("No {} found, using built-in file names", DEFAULT_CONFIG_FILE);
        Ok(AppConfig::default())
    }
}
