use crate::catalog::CatalogIndex;
use crate::config::MalformedListingPolicy;
use crate::matcher::rule::matches;
use crate::model::{AppError, Listing, NormalizedListing, NormalizedProduct};
use crate::normalizer::normalize_listing;
use crate::parser::{ListingParser, RecordParser};
use crate::storage::ResultSet;
use crate::utils::record_lines;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, warn};

/// Counters for one pass over the listing file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingStats {
    pub read: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub skipped: usize,
}

/// Assigns listings to catalog products. Sole writer of the result set
/// during a pass.
pub struct Matcher<'a> {
    catalog: &'a CatalogIndex,
    parser: ListingParser,
    policy: MalformedListingPolicy,
}

impl<'a> Matcher<'a> {
    pub fn new(catalog: &'a CatalogIndex, policy: MalformedListingPolicy) -> Self {
        Self {
            catalog,
            parser: ListingParser::new(),
            policy,
        }
    }

    /// First product that claims the listing.
    ///
    /// Groups are probed in catalog order, each one whose manufacturer is
    /// contained in the listing's manufacturer. Inside a group products are
    /// tried in catalog order and the first hit ends the search.
    pub fn find_product(&self, listing: &NormalizedListing) -> Option<&'a NormalizedProduct> {
        self.catalog
            .groups()
            .iter()
            .filter(|group| listing.manufacturer.contains(group.manufacturer.as_str()))
            .find_map(|group| {
                group
                    .products
                    .iter()
                    .find(|product| matches(product, &listing.title))
            })
    }

    /// Matches one parsed listing and stores its original text on a hit.
    /// Returns the product name it was attached to.
    pub fn match_listing(&self, listing: Listing, results: &mut ResultSet) -> Option<&'a str> {
        let normalized = normalize_listing(&listing);
        let product = self.find_product(&normalized)?;
        results.record(&product.name, listing.raw);
        Some(product.name.as_str())
    }

    /// Streams the listing file line by line through the matcher.
    pub fn match_all<R: BufRead>(
        &self,
        reader: R,
        source: &Path,
        results: &mut ResultSet,
    ) -> Result<ListingStats, AppError> {
        let mut stats = ListingStats::default();

        for item in record_lines(reader, source) {
            let (line_no, line) = item?;
            stats.read += 1;

            let parsed = line.and_then(|text| self.parser.parse_line(&text, line_no));
            let listing = match parsed {
                Ok(listing) => listing,
                Err(e) => match self.policy {
                    MalformedListingPolicy::Skip => {
                        warn!("Skipping listing: {}", e);
                        stats.skipped += 1;
                        continue;
                    }
                    MalformedListingPolicy::Abort => return Err(AppError::MalformedListing(e)),
                },
            };

            match self.match_listing(listing, results) {
                Some(name) => {
                    debug!("Line {} matched {}", line_no, name);
                    stats.matched += 1;
                }
                None => stats.unmatched += 1,
            }
        }

        Ok(stats)
    }
}
