// Catalog index: products grouped by normalized manufacturer
use crate::model::{AppError, NormalizedProduct, Product};
use crate::normalizer::normalize_product;
use crate::parser::{ProductParser, RecordParser};
use crate::storage::ResultSet;
use crate::utils::record_lines;
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info};

/// Products sharing one normalized manufacturer, in catalog order.
#[derive(Debug, Clone)]
pub struct ManufacturerGroup {
    pub manufacturer: String,
    pub products: Vec<NormalizedProduct>,
}

#[derive(Debug, Default)]
pub struct CatalogIndex {
    groups: Vec<ManufacturerGroup>,
    group_by_key: HashMap<String, usize>,
    products: Vec<Product>,
}

impl CatalogIndex {
    /// Builds the index and the empty result set for `products`.
    ///
    /// Every product gets its result entry here, before any listing is seen.
    /// Product names must be unique since results are keyed by them.
    pub fn build<I>(products: I) -> Result<(CatalogIndex, ResultSet), AppError>
    where
        I: IntoIterator<Item = Product>,
    {
        let mut index = CatalogIndex::default();
        let mut results = ResultSet::new();

        for product in products {
            if !results.register(&product.name) {
                return Err(AppError::DuplicateProduct(product.name));
            }
            index.insert(product);
        }

        Ok((index, results))
    }

    fn insert(&mut self, product: Product) {
        if let Some(date) = product.announced_date {
            debug!("{} announced {}", product.name, date.format("%Y-%m-%d"));
        }
        let normalized = normalize_product(&product);
        match self.group_by_key.get(&normalized.manufacturer) {
            Some(&pos) => self.groups[pos].products.push(normalized),
            None => {
                debug!("New manufacturer group: {}", normalized.manufacturer);
                self.group_by_key
                    .insert(normalized.manufacturer.clone(), self.groups.len());
                self.groups.push(ManufacturerGroup {
                    manufacturer: normalized.manufacturer.clone(),
                    products: vec![normalized],
                });
            }
        }
        self.products.push(product);
    }

    /// Groups in the order their manufacturer was first seen.
    pub fn groups(&self) -> &[ManufacturerGroup] {
        &self.groups
    }

    pub fn group(&self, normalized_manufacturer: &str) -> Option<&ManufacturerGroup> {
        self.group_by_key
            .get(normalized_manufacturer)
            .map(|&pos| &self.groups[pos])
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Reads the product file and builds the catalog. Any malformed line aborts
/// the load.
pub fn load_catalog<R: BufRead>(reader: R, source: &Path) -> Result<(CatalogIndex, ResultSet), AppError> {
    let parser = ProductParser::new();
    let mut products = Vec::new();

    for item in record_lines(reader, source) {
        let (line_no, line) = item?;
        let product = line
            .and_then(|text| parser.parse_line(&text, line_no))
            .map_err(AppError::MalformedProduct)?;
        products.push(product);
    }

    let (index, results) = CatalogIndex::build(products)?;
    info!(
        "Catalog loaded: {} products in {} manufacturer groups",
        index.len(),
        index.groups().len()
    );
    Ok((index, results))
}
