use serde::Serialize;
use serde_json::value::RawValue;
use std::collections::HashMap;

/// Per-product accumulator of matched listings, in catalog order.
#[derive(Debug, Default)]
pub struct ResultSet {
    entries: Vec<(String, Vec<Box<RawValue>>)>,
    positions: HashMap<String, usize>,
}

/// One output line: the product name and the original listing objects.
#[derive(Debug, Serialize)]
pub struct ResultRecord<'a> {
    pub product_name: &'a str,
    pub listings: &'a [Box<RawValue>],
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an empty entry for `name`. Returns false if the name is already known.
    pub fn register(&mut self, name: &str) -> bool {
        if self.positions.contains_key(name) {
            return false;
        }
        self.positions.insert(name.to_string(), self.entries.len());
        self.entries.push((name.to_string(), Vec::new()));
        true
    }

    /// Appends a listing to the product's entry. Returns false for unknown products.
    pub fn record(&mut self, name: &str, listing: Box<RawValue>) -> bool {
        match self.positions.get(name) {
            Some(&pos) => {
                self.entries[pos].1.push(listing);
                true
            }
            None => false,
        }
    }

    pub fn listings(&self, name: &str) -> Option<&[Box<RawValue>]> {
        self.positions
            .get(name)
            .map(|&pos| self.entries[pos].1.as_slice())
    }

    pub fn total_matched(&self) -> usize {
        self.entries.iter().map(|(_, l)| l.len()).sum()
    }

    /// Output records, one per registered product, zero-match ones included.
    pub fn emit(&self) -> impl Iterator<Item = ResultRecord<'_>> {
        self.entries.iter().map(|(name, listings)| ResultRecord {
            product_name: name,
            listings,
        })
    }
}
