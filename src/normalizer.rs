use crate::model::{Listing, NormalizedListing, NormalizedProduct, Product};

/// Case-folds and trims a field for comparison.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

pub fn normalize_product(product: &Product) -> NormalizedProduct {
    NormalizedProduct {
        // identity keeps the original spelling, it is what gets written out
        name: product.name.clone(),
        manufacturer: normalize(&product.manufacturer),
        family: product.family.as_deref().map(normalize),
        model: normalize(&product.model),
    }
}

pub fn normalize_listing(listing: &Listing) -> NormalizedListing {
    NormalizedListing {
        title: normalize(&listing.title),
        manufacturer: normalize(&listing.manufacturer),
    }
}
