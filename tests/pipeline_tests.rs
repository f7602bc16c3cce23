// End-to-end runs of the matching pipeline over real files.

use listing_matcher::config::{AppConfig, MalformedListingPolicy};
use listing_matcher::model::AppError;
use listing_matcher::pipeline;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

fn setup(products: &str, listings: &str) -> (TempDir, AppConfig) {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        product_file: dir.path().join("products.txt"),
        listing_file: dir.path().join("listings.txt"),
        result_file: dir.path().join("results.txt"),
        on_malformed_listing: MalformedListingPolicy::Skip,
    };
    fs::write(&config.product_file, products).unwrap();
    fs::write(&config.listing_file, listings).unwrap();
    (dir, config)
}

fn output_lines(config: &AppConfig) -> Vec<String> {
    fs::read_to_string(&config.result_file)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

const PRODUCTS: &str = r#"{"product_name":"Nikon_Coolpix_S4000","manufacturer":"Nikon","family":"Coolpix","model":"S4000","announced-date":"2010-01-05T19:00:00.000-05:00"}
{"product_name":"Fujifilm_X100","manufacturer":"Fujifilm","model":"X100","announced-date":"2010-09-19T20:00:00.000-04:00"}
{"product_name":"Canon_PowerShot_SX130_IS","manufacturer":"Canon","family":"PowerShot","model":"SX130 IS","announced-date":"2010-08-18T20:00:00.000-04:00"}
{"product_name":"Canon_EOS_5D","manufacturer":"Canon","family":"EOS","model":"5D"}
"#;

const LISTINGS: &str = r#"{"title":"Nikon Coolpix S4000 12MP Digital Camera","manufacturer":"Nikon","currency":"USD","price":"199.99"}
{"title":"Nikon Coolpix S40001 camera","manufacturer":"Nikon","currency":"USD","price":"99.00"}
{"title":"Fujifilm X100 black","manufacturer":"FUJIFILM Corporation","currency":"GBP","price":"899.00"}
{"title":"Canon PowerShot SX130 IS 12.1 MP","manufacturer":"Canon Inc.","currency":"CAD","price":"229.99"}
{"title":"Canon EOS 5D Mark II body","manufacturer":"Canon Canada","currency":"CAD","price":"2199.00"}
{"title":"Canon EOS 5DS R","manufacturer":"Canon","currency":"CAD","price":"3999.00"}
{"title":"Coolpix S4000 strap","manufacturer":"Generic","currency":"USD","price":"5.00"}
"#;

#[test]
fn end_to_end_single_product() {
    let products = r#"{"product_name":"Nikon Coolpix S4000","manufacturer":"Nikon","family":"Coolpix","model":"S4000"}"#;
    let listing = r#"{"title":"Nikon Coolpix S4000 12MP Digital Camera","manufacturer":"Nikon","currency":"USD","price":"199.99"}"#;
    let (_dir, config) = setup(products, listing);

    let report = pipeline::run(&config).unwrap();
    assert_eq!(report.products, 1);
    assert_eq!(report.matched, 1);

    assert_eq!(
        output_lines(&config),
        [format!(r#"{{"product_name":"Nikon Coolpix S4000","listings":[{listing}]}}"#)]
    );
}

#[test]
fn every_product_appears_once_even_without_matches() {
    let (_dir, config) = setup(PRODUCTS, "");
    let report = pipeline::run(&config).unwrap();
    assert_eq!(report.listings_read, 0);

    let names: Vec<String> = output_lines(&config)
        .iter()
        .map(|line| {
            let v: Value = serde_json::from_str(line).unwrap();
            assert_eq!(v["listings"], Value::Array(vec![]));
            v["product_name"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(
        names,
        ["Nikon_Coolpix_S4000", "Fujifilm_X100", "Canon_PowerShot_SX130_IS", "Canon_EOS_5D"]
    );
}

#[test]
fn listings_attach_to_at_most_one_product() {
    let (_dir, config) = setup(PRODUCTS, LISTINGS);
    let report = pipeline::run(&config).unwrap();

    assert_eq!(report.listings_read, 7);
    assert_eq!(report.matched, 4);
    assert_eq!(report.unmatched, 3);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.manufacturer_groups, 3);

    let mut seen = HashSet::new();
    let mut per_product = Vec::new();
    for line in output_lines(&config) {
        let v: Value = serde_json::from_str(&line).unwrap();
        let listings = v["listings"].as_array().unwrap().clone();
        for l in &listings {
            assert!(seen.insert(l.to_string()), "listing attached twice: {l}");
        }
        per_product.push((v["product_name"].as_str().unwrap().to_string(), listings.len()));
    }

    assert_eq!(
        per_product,
        [
            ("Nikon_Coolpix_S4000".to_string(), 1),
            ("Fujifilm_X100".to_string(), 1),
            ("Canon_PowerShot_SX130_IS".to_string(), 1),
            ("Canon_EOS_5D".to_string(), 1),
        ]
    );
}

#[test]
fn emitted_listings_are_the_original_text() {
    let listing = r#"{"price": "899.00", "title":"Fujifilm X100 BLACK ", "manufacturer":"FUJIFILM","extra":{"seller":"Ünïcode"}}"#;
    let (_dir, config) = setup(PRODUCTS, &format!("{listing}\n"));
    pipeline::run(&config).unwrap();

    let line = output_lines(&config)
        .into_iter()
        .find(|l| l.contains("Fujifilm_X100"))
        .unwrap();
    assert_eq!(line, format!(r#"{{"product_name":"Fujifilm_X100","listings":[{listing}]}}"#));
}

#[test]
fn matched_listings_keep_input_order() {
    let listings = r#"{"title":"Fujifilm X100 first","manufacturer":"Fujifilm"}
{"title":"unrelated","manufacturer":"Fujifilm"}
{"title":"Fujifilm X100 second","manufacturer":"Fujifilm"}
"#;
    let (_dir, config) = setup(PRODUCTS, listings);
    pipeline::run(&config).unwrap();

    let line = output_lines(&config)
        .into_iter()
        .find(|l| l.contains("Fujifilm_X100"))
        .unwrap();
    let v: Value = serde_json::from_str(&line).unwrap();
    let titles: Vec<_> = v["listings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, ["Fujifilm X100 first", "Fujifilm X100 second"]);
}

#[test]
fn malformed_listing_is_skipped_and_counted() {
    let listings = format!("{{\"title\":\"broken\"}}\n{{oops\n{LISTINGS}");
    let (_dir, config) = setup(PRODUCTS, &listings);
    let report = pipeline::run(&config).unwrap();
    assert_eq!(report.skipped, 2);
    assert_eq!(report.matched, 4);
}

#[test]
fn malformed_listing_aborts_when_configured() {
    let (_dir, mut config) = setup(PRODUCTS, "{\"title\":\"broken\"}\n");
    config.on_malformed_listing = MalformedListingPolicy::Abort;
    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, AppError::MalformedListing(_)));
}

#[test]
fn malformed_product_aborts_the_run() {
    let products = format!("{PRODUCTS}{{\"product_name\":\"No model\",\"manufacturer\":\"Sony\"}}\n");
    let (_dir, config) = setup(&products, LISTINGS);
    let err = pipeline::run(&config).unwrap_err();
    match err {
        AppError::MalformedProduct(e) => assert_eq!(e.line(), 5),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn missing_listing_file_fails_before_matching() {
    let (_dir, config) = setup(PRODUCTS, "");
    fs::remove_file(&config.listing_file).unwrap();
    let err = pipeline::run(&config).unwrap_err();
    assert!(matches!(err, AppError::Io { ref path, .. } if path == &config.listing_file));
}

#[test]
fn empty_catalog_leaves_every_listing_unmatched() {
    let (_dir, config) = setup("", LISTINGS);
    let report = pipeline::run(&config).unwrap();
    assert_eq!(report.products, 0);
    assert_eq!(report.unmatched, 7);
    assert!(output_lines(&config).is_empty());
}

#[test]
fn invalid_utf8_listing_line_is_skipped() {
    let (_dir, config) = setup(PRODUCTS, "");
    let mut bytes = b"{\"title\":\"Fujifilm X100 \xff\",\"manufacturer\":\"Fujifilm\"}\n".to_vec();
    bytes.extend_from_slice(LISTINGS.as_bytes());
    fs::write(&config.listing_file, bytes).unwrap();

    let report = pipeline::run(&config).unwrap();
    assert_eq!(report.skipped, 1);
    assert_eq!(report.matched, 4);
}
