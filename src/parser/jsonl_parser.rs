// JSON-lines record parsing for the product and listing files
use crate::model::{Listing, Product, RecordError};
use crate::utils::parse_datetime;
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use tracing::warn;

pub const PRODUCT_NAME: &str = "product_name";
pub const PRODUCT_MANUFACTURER: &str = "manufacturer";
pub const PRODUCT_FAMILY: &str = "family";
pub const PRODUCT_MODEL: &str = "model";
pub const PRODUCT_DATE: &str = "announced-date";

pub const LISTING_TITLE: &str = "title";
pub const LISTING_MANUFACTURER: &str = "manufacturer";

/// Turns one input line into a typed record. `line_no` is 1-based and only
/// used for diagnostics.
pub trait RecordParser {
    type Record;

    fn parse_line(&self, line: &str, line_no: usize) -> Result<Self::Record, RecordError>;
}

pub struct ProductParser;

impl ProductParser {
    pub fn new() -> Self {
        Self
    }
}

pub struct ListingParser;

impl ListingParser {
    pub fn new() -> Self {
        Self
    }
}

impl RecordParser for ProductParser {
    type Record = Product;

    fn parse_line(&self, line: &str, line_no: usize) -> Result<Product, RecordError> {
        let fields = parse_object(line, line_no)?;

        let announced_date = match optional_str(&fields, PRODUCT_DATE, line_no)? {
            Some(text) => {
                let parsed = parse_datetime(&text);
                if parsed.is_none() {
                    warn!("Line {}: unparsable {} {:?}, ignoring", line_no, PRODUCT_DATE, text);
                }
                parsed
            }
            None => None,
        };

        Ok(Product {
            name: required_str(&fields, PRODUCT_NAME, line_no)?,
            manufacturer: required_str(&fields, PRODUCT_MANUFACTURER, line_no)?,
            family: optional_str(&fields, PRODUCT_FAMILY, line_no)?,
            model: required_str(&fields, PRODUCT_MODEL, line_no)?,
            announced_date,
        })
    }
}

impl RecordParser for ListingParser {
    type Record = Listing;

    fn parse_line(&self, line: &str, line_no: usize) -> Result<Listing, RecordError> {
        let raw: Box<RawValue> = serde_json::from_str(line.trim()).map_err(|e| RecordError::InvalidJson {
            line: line_no,
            reason: e.to_string(),
        })?;
        let fields = parse_object(raw.get(), line_no)?;

        Ok(Listing {
            title: required_str(&fields, LISTING_TITLE, line_no)?,
            manufacturer: required_str(&fields, LISTING_MANUFACTURER, line_no)?,
            raw,
        })
    }
}

fn parse_object(line: &str, line_no: usize) -> Result<Map<String, Value>, RecordError> {
    serde_json::from_str(line).map_err(|e| RecordError::InvalidJson {
        line: line_no,
        reason: e.to_string(),
    })
}

fn required_str(fields: &Map<String, Value>, field: &str, line_no: usize) -> Result<String, RecordError> {
    match fields.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(RecordError::MissingField {
            line: line_no,
            field: field.to_string(),
        }),
    }
}

// null counts as absent
fn optional_str(fields: &Map<String, Value>, field: &str, line_no: usize) -> Result<Option<String>, RecordError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(RecordError::InvalidField {
            line: line_no,
            field: field.to_string(),
        }),
    }
}
