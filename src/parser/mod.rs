pub mod jsonl_parser;

pub use jsonl_parser::{ListingParser, ProductParser, RecordParser};
