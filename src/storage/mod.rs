pub mod jsonl_writer;
pub mod result_set;

pub use jsonl_writer::write_results;
pub use result_set::{ResultRecord, ResultSet};
