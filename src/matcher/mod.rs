// Matcher module: the family/model rule and the manufacturer-scoped engine.

pub mod engine;
pub mod rule;

pub use engine::{ListingStats, Matcher};
pub use rule::matches;
