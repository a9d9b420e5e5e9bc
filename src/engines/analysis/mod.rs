mod analyzer;
mod range;
mod resolver;
mod types;

pub use analyzer::{parse_threshold, validate_threshold_value, Analyzer, FilteredRange};
pub use range::DateRange;
pub use resolver::{ColumnResolver, MatchConfidence, ResolvedColumn};
pub use types::{QueryOp, QueryResult, Subtable};
