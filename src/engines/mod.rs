pub mod analysis;
pub mod trend;

pub use analysis::{Analyzer, DateRange, QueryOp, QueryResult, Subtable};
pub use trend::TrendCurve;
