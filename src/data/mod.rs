pub mod classifier;
pub mod dates;
pub mod download;
pub mod normalizer;
pub mod observer;
pub mod source;
mod types;

pub use classifier::ColumnClassifier;
pub use normalizer::TableNormalizer;
pub use observer::{LoadEvent, LoadObserver, LogObserver, NullObserver, RecordingObserver};
pub use types::{
    ColumnClassification,
    ConsumptionKind,
    NormalizedTable,
    RawTable,
    Record,
    TableSummary,
    DATE_COLUMN,
    ELECTRICITY_COLUMN,
    GAS_COLUMN,
    GENERIC_COLUMN,
};
