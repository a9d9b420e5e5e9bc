pub mod chart;
pub mod data_selector;

pub use chart::ConsumptionChart;
pub use data_selector::DataSelector;
