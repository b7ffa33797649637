pub mod analytics;
pub mod config;
pub mod drilldown;
pub mod entry;
pub mod journal;
pub mod period;
pub mod render;
pub mod session;
pub mod tags;

pub use analytics::{AggregationResult, aggregate};
pub use config::Config;
pub use drilldown::{DrillDownFilter, DrillDownRecord, drill_down};
pub use entry::HourEntry;
pub use journal::Journal;
pub use period::{Period, resolve_dates};
pub use tags::{TagCategories, TagCategory};
