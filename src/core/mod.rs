pub mod aggregate;
pub mod dashboard;
pub mod loader;
pub mod normalize;
pub mod scrape;

pub use crate::domain::model::{
    AggregationResult, GroupTotal, LayoffRecord, LayoffTable, LoadReport, Region, ScrapedTable,
    SourceOutcome,
};
pub use crate::domain::ports::{PageSource, Storage};
pub use crate::utils::error::Result;
