//! Data layer
//!
//! Everything the views display that is not a literal:
//!
//! - [`sample`]: the synthetic daily sales series behind the chart tabs
//! - [`cache`]: explicit memoization of generated series
//! - [`table`]: CSV upload parsing with column type inference
//! - [`describe`]: descriptive statistics over a parsed table

pub mod cache;
pub mod describe;
pub mod error;
pub mod sample;
pub mod table;

pub use cache::{CacheStats, SampleCache, SampleKey};
pub use describe::{
    describe, summarize, CategoricalSummary, Description, NumericSummary, UploadSummary,
};
pub use error::{DataError, DataResult};
pub use sample::{generate, rng_for, MonthlySales, SampleRow, SampleSeries, Segment};
pub use table::{Cell, ColumnKind, DataTable};
