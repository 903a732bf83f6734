//! `carhub-core` — catalog domain building blocks.
//!
//! This crate contains **pure domain** primitives (no IO, no async, no clocks).

pub mod filters;
pub mod id;
pub mod money;
pub mod record;

pub use filters::FilterState;
pub use id::{ParseRecordIdError, RecordId};
pub use money::Money;
pub use record::{CarRecord, CarSummary, MISSING_FIELD, price_label};
