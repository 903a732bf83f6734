//! `carhub-observability` — tracing/logging initialization.

pub mod logging;

pub use logging::{init, init_pretty};
