//! `carhub-panels` — the catalog-browsing panels.
//!
//! Each panel is a deterministic state machine: no IO, no async, no clocks.
//! Time enters only as explicit [`std::time::Instant`] arguments, and remote
//! calls leave as **pending fetch requests** that the app driver executes
//! and answers through `apply_*` methods carrying the originating trigger
//! key. A completion whose key no longer matches the panel's current key is
//! discarded, so stale fetches can never overwrite newer state.
//!
//! Lifecycle: every panel has `start()`/`stop()`. `stop()` cancels timers,
//! removes bus subscriptions, and freezes state.

pub mod detail;
pub mod filter;
pub mod list;
pub mod phase;
pub mod similar;

pub use detail::{DetailFetch, DetailPanel};
pub use filter::{DEBOUNCE_QUIET, FilterPanel};
pub use list::{ListFetch, ListPanel};
pub use phase::Phase;
pub use similar::{SimilarFetch, SimilarPanel};
