//! `carhub-messaging` — in-process topic bus for panel coordination.
//!
//! No component holds a direct reference to another; all cross-panel
//! coordination goes through [`MessageBus`] topics. No IO / no async.

pub mod bus;
pub mod message;

pub use bus::{MessageBus, SubscriptionHandle};
pub use message::{Message, SelectionEvent, Topic};
