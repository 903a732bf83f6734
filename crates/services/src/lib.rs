//! `carhub-services` — collaborators behind narrow interfaces.
//!
//! The remote platform (record API, picklist metadata, similar-records
//! procedure) is opaque to the rest of the workspace: panels and the app
//! driver only see the traits defined here. [`InMemoryCatalog`] is the
//! in-memory implementation used by tests and the demo binary.

pub mod error;
pub mod fetch;
pub mod fields;
pub mod memory;
pub mod navigate;
pub mod notify;

pub use error::{ServiceError, ServiceResult};
pub use fetch::{MetadataStore, RecordStore, SimilarityService};
pub use fields::{
    CAR_BRAND_FIELD, CAR_DETAIL_FIELDS, CAR_OBJECT, FieldSelection, PicklistEntry, PicklistField,
};
pub use memory::InMemoryCatalog;
pub use navigate::{NavigationTarget, Navigator, RecordingNavigator, TracingNavigator};
pub use notify::{CollectingSink, Notice, NotificationSink, Severity, TracingSink};
