//! Remote record-access collaborators.
//!
//! These traits are consumed through generics by the app driver; the bounds
//! stay single-threaded because the driver awaits each call inline.

#![allow(async_fn_in_trait)]

use carhub_core::{CarRecord, FilterState, RecordId};

use crate::error::ServiceResult;
use crate::fields::{FieldSelection, PicklistEntry, PicklistField};

/// The platform record API.
pub trait RecordStore {
    /// Fetch the records matching `filters`, in platform order.
    async fn fetch_by_filter(&self, filters: &FilterState) -> ServiceResult<Vec<CarRecord>>;

    /// Fetch a single record, restricted to the given field selection.
    async fn fetch_by_id(&self, id: RecordId, fields: &FieldSelection) -> ServiceResult<CarRecord>;
}

/// Object/picklist metadata.
pub trait MetadataStore {
    /// Fetch the selectable values for a picklist field, in platform order.
    async fn fetch_picklist(&self, field: PicklistField) -> ServiceResult<Vec<PicklistEntry>>;
}

/// The remote similar-records procedure.
pub trait SimilarityService {
    /// Fetch records similar to `id` within `brand`, in platform order.
    async fn fetch_similar(&self, id: RecordId, brand: &str) -> ServiceResult<Vec<CarRecord>>;
}
