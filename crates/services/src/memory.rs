//! In-memory catalog for tests/dev.
//!
//! Mirrors the remote controller's filter semantics without IO:
//!
//! - search text: case-insensitive substring match on the record name
//! - price bound: `msrp <= max` when bounded; records without a price only
//!   match the unbounded state
//! - categories/brands: membership, empty set = unrestricted
//! - similar: same brand, the record itself excluded, catalog order
//! - picklists: distinct values in catalog order

use std::sync::Arc;

use carhub_core::{CarRecord, FilterState, RecordId};

use crate::error::{ServiceError, ServiceResult};
use crate::fetch::{MetadataStore, RecordStore, SimilarityService};
use crate::fields::{FieldSelection, PicklistEntry, PicklistField};

/// Seedable in-memory record set serving all three fetch roles.
///
/// Cloning is cheap; clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    records: Arc<Vec<CarRecord>>,
}

impl InMemoryCatalog {
    pub fn new(records: Vec<CarRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    pub fn records(&self) -> &[CarRecord] {
        &self.records
    }

    fn matches(record: &CarRecord, filters: &FilterState) -> bool {
        let search_ok = filters.search_text.is_empty()
            || record
                .name
                .to_lowercase()
                .contains(&filters.search_text.to_lowercase());
        let price_ok = match filters.max_price {
            None => true,
            Some(bound) => record.msrp.is_some_and(|price| price <= bound),
        };
        let category_ok = filters.selected_categories.is_empty()
            || filters.selected_categories.contains(&record.category);
        let brand_ok =
            filters.selected_brands.is_empty() || filters.selected_brands.contains(&record.brand);
        search_ok && price_ok && category_ok && brand_ok
    }

    fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<PicklistEntry> {
        let mut seen = Vec::new();
        for value in values {
            if !value.is_empty() && !seen.iter().any(|s| s == value) {
                seen.push(value.to_string());
            }
        }
        seen.into_iter().map(PicklistEntry::plain).collect()
    }
}

impl RecordStore for InMemoryCatalog {
    async fn fetch_by_filter(&self, filters: &FilterState) -> ServiceResult<Vec<CarRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|record| Self::matches(record, filters))
            .cloned()
            .collect())
    }

    // The field selection is real-platform configuration; the in-memory
    // catalog always returns full records.
    async fn fetch_by_id(&self, id: RecordId, _fields: &FieldSelection) -> ServiceResult<CarRecord> {
        self.records
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::fetch(format!("no record with id {id}")))
    }
}

impl MetadataStore for InMemoryCatalog {
    async fn fetch_picklist(&self, field: PicklistField) -> ServiceResult<Vec<PicklistEntry>> {
        let entries = match field {
            PicklistField::Category => {
                Self::distinct(self.records.iter().map(|r| r.category.as_str()))
            }
            PicklistField::Brand => Self::distinct(self.records.iter().map(|r| r.brand.as_str())),
        };
        Ok(entries)
    }
}

impl SimilarityService for InMemoryCatalog {
    async fn fetch_similar(&self, id: RecordId, brand: &str) -> ServiceResult<Vec<CarRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|record| record.id != id && record.brand == brand)
            .cloned()
            .collect())
    }
}
