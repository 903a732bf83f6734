//! Raw platform records and derived list rows.

use serde::{Deserialize, Serialize};

use crate::id::RecordId;
use crate::money::Money;

/// Placeholder rendered for absent display values.
pub const MISSING_FIELD: &str = "N/A";

/// Raw record as returned by the platform record API.
///
/// Fetch-by-filter responses carry the list-facing subset; the detail fields
/// stay `None` until a fetch-by-id with the detail field selection fills them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarRecord {
    pub id: RecordId,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub msrp: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_seats: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture_url: Option<String>,
}

/// Rendered list entry derived from a raw record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarSummary {
    pub id: RecordId,
    /// Display-cased (uppercase) name, [`MISSING_FIELD`] when absent.
    pub name: String,
    pub brand: String,
    pub category: String,
    /// Currency-formatted price, [`MISSING_FIELD`] when absent.
    pub price_label: String,
}

impl CarSummary {
    pub fn from_record(record: &CarRecord) -> Self {
        let name = if record.name.is_empty() {
            MISSING_FIELD.to_string()
        } else {
            record.name.to_uppercase()
        };
        Self {
            id: record.id,
            name,
            brand: record.brand.clone(),
            category: record.category.clone(),
            price_label: price_label(record.msrp),
        }
    }
}

/// Price label for rendered rows: formatted currency, [`MISSING_FIELD`] when absent.
pub fn price_label(price: Option<Money>) -> String {
    match price {
        Some(amount) => amount.to_string(),
        None => MISSING_FIELD.to_string(),
    }
}
