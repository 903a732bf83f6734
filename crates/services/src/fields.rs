//! Explicit field-selection configuration.
//!
//! The object name and field list are plain values handed to the fetch
//! collaborator; nothing here couples to a schema registry at compile time.

use serde::{Deserialize, Serialize};

/// Catalog object name on the platform.
pub const CAR_OBJECT: &str = "Car";

/// Object name plus field list for a fetch-by-id call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    pub object: &'static str,
    pub fields: &'static [&'static str],
}

/// Full field set rendered by the detail card.
pub const CAR_DETAIL_FIELDS: FieldSelection = FieldSelection {
    object: CAR_OBJECT,
    fields: &[
        "Id",
        "Name",
        "Brand",
        "Category",
        "Control",
        "Description",
        "NumberOfSeats",
        "PictureUrl",
    ],
};

/// Brand-only selection used to seed the similar-vehicles lookup.
pub const CAR_BRAND_FIELD: FieldSelection = FieldSelection {
    object: CAR_OBJECT,
    fields: &["Brand"],
};

/// Picklist-bearing fields on the catalog object.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PicklistField {
    Category,
    Brand,
}

impl PicklistField {
    /// Field identifier sent to the metadata collaborator.
    pub fn as_str(&self) -> &'static str {
        match self {
            PicklistField::Category => "Category",
            PicklistField::Brand => "Brand",
        }
    }
}

/// One selectable value of a picklist field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicklistEntry {
    pub label: String,
    pub value: String,
}

impl PicklistEntry {
    /// Entry whose label and stored value are the same string.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}
