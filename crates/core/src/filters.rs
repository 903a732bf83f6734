//! Filter snapshot published by the filter panel.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Immutable filter snapshot.
///
/// A default-constructed snapshot means "no filtering applied". Consumers
/// receive copies over the bus and never mutate them; only the filter panel
/// that owns the state writes to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Free-text search over record names. Empty = no restriction.
    pub search_text: String,
    /// Upper price bound. `None` = unbounded.
    pub max_price: Option<Money>,
    /// Category restriction. Empty = all categories.
    pub selected_categories: BTreeSet<String>,
    /// Brand restriction. Empty = all brands.
    pub selected_brands: BTreeSet<String>,
}

impl FilterState {
    /// Whether this snapshot restricts anything at all.
    pub fn is_unfiltered(&self) -> bool {
        self.search_text.is_empty()
            && self.max_price.is_none()
            && self.selected_categories.is_empty()
            && self.selected_brands.is_empty()
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Set the price bound, normalizing the legacy numeric sentinel.
    ///
    /// `None` and any value at or above [`Money::UNBOUNDED_SENTINEL`] both
    /// mean "unbounded"; the canonical form is `None`.
    pub fn set_max_price(&mut self, price: Option<Money>) {
        self.max_price = price.filter(|p| *p < Money::UNBOUNDED_SENTINEL);
    }

    pub fn set_selected_categories(&mut self, values: impl IntoIterator<Item = String>) {
        self.selected_categories = values.into_iter().collect();
    }

    pub fn set_selected_brands(&mut self, values: impl IntoIterator<Item = String>) {
        self.selected_brands = values.into_iter().collect();
    }
}
