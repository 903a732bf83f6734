//! Topics and the payloads carried on them.

use carhub_core::{FilterState, RecordId};
use serde::{Deserialize, Serialize};

/// Named channel on the bus.
///
/// Publishers and subscribers agree on topic and payload shape out of band.
/// The two topics are independent: a subscriber on one never sees traffic on
/// the other.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    /// A normalized filter snapshot settled and was published.
    FiltersChanged,
    /// A list entry was clicked.
    RecordSelected,
}

impl Topic {
    /// Stable topic name (wire/log identifier).
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::FiltersChanged => "filters-changed",
            Topic::RecordSelected => "record-selected",
        }
    }
}

/// Record selection notice, published exactly once per list-entry click.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEvent {
    pub record_id: RecordId,
}

/// Payload delivered to subscribers of the corresponding topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    FiltersChanged(FilterState),
    RecordSelected(SelectionEvent),
}

impl Message {
    /// The topic this payload travels on.
    pub fn topic(&self) -> Topic {
        match self {
            Message::FiltersChanged(_) => Topic::FiltersChanged,
            Message::RecordSelected(_) => Topic::RecordSelected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_variants_map_to_their_topics() {
        let filters = Message::FiltersChanged(FilterState::default());
        assert_eq!(filters.topic(), Topic::FiltersChanged);

        let selected = Message::RecordSelected(SelectionEvent {
            record_id: RecordId::new(),
        });
        assert_eq!(selected.topic(), Topic::RecordSelected);
    }

    #[test]
    fn topic_names_are_stable() {
        assert_eq!(Topic::FiltersChanged.as_str(), "filters-changed");
        assert_eq!(Topic::RecordSelected.as_str(), "record-selected");
        assert_eq!(
            serde_json::to_string(&Topic::RecordSelected).unwrap(),
            "\"record-selected\""
        );
    }
}
