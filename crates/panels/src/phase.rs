//! Shared render phase for data-backed panels.

use serde::{Deserialize, Serialize};

/// Render phase of a data-backed panel.
///
/// `Idle → Loading → {Populated | Empty | Errored}`, re-entering `Loading`
/// on every new triggering publication. There is no terminal phase; the
/// cycle repeats for the panel's full lifetime.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No trigger received yet.
    #[default]
    Idle,
    /// A fetch is outstanding.
    Loading,
    /// The last fetch produced data.
    Populated,
    /// The last fetch succeeded with no data.
    Empty,
    /// The last fetch failed.
    Errored,
}

impl Phase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Phase::Loading)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Loading => "loading",
            Phase::Populated => "populated",
            Phase::Empty => "empty",
            Phase::Errored => "errored",
        }
    }
}
