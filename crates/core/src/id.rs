//! Strongly-typed identifiers.

use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error produced when a record identifier fails to parse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid record id: {0}")]
pub struct ParseRecordIdError(String);

/// Identifier of a catalog record.
///
/// The platform assigns record ids; the client treats them as opaque.
/// Locally minted ids use UUIDv7 (time-ordered). Prefer passing ids
/// explicitly in tests for determinism.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Mint a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for RecordId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<RecordId> for Uuid {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl FromStr for RecordId {
    type Err = ParseRecordIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s).map_err(|e| ParseRecordIdError(format!("{s}: {e}")))?;
        Ok(Self(uuid))
    }
}
