//! Identifier newtypes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identity of one entry in the report cart.
///
/// Minted as a random UUID when the entry is added. The cart treats these as
/// unique within its sequence, and the JSON on disk stores them as bare
/// strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportItemId(Uuid);

impl ReportItemId {
    /// Mints a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrows the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ReportItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReportItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ReportItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}
