//! Type-safe identifier wrapper around [`Uuid`].
//!
//! Every animal carries an [`AnimalId`] for its whole lifetime. Two animals
//! with identical strength and speed are still told apart by identity, which
//! is how a predator recognises that its random draw returned itself.
//!
//! IDs use UUID v7 (time-ordered). Uniqueness within one process run is the
//! only property the simulation relies on.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an animal in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnimalId(pub Uuid);

impl AnimalId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Short human-readable tag for log lines.
    ///
    /// The last four hex digits of the UUID, enough to follow one animal
    /// through a run without printing the full identifier.
    pub fn short(self) -> String {
        let simple = self.0.simple().to_string();
        simple
            .get(simple.len().saturating_sub(4)..)
            .unwrap_or_default()
            .to_owned()
    }
}

impl Default for AnimalId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for AnimalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for AnimalId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<AnimalId> for Uuid {
    fn from(id: AnimalId) -> Self {
        id.0
    }
}
