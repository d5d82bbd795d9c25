//! Serialized input record: users, items, purchases and ground truth.

use super::{InteractionMatrix, ItemId, RelevantItems, UserId};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Pipeline input as exchanged with the data repository.
///
/// JSON layout:
///
/// ```json
/// {
///   "users": ["u1", "u2"],
///   "items": ["a", "b"],
///   "purchases": [[1, 0], [0, 1]],
///   "relevant_items": { "u1": ["b"] }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// User identifiers, one per purchase row.
    pub users: Vec<UserId>,
    /// Item identifiers, one per purchase column.
    pub items: Vec<ItemId>,
    /// Binary interaction flags indexed `[user][item]`.
    pub purchases: Vec<Vec<u8>>,
    /// Ground-truth relevant items per user.
    #[serde(default)]
    pub relevant_items: BTreeMap<UserId, Vec<ItemId>>,
}

impl Dataset {
    /// Parses a dataset from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RecError::Serialization`] on malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an I/O or serialization error.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Builds the validated interaction matrix.
    ///
    /// # Errors
    ///
    /// Fails when `purchases` does not line up with `users`/`items`.
    pub fn interaction_matrix(&self) -> Result<InteractionMatrix> {
        InteractionMatrix::new(self.users.clone(), self.items.clone(), &self.purchases)
    }

    /// Ground truth as sets; duplicate entries in a user's list collapse.
    #[must_use]
    pub fn relevant(&self) -> RelevantItems {
        self.relevant_items
            .iter()
            .map(|(user, items)| (user.clone(), items.iter().cloned().collect()))
            .collect()
    }
}
