//! Interaction data model.
//!
//! Users and items are opaque string identifiers. Interactions are binary
//! flags stored densely, one row per user and one column per item.

mod dataset;

pub use dataset::Dataset;

use crate::error::{RecError, Result};
use crate::primitives::Matrix;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Stable user identifier.
pub type UserId = String;

/// Stable item identifier.
pub type ItemId = String;

/// Items for one user, most relevant first, without duplicates.
pub type RecommendationList = Vec<ItemId>;

/// One recommendation list per user.
///
/// A `BTreeMap` keeps serialized output identical across runs.
pub type RecommendationMap = BTreeMap<UserId, RecommendationList>;

/// Ground-truth relevant items per user. Users may be absent.
pub type RelevantItems = BTreeMap<UserId, BTreeSet<ItemId>>;

/// Binary user-item interaction matrix.
///
/// Rows follow the order of `users`, columns the order of `items`.
///
/// # Examples
///
/// ```
/// use aprender_rec::data::InteractionMatrix;
///
/// let m = InteractionMatrix::new(
///     vec!["u1".into(), "u2".into()],
///     vec!["a".into(), "b".into()],
///     &[vec![1, 0], vec![1, 1]],
/// ).expect("valid matrix");
/// assert_eq!(m.n_users(), 2);
/// assert!(m.has_interacted(1, 1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionMatrix {
    users: Vec<UserId>,
    items: Vec<ItemId>,
    flags: Matrix<u8>,
}

impl InteractionMatrix {
    /// Builds a validated interaction matrix.
    ///
    /// # Errors
    ///
    /// - [`RecError::MalformedMatrix`] if the row count differs from the
    ///   user count or any row length differs from the item count
    /// - [`RecError::InvalidFlag`] if a cell is neither 0 nor 1
    /// - [`RecError::DuplicateId`] if a user or item id repeats
    pub fn new(users: Vec<UserId>, items: Vec<ItemId>, purchases: &[Vec<u8>]) -> Result<Self> {
        if purchases.len() != users.len() {
            return Err(RecError::shape_mismatch("rows (users)", users.len(), purchases.len()));
        }
        check_unique("user", &users)?;
        check_unique("item", &items)?;

        let flags = Matrix::from_rows(purchases, items.len())?;
        for (u, row) in flags.rows().enumerate() {
            if let Some((i, &value)) = row.iter().enumerate().find(|&(_, &v)| v > 1) {
                return Err(RecError::InvalidFlag {
                    user: users[u].clone(),
                    item: items[i].clone(),
                    value,
                });
            }
        }

        Ok(Self {
            users,
            items,
            flags,
        })
    }

    /// User identifiers in row order.
    #[must_use]
    pub fn users(&self) -> &[UserId] {
        &self.users
    }

    /// Item identifiers in column order.
    #[must_use]
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }

    /// Number of users (rows).
    #[must_use]
    pub fn n_users(&self) -> usize {
        self.users.len()
    }

    /// Number of items (columns).
    #[must_use]
    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    /// True when there are no users or no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Interaction flags of one user.
    ///
    /// # Panics
    ///
    /// Panics if `user_idx` is out of bounds.
    #[must_use]
    pub fn row(&self, user_idx: usize) -> &[u8] {
        self.flags.row(user_idx)
    }

    /// Whether the user at `user_idx` interacted with the item at `item_idx`.
    #[must_use]
    pub fn has_interacted(&self, user_idx: usize, item_idx: usize) -> bool {
        self.flags.get(user_idx, item_idx) == 1
    }

    /// Underlying flag storage.
    #[must_use]
    pub fn flags(&self) -> &Matrix<u8> {
        &self.flags
    }
}

fn check_unique(kind: &'static str, ids: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(RecError::DuplicateId {
                kind,
                id: id.clone(),
            });
        }
    }
    Ok(())
}
