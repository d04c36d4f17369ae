//! Friendship graph: undirected relations over user ids
//!
//! Symmetry is the structural invariant: whenever `b` appears in `a`'s
//! neighbor set, `a` appears in `b`'s. Every mutation re-establishes it
//! before returning, so no intermediate state is observable through the
//! component lock.
//!
//! Nodes are never auto-created. Operations against an unregistered id fail
//! explicitly; registration and unregistration are the only state
//! transitions a node has.

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::errors::{DomainError, Result};
use crate::types::UserId;

/// Undirected relationship store keyed by user id
#[derive(Debug, Default)]
pub struct FriendshipGraph {
    adjacency: HashMap<UserId, HashSet<UserId>>,
}

impl FriendshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty neighbor set for `id`
    pub fn register(&mut self, id: UserId) -> Result<()> {
        if self.adjacency.contains_key(&id) {
            return Err(DomainError::UserAlreadyRegistered(id));
        }
        self.adjacency.insert(id, HashSet::new());
        Ok(())
    }

    /// Remove `id` and cascade: drop it from every neighbor's set
    pub fn unregister(&mut self, id: UserId) -> Result<()> {
        let neighbors = self
            .adjacency
            .remove(&id)
            .ok_or(DomainError::UserNotFound(id))?;

        for neighbor in &neighbors {
            if let Some(set) = self.adjacency.get_mut(neighbor) {
                set.remove(&id);
            }
        }

        debug!(user_id = %id, severed = neighbors.len(), "unregistered user from graph");
        Ok(())
    }

    /// Add a mutual friendship; idempotent when already friends
    pub fn add_friend(&mut self, a: UserId, b: UserId) -> Result<()> {
        if a == b {
            return Err(DomainError::invalid_argument(
                "friend_id",
                "a user cannot befriend themselves",
            ));
        }
        self.require_registered(a)?;
        self.require_registered(b)?;

        // Both lookups verified above; insert on both sides keeps symmetry
        if let Some(set) = self.adjacency.get_mut(&a) {
            set.insert(b);
        }
        if let Some(set) = self.adjacency.get_mut(&b) {
            set.insert(a);
        }
        Ok(())
    }

    /// Remove a mutual friendship
    ///
    /// Removing an edge that does not exist is an error, consistent with the
    /// other absent-entity operations.
    pub fn delete_friend(&mut self, a: UserId, b: UserId) -> Result<()> {
        self.require_registered(a)?;
        self.require_registered(b)?;

        let existed = self
            .adjacency
            .get_mut(&a)
            .map(|set| set.remove(&b))
            .unwrap_or(false);

        if !existed {
            return Err(DomainError::FriendshipNotFound { user: a, friend: b });
        }

        if let Some(set) = self.adjacency.get_mut(&b) {
            set.remove(&a);
        }
        Ok(())
    }

    /// Snapshot of `a`'s neighbor set
    ///
    /// Returns an owned copy so callers cannot mutate graph state from
    /// outside the component lock.
    pub fn friends_of(&self, a: UserId) -> Result<HashSet<UserId>> {
        self.adjacency
            .get(&a)
            .cloned()
            .ok_or(DomainError::UserNotFound(a))
    }

    /// Intersection of two users' neighbor sets
    ///
    /// `a` and `b` themselves are stripped from the result. A node's own id
    /// should never appear in its own neighbor set, but the strip guards
    /// against data-model drift.
    pub fn common_friends(&self, a: UserId, b: UserId) -> Result<HashSet<UserId>> {
        let set_a = self.adjacency.get(&a).ok_or(DomainError::UserNotFound(a))?;
        let set_b = self.adjacency.get(&b).ok_or(DomainError::UserNotFound(b))?;

        let mut common: HashSet<UserId> = set_a.intersection(set_b).copied().collect();
        common.remove(&a);
        common.remove(&b);
        Ok(common)
    }

    /// Whether `id` has a node in the graph
    pub fn contains(&self, id: UserId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Number of registered users
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    fn require_registered(&self, id: UserId) -> Result<()> {
        if !self.adjacency.contains_key(&id) {
            return Err(DomainError::UserNotFound(id));
        }
        Ok(())
    }
}
