//! Popularity index: bucketed order statistics over film like-counts
//!
//! Likes and unlikes are frequent, and so are top-K queries, so re-sorting
//! the catalog on every query is off the table. Instead films live in score
//! buckets: a `BTreeMap` from score to the set of film ids currently at that
//! score, kept consistent with a per-film score map. A like moves one id
//! between two adjacent buckets (amortized O(1) set ops plus an O(log b)
//! bucket lookup), and top-K walks buckets from the high end, paying for the
//! buckets scanned plus K rather than for the whole catalog.
//!
//! Invariants, re-established by every mutation:
//! - a registered film appears in exactly one bucket, keyed by its score
//! - empty buckets are removed, bounding memory and scan cost
//! - a user contributes at most one like per film
//! - scores never go negative

use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

use crate::errors::{DomainError, Result};
use crate::types::{FilmId, UserId};

/// Bucketed ranking structure over film ids and like counts
#[derive(Debug, Default)]
pub struct PopularityIndex {
    /// film -> current score
    scores: HashMap<FilmId, u32>,

    /// score -> films currently at that score; keys only exist while the
    /// bucket is non-empty
    buckets: BTreeMap<u32, HashSet<FilmId>>,

    /// film -> users whose like currently contributes to its score
    likes: HashMap<FilmId, HashSet<UserId>>,
}

impl PopularityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a film at score 0
    pub fn register(&mut self, id: FilmId) -> Result<()> {
        self.register_with_score(id, 0)
    }

    /// Register a film at an arbitrary starting score
    pub fn register_with_score(&mut self, id: FilmId, score: u32) -> Result<()> {
        if self.scores.contains_key(&id) {
            return Err(DomainError::FilmAlreadyRegistered(id));
        }
        self.scores.insert(id, score);
        self.buckets.entry(score).or_default().insert(id);
        self.likes.insert(id, HashSet::new());
        Ok(())
    }

    /// Drop a film: bucket membership, score entry, and all recorded likes
    pub fn unregister(&mut self, id: FilmId) -> Result<()> {
        let score = self
            .scores
            .remove(&id)
            .ok_or(DomainError::FilmNotFound(id))?;

        self.remove_from_bucket(id, score);
        let likes = self.likes.remove(&id).unwrap_or_default();

        debug!(film_id = %id, score, likes = likes.len(), "unregistered film from index");
        Ok(())
    }

    /// Record a like, moving the film one bucket up
    ///
    /// Returns the new score. A failed call leaves score and bucket
    /// membership untouched.
    pub fn like(&mut self, film: FilmId, user: UserId) -> Result<u32> {
        let score = *self.scores.get(&film).ok_or(DomainError::FilmNotFound(film))?;

        let likers = self.likes.entry(film).or_default();
        if !likers.insert(user) {
            return Err(DomainError::AlreadyLiked { film, user });
        }

        let new_score = score + 1;
        self.move_between_buckets(film, score, new_score);
        self.scores.insert(film, new_score);
        Ok(new_score)
    }

    /// Remove a previously recorded like, moving the film one bucket down
    ///
    /// The score floor is 0 regardless of bookkeeping history.
    pub fn unlike(&mut self, film: FilmId, user: UserId) -> Result<u32> {
        let score = *self.scores.get(&film).ok_or(DomainError::FilmNotFound(film))?;

        let likers = self.likes.entry(film).or_default();
        if !likers.remove(&user) {
            return Err(DomainError::NotLiked { film, user });
        }

        let new_score = score.saturating_sub(1);
        self.move_between_buckets(film, score, new_score);
        self.scores.insert(film, new_score);
        Ok(new_score)
    }

    /// Current score of a registered film
    pub fn score_of(&self, film: FilmId) -> Result<u32> {
        self.scores
            .get(&film)
            .copied()
            .ok_or(DomainError::FilmNotFound(film))
    }

    /// Top `k` film ids by descending score
    ///
    /// Walks buckets from the highest score down, emitting ids in ascending
    /// id order within a bucket so equal-score results are deterministic.
    /// Returns fewer than `k` ids when fewer films are registered.
    pub fn top_k(&self, k: i64) -> Result<Vec<FilmId>> {
        if k < 0 {
            return Err(DomainError::invalid_argument(
                "count",
                format!("must be non-negative, got {k}"),
            ));
        }
        let k = k as usize;

        let mut result = Vec::with_capacity(k.min(self.scores.len()));
        'scan: for films in self.buckets.values().rev() {
            let mut bucket: Vec<FilmId> = films.iter().copied().collect();
            bucket.sort_unstable();
            for id in bucket {
                if result.len() >= k {
                    break 'scan;
                }
                result.push(id);
            }
        }
        Ok(result)
    }

    /// Cascade entry point for user deletion: forget every like the user
    /// contributed, decrementing the affected films' scores
    ///
    /// Returns the number of likes removed.
    pub fn forget_user(&mut self, user: UserId) -> usize {
        let liked_films: Vec<FilmId> = self
            .likes
            .iter()
            .filter(|(_, likers)| likers.contains(&user))
            .map(|(&film, _)| film)
            .collect();

        for &film in &liked_films {
            // The film is registered (it has a likes entry), so this cannot
            // fail with NotFound and the user's like was just observed
            let _ = self.unlike(film, user);
        }

        if !liked_films.is_empty() {
            debug!(user_id = %user, removed = liked_films.len(), "purged likes for deleted user");
        }
        liked_films.len()
    }

    /// Whether a film is registered
    pub fn contains(&self, film: FilmId) -> bool {
        self.scores.contains_key(&film)
    }

    /// Number of registered films
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Number of distinct score buckets currently held
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    fn move_between_buckets(&mut self, film: FilmId, from: u32, to: u32) {
        if from == to {
            return;
        }
        self.remove_from_bucket(film, from);
        self.buckets.entry(to).or_default().insert(film);
    }

    fn remove_from_bucket(&mut self, film: FilmId, score: u32) {
        if let Some(bucket) = self.buckets.get_mut(&score) {
            bucket.remove(&film);
            if bucket.is_empty() {
                self.buckets.remove(&score);
            }
        }
    }
}
