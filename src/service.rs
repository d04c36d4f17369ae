//! Catalog service: the domain facade over the core structures
//!
//! Composes the identity registry, friendship graph and popularity index
//! into the use cases the web layer consumes. Each method is a thin,
//! ordered sequence of calls into the components; the facade adds no
//! invariants of its own beyond translating absent-entity conditions into
//! the domain error taxonomy.
//!
//! # Locking
//! One `parking_lot` mutex per core structure, held for the duration of
//! each component operation. Operations are short, CPU-bound and never
//! touch I/O, so coarse-grained locking is a deliberate simplicity over
//! per-entity locks; operations on different entities may contend on the
//! same lock and that is acceptable at the expected load.
//!
//! # Cascades
//! A facade call touching multiple components performs its sub-operations
//! sequentially with **no rollback**: if a later step fails, earlier
//! mutations stand. Callers observing a partial user-deletion failure
//! retry the remaining cleanup through [`CatalogService::purge_likes`].

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::errors::{DomainError, Result};
use crate::friendship::FriendshipGraph;
use crate::identity::IdentityRegistry;
use crate::metrics::{
    self, observe_op, FILM_OPS_TOTAL, FRIEND_OPS_TOTAL, LIKE_OPS_TOTAL, POPULAR_QUERY_DURATION,
    USER_OPS_TOTAL,
};
use crate::popularity::PopularityIndex;
use crate::types::{Film, FilmId, User, UserId};
use crate::validation;

/// Shared, thread-safe domain facade
///
/// One instance serves all concurrent request handlers; wrap it in an
/// `Arc` and clone the handle.
pub struct CatalogService {
    config: EngineConfig,

    identity: Mutex<IdentityRegistry>,
    graph: Mutex<FriendshipGraph>,
    index: Mutex<PopularityIndex>,

    /// Entity directories: id -> latest record. Cross-references between
    /// structures are by identifier only; nothing is shared by reference.
    users: RwLock<HashMap<UserId, User>>,
    films: RwLock<HashMap<FilmId, Film>>,
}

impl CatalogService {
    pub fn new(config: EngineConfig) -> Self {
        metrics::register_metrics();
        Self {
            config,
            identity: Mutex::new(IdentityRegistry::new()),
            graph: Mutex::new(FriendshipGraph::new()),
            index: Mutex::new(PopularityIndex::new()),
            users: RwLock::new(HashMap::new()),
            films: RwLock::new(HashMap::new()),
        }
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Create a user: assign an id, claim the email, register in the graph
    pub fn create_user(&self, mut user: User) -> Result<User> {
        let result = (|| {
            let id = self.identity.lock().register_user(&mut user)?;
            self.graph.lock().register(id)?;
            self.users.write().insert(id, user.clone());
            info!(user_id = %id, login = %user.login, "created user");
            Ok(user)
        })();
        observe_op(&USER_OPS_TOTAL, "create", result.is_ok());
        result
    }

    /// Update a user record; email uniqueness is re-enforced
    ///
    /// The directory write lock is held across the email move so two
    /// updates of the same user serialize: each sees the other's email as
    /// the old one, and no stale claim can be left behind in the registry.
    pub fn update_user(&self, mut user: User) -> Result<User> {
        let result = (|| {
            let id = user
                .id
                .ok_or_else(|| DomainError::invalid_entity("user.id", "missing id on update"))?;

            validation::validate_user(&mut user)
                .map_err(|e| DomainError::invalid_entity("user", e.to_string()))?;

            let mut users = self.users.write();
            let old_email = users
                .get(&id)
                .ok_or(DomainError::UserNotFound(id))?
                .email
                .clone();

            self.identity.lock().change_email(id, &old_email, &user.email)?;
            users.insert(id, user.clone());
            Ok(user)
        })();
        observe_op(&USER_OPS_TOTAL, "update", result.is_ok());
        result
    }

    pub fn get_user(&self, id: UserId) -> Result<User> {
        self.users
            .read()
            .get(&id)
            .cloned()
            .ok_or(DomainError::UserNotFound(id))
    }

    /// All users, sorted by id
    pub fn list_users(&self) -> Vec<User> {
        let users = self.users.read();
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.id);
        all
    }

    /// Delete a user, cascading through the graph and the index
    ///
    /// Sub-operations run sequentially: directory removal, email release,
    /// graph unregistration (severs all friendships), like purge. A failure
    /// part way leaves earlier steps applied; the remaining cleanup is
    /// retried via [`purge_likes`](Self::purge_likes).
    pub fn delete_user(&self, id: UserId) -> Result<()> {
        let result = (|| {
            let removed = self
                .users
                .write()
                .remove(&id)
                .ok_or(DomainError::UserNotFound(id))?;

            self.identity.lock().release_email(&removed.email);
            self.graph.lock().unregister(id)?;
            let purged = self.index.lock().forget_user(id);

            info!(user_id = %id, purged_likes = purged, "deleted user");
            Ok(())
        })();
        observe_op(&USER_OPS_TOTAL, "delete", result.is_ok());
        result
    }

    /// Explicit cleanup entry point: drop every like a user contributed
    ///
    /// Used to finish a partially failed deletion cascade; harmless when
    /// there is nothing left to purge.
    pub fn purge_likes(&self, id: UserId) -> usize {
        self.index.lock().forget_user(id)
    }

    // =========================================================================
    // Films
    // =========================================================================

    /// Create a film: assign an id and register it in the index at score 0
    pub fn create_film(&self, mut film: Film) -> Result<Film> {
        let result = (|| {
            let id = self.identity.lock().register_film(&mut film)?;
            self.index.lock().register(id)?;
            self.films.write().insert(id, film.clone());
            info!(film_id = %id, name = %film.name, "created film");
            Ok(film)
        })();
        observe_op(&FILM_OPS_TOTAL, "create", result.is_ok());
        result
    }

    /// Update a film record; the like score is untouched
    pub fn update_film(&self, film: Film) -> Result<Film> {
        let result = (|| {
            let id = film
                .id
                .ok_or_else(|| DomainError::invalid_entity("film.id", "missing id on update"))?;

            validation::validate_film(&film)
                .map_err(|e| DomainError::invalid_entity("film", e.to_string()))?;

            let mut films = self.films.write();
            if !films.contains_key(&id) {
                return Err(DomainError::FilmNotFound(id));
            }
            films.insert(id, film.clone());
            Ok(film)
        })();
        observe_op(&FILM_OPS_TOTAL, "update", result.is_ok());
        result
    }

    pub fn get_film(&self, id: FilmId) -> Result<Film> {
        self.films
            .read()
            .get(&id)
            .cloned()
            .ok_or(DomainError::FilmNotFound(id))
    }

    /// All films, sorted by id
    pub fn list_films(&self) -> Vec<Film> {
        let films = self.films.read();
        let mut all: Vec<Film> = films.values().cloned().collect();
        all.sort_by_key(|f| f.id);
        all
    }

    /// Delete a film, dropping its bucket membership and all its likes
    pub fn delete_film(&self, id: FilmId) -> Result<()> {
        let result = (|| {
            self.films
                .write()
                .remove(&id)
                .ok_or(DomainError::FilmNotFound(id))?;
            self.index.lock().unregister(id)?;
            info!(film_id = %id, "deleted film");
            Ok(())
        })();
        observe_op(&FILM_OPS_TOTAL, "delete", result.is_ok());
        result
    }

    // =========================================================================
    // Friendships
    // =========================================================================

    pub fn add_friend(&self, a: UserId, b: UserId) -> Result<()> {
        let result = self.graph.lock().add_friend(a, b);
        observe_op(&FRIEND_OPS_TOTAL, "add", result.is_ok());
        if result.is_ok() {
            debug!(user = %a, friend = %b, "friendship added");
        }
        result
    }

    pub fn delete_friend(&self, a: UserId, b: UserId) -> Result<()> {
        let result = self.graph.lock().delete_friend(a, b);
        observe_op(&FRIEND_OPS_TOTAL, "delete", result.is_ok());
        result
    }

    /// A user's friends as full records, sorted by id
    pub fn friends_of(&self, id: UserId) -> Result<Vec<User>> {
        let result = (|| {
            let ids = self.graph.lock().friends_of(id)?;
            Ok(self.resolve_users(ids))
        })();
        observe_op(&FRIEND_OPS_TOTAL, "list", result.is_ok());
        result
    }

    /// Mutual friends of two users as full records, sorted by id
    pub fn common_friends(&self, a: UserId, b: UserId) -> Result<Vec<User>> {
        let result = (|| {
            let ids = self.graph.lock().common_friends(a, b)?;
            Ok(self.resolve_users(ids))
        })();
        observe_op(&FRIEND_OPS_TOTAL, "common", result.is_ok());
        result
    }

    // =========================================================================
    // Likes and popularity
    // =========================================================================

    /// Record a like from `user` on `film`
    ///
    /// The directory read lock is held across the index update: a
    /// concurrent user deletion removes the directory entry before purging
    /// likes, so a like that passed the existence check always lands
    /// before the purge and cannot survive as a like from a deleted user.
    pub fn like_film(&self, film: FilmId, user: UserId) -> Result<u32> {
        let result = (|| {
            let users = self.users.read();
            if !users.contains_key(&user) {
                return Err(DomainError::UserNotFound(user));
            }
            self.index.lock().like(film, user)
        })();
        observe_op(&LIKE_OPS_TOTAL, "like", result.is_ok());
        result
    }

    /// Remove a previously recorded like
    pub fn unlike_film(&self, film: FilmId, user: UserId) -> Result<u32> {
        let result = (|| {
            let users = self.users.read();
            if !users.contains_key(&user) {
                return Err(DomainError::UserNotFound(user));
            }
            self.index.lock().unlike(film, user)
        })();
        observe_op(&LIKE_OPS_TOTAL, "unlike", result.is_ok());
        result
    }

    /// Current like count of a film
    pub fn film_score(&self, film: FilmId) -> Result<u32> {
        self.index.lock().score_of(film)
    }

    /// The most popular films as full records, descending score order
    ///
    /// `None` falls back to the configured default count; requests above
    /// the configured maximum are capped. Negative counts are rejected.
    pub fn popular_films(&self, count: Option<i64>) -> Result<Vec<Film>> {
        let timer = POPULAR_QUERY_DURATION.start_timer();

        let requested = count.unwrap_or(self.config.default_popular_count);
        let capped = requested.min(self.config.max_popular_count);

        let ids = self.index.lock().top_k(capped)?;
        let films = self.films.read();
        let ranked = ids.iter().filter_map(|id| films.get(id).cloned()).collect();

        timer.observe_duration();
        Ok(ranked)
    }

    fn resolve_users(&self, ids: impl IntoIterator<Item = UserId>) -> Vec<User> {
        let users = self.users.read();
        let mut resolved: Vec<User> = ids
            .into_iter()
            .filter_map(|id| users.get(&id).cloned())
            .collect();
        resolved.sort_by_key(|u| u.id);
        resolved
    }
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
