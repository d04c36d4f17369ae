//! Identity registry: monotonic integer ids and email uniqueness
//!
//! Issues unique, monotonically increasing identifiers for newly created
//! entities. Counters are per entity type and append-only: an id handed out
//! is never reissued while the registry lives, even when a downstream
//! operation fails and the entity is discarded. This keeps ids safe to use
//! as cache keys and log correlators without generation counters.
//!
//! The registry also owns the user email index, the one secondary natural
//! key the engine enforces. Uniqueness is checked at creation and at update
//! time; the slot is released when a user is deleted.

use std::collections::HashMap;
use tracing::debug;

use crate::constants::FIRST_ID;
use crate::errors::{DomainError, Result};
use crate::types::{Film, FilmId, User, UserId};
use crate::validation;

/// Per-type id counters plus the email natural-key index
#[derive(Debug)]
pub struct IdentityRegistry {
    next_user_id: u64,
    next_film_id: u64,

    /// email -> owning user, enforced unique
    emails: HashMap<String, UserId>,
}

impl Default for IdentityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self {
            next_user_id: FIRST_ID,
            next_film_id: FIRST_ID,
            emails: HashMap::new(),
        }
    }

    /// Register a user: validate fields, claim the email, assign the id
    ///
    /// The id is written into the entity in place. The counter advances even
    /// if the caller later abandons the entity; ids are not reclaimed.
    pub fn register_user(&mut self, user: &mut User) -> Result<UserId> {
        validation::validate_user(user)
            .map_err(|e| DomainError::invalid_entity("user", e.to_string()))?;

        if self.emails.contains_key(&user.email) {
            return Err(DomainError::DuplicateEmail(user.email.clone()));
        }

        let id = UserId(self.next_user_id);
        self.next_user_id += 1;

        self.emails.insert(user.email.clone(), id);
        user.id = Some(id);

        debug!(user_id = %id, login = %user.login, "registered user identity");
        Ok(id)
    }

    /// Register a film: validate fields, assign the id
    pub fn register_film(&mut self, film: &mut Film) -> Result<FilmId> {
        validation::validate_film(film)
            .map_err(|e| DomainError::invalid_entity("film", e.to_string()))?;

        let id = FilmId(self.next_film_id);
        self.next_film_id += 1;

        film.id = Some(id);

        debug!(film_id = %id, name = %film.name, "registered film identity");
        Ok(id)
    }

    /// Move a user's email claim, enforcing uniqueness at update time
    ///
    /// A no-op when old and new are equal. Fails with `DuplicateEmail` when
    /// the new address belongs to a different user.
    pub fn change_email(&mut self, id: UserId, old: &str, new: &str) -> Result<()> {
        if old == new {
            return Ok(());
        }

        if let Some(&owner) = self.emails.get(new) {
            if owner != id {
                return Err(DomainError::DuplicateEmail(new.to_string()));
            }
        }

        self.emails.remove(old);
        self.emails.insert(new.to_string(), id);
        Ok(())
    }

    /// Release a deleted user's email so it can be registered again
    pub fn release_email(&mut self, email: &str) {
        self.emails.remove(email);
    }

    /// Look up the user owning an email, if any
    pub fn user_by_email(&self, email: &str) -> Option<UserId> {
        self.emails.get(email).copied()
    }
}
