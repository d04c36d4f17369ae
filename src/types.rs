//! Domain entity types shared across the engine
//!
//! Identifiers are dense positive integers assigned by the identity
//! registry. The two id spaces (users, films) are independent; newtypes
//! keep them from being mixed up at compile time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a registered user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub u64);

/// Identifier of a registered film
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FilmId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for FilmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog user
///
/// `id` is `None` until the identity registry assigns one at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,

    /// Natural key, unique across all users
    pub email: String,

    /// Login handle (no whitespace allowed)
    pub login: String,

    /// Display name; defaults to the login when blank
    #[serde(default)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
}

impl User {
    pub fn new(email: impl Into<String>, login: impl Into<String>) -> Self {
        Self {
            id: None,
            email: email.into(),
            login: login.into(),
            name: String::new(),
            birthday: None,
        }
    }
}

/// A catalog film
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Film {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<FilmId>,

    pub name: String,

    /// Short synopsis, capped at MAX_DESCRIPTION_LENGTH
    #[serde(default)]
    pub description: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,

    /// Running time in minutes, must be positive when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl Film {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            release_date: None,
            duration_minutes: None,
        }
    }
}
