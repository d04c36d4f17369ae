//! Structured error handling with stable error codes
//! Provides detailed error information for debugging and client error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{FilmId, UserId};

/// Structured error response for API clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Domain error types with proper categorization
///
/// The five kinds the engine distinguishes: invalid entity, invalid
/// argument, already registered (duplicates), not found, and like-state
/// violations. The web layer maps each kind to a stable status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    // Validation Errors (400)
    InvalidEntity { field: String, reason: String },
    InvalidArgument { param: String, reason: String },

    // Not Found Errors (404)
    UserNotFound(UserId),
    FilmNotFound(FilmId),
    FriendshipNotFound { user: UserId, friend: UserId },
    NotLiked { film: FilmId, user: UserId },

    // Conflict Errors (409)
    UserAlreadyRegistered(UserId),
    FilmAlreadyRegistered(FilmId),
    DuplicateEmail(String),
    AlreadyLiked { film: FilmId, user: UserId },
}

impl DomainError {
    /// Shorthand for an invalid entity field
    pub fn invalid_entity(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidEntity {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a malformed query parameter
    pub fn invalid_argument(param: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            param: param.to_string(),
            reason: reason.into(),
        }
    }

    /// Get error code for client identification
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidEntity { .. } => "INVALID_ENTITY",
            Self::InvalidArgument { .. } => "INVALID_ARGUMENT",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::FilmNotFound(_) => "FILM_NOT_FOUND",
            Self::FriendshipNotFound { .. } => "FRIENDSHIP_NOT_FOUND",
            Self::NotLiked { .. } => "NOT_LIKED",
            Self::UserAlreadyRegistered(_) => "USER_ALREADY_REGISTERED",
            Self::FilmAlreadyRegistered(_) => "FILM_ALREADY_REGISTERED",
            Self::DuplicateEmail(_) => "DUPLICATE_EMAIL",
            Self::AlreadyLiked { .. } => "ALREADY_LIKED",
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidEntity { .. } | Self::InvalidArgument { .. } => StatusCode::BAD_REQUEST,

            Self::UserNotFound(_)
            | Self::FilmNotFound(_)
            | Self::FriendshipNotFound { .. }
            | Self::NotLiked { .. } => StatusCode::NOT_FOUND,

            Self::UserAlreadyRegistered(_)
            | Self::FilmAlreadyRegistered(_)
            | Self::DuplicateEmail(_)
            | Self::AlreadyLiked { .. } => StatusCode::CONFLICT,
        }
    }

    /// Get detailed error message
    pub fn message(&self) -> String {
        match self {
            Self::InvalidEntity { field, reason } => {
                format!("Invalid entity field '{field}': {reason}")
            }
            Self::InvalidArgument { param, reason } => {
                format!("Invalid argument '{param}': {reason}")
            }
            Self::UserNotFound(id) => format!("User not found: {id}"),
            Self::FilmNotFound(id) => format!("Film not found: {id}"),
            Self::FriendshipNotFound { user, friend } => {
                format!("User {user} has no friendship with {friend}")
            }
            Self::NotLiked { film, user } => {
                format!("Film {film} has no like from user {user}")
            }
            Self::UserAlreadyRegistered(id) => format!("User already registered: {id}"),
            Self::FilmAlreadyRegistered(id) => format!("Film already registered: {id}"),
            Self::DuplicateEmail(email) => format!("Email already in use: {email}"),
            Self::AlreadyLiked { film, user } => {
                format!("Film {film} already liked by user {user}")
            }
        }
    }

    /// Convert to structured error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code().to_string(),
            message: self.message(),
            details: None,
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for DomainError {}

/// Axum IntoResponse implementation for proper HTTP responses
impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = self.to_response();

        (status, Json(body)).into_response()
    }
}

/// Type alias for Results using DomainError
pub type Result<T> = std::result::Result<T, DomainError>;
