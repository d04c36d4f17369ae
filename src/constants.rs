//! Documented constants for the catalog engine
//!
//! This module contains all tunable parameters with justification for their
//! values. Centralizing constants prevents magic numbers and makes tuning
//! easier.

use chrono::NaiveDate;

// =============================================================================
// IDENTITY CONSTANTS
// =============================================================================

/// First identifier issued for each entity type
///
/// Identifiers start at 1 so that 0 can never collide with a valid id in
/// client payloads that default-initialize integers.
pub const FIRST_ID: u64 = 1;

// =============================================================================
// VALIDATION LIMITS
// =============================================================================

/// Maximum email length (RFC 5321 path limit is 256 including brackets)
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum login length
///
/// Long enough for any reasonable handle, short enough to keep friend-list
/// payloads compact.
pub const MAX_LOGIN_LENGTH: usize = 64;

/// Maximum film description length
///
/// 200 chars keeps the synopsis a synopsis; full plot summaries belong in
/// an external catalog, not the ranking engine's entity records.
pub const MAX_DESCRIPTION_LENGTH: usize = 200;

/// Earliest acceptable film release date
///
/// 1895-12-28: the Lumière brothers' first public screening. No film
/// predates cinema itself.
pub fn earliest_release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1895, 12, 28).expect("valid calendar date")
}

// =============================================================================
// RANKING CONSTANTS
// =============================================================================

/// Default number of films returned by the popularity query when the caller
/// does not specify a count
pub const DEFAULT_POPULAR_COUNT: i64 = 10;

/// Hard cap on a single popularity query
///
/// Bounds the response size and the bucket scan; callers wanting the full
/// catalog should page through it instead.
pub const MAX_POPULAR_COUNT: i64 = 1000;
