//! Filmgraph Library
//!
//! In-memory domain-state engine for a social movie catalog.
//! Users register, rate films with likes, befriend each other, and query
//! popularity rankings and friend overlaps.
//!
//! # Core structures
//! - Identity registry (monotonic integer ids, unique emails)
//! - Friendship graph (symmetric relations, cascade cleanup)
//! - Popularity index (bucketed order statistics for top-K queries)
//!
//! # Design
//! - Pure in-memory: persistence, HTTP routing and SQL live in the callers
//! - Coarse-grained locking (one mutex per structure, operations are short
//!   and never block on I/O)
//! - All expected failures are explicit error values, never panics

pub mod config;
pub mod constants;
pub mod errors;
pub mod friendship;
pub mod identity;
pub mod metrics;
pub mod popularity;
pub mod service;
pub mod tracing_setup;
pub mod types;
pub mod validation;

// Re-export dependencies to ensure tests/benchmarks use the same version
pub use chrono;
pub use parking_lot;
