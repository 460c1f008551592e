//! # FamilyHub Shared Library
//!
//! Core of the FamilyHub backend: the JSON document store, the typed
//! repositories over its collections, and the auth gate.
//!
//! ## Module Organization
//!
//! - `store`: Document store with pluggable storage backends
//! - `models`: Users, posts, tasks and categories with their operations
//! - `auth`: Password hashing, signed credentials, bearer middleware, role checks

pub mod auth;
pub mod models;
pub mod store;

/// Current version of the FamilyHub shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
