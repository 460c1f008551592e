//! The persisted document shape
//!
//! ```json
//! {
//!   "users": [ ... ],
//!   "posts": [ ... ],
//!   "tasks": [ ... ],
//!   "categories": { "life": ["family", "health"] }
//! }
//! ```
//!
//! Any missing top-level key deserializes to an empty collection.

use serde::{Deserialize, Serialize};
use serde_json::error::Category;

use crate::models::{category::Categories, post::Post, task::Task, user::User};

/// The single JSON document holding every collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    /// Registered accounts
    pub users: Vec<User>,

    /// Family updates, immutable after creation
    pub posts: Vec<Post>,

    /// Shared to-do items
    pub tasks: Vec<Task>,

    /// Category name → ordered subcategory names (read-only reference data)
    pub categories: Categories,
}

/// Why a stored document could not be parsed
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Not JSON at all (syntax error or truncated file)
    #[error("malformed JSON: {0}")]
    Malformed(serde_json::Error),

    /// Valid JSON whose records do not fit the document schema
    #[error("schema mismatch: {0}")]
    Incompatible(serde_json::Error),
}

impl Document {
    /// Parses a document, distinguishing garbage from foreign data
    ///
    /// # Errors
    ///
    /// - `ParseError::Malformed` if the text is not JSON
    /// - `ParseError::Incompatible` if it is JSON but a record does not fit
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        serde_json::from_str(raw).map_err(|e| match e.classify() {
            Category::Data => ParseError::Incompatible(e),
            Category::Io | Category::Syntax | Category::Eof => ParseError::Malformed(e),
        })
    }

    /// Parses a document, falling back to the empty default on any error
    ///
    /// Returns the parse error alongside the default so callers can log it.
    pub fn parse_or_default(raw: &str) -> (Self, Option<ParseError>) {
        match Self::parse(raw) {
            Ok(document) => (document, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}
