use super::validator::QueryError;
use crate::books::types::Book;
use crate::storage::error::StoreError;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Result of a search that ran to completion.
#[derive(Debug, PartialEq)]
pub enum SearchOutcome {
    /// The query failed validation; the store was never read.
    InvalidQuery(QueryError),
    /// The query was valid but nothing matched. Carries the trimmed query text.
    NoMatches { query: String },
    Matches(Vec<Book>),
}

/// Failures that prevent a search from producing an outcome at all.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("book store unavailable")]
    StoreUnavailable(#[source] StoreError),

    #[error("search worker failed: {0}")]
    Worker(String),
}
