use thiserror::Error;

pub const MIN_QUERY_LEN: usize = 2;
pub const MAX_QUERY_LEN: usize = 100;

/// Reasons a search query is rejected. The messages are returned to clients verbatim.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    #[error("Search query cannot be empty")]
    Empty,

    #[error("Search query must be at least 2 characters long")]
    TooShort,

    #[error("Search query too long (max 100 characters)")]
    TooLong,
}

/// Checks the trimmed query against the length bounds.
///
/// Length is measured in characters, not bytes, so a two-letter query in a
/// non-ASCII script is accepted the same way as `"ab"`.
pub fn validate(query: &str) -> Result<(), QueryError> {
    let len = query.trim().chars().count();

    if len == 0 {
        return Err(QueryError::Empty);
    }
    if len < MIN_QUERY_LEN {
        return Err(QueryError::TooShort);
    }
    if len > MAX_QUERY_LEN {
        return Err(QueryError::TooLong);
    }
    Ok(())
}
