use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single catalogue record, as persisted in the data file and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub book_id: String,
    pub author_id: String,
    pub publisher_id: String,
    pub title: String,
    pub publication_date: String,
    pub isbn: String,
    pub pages: i64,
    pub genre: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    // Held as UTC: offsets written by other producers are normalised to `Z`
    // on the next rewrite; the instant is unchanged.
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Builds a fresh record from client input, assigning a UUID v4 id and
    /// setting both timestamps to now.
    pub fn from_input(input: BookInput) -> Self {
        let now = Utc::now();
        Self {
            book_id: uuid::Uuid::new_v4().to_string(),
            author_id: input.author_id,
            publisher_id: input.publisher_id,
            title: input.title,
            publication_date: input.publication_date,
            isbn: input.isbn,
            pages: input.pages,
            genre: input.genre,
            description: input.description,
            price: input.price,
            quantity: input.quantity,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every client-editable field, keeping id and `created_at`.
    pub fn apply(&mut self, input: BookInput) {
        self.author_id = input.author_id;
        self.publisher_id = input.publisher_id;
        self.title = input.title;
        self.publication_date = input.publication_date;
        self.isbn = input.isbn;
        self.pages = input.pages;
        self.genre = input.genre;
        self.description = input.description;
        self.price = input.price;
        self.quantity = input.quantity;
        self.updated_at = Utc::now();
    }
}

/// Client payload for create and update requests.
///
/// Missing fields fall back to their zero value so that validation can report
/// every problem at once instead of failing on the first absent key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookInput {
    pub author_id: String,
    pub publisher_id: String,
    pub title: String,
    pub publication_date: String,
    pub isbn: String,
    pub pages: i64,
    pub genre: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
}

/// All field problems found in a `BookInput`, rendered comma-separated.
#[derive(Debug, Error, PartialEq)]
#[error("{}", .0.join(", "))]
pub struct ValidationError(pub Vec<String>);

impl BookInput {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errs = Vec::new();

        if self.title.is_empty() {
            errs.push("title is required".to_string());
        }
        if self.author_id.is_empty() {
            errs.push("authorId is required".to_string());
        }
        if self.publisher_id.is_empty() {
            errs.push("publisherId is required".to_string());
        }
        if self.isbn.is_empty() {
            errs.push("isbn is required".to_string());
        }
        if self.pages <= 0 {
            errs.push("pages must be positive".to_string());
        }
        if self.price <= 0.0 {
            errs.push("price must be positive".to_string());
        }
        if self.quantity < 0 {
            errs.push("quantity cannot be negative".to_string());
        }

        if errs.is_empty() {
            Ok(())
        } else {
            Err(ValidationError(errs))
        }
    }
}

/// Query parameters accepted by `GET /books`.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl PaginationParams {
    pub const DEFAULT_LIMIT: usize = 10;

    /// Resolves `(limit, offset)`. Unparsable or out-of-range values fall back
    /// to the defaults rather than rejecting the request.
    pub fn resolve(&self) -> (usize, usize) {
        let limit = self
            .limit
            .as_deref()
            .and_then(|l| l.parse::<usize>().ok())
            .filter(|l| *l > 0)
            .unwrap_or(Self::DEFAULT_LIMIT);
        let offset = self
            .offset
            .as_deref()
            .and_then(|o| o.parse::<usize>().ok())
            .unwrap_or(0);
        (limit, offset)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookListResponse {
    pub data: Vec<Book>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

/// Body of every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
