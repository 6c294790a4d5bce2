use crate::books::types::Book;
use serde::Serialize;
use std::fmt;

/// Fields a query is matched against, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BookField {
    Title,
    Description,
    Genre,
    AuthorId,
}

impl BookField {
    pub const SEARCH_ORDER: [BookField; 4] = [
        BookField::Title,
        BookField::Description,
        BookField::Genre,
        BookField::AuthorId,
    ];

    pub fn value<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            BookField::Title => &book.title,
            BookField::Description => &book.description,
            BookField::Genre => &book.genre,
            BookField::AuthorId => &book.author_id,
        }
    }
}

impl fmt::Display for BookField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookField::Title => "title",
            BookField::Description => "description",
            BookField::Genre => "genre",
            BookField::AuthorId => "authorId",
        };
        f.write_str(name)
    }
}

/// Returns the first field, in [`BookField::SEARCH_ORDER`], whose lower-cased
/// value contains `lower_query`. Empty field values never match.
pub fn matching_field(book: &Book, lower_query: &str) -> Option<BookField> {
    BookField::SEARCH_ORDER.into_iter().find(|field| {
        let value = field.value(book);
        !value.is_empty() && value.to_lowercase().contains(lower_query)
    })
}

pub fn matches(book: &Book, lower_query: &str) -> bool {
    matching_field(book, lower_query).is_some()
}
