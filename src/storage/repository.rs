use super::error::StoreError;
use super::file_store::FileStore;
use crate::books::types::{Book, BookInput};

use std::sync::Arc;

/// Read access to the full record set.
///
/// This is the only capability the search engine depends on. Implementations
/// must return a complete, consistent snapshot; callers never do partial reads.
pub trait BookStore: Send + Sync {
    fn list_all(&self) -> Result<Vec<Book>, StoreError>;
}

/// CRUD operations over the catalogue, on top of [`BookStore`].
pub trait BookRepository: BookStore {
    fn get(&self, id: &str) -> Result<Book, StoreError>;
    fn create(&self, book: Book) -> Result<Book, StoreError>;
    fn update(&self, id: &str, input: BookInput) -> Result<Book, StoreError>;
    fn delete(&self, id: &str) -> Result<(), StoreError>;
}

pub struct FileBookRepository {
    store: Arc<FileStore>,
}

impl FileBookRepository {
    pub fn new(store: Arc<FileStore>) -> Self {
        Self { store }
    }
}

impl BookStore for FileBookRepository {
    fn list_all(&self) -> Result<Vec<Book>, StoreError> {
        self.store.read_all()
    }
}

impl BookRepository for FileBookRepository {
    fn get(&self, id: &str) -> Result<Book, StoreError> {
        self.store
            .read_all()?
            .into_iter()
            .find(|b| b.book_id == id)
            .ok_or(StoreError::NotFound)
    }

    fn create(&self, book: Book) -> Result<Book, StoreError> {
        self.store.update(|books| {
            if books.iter().any(|b| b.isbn == book.isbn) {
                return Err(StoreError::DuplicateIsbn);
            }
            books.push(book.clone());
            Ok(book)
        })
    }

    fn update(&self, id: &str, input: BookInput) -> Result<Book, StoreError> {
        self.store.update(|books| {
            let idx = books
                .iter()
                .position(|b| b.book_id == id)
                .ok_or(StoreError::NotFound)?;

            if books
                .iter()
                .enumerate()
                .any(|(i, b)| i != idx && b.isbn == input.isbn)
            {
                return Err(StoreError::DuplicateIsbn);
            }

            books[idx].apply(input);
            Ok(books[idx].clone())
        })
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.update(|books| {
            let idx = books
                .iter()
                .position(|b| b.book_id == id)
                .ok_or(StoreError::NotFound)?;
            books.remove(idx);
            Ok(())
        })
    }
}
