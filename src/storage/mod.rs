//! Storage Module
//!
//! File-backed persistence for the book catalogue.
//!
//! ## Core Concepts
//! - **Snapshot reads**: Every read loads the complete collection; there are no partial reads.
//! - **Atomic rewrite**: Writes replace the whole file through a temp file + rename.
//! - **Access**: `BookStore` is the read-only capability handed to the search engine,
//!   `BookRepository` adds the CRUD operations used by the books API.

pub mod error;
pub mod file_store;
pub mod repository;
