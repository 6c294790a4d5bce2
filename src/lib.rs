//! Book Catalogue Service Library
//!
//! This library crate defines the modules of the book catalogue HTTP service.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! - **`books`**: The record type, input validation and the CRUD endpoints.
//! - **`search`**: Query validation and the sequential / parallel chunked
//!   substring matcher that scans a snapshot of the whole catalogue.
//! - **`storage`**: Flat-file JSON persistence with atomic whole-file rewrites.
//! - **`server`**: Router assembly and HTTP middleware.
//! - **`config`**: Environment and command-line configuration.

pub mod books;
pub mod config;
pub mod search;
pub mod server;
pub mod storage;
