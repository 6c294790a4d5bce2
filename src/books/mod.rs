//! Books Module
//!
//! The catalogue record type and the CRUD endpoints built on `BookRepository`.
//!
//! ## Submodules
//! - **`types`**: `Book`, client input with field validation, pagination and response DTOs.
//! - **`handlers`**: Axum handlers for list/create/get/update/delete.

pub mod handlers;
pub mod types;
