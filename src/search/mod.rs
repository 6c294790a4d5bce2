//! Search Service Module
//!
//! Case-insensitive substring search over the whole book catalogue.
//!
//! ## Overview
//! A search runs in four steps: the trimmed query is validated (before any
//! storage access), a snapshot of every record is read from the `BookStore`,
//! a scan strategy is chosen from the snapshot size, and the strategy collects
//! the records whose title, description, genre or author id contain the query.
//!
//! ## Submodules
//! - **`validator`**: Query length rules.
//! - **`matcher`**: Per-record field matching, reporting the first matching field.
//! - **`strategy`**: Strategy selection, chunk planning, sequential and parallel scans.
//! - **`engine`**: The orchestrator tying validation, storage and scanning together.
//! - **`trace`**: Observer hook receiving structured search events.
//! - **`handlers`**: HTTP request handler for the Axum web server.
//! - **`types`**: Outcomes, errors and request parameters.

pub mod engine;
pub mod handlers;
pub mod matcher;
pub mod strategy;
pub mod trace;
pub mod types;
pub mod validator;
