//! HTTP Server Module
//!
//! Wires the books and search handlers into one Axum router and wraps it in the
//! cross-cutting middleware (request logging, CORS, JSON content type).

pub mod middleware;
pub mod router;

#[cfg(test)]
mod tests;
