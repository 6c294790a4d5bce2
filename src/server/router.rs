use super::middleware;
use crate::books::handlers::{
    handle_create_book, handle_delete_book, handle_get_book, handle_list_books, handle_update_book,
};
use crate::search::engine::SearchEngine;
use crate::search::handlers::handle_search;
use crate::storage::repository::BookRepository;

use axum::routing::get;
use axum::{Extension, Json, Router};
use std::sync::Arc;

/// Routes served by the API, for the startup banner. Must list every
/// method and path registered in `build_router`.
pub const ROUTES: &[(&str, &str)] = &[
    ("GET", "/books"),
    ("POST", "/books"),
    ("GET", "/books/search"),
    ("GET", "/books/:id"),
    ("PUT", "/books/:id"),
    ("DELETE", "/books/:id"),
    ("GET", "/health"),
];

pub fn build_router(repo: Arc<dyn BookRepository>, engine: Arc<SearchEngine>) -> Router {
    Router::new()
        .route("/books", get(handle_list_books).post(handle_create_book))
        .route("/books/search", get(handle_search))
        .route(
            "/books/:id",
            get(handle_get_book)
                .put(handle_update_book)
                .delete(handle_delete_book),
        )
        .route("/health", get(health))
        .layer(Extension(repo))
        .layer(Extension(engine))
        .layer(axum::middleware::from_fn(middleware::json_content_type))
        .layer(axum::middleware::from_fn(middleware::request_logging))
        .layer(axum::middleware::from_fn(middleware::cors))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
