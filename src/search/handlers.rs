use super::engine::SearchEngine;
use super::types::{SearchOutcome, SearchParams};
use crate::books::types::ErrorResponse;
use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_search(
    Query(params): Query<SearchParams>,
    Extension(engine): Extension<Arc<SearchEngine>>,
) -> Response {
    match engine.search(&params.q).await {
        Ok(SearchOutcome::Matches(books)) => {
            tracing::info!("Search {:?} returned {} books", params.q.trim(), books.len());
            (StatusCode::OK, Json(books)).into_response()
        }
        Ok(SearchOutcome::NoMatches { query }) => {
            tracing::info!("Search {:?} found no books", query);
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(format!(
                    "No books found matching '{}'",
                    query
                ))),
            )
                .into_response()
        }
        Ok(SearchOutcome::InvalidQuery(reason)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(reason.to_string())),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Search failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Database error")),
            )
                .into_response()
        }
    }
}
