use super::types::{Book, BookInput, BookListResponse, ErrorResponse, PaginationParams};
use crate::storage::error::StoreError;
use crate::storage::repository::BookRepository;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use std::sync::Arc;

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

/// Maps repository failures to responses. Storage internals are logged, never returned.
fn store_error_response(err: StoreError) -> Response {
    if err.is_infrastructure() {
        tracing::error!("Storage failure: {:?}", err);
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error");
    }
    match err {
        StoreError::NotFound => error_response(StatusCode::NOT_FOUND, "Book not found"),
        other => error_response(StatusCode::CONFLICT, other.to_string()),
    }
}

/// Runs a repository call on the blocking pool; file I/O never stalls a runtime worker.
async fn with_repo<T, F>(repo: Arc<dyn BookRepository>, f: F) -> Result<T, Response>
where
    T: Send + 'static,
    F: FnOnce(&dyn BookRepository) -> Result<T, StoreError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(repo.as_ref()))
        .await
        .map_err(|e| {
            tracing::error!("Storage task failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        })?
        .map_err(store_error_response)
}

fn parse_input(payload: Result<Json<BookInput>, JsonRejection>) -> Result<BookInput, Response> {
    let Json(input) = payload.map_err(|e| {
        tracing::debug!("Rejected book payload: {}", e);
        error_response(StatusCode::BAD_REQUEST, "Invalid request payload")
    })?;
    input
        .validate()
        .map_err(|e| error_response(StatusCode::BAD_REQUEST, e.to_string()))?;
    Ok(input)
}

pub async fn handle_list_books(
    Query(params): Query<PaginationParams>,
    Extension(repo): Extension<Arc<dyn BookRepository>>,
) -> Response {
    let (limit, offset) = params.resolve();

    let books = match with_repo(repo, |r| r.list_all()).await {
        Ok(books) => books,
        Err(resp) => return resp,
    };

    let total = books.len();
    let data: Vec<Book> = books.into_iter().skip(offset).take(limit).collect();

    (
        StatusCode::OK,
        Json(BookListResponse {
            data,
            total,
            limit,
            offset,
        }),
    )
        .into_response()
}

pub async fn handle_create_book(
    Extension(repo): Extension<Arc<dyn BookRepository>>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> Response {
    let input = match parse_input(payload) {
        Ok(input) => input,
        Err(resp) => return resp,
    };

    let book = Book::from_input(input);
    match with_repo(repo, move |r| r.create(book)).await {
        Ok(book) => {
            tracing::info!("Created book {} ({})", book.book_id, book.isbn);
            (StatusCode::CREATED, Json(book)).into_response()
        }
        Err(resp) => resp,
    }
}

pub async fn handle_get_book(
    Path(id): Path<String>,
    Extension(repo): Extension<Arc<dyn BookRepository>>,
) -> Response {
    match with_repo(repo, move |r| r.get(&id)).await {
        Ok(book) => (StatusCode::OK, Json(book)).into_response(),
        Err(resp) => resp,
    }
}

pub async fn handle_update_book(
    Path(id): Path<String>,
    Extension(repo): Extension<Arc<dyn BookRepository>>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> Response {
    let input = match parse_input(payload) {
        Ok(input) => input,
        Err(resp) => return resp,
    };

    match with_repo(repo, move |r| r.update(&id, input)).await {
        Ok(book) => {
            tracing::info!("Updated book {}", book.book_id);
            (StatusCode::OK, Json(book)).into_response()
        }
        Err(resp) => resp,
    }
}

pub async fn handle_delete_book(
    Path(id): Path<String>,
    Extension(repo): Extension<Arc<dyn BookRepository>>,
) -> Response {
    let target = id.clone();
    match with_repo(repo, move |r| r.delete(&target)).await {
        Ok(()) => {
            tracing::info!("Deleted book {}", id);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(resp) => resp,
    }
}
