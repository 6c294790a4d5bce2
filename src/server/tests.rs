//! Server Module Tests
//!
//! Drives the full router with `tower::ServiceExt::oneshot` against a
//! temporary data file, checking the status mapping of every endpoint.

#[cfg(test)]
mod tests {
    use crate::books::types::{Book, BookListResponse, ErrorResponse};
    use crate::search::engine::SearchEngine;
    use crate::search::trace::NoopObserver;
    use crate::server::router::{ROUTES, build_router};
    use crate::storage::file_store::FileStore;
    use crate::storage::repository::FileBookRepository;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde::de::DeserializeOwned;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(dir: &tempfile::TempDir) -> Router {
        let store = FileStore::open(dir.path().join("books.json")).unwrap();
        let repo = Arc::new(FileBookRepository::new(Arc::new(store)));
        let engine = Arc::new(SearchEngine::new(repo.clone()).with_observer(Arc::new(NoopObserver)));
        build_router(repo, engine)
    }

    fn payload(title: &str, isbn: &str) -> String {
        serde_json::json!({
            "authorId": "author-1",
            "publisherId": "publisher-1",
            "title": title,
            "publicationDate": "2001-01-01",
            "isbn": isbn,
            "pages": 320,
            "genre": "Fantasy",
            "description": "An epic journey",
            "price": 19.99,
            "quantity": 2
        })
        .to_string()
    }

    fn json_request(method: &str, uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn read_json<T: DeserializeOwned>(resp: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(app: &Router, title: &str, isbn: &str) -> Book {
        let resp = app
            .clone()
            .oneshot(json_request("POST", "/books", payload(title, isbn)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        read_json(resp).await
    }

    // ============================================================
    // CRUD ENDPOINTS
    // ============================================================

    #[tokio::test]
    async fn test_create_get_update_delete() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);

        let created = create(&app, "The Hobbit", "isbn-1").await;

        let resp = app
            .clone()
            .oneshot(get(&format!("/books/{}", created.book_id)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let fetched: Book = read_json(resp).await;
        assert_eq!(fetched.title, "The Hobbit");

        let resp = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/books/{}", created.book_id),
                payload("The Hobbit (Illustrated)", "isbn-1"),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let updated: Book = read_json(resp).await;
        assert_eq!(updated.book_id, created.book_id);
        assert_eq!(updated.title, "The Hobbit (Illustrated)");

        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/books/{}", created.book_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = app
            .oneshot(get(&format!("/books/{}", created.book_id)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = read_json(resp).await;
        assert_eq!(body.error, "Book not found");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payloads() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);

        let resp = app
            .clone()
            .oneshot(json_request("POST", "/books", "{not json".to_string()))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = read_json(resp).await;
        assert_eq!(body.error, "Invalid request payload");

        let resp = app
            .oneshot(json_request(
                "POST",
                "/books",
                r#"{"title":"Dune","authorId":"a","publisherId":"p","isbn":"i","pages":10,"price":0}"#
                    .to_string(),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = read_json(resp).await;
        assert_eq!(body.error, "price must be positive");
    }

    #[tokio::test]
    async fn test_duplicate_isbn_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);
        create(&app, "The Hobbit", "isbn-1").await;

        let resp = app
            .oneshot(json_request("POST", "/books", payload("Another", "isbn-1")))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);
        for i in 0..5 {
            create(&app, &format!("Book {}", i), &format!("isbn-{}", i)).await;
        }

        let resp = app
            .oneshot(get("/books?limit=2&offset=3"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let page: BookListResponse = read_json(resp).await;

        assert_eq!(page.total, 5);
        assert_eq!(page.limit, 2);
        assert_eq!(page.offset, 3);
        let titles: Vec<&str> = page.data.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Book 3", "Book 4"]);
    }

    // ============================================================
    // SEARCH ENDPOINT
    // ============================================================

    #[tokio::test]
    async fn test_search_status_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);
        create(&app, "The Hobbit", "isbn-1").await;
        create(&app, "Dune", "isbn-2").await;

        let resp = app.clone().oneshot(get("/books/search?q=HOBBIT")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let found: Vec<Book> = read_json(resp).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "The Hobbit");

        let resp = app.clone().oneshot(get("/books/search?q=zz")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: ErrorResponse = read_json(resp).await;
        assert_eq!(body.error, "No books found matching 'zz'");

        let resp = app.clone().oneshot(get("/books/search?q=a")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = read_json(resp).await;
        assert_eq!(body.error, "Search query must be at least 2 characters long");

        let resp = app.oneshot(get("/books/search")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: ErrorResponse = read_json(resp).await;
        assert_eq!(body.error, "Search query cannot be empty");
    }

    #[tokio::test]
    async fn test_search_store_failure_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);
        std::fs::write(dir.path().join("books.json"), "{broken").unwrap();

        let resp = app.oneshot(get("/books/search?q=hobbit")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = read_json(resp).await;
        assert_eq!(body.error, "Database error");
    }

    #[tokio::test]
    async fn test_book_routes_hide_storage_failures() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);
        std::fs::write(dir.path().join("books.json"), "{broken").unwrap();

        let resp = app.oneshot(get("/books")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = read_json(resp).await;
        assert_eq!(body.error, "Database error");
    }

    // ============================================================
    // ROUTE TABLE
    // ============================================================

    #[tokio::test]
    async fn test_every_listed_route_is_served() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);

        for (method, path) in ROUTES {
            let uri = path.replace(":id", "unknown-id");
            let resp = app
                .clone()
                .oneshot(json_request(method, &uri, "{}".to_string()))
                .await
                .unwrap();

            assert_ne!(
                resp.status(),
                StatusCode::METHOD_NOT_ALLOWED,
                "{} {} not routed",
                method,
                path
            );
            // Unrouted paths get an empty 404; handlers always answer with a JSON body.
            let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
                .await
                .unwrap();
            assert!(!bytes.is_empty(), "{} {} not routed", method, path);
        }
    }

    // ============================================================
    // MIDDLEWARE
    // ============================================================

    #[tokio::test]
    async fn test_cors_preflight_short_circuits() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);

        let resp = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/books")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            resp.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PUT, DELETE, OPTIONS"
        );
    }

    #[tokio::test]
    async fn test_responses_carry_cors_and_json_headers() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(&dir);

        let resp = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
    }
}
