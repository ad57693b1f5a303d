//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (migrations are applied on start)
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_envelope, assert_error, assert_json, assert_status, check_test_env, fixtures::*,
    TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/auth/register", &request).await.unwrap();
    let body: Envelope<serde_json::Value> =
        assert_envelope(response, StatusCode::CREATED).await.unwrap();

    assert!(body.success);
    let user = body.data.unwrap();
    assert_eq!(user["username"], request.username.as_str());
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server.post("/auth/register", &request).await.unwrap();

    let response = server.post("/auth/register", &request).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_login_and_me() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.signup().await.unwrap();

    assert_eq!(auth.token_type, "Bearer");
    assert!(auth.expires_in > 0);

    let response = server.get_auth("/auth/me", &auth.token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, auth.user.id);
    assert_eq!(me.email, auth.user.email);
}

#[tokio::test]
async fn test_login_wrong_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    server.post("/auth/register", &request).await.unwrap();

    let login = LoginRequest {
        email: request.email.clone(),
        password: "WrongPass999".to_string(),
    };
    let response = server.post("/auth/login", &login).await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_protected_route_requires_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/books").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get_auth("/books", "not-a-jwt").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Genre Tests
// ============================================================================

#[tokio::test]
async fn test_genre_duplicate_name_conflicts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.signup().await.unwrap();
    let request = CreateGenreRequest::unique();

    let response = server.post_auth("/genre", &auth.token, &request).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post_auth("/genre", &auth.token, &request).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "CONFLICT");
}

#[tokio::test]
async fn test_genre_delete_then_create_restores_id() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.signup().await.unwrap();
    let genre = server.create_genre(&auth.token).await.unwrap();
    let path = format!("/genre/{}", genre.id);

    let response = server.delete_auth(&path, &auth.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth(&path, &auth.token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .post_auth("/genre", &auth.token, &json!({ "name": genre.name }))
        .await
        .unwrap();
    let restored: GenreResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(restored.id, genre.id);

    let response = server.get_auth("/genre", &auth.token).await.unwrap();
    let genres: Vec<GenreResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(genres.iter().any(|g| g.id == genre.id));
}

#[tokio::test]
async fn test_genre_rename() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.signup().await.unwrap();
    let first = server.create_genre(&auth.token).await.unwrap();
    let second = server.create_genre(&auth.token).await.unwrap();

    let renamed = format!("{} renamed", first.name);
    let response = server
        .patch_auth(&format!("/genre/{}", first.id), &auth.token, &json!({ "name": renamed }))
        .await
        .unwrap();
    let genre: GenreResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(genre.name, renamed);

    let response = server
        .patch_auth(
            &format!("/genre/{}", first.id),
            &auth.token,
            &json!({ "name": second.name }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

// ============================================================================
// Book Tests
// ============================================================================

#[tokio::test]
async fn test_book_with_unknown_genre_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.signup().await.unwrap();

    let request = CreateBookRequest::unique(i64::MAX, 10.0);
    let response = server.post_auth("/books", &auth.token, &request).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_REFERENCE");
}

#[tokio::test]
async fn test_book_stock_must_be_whole_and_non_negative() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.signup().await.unwrap();
    let genre = server.create_genre(&auth.token).await.unwrap();

    for stock in [-1.0, 2.5] {
        let mut request = CreateBookRequest::unique(genre.id, 10.0);
        request.stock_quantity = stock;
        let response = server.post_auth("/books", &auth.token, &request).await.unwrap();
        assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
    }

    let book = server.create_book(&auth.token, genre.id, 10.0).await.unwrap();
    let response = server
        .patch_auth(
            &format!("/books/{}", book.id),
            &auth.token,
            &json!({ "stock_quantity": -3 }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_book_search_and_genre_listing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.signup().await.unwrap();
    let genre = server.create_genre(&auth.token).await.unwrap();
    let book = server.create_book(&auth.token, genre.id, 12.5).await.unwrap();
    server.create_book(&auth.token, genre.id, 30.0).await.unwrap();

    let search = book.title.to_uppercase().replace(' ', "%20");
    let response = server
        .get_auth(&format!("/books?search={search}"), &auth.token)
        .await
        .unwrap();
    let page: Paginated<BookResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.pagination.total, 1);
    assert_eq!(page.items[0].id, book.id);

    let response = server
        .get_auth(&format!("/books/genre/{}", genre.id), &auth.token)
        .await
        .unwrap();
    let listing: GenreBooksResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listing.genre.id, genre.id);
    assert_eq!(listing.books.len(), 2);

    let response = server
        .get_auth("/books?minPrice=20&maxPrice=10", &auth.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get_auth("/books?limit=1&sortBy=price&sortOrder=asc", &auth.token)
        .await
        .unwrap();
    let page: Paginated<BookResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.pagination.limit, 1);
}

#[tokio::test]
async fn test_book_partial_update_clears_description() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.signup().await.unwrap();
    let genre = server.create_genre(&auth.token).await.unwrap();

    let mut request = CreateBookRequest::unique(genre.id, 9.0);
    request.description = Some("Desert planet".to_string());
    let response = server.post_auth("/books", &auth.token, &request).await.unwrap();
    let book: BookResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(book.description.as_deref(), Some("Desert planet"));

    let response = server
        .patch_auth(
            &format!("/books/{}", book.id),
            &auth.token,
            &json!({ "price": 11.0, "description": null }),
        )
        .await
        .unwrap();
    let updated: BookResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.price, 11.0);
    assert_eq!(updated.description, None);
    assert_eq!(updated.writer, book.writer);
}

#[tokio::test]
async fn test_genre_and_book_delete_guards() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.signup().await.unwrap();
    let fiction = server.create_genre(&auth.token).await.unwrap();
    let dune = server.create_book(&auth.token, fiction.id, 10.0).await.unwrap();

    let genre_path = format!("/genre/{}", fiction.id);
    let response = server.delete_auth(&genre_path, &auth.token).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server
        .delete_auth(&format!("/books/{}", dune.id), &auth.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.delete_auth(&genre_path, &auth.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_ordered_book_cannot_be_deleted() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.signup().await.unwrap();
    let genre = server.create_genre(&auth.token).await.unwrap();
    let book = server.create_book(&auth.token, genre.id, 10.0).await.unwrap();

    let response = server
        .post_auth(
            "/transactions",
            &auth.token,
            &CreateTransactionRequest::of(&[(book.id, 1.0)]),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .delete_auth(&format!("/books/{}", book.id), &auth.token)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "CONFLICT");
}

// ============================================================================
// Transaction Tests
// ============================================================================

#[tokio::test]
async fn test_transaction_totals() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.signup().await.unwrap();
    let genre = server.create_genre(&auth.token).await.unwrap();
    let cheap = server.create_book(&auth.token, genre.id, 10.0).await.unwrap();
    let dear = server.create_book(&auth.token, genre.id, 20.0).await.unwrap();

    let response = server
        .post_auth(
            "/transactions",
            &auth.token,
            &CreateTransactionRequest::of(&[(cheap.id, 2.0), (dear.id, 1.0)]),
        )
        .await
        .unwrap();
    let order: TransactionResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(order.user_id, auth.user.id);
    assert_eq!(order.item_count, 2);
    assert_eq!(order.total, 40.0);
    assert_eq!(order.average_price, 15.0);
    assert_eq!(order.items[0].subtotal, 20.0);
    assert_eq!(order.items[0].genre.as_deref(), Some(genre.name.as_str()));

    let response = server
        .get_auth(&format!("/transactions/{}", order.id), &auth.token)
        .await
        .unwrap();
    let fetched: TransactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.total, 40.0);
}

#[tokio::test]
async fn test_transaction_with_missing_book_persists_nothing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.signup().await.unwrap();
    let genre = server.create_genre(&auth.token).await.unwrap();
    let book = server.create_book(&auth.token, genre.id, 10.0).await.unwrap();

    let response = server
        .post_auth(
            "/transactions",
            &auth.token,
            &CreateTransactionRequest::of(&[(book.id, 1.0), (i64::MAX, 1.0)]),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_BOOK");

    let response = server.get_auth("/transactions", &auth.token).await.unwrap();
    let page: Paginated<TransactionResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.pagination.total, 0);
}

#[tokio::test]
async fn test_transaction_quantity_validation() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.signup().await.unwrap();
    let genre = server.create_genre(&auth.token).await.unwrap();
    let book = server.create_book(&auth.token, genre.id, 10.0).await.unwrap();

    for quantity in [0.0, -1.0, 1.5] {
        let response = server
            .post_auth(
                "/transactions",
                &auth.token,
                &CreateTransactionRequest::of(&[(book.id, quantity)]),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
    }

    let response = server
        .post_auth("/transactions", &auth.token, &CreateTransactionRequest::of(&[]))
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "EMPTY_TRANSACTION");
}

#[tokio::test]
async fn test_transactions_are_scoped_to_caller() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.signup().await.unwrap();
    let other = server.signup().await.unwrap();
    let genre = server.create_genre(&owner.token).await.unwrap();
    let book = server.create_book(&owner.token, genre.id, 10.0).await.unwrap();

    let response = server
        .post_auth(
            "/transactions",
            &owner.token,
            &CreateTransactionRequest::of(&[(book.id, 1.0)]),
        )
        .await
        .unwrap();
    let order: TransactionResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth(&format!("/transactions/{}", order.id), &other.token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_auth("/transactions", &other.token).await.unwrap();
    let page: Paginated<TransactionResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_transaction_search_and_sort() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.signup().await.unwrap();
    let genre = server.create_genre(&auth.token).await.unwrap();
    let cheap = server.create_book(&auth.token, genre.id, 5.0).await.unwrap();
    let dear = server.create_book(&auth.token, genre.id, 50.0).await.unwrap();

    for book_id in [cheap.id, dear.id] {
        let response = server
            .post_auth(
                "/transactions",
                &auth.token,
                &CreateTransactionRequest::of(&[(book_id, 1.0)]),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .get_auth("/transactions?orderByAmount=desc", &auth.token)
        .await
        .unwrap();
    let page: Paginated<TransactionResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    let totals: Vec<f64> = page.items.iter().map(|o| o.total).collect();
    assert_eq!(totals, vec![50.0, 5.0]);

    let search = dear.title.to_lowercase().replace(' ', "%20");
    let response = server
        .get_auth(&format!("/transactions?search={search}"), &auth.token)
        .await
        .unwrap();
    let page: Paginated<TransactionResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].items[0].book_id, dear.id);
}

#[tokio::test]
async fn test_statistics_genre_frequency() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.signup().await.unwrap();
    let genre_a = server.create_genre(&auth.token).await.unwrap();
    let genre_b = server.create_genre(&auth.token).await.unwrap();
    let book_a = server.create_book(&auth.token, genre_a.id, 10.0).await.unwrap();
    let book_b = server.create_book(&auth.token, genre_b.id, 10.0).await.unwrap();

    for items in [vec![(book_a.id, 1.0), (book_b.id, 1.0)], vec![(book_a.id, 2.0)]] {
        let response = server
            .post_auth(
                "/transactions",
                &auth.token,
                &CreateTransactionRequest::of(&items),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::CREATED).await.unwrap();
    }

    let response = server
        .get_auth("/transactions/statistics", &auth.token)
        .await
        .unwrap();
    let stats: StatisticsResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let count = |name: &str| {
        stats
            .genre_frequency
            .iter()
            .find(|f| f.genre == name)
            .map(|f| f.transactions)
    };
    assert!(stats.total_transactions >= 2);
    assert!(stats.top_genre.is_some());
    assert_eq!(count(&genre_a.name), Some(2));
    assert_eq!(count(&genre_b.name), Some(1));
}

#[tokio::test]
async fn test_unknown_route_envelope() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/definitely/not/here").await.unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "NOT_FOUND");
}
