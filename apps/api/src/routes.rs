//! Router assembly.
//!
//! ## Route Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Public           GET  /health                                          │
//! │                   POST /api/auth/{register,login,refresh}               │
//! │                   GET  /api/books[/{id}]                                │
//! │                   GET  /api/books/{id}/ratings                          │
//! │                   GET  /api/authors[/{id}]                              │
//! │                   GET  /api/categories[/{id}]                           │
//! │                   GET  /api/promotions[/{id}]                           │
//! │                                                                         │
//! │  Authenticated    GET/DELETE      /api/cart                             │
//! │                   POST            /api/cart/items                       │
//! │                   PUT/DELETE      /api/cart/items/{book_id}             │
//! │                   GET/POST        /api/orders                           │
//! │                   GET             /api/orders/{id}[/next-statuses]      │
//! │                   PUT             /api/books/{id}/rating                │
//! │                                                                         │
//! │  Admin            POST/PUT/DELETE /api/{books,authors,categories}       │
//! │                   POST/PUT/DELETE /api/promotions[...]                  │
//! │                   PUT             /api/orders/{id}/status               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{auth, authors, books, cart, categories, health, orders, promotions, ratings};
use crate::state::AppState;

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health))
        // Authentication
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/refresh", post(auth::refresh))
        // Catalog: books
        .route("/api/books", get(books::list_books).post(books::create_book))
        .route(
            "/api/books/{id}",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        .route("/api/books/{id}/rating", put(ratings::rate_book))
        .route("/api/books/{id}/ratings", get(ratings::list_ratings))
        // Catalog: authors
        .route(
            "/api/authors",
            get(authors::list_authors).post(authors::create_author),
        )
        .route(
            "/api/authors/{id}",
            get(authors::get_author)
                .put(authors::update_author)
                .delete(authors::delete_author),
        )
        // Catalog: categories
        .route(
            "/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        // Promotions
        .route(
            "/api/promotions",
            get(promotions::list_promotions).post(promotions::create_promotion),
        )
        .route(
            "/api/promotions/{id}",
            get(promotions::get_promotion)
                .put(promotions::update_promotion)
                .delete(promotions::delete_promotion),
        )
        .route(
            "/api/promotions/{id}/books/{book_id}",
            post(promotions::attach_book).delete(promotions::detach_book),
        )
        // Cart
        .route("/api/cart", get(cart::get_cart).delete(cart::clear_cart))
        .route("/api/cart/items", post(cart::add_item))
        .route(
            "/api/cart/items/{book_id}",
            put(cart::update_item).delete(cart::remove_item),
        )
        // Orders
        .route(
            "/api/orders",
            get(orders::list_orders).post(orders::place_order),
        )
        .route("/api/orders/{id}", get(orders::get_order))
        .route(
            "/api/orders/{id}/next-statuses",
            get(orders::next_statuses),
        )
        .route("/api/orders/{id}/status", put(orders::update_status))
        .with_state(state)
}
