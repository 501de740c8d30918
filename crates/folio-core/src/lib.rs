//! # folio-core: Pure Business Logic for Folio
//!
//! This crate is the **heart** of the Folio bookstore backend. It contains
//! all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Folio Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     HTTP Clients (JSON)                         │   │
//! │  │    Storefront ──► Cart ──► Checkout ──► Order Tracking         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ axum handlers                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                       apps/api                                  │   │
//! │  │    list_books, add_cart_item, place_order, update_status, ...  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ folio-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐ │   │
//! │  │   │   types   │  │   money   │  │ pagination │  │ validation│ │   │
//! │  │   │   Book    │  │   Price   │  │ PageRequest│  │   rules   │ │   │
//! │  │   │   Order   │  │ Discounts │  │ PageResult │  │  checks   │ │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    folio-db (Database Layer)                    │   │
//! │  │            PostgreSQL queries, migrations, repositories         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Book, Order, Promotion, etc.)
//! - [`money`] - Price type with integer arithmetic (no floating point!)
//! - [`pagination`] - Page/offset arithmetic and result envelopes
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Prices**: All monetary values are in milliunits (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use folio_core::money::Price;
//! use folio_core::pagination::total_pages;
//!
//! // Create a price from milliunits (never from floats!)
//! let list_price = Price::from_millis(19_999); // 19.999
//!
//! // Apply a 15% promotion discount
//! let sale_price = list_price.apply_discount(15);
//! assert_eq!(sale_price.millis(), 16_999); // 16.999
//!
//! // 45 books at 20 per page is 3 pages
//! assert_eq!(total_pages(45, 20), 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pagination;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use folio_core::Price` instead of
// `use folio_core::money::Price`

pub use error::{CoreError, ValidationError};
pub use money::Price;
pub use pagination::{PageRequest, PageResult};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum page size accepted by any paginated listing
///
/// ## Business Reason
/// Keeps a single request from dragging the whole catalog across the wire.
/// Enforced at the request boundary, not inside the pagination helper.
pub const MAX_PAGE_SIZE: i64 = 20;

/// Maximum discount percentage a promotion may carry
///
/// ## Business Reason
/// Discounts are whole percentages of the list price. 100 means "free",
/// anything above it would produce negative prices.
pub const MAX_DISCOUNT_PERCENTAGE: i32 = 100;

/// Maximum distinct books in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and keeps checkout payloads bounded.
pub const MAX_CART_ITEMS: i64 = 100;

/// Maximum quantity of a single book in a cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum stars a rating may carry (scale is 1..=5)
pub const MAX_RATING_STARS: i32 = 5;
