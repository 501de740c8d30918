//! # Domain Types
//!
//! Core domain types used throughout Folio.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Book       │   │      Order      │   │     Rating      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  title          │   │  status         │   │  book_id (FK)   │       │
//! │  │  price_millis   │   │  total_millis   │   │  stars (1-5)    │       │
//! │  │  final_price    │   │  OrderItem[]    │   │  comment        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Promotion     │   │   OrderStatus   │   │    UserRole     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name           │   │  Pending    (0) │   │  Admin          │       │
//! │  │  discount pct   │   │  Confirmed  (1) │   │  Customer       │       │
//! │  │  books share it │   │  Delivering (2) │   └─────────────────┘       │
//! │  └─────────────────┘   │  Completed  (3) │                             │
//! │                        │  Cancelled  (3) │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Display key: (title, name, email) - human-readable, potentially mutable

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Price;

// =============================================================================
// Order Status
// =============================================================================

/// The status of a customer order.
///
/// Statuses carry an ordinal rank used to suggest which statuses lie
/// "ahead" of the current one. `Completed` and `Cancelled` share the top
/// rank: an order leaves `Delivering` by arriving or by being called off,
/// and nothing lies beyond either outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, awaiting confirmation.
    Pending,
    /// Order confirmed by the store.
    Confirmed,
    /// Order handed to the courier.
    Delivering,
    /// Order delivered.
    Completed,
    /// Order called off.
    Cancelled,
}

/// A status offered as a forward transition, paired with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusOption {
    /// Capitalized human-readable label ("Confirmed", "Delivering", ...).
    pub label: &'static str,

    /// The status value itself.
    pub value: OrderStatus,
}

impl OrderStatus {
    /// All statuses in declaration order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Delivering,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// The ordinal rank of this status.
    ///
    /// `Completed` and `Cancelled` intentionally share rank 3: both are
    /// outcomes of `Delivering`, and neither precedes the other.
    #[inline]
    pub const fn ordinal(&self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Confirmed => 1,
            OrderStatus::Delivering => 2,
            OrderStatus::Completed => 3,
            OrderStatus::Cancelled => 3,
        }
    }

    /// Capitalized display label.
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Delivering => "Delivering",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Returns every status with a strictly greater ordinal, in declaration
    /// order, as label/value pairs for a transition picker.
    ///
    /// ## Advisory, Not Enforced
    /// This table suggests which statuses a UI should offer next. The
    /// status-update operation itself persists whatever status it is given;
    /// the update path logs when a submitted status falls outside this set
    /// so any drift is observable.
    ///
    /// ## Example
    /// ```rust
    /// use folio_core::types::OrderStatus;
    ///
    /// let next = OrderStatus::Delivering.next_statuses();
    /// let labels: Vec<&str> = next.iter().map(|o| o.label).collect();
    /// assert_eq!(labels, vec!["Completed", "Cancelled"]);
    ///
    /// assert!(OrderStatus::Completed.next_statuses().is_empty());
    /// ```
    pub fn next_statuses(&self) -> Vec<StatusOption> {
        let current = self.ordinal();
        Self::ALL
            .iter()
            .filter(|status| status.ordinal() > current)
            .map(|status| StatusOption {
                label: status.label(),
                value: *status,
            })
            .collect()
    }

    /// True when no status lies ahead of this one.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.ordinal() == 3
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// User Role
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Can manage the catalog, promotions, and every order.
    Admin,
    /// Can browse, fill a cart, place orders, and rate books.
    Customer,
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Customer
    }
}

// =============================================================================
// Book
// =============================================================================

/// A book in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Book {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display title.
    pub title: String,

    /// Optional long-form description.
    pub description: Option<String>,

    /// List price in milliunits.
    pub price_millis: i64,

    /// Price after any active promotion, in milliunits.
    /// Equals `price_millis` when no promotion is attached.
    pub final_price_millis: i64,

    /// Discount percentage currently applied (0 when none).
    pub discount_percentage: i32,

    /// When the current discount was applied (None when none).
    pub discounted_at: Option<DateTime<Utc>>,

    /// Promotion this book currently belongs to, if any.
    pub promotion_id: Option<String>,

    /// Path to the cover image in blob storage, if uploaded.
    pub cover_image: Option<String>,

    /// Author of the book.
    pub author_id: String,

    /// Category the book is filed under.
    pub category_id: String,

    /// Whether the book is visible in the catalog (soft delete).
    pub is_active: bool,

    /// When the book was created.
    pub created_at: DateTime<Utc>,

    /// When the book was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Returns the list price as a Price type.
    #[inline]
    pub fn price(&self) -> Price {
        Price::from_millis(self.price_millis)
    }

    /// Returns the effective price as a Price type.
    #[inline]
    pub fn final_price(&self) -> Price {
        Price::from_millis(self.final_price_millis)
    }

    /// Checks whether a promotion discount is currently applied.
    #[inline]
    pub fn is_discounted(&self) -> bool {
        self.promotion_id.is_some()
    }
}

// =============================================================================
// Author
// =============================================================================

/// A book author.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Author {
    pub id: String,
    pub name: String,
    pub biography: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Category
// =============================================================================

/// A catalog category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Promotion
// =============================================================================

/// A named group of books sharing a discount percentage.
///
/// Attaching a book recomputes its final price and stamps the discount;
/// detaching resets the final price to the list price and clears the stamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Promotion {
    pub id: String,
    pub name: String,

    /// Whole-number discount shared by every attached book.
    pub discount_percentage: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Order
// =============================================================================

/// A customer order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub status: OrderStatus,

    /// Grand total in milliunits, summed over the items at placement time.
    pub total_millis: i64,

    /// Where to deliver.
    pub shipping_address: String,

    /// Contact phone for the courier.
    pub phone: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the grand total as a Price type.
    #[inline]
    pub fn total(&self) -> Price {
        Price::from_millis(self.total_millis)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
/// Uses the snapshot pattern to freeze book data at order time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub book_id: String,

    /// Title at order time (frozen).
    pub title_snapshot: String,

    /// Effective unit price at order time, in milliunits (frozen).
    pub unit_price_millis: i64,

    /// Quantity ordered.
    pub quantity: i64,

    /// Line total (unit price × quantity).
    pub line_total_millis: i64,

    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    /// Returns the unit price as a Price type.
    #[inline]
    pub fn unit_price(&self) -> Price {
        Price::from_millis(self.unit_price_millis)
    }

    /// Returns the line total as a Price type.
    #[inline]
    pub fn line_total(&self) -> Price {
        Price::from_millis(self.line_total_millis)
    }
}

// =============================================================================
// Rating
// =============================================================================

/// A customer rating of a book. One per (user, book), upserted on repeat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Rating {
    pub id: String,
    pub book_id: String,
    pub user_id: String,

    /// Star count, 1 to 5.
    pub stars: i32,

    /// Optional free-form review text.
    pub comment: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// User
// =============================================================================

/// An account holder.
///
/// The password hash never leaves the backend: the struct is not serialized
/// directly in API responses, handlers project it into response DTOs.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,

    /// argon2 PHC-format hash.
    pub password_hash: String,

    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Checks whether this user may manage the catalog and all orders.
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ordinals() {
        assert_eq!(OrderStatus::Pending.ordinal(), 0);
        assert_eq!(OrderStatus::Confirmed.ordinal(), 1);
        assert_eq!(OrderStatus::Delivering.ordinal(), 2);
        assert_eq!(OrderStatus::Completed.ordinal(), 3);
        assert_eq!(OrderStatus::Cancelled.ordinal(), 3);
    }

    #[test]
    fn test_next_statuses_from_pending() {
        let next = OrderStatus::Pending.next_statuses();
        let values: Vec<OrderStatus> = next.iter().map(|o| o.value).collect();

        // Everything strictly ahead of rank 0, in declaration order.
        // Both Completed and Cancelled appear since both carry rank 3.
        assert_eq!(
            values,
            vec![
                OrderStatus::Confirmed,
                OrderStatus::Delivering,
                OrderStatus::Completed,
                OrderStatus::Cancelled,
            ]
        );
    }

    #[test]
    fn test_next_statuses_labels_are_capitalized() {
        let next = OrderStatus::Pending.next_statuses();
        let labels: Vec<&str> = next.iter().map(|o| o.label).collect();
        assert_eq!(
            labels,
            vec!["Confirmed", "Delivering", "Completed", "Cancelled"]
        );
    }

    #[test]
    fn test_next_statuses_siblings_exclude_each_other() {
        // Completed and Cancelled share rank 3, strictly-greater excludes both
        // from each other's forward set.
        assert!(OrderStatus::Completed.next_statuses().is_empty());
        assert!(OrderStatus::Cancelled.next_statuses().is_empty());
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Delivering.is_terminal());
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&OrderStatus::Delivering).unwrap();
        assert_eq!(json, "\"delivering\"");

        let back: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(back, OrderStatus::Cancelled);
    }

    #[test]
    fn test_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_role_default_is_customer() {
        assert_eq!(UserRole::default(), UserRole::Customer);
    }

    #[test]
    fn test_book_price_accessors() {
        let now = Utc::now();
        let book = Book {
            id: "b1".to_string(),
            title: "The Pragmatic Bookseller".to_string(),
            description: None,
            price_millis: 19_999,
            final_price_millis: 16_999,
            discount_percentage: 15,
            discounted_at: Some(now),
            promotion_id: Some("p1".to_string()),
            cover_image: None,
            author_id: "a1".to_string(),
            category_id: "c1".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        assert_eq!(book.price().millis(), 19_999);
        assert_eq!(book.final_price().millis(), 16_999);
        assert!(book.is_discounted());
    }
}
