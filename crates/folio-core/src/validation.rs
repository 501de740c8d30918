//! # Validation Module
//!
//! Input validation utilities for Folio.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Request DTO (axum handler)                                   │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (PostgreSQL)                                        │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints                                                │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  The pure calculators below this layer assume validated input and     │
//! │  never re-check ranges themselves.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use folio_core::validation::{validate_title, validate_quantity};
//!
//! // Validate a title before database insert
//! validate_title("The Name of the Wind").unwrap();
//!
//! // Validate quantity before a cart operation
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::pagination::PageRequest;
use crate::{MAX_DISCOUNT_PERCENTAGE, MAX_ITEM_QUANTITY, MAX_PAGE_SIZE, MAX_RATING_STARS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a book title.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
///
/// ## Example
/// ```rust
/// use folio_core::validation::validate_title;
///
/// assert!(validate_title("The Name of the Wind").is_ok());
/// assert!(validate_title("").is_err());
/// ```
pub fn validate_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a display name (author name, category name, promotion name).
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 120 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > 120 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 120,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Must contain exactly one '@' with a dot somewhere after it
/// - Maximum 254 characters (the SMTP path limit)
///
/// This is a plausibility check, not RFC 5322. Deliverability is proven by
/// actually sending mail, which is not this layer's job.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    if email.len() > 254 {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: 254,
        });
    }

    let mut parts = email.split('@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() || parts.next().is_some() || !domain.contains('.') {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(())
}

/// Validates a password.
///
/// ## Rules
/// - Minimum 8 characters
/// - Maximum 128 characters
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.len() < 8 {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: 8,
        });
    }

    if password.len() > 128 {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: 128,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart/order quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in milliunits.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use folio_core::validation::validate_price_millis;
///
/// assert!(validate_price_millis(19_999).is_ok());
/// assert!(validate_price_millis(0).is_ok());
/// assert!(validate_price_millis(-100).is_err());
/// ```
pub fn validate_price_millis(millis: i64) -> ValidationResult<()> {
    if millis < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a discount percentage.
///
/// ## Rules
/// - Whole number between 0 and MAX_DISCOUNT_PERCENTAGE inclusive
///
/// Applied on every path that sets a percentage: promotion creation,
/// promotion update, and attaching a book to a promotion.
pub fn validate_discount_percentage(pct: i32) -> ValidationResult<()> {
    if pct < 0 || pct > MAX_DISCOUNT_PERCENTAGE {
        return Err(ValidationError::OutOfRange {
            field: "discount_percentage".to_string(),
            min: 0,
            max: MAX_DISCOUNT_PERCENTAGE as i64,
        });
    }

    Ok(())
}

/// Validates a rating's star count.
///
/// ## Rules
/// - Between 1 and MAX_RATING_STARS (5) inclusive
pub fn validate_stars(stars: i32) -> ValidationResult<()> {
    if stars < 1 || stars > MAX_RATING_STARS {
        return Err(ValidationError::OutOfRange {
            field: "stars".to_string(),
            min: 1,
            max: MAX_RATING_STARS as i64,
        });
    }

    Ok(())
}

/// Validates pagination parameters and builds a `PageRequest`.
///
/// ## Rules
/// - `page` defaults to 1 when absent, must be >= 1
/// - `per_page` defaults to MAX_PAGE_SIZE when absent, must be in
///   1..=MAX_PAGE_SIZE
///
/// The pure arithmetic in [`crate::pagination`] relies on these bounds.
pub fn validate_page_request(
    page: Option<i64>,
    per_page: Option<i64>,
) -> ValidationResult<PageRequest> {
    let page = page.unwrap_or(crate::pagination::DEFAULT_PAGE);
    let per_page = per_page.unwrap_or(MAX_PAGE_SIZE);

    if page < 1 {
        return Err(ValidationError::MustBePositive {
            field: "page".to_string(),
        });
    }

    if per_page < 1 || per_page > MAX_PAGE_SIZE {
        return Err(ValidationError::OutOfRange {
            field: "per_page".to_string(),
            min: 1,
            max: MAX_PAGE_SIZE,
        });
    }

    Ok(PageRequest::new(page, per_page))
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Rules
/// - Must be a valid UUID format
/// - 36 characters with hyphens: xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx
///
/// ## Example
/// ```rust
/// use folio_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert!(validate_title("The Name of the Wind").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Patrick Rothfuss").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", &"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("reader@example.com").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("two@@example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("reader@nodot").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"x".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_millis() {
        assert!(validate_price_millis(0).is_ok());
        assert!(validate_price_millis(19_999).is_ok());
        assert!(validate_price_millis(-100).is_err());
    }

    #[test]
    fn test_validate_discount_percentage() {
        assert!(validate_discount_percentage(0).is_ok());
        assert!(validate_discount_percentage(15).is_ok());
        assert!(validate_discount_percentage(100).is_ok());
        assert!(validate_discount_percentage(-1).is_err());
        assert!(validate_discount_percentage(101).is_err());
    }

    #[test]
    fn test_validate_stars() {
        assert!(validate_stars(1).is_ok());
        assert!(validate_stars(5).is_ok());
        assert!(validate_stars(0).is_err());
        assert!(validate_stars(6).is_err());
    }

    #[test]
    fn test_validate_page_request_defaults() {
        let req = validate_page_request(None, None).unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.per_page, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_validate_page_request_bounds() {
        assert!(validate_page_request(Some(0), None).is_err());
        assert!(validate_page_request(Some(-3), None).is_err());
        assert!(validate_page_request(None, Some(0)).is_err());
        assert!(validate_page_request(None, Some(MAX_PAGE_SIZE + 1)).is_err());

        let req = validate_page_request(Some(4), Some(10)).unwrap();
        assert_eq!(req.offset(), 30);
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
        assert!(validate_uuid("123").is_err());
    }
}
