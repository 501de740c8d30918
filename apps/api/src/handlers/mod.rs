//! # Request Handlers
//!
//! One module per resource. Every handler follows the same shape:
//! validate the request DTO at the boundary, call a repository (or the
//! cart store), project the result into a response DTO.

pub mod auth;
pub mod authors;
pub mod books;
pub mod cart;
pub mod categories;
pub mod health;
pub mod orders;
pub mod promotions;
pub mod ratings;

use serde::Deserialize;

use folio_core::pagination::PageRequest;
use folio_core::validation::validate_page_request;

use crate::error::ApiError;

/// Query parameters shared by every paginated listing.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageQuery {
    /// Resolves the query into an optional page request.
    ///
    /// Pagination is requested when either parameter is present; with both
    /// absent the caller fetches the full result set as a single page.
    pub fn resolve(&self) -> Result<Option<PageRequest>, ApiError> {
        if self.page.is_none() && self.per_page.is_none() {
            return Ok(None);
        }

        Ok(Some(validate_page_request(self.page, self.per_page)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_absent_means_unpaginated() {
        let query = PageQuery {
            page: None,
            per_page: None,
        };
        assert!(query.resolve().unwrap().is_none());
    }

    #[test]
    fn test_resolve_partial_defaults_the_rest() {
        let query = PageQuery {
            page: Some(2),
            per_page: None,
        };
        let request = query.resolve().unwrap().unwrap();
        assert_eq!(request.page, 2);
        assert_eq!(request.per_page, folio_core::MAX_PAGE_SIZE);
    }

    #[test]
    fn test_resolve_rejects_out_of_range() {
        let query = PageQuery {
            page: Some(0),
            per_page: None,
        };
        assert!(query.resolve().is_err());

        let query = PageQuery {
            page: None,
            per_page: Some(folio_core::MAX_PAGE_SIZE + 1),
        };
        assert!(query.resolve().is_err());
    }
}
