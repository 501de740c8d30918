//! Shared application state.
//!
//! One `Arc<AppState>` is built at startup and handed to the router; every
//! handler borrows the pieces it needs from it.

use folio_db::Database;

use crate::auth::JwtManager;
use crate::cart::CartStore;
use crate::config::ApiConfig;

/// Shared application state.
pub struct AppState {
    /// Database handle (repositories share one pool).
    pub db: Database,

    /// Redis-backed cart store.
    pub cart: CartStore,

    /// JWT issue/verify.
    pub jwt: JwtManager,

    /// Loaded configuration.
    pub config: ApiConfig,
}
