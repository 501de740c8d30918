//! Authentication: JWT issue/verify, password hashing, request extractors.

pub mod extract;
pub mod jwt;
pub mod password;

pub use extract::{AdminUser, AuthUser};
pub use jwt::{Claims, JwtManager};
