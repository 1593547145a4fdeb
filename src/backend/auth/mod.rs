//! Authentication Module
//!
//! Session token handling. Account registration and login belong to the
//! user-management service; this crate only issues and verifies the JWTs
//! it trusts for `req.user`.
//!
//! - **`sessions`** - JWT token generation and validation

/// JWT session tokens
pub mod sessions;

pub use sessions::{create_token, verify_token, Claims};
