//! Middleware Module
//!
//! HTTP middleware run before handlers.
//!
//! - **`auth`** - JWT authentication for routes acting on behalf of a user
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use channel_chat::backend::middleware::auth_middleware;
//!
//! let protected = route.route_layer(from_fn_with_state(app_state.clone(), auth_middleware));
//! ```

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
