//! Common test utilities and helpers
//!
//! - Custom assertion macros
//! - Authentication helpers
//! - A seeded in-memory application driven through `tower::ServiceExt`

#![allow(dead_code)]

pub mod app;
pub mod assertions;
pub mod auth_helpers;

pub use app::*;
pub use auth_helpers::*;
