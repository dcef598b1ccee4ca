//! Test utilities for the accounts services.
//!
//! Provides `MockAuth` for bearer-authenticated requests and `TestApp` for
//! driving a router in-process. Import from tests only, never from
//! production code.

pub mod app;
pub mod auth;
