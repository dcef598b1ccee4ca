//! Domain types shared across the accounts workspace.
//!
//! Pure types and rules with no framework dependencies.

pub mod user;
