//! Auth types shared across the accounts workspace.
//!
//! Provides JWT issuance/validation and the `BearerIdentity` extractor.

pub mod identity;
pub mod token;
