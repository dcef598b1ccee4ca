pub mod account;
pub mod example;
pub mod health;
pub mod otp;
pub mod token;

use serde::Serialize;

use crate::domain::types::Outcome;

/// `{detail, status}` body shared by every message-style endpoint.
#[derive(Debug, Serialize)]
pub struct MessageProfile {
    pub detail: String,
    pub status: bool,
}

impl From<Outcome> for MessageProfile {
    fn from(outcome: Outcome) -> Self {
        Self {
            detail: outcome.message,
            status: outcome.success,
        }
    }
}
