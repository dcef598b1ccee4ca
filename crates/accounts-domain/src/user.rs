//! Account field rules: usernames, email addresses, passwords.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum username length after normalization.
pub const USERNAME_MIN_LEN: usize = 3;

/// Maximum username length after normalization.
pub const USERNAME_MAX_LEN: usize = 30;

/// Minimum password length in characters.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Usernames that collide with route segments or staff accounts.
const RESERVED_USERNAMES: &[&str] = &["me", "admin", "root", "support", "api"];

/// Reasons a username is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsernameError {
    #[error("username too short")]
    TooShort,
    #[error("username too long")]
    TooLong,
    #[error("username contains invalid characters")]
    InvalidCharacters,
    #[error("username is reserved")]
    Reserved,
}

/// A validated, lowercase username.
///
/// Allowed characters: ASCII letters, digits, `_` and `.`; must not start or
/// end with `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    pub fn parse(raw: &str) -> Result<Self, UsernameError> {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.len() < USERNAME_MIN_LEN {
            return Err(UsernameError::TooShort);
        }
        if normalized.len() > USERNAME_MAX_LEN {
            return Err(UsernameError::TooLong);
        }
        let chars_ok = normalized
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
        if !chars_ok || normalized.starts_with('.') || normalized.ends_with('.') {
            return Err(UsernameError::InvalidCharacters);
        }
        if RESERVED_USERNAMES.contains(&normalized.as_str()) {
            return Err(UsernameError::Reserved);
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Build the base candidate for username suggestions from a display name.
///
/// Keeps ASCII alphanumerics, maps whitespace/`-`/`.` runs to a single `_`,
/// drops everything else and lowercases. May return an empty string.
pub fn username_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '.' || c == '_' {
            pending_sep = true;
        }
    }
    slug.truncate(USERNAME_MAX_LEN - 4);
    slug.trim_end_matches('_').to_owned()
}

/// Lightweight structural email check: one `@`, non-empty local part, and a
/// dotted domain without empty labels.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}

/// Normalize an email for lookups (trim + lowercase).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

pub fn is_acceptable_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN_LEN
}
