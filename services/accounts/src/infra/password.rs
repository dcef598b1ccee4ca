//! scrypt password hashing.
//!
//! Stored format: `hex(salt):hex(key)` with a 16-byte random salt and a
//! 64-byte derived key (N = 2^14, r = 8, p = 1).

use anyhow::{Context as _, anyhow};
use rand::RngExt;
use scrypt::{Params, scrypt};
use subtle::ConstantTimeEq;

use crate::error::AccountsServiceError;

const SALT_LEN: usize = 16;
const KEY_LEN: usize = 64;
const LOG_N: u8 = 14;
const R: u32 = 8;
const P: u32 = 1;

fn derive_key(password: &str, salt: &[u8]) -> Result<Vec<u8>, AccountsServiceError> {
    let params = Params::new(LOG_N, R, P, KEY_LEN).map_err(|e| anyhow!("scrypt params: {e}"))?;
    let mut key = vec![0u8; KEY_LEN];
    scrypt(password.as_bytes(), salt, &params, &mut key).map_err(|e| anyhow!("scrypt: {e}"))?;
    Ok(key)
}

pub fn hash_password(password: &str) -> Result<String, AccountsServiceError> {
    let mut rng = rand::rng();
    let salt: [u8; SALT_LEN] = std::array::from_fn(|_| rng.random_range(0..=u8::MAX));
    let key = derive_key(password, &salt)?;
    Ok(format!("{}:{}", hex::encode(salt), hex::encode(key)))
}

/// Check `password` against a stored hash in constant time.
pub fn verify_password(hash: &str, password: &str) -> Result<bool, AccountsServiceError> {
    let (salt_hex, key_hex) = hash
        .split_once(':')
        .ok_or_else(|| anyhow!("invalid password hash format"))?;
    let salt = hex::decode(salt_hex).context("decode password salt")?;
    let expected = hex::decode(key_hex).context("decode password key")?;
    let derived = derive_key(password, &salt)?;
    Ok(expected.len() == derived.len() && bool::from(derived.ct_eq(&expected)))
}

/// [`hash_password`] on the blocking pool; scrypt must not stall a runtime worker.
pub async fn spawn_hash_password(password: String) -> Result<String, AccountsServiceError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .context("join password hash task")?
}

/// [`verify_password`] on the blocking pool.
pub async fn spawn_verify_password(
    hash: String,
    password: String,
) -> Result<bool, AccountsServiceError> {
    tokio::task::spawn_blocking(move || verify_password(&hash, &password))
        .await
        .context("join password verify task")?
}
