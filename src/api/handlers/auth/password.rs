//! Secret hashing and verification, a thin wrapper over bcrypt.
//!
//! The hash string embeds salt and cost, so verification needs no state
//! beyond the stored hash. The plaintext secret and the hash never leave
//! this module boundary via logs or responses.

use anyhow::{Context, Result};

/// bcrypt cost factor; fixed at setup time.
pub const HASH_COST: u32 = 10;

/// Hash a secret for storage.
///
/// # Errors
/// Returns an error if bcrypt fails (effectively only on invalid cost).
pub fn hash_secret(secret: &str) -> Result<String> {
    bcrypt::hash(secret, HASH_COST).context("failed to hash secret")
}

/// Verify a secret against a stored hash. bcrypt compares in constant
/// time; mismatch position never affects duration.
///
/// Runs on the blocking pool: a bcrypt round is CPU-bound and must not
/// stall unrelated requests on the async runtime.
///
/// # Errors
/// Returns an error if the stored hash is structurally invalid or the
/// blocking task is cancelled.
pub async fn verify_secret(secret: String, secret_hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(secret, &secret_hash))
        .await
        .context("secret verification task failed")?
        .context("failed to verify secret")
}
