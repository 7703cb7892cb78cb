//! Project API key generation and verification.
//!
//! The key is the shared secret between the dashboard and the game
//! servers of one project. Heartbeat and check-ban calls present it in
//! a header; verification must not leak where the mismatch occurred.

use rand::RngExt;
use subtle::ConstantTimeEq;

/// Prefix identifying a GameWarden project key at a glance.
pub const KEY_PREFIX: &str = "gw_live_";

/// Random alphanumeric characters after the prefix.
const KEY_RANDOM_LENGTH: usize = 32;

/// Generates a fresh project API key.
pub fn generate_key() -> String {
    let mut rng = rand::rng();
    let random: String = (&mut rng)
        .sample_iter(rand::distr::Alphanumeric)
        .take(KEY_RANDOM_LENGTH)
        .map(char::from)
        .collect();
    format!("{KEY_PREFIX}{random}")
}

/// Compares a presented key against the stored one in constant time.
pub fn verify_key(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}
