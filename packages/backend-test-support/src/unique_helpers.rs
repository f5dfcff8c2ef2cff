//! Test helpers for generating unique test data
//!
//! Usernames are capped at 20 characters by the backend, so the helpers
//! here keep only the tail of a ULID (its random component) rather than
//! the full 26-character string.

use ulid::Ulid;

/// Number of ULID characters appended to a prefix.
const SUFFIX_LEN: usize = 8;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("round");
/// let id2 = unique_str("round");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("round-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique, valid username with the given prefix
///
/// The prefix is truncated to 11 characters so the result always fits
/// the 3..=20 character username rule.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_username;
///
/// let name = unique_username("gamer");
/// assert!(name.starts_with("gamer_"));
/// assert!(name.chars().count() <= 20);
/// ```
pub fn unique_username(prefix: &str) -> String {
    let ulid = Ulid::new().to_string();
    let tail = &ulid[ulid.len() - SUFFIX_LEN..];
    let prefix: String = prefix.chars().take(20 - SUFFIX_LEN - 1).collect();
    format!("{prefix}_{}", tail.to_lowercase())
}
