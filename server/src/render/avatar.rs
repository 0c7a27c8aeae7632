//! Gravatar-style avatar URLs

use sha2::{Digest, Sha256};

/// Avatar URL for an email address.
///
/// The address is trimmed and lowercased before hashing; a missing or
/// blank address hashes the literal `default` so every author gets an
/// identicon.
pub fn avatar_url(base_url: &str, email: Option<&str>, size: u32) -> String {
    let normalized = email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .unwrap_or_else(|| "default".to_string());

    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let hash = format!("{:x}", hasher.finalize());

    format!("{}{}?s={}&d=identicon", base_url, hash, size)
}
