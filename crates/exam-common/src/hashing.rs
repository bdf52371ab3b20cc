use sha2::{Digest, Sha256};

use crate::normalization::normalize_text;

/// Fingerprint of a question text: sha256 of the normalized, lowercased text.
///
/// Two submissions that differ only in case or whitespace share a fingerprint.
pub fn text_fingerprint(text: &str) -> [u8; 32] {
    let canonical = normalize_text(text).to_lowercase();
    let mut hasher = Sha256::new();
    hasher.update((canonical.len() as u64).to_be_bytes());
    hasher.update(canonical.as_bytes());
    hasher.finalize().into()
}
