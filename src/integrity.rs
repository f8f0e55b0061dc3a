//! SHA-256 digests of the original text.

use sha2::{Digest as _, Sha256};

use crate::container::Digest;

/// SHA-256 of the UTF-8 bytes of `text`.
pub fn sha256(text: &str) -> Digest {
    Sha256::digest(text.as_bytes()).into()
}

/// Lowercase hex rendering of a digest.
pub fn to_hex(digest: &Digest) -> String {
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
