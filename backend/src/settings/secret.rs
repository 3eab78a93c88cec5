//! Secret strings that stay out of logs.
//!
//! A [`Secret`] zeroizes its buffer on drop and renders as `<redacted>` under
//! `Debug`. Operators identify the active credential through
//! [`Secret::fingerprint`] instead.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Credential material loaded at start-up.
pub struct Secret(Zeroizing<String>);

impl Secret {
    /// Wrap raw secret material.
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Raw value, for building upstream requests only.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Truncated SHA-256 fingerprint of the secret.
    ///
    /// Returns the first 8 bytes of the hash as 16 lowercase hex characters.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use profile_backend::settings::Secret;
    ///
    /// let fp = Secret::new("hunter2").fingerprint();
    /// assert_eq!(fp.len(), 16);
    /// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    /// ```
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.expose().as_bytes());
        let digest = hasher.finalize();
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }
}

impl Clone for Secret {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for Secret {}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}
