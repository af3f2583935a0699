//! Authorization check gating destructive operations.
//!
//! Starting and resetting a tournament require a shared secret. The check is a
//! plain equality test done in constant time.

use serde::Deserialize;
use std::fmt;
use subtle::ConstantTimeEq;

/// The configured shared secret
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct AuthCode(String);

impl AuthCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Check a code supplied by a caller
    pub fn verify(&self, candidate: &str) -> bool {
        self.0.as_bytes().ct_eq(candidate.as_bytes()).into()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AuthCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthCode(<redacted>)")
    }
}
