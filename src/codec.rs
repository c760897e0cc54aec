//! Pluggable physical encodings.
//!
//! Configuration selects exactly one member of a closed enum. Only the
//! plain-text JSON encoding is implemented; the binary UBJSON variant is
//! declared and rejected with an explicit error on both the write and the
//! read side.

use std::fmt;

use serde_json::Value as JsonValue;

use crate::error::{ColdstoreError, Result};

/// The physical encoding of a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Pretty-printed JSON, two-space indent. The default.
    #[default]
    Json,
    /// Universal Binary JSON. Declared but not implemented; selecting it
    /// fails with [`ColdstoreError::UnsupportedEncoding`].
    Ubjson,
}

impl Encoding {
    /// Serializes a tagged document to bytes.
    ///
    /// # Errors
    /// Returns [`ColdstoreError::UnsupportedEncoding`] for the binary
    /// variant, or [`ColdstoreError::Serialization`] if the serializer
    /// rejects the document.
    pub fn encode(&self, document: &JsonValue) -> Result<Vec<u8>> {
        match self {
            Self::Json => Ok(serde_json::to_vec_pretty(document)?),
            Self::Ubjson => Err(ColdstoreError::UnsupportedEncoding(self.to_string())),
        }
    }

    /// Parses bytes into a tagged document.
    ///
    /// # Errors
    /// Returns [`ColdstoreError::UnsupportedEncoding`] for the binary
    /// variant, or [`ColdstoreError::Serialization`] on a syntax error.
    pub fn decode(&self, bytes: &[u8]) -> Result<JsonValue> {
        match self {
            Self::Json => Ok(serde_json::from_slice(bytes)?),
            Self::Ubjson => Err(ColdstoreError::UnsupportedEncoding(self.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Ubjson => write!(f, "ubjson"),
        }
    }
}
