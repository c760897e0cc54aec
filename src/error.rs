//! Centralized error handling for Coldstore.
//!
//! All failure conditions are propagated through the [`Result`] type; the
//! library contains no panicking paths (enforced by `#![deny(clippy::panic)]`
//! and `#![deny(clippy::unwrap_used)]`).
//!
//! Every failure in this crate is deterministic: errors describe structural
//! or configuration problems, never transient ones, so there is no retry
//! machinery anywhere. The one condition that is deliberately *not* an error
//! is a root-level class-tag mismatch during decoding, which yields
//! `Ok(None)` instead (see [`crate::decoder::GraphDecoder::decode`]).
//!
//! [`ColdstoreError`] is `Clone` so errors can be stored or shared freely;
//! I/O errors are wrapped in `Arc` to keep cloning cheap.
//!
//! ```rust
//! use coldstore::{ColdstoreError, Encoding};
//!
//! let err = Encoding::Ubjson.encode(&serde_json::json!({})).unwrap_err();
//! match err {
//!     ColdstoreError::UnsupportedEncoding(name) => assert_eq!(name, "ubjson"),
//!     other => panic!("unexpected error: {other}"),
//! }
//! ```

use std::fmt;
use std::io;
use std::sync::Arc;

/// A specialized `Result` type for Coldstore operations.
pub type Result<T> = std::result::Result<T, ColdstoreError>;

/// The master error enum covering all failure domains in Coldstore.
///
/// Each variant corresponds to one failure domain:
///
/// - **Io:** Low-level storage failures (file not found, permissions, disk full)
/// - **Serialization:** The JSON serializer or parser rejected its input
/// - **Document:** A tagged document violates the structural contract
///   (non-object root, malformed reserved keys, duplicate instance ids)
/// - **UnknownClass:** A nested class tag had zero or multiple matches in the
///   decoding class's declared dependency list
/// - **DanglingReference:** A reference marker points at an instance id that
///   no node in the document declares
/// - **UnsupportedEncoding:** A declared-but-unimplemented (or unknown)
///   physical encoding was selected for reading or writing
/// - **MissingLocation:** A write-back was attempted on an instance that was
///   never tagged with a storage location
#[derive(Debug, Clone)]
pub enum ColdstoreError {
    /// Low-level I/O failure from the storage backend.
    ///
    /// The underlying `io::Error` is wrapped in an `Arc` to make the error
    /// `Clone` without copying.
    Io(Arc<io::Error>),

    /// The JSON serializer or parser failed.
    ///
    /// The string carries the detailed message from `serde_json`.
    Serialization(String),

    /// The tagged document is structurally malformed.
    ///
    /// Raised for a non-object root, a reserved key of the wrong shape
    /// (a non-string class tag, a non-integer instance id or reference
    /// target), or an instance id declared more than once.
    Document(String),

    /// A nested class tag could not be resolved through the declared
    /// dependency list: either no declared class carries that name, or more
    /// than one does.
    ///
    /// The message names the offending tag so the caller knows which class
    /// to register.
    UnknownClass(String),

    /// A reference marker points at an instance id that was never declared
    /// in the document.
    ///
    /// Detected explicitly during the patch pass; a dangling reference is
    /// never silently replaced with a null.
    DanglingReference(u64),

    /// The selected physical encoding is not implemented.
    ///
    /// Raised on both the write and the read side; the string names the
    /// encoding.
    UnsupportedEncoding(String),

    /// Write-back was attempted on an instance with no tagged storage
    /// location.
    ///
    /// This is a precondition violation: the instance was constructed
    /// outside a store and never given a location.
    MissingLocation,
}

impl fmt::Display for ColdstoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O Error: {e}"),
            Self::Serialization(s) => write!(f, "Serialization Error: {s}"),
            Self::Document(s) => write!(f, "Document Error: {s}"),
            Self::UnknownClass(s) => write!(f, "Unknown Class: {s}"),
            Self::DanglingReference(id) => {
                write!(f, "Dangling Reference: no node declares instance id {id}")
            }
            Self::UnsupportedEncoding(name) => write!(f, "Unsupported Encoding: {name}"),
            Self::MissingLocation => {
                write!(f, "Missing Location: instance was never tagged with a storage location")
            }
        }
    }
}

impl std::error::Error for ColdstoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ColdstoreError {
    fn from(err: io::Error) -> Self {
        Self::Io(Arc::new(err))
    }
}

impl From<serde_json::Error> for ColdstoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
