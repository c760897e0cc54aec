//! Defines the tagged document format.
//!
//! # Document Shape
//! A document is a JSON value in which every live object appears as a JSON
//! object carrying out-of-band metadata under reserved `$$`-prefixed keys:
//!
//! `{ "field": ..., "$$CLASS_NAME": "World", "$$INSTANCE_ID": 0 }`
//!
//! An object that was already emitted elsewhere is replaced by a *reference
//! marker*, a node whose sole content is the target instance id:
//!
//! `{ "$$INSTANCE_REF": 0 }`
//!
//! Reserved keys never collide with user fields because user fields with the
//! `$$` spelling are not produced by the live model, and fields starting with
//! the private prefix `_` are excluded from documents entirely.

use serde_json::{Map, Value as JsonValue};

use crate::error::{ColdstoreError, Result};

/// Reserved key carrying the declared class name of a typed instance node.
pub const CLASS_KEY: &str = "$$CLASS_NAME";

/// Reserved key carrying the integer identity assigned at encode time.
/// Present on every object node, typed or plain.
pub const INSTANCE_KEY: &str = "$$INSTANCE_ID";

/// Reserved key present only on reference markers; its value is the instance
/// id of the node the marker stands in for.
pub const REFERENCE_KEY: &str = "$$INSTANCE_REF";

/// Fields whose name starts with this prefix are private: excluded from the
/// serialized form and never restored by decoding.
pub const PRIVATE_PREFIX: char = '_';

/// Returns true if `key` is one of the reserved metadata keys.
pub fn is_reserved(key: &str) -> bool {
    key == CLASS_KEY || key == INSTANCE_KEY || key == REFERENCE_KEY
}

/// Returns true if `key` names a private field.
pub fn is_private(key: &str) -> bool {
    key.starts_with(PRIVATE_PREFIX)
}

/// Builds a reference-marker node for the given instance id.
///
/// A marker carries no fields besides [`REFERENCE_KEY`].
pub fn reference_marker(id: u64) -> JsonValue {
    let mut node = Map::new();
    node.insert(REFERENCE_KEY.to_string(), JsonValue::from(id));
    JsonValue::Object(node)
}

/// Returns true if `node` is a reference marker.
pub fn is_reference(node: &Map<String, JsonValue>) -> bool {
    node.contains_key(REFERENCE_KEY)
}

/// Extracts the target instance id from a reference marker.
///
/// # Errors
/// Returns [`ColdstoreError::Document`] if the marker value is not a
/// non-negative integer.
pub fn reference_target(node: &Map<String, JsonValue>) -> Result<u64> {
    node.get(REFERENCE_KEY)
        .and_then(JsonValue::as_u64)
        .ok_or_else(|| {
            ColdstoreError::Document(format!(
                "`{REFERENCE_KEY}` must be a non-negative integer"
            ))
        })
}

/// Extracts the class tag of a node, if it carries one.
///
/// # Errors
/// Returns [`ColdstoreError::Document`] if the tag is present but not a
/// string.
pub fn class_tag(node: &Map<String, JsonValue>) -> Result<Option<&str>> {
    match node.get(CLASS_KEY) {
        None => Ok(None),
        Some(JsonValue::String(name)) => Ok(Some(name)),
        Some(_) => Err(ColdstoreError::Document(format!(
            "`{CLASS_KEY}` must be a string"
        ))),
    }
}

/// Extracts the declared instance id of a node, if it carries one.
///
/// # Errors
/// Returns [`ColdstoreError::Document`] if the id is present but not a
/// non-negative integer.
pub fn instance_id(node: &Map<String, JsonValue>) -> Result<Option<u64>> {
    match node.get(INSTANCE_KEY) {
        None => Ok(None),
        Some(value) => value.as_u64().map(Some).ok_or_else(|| {
            ColdstoreError::Document(format!(
                "`{INSTANCE_KEY}` must be a non-negative integer"
            ))
        }),
    }
}
