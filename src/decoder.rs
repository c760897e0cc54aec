//! The decode-side engine.
//!
//! Decoding is a two-pass protocol over a tagged document:
//!
//! 1. **Reconstruction.** The document is walked recursively; every object
//!    node becomes a fresh arena object (typed nodes are constructed with
//!    their class from the start, dispatched through the declared dependency
//!    list). The moment a node's own fields are built, its declared instance
//!    id is recorded in the instance table. A reference marker cannot be
//!    resolved yet, because it may point forward at an id declared later in
//!    traversal order; instead its slot is reserved on a pending list and
//!    temporarily holds null.
//! 2. **Patching.** After all of pass 1, every declared id is in the table,
//!    so each pending slot is rewritten to the identity recorded for its
//!    target. A target with no recorded id is a dangling reference and
//!    fails loudly.
//!
//! Reserved metadata keys are filtered while fields are copied in pass 1,
//! so they never enter the live graph and nothing needs to be stripped
//! afterwards. Private-prefixed keys are filtered the same way: decoding
//! only sets fields that appeared in the document, and private fields never
//! do.

use std::collections::HashMap;

use serde_json::{Map, Value as JsonValue};

use crate::class::ClassDef;
use crate::error::{ColdstoreError, Result};
use crate::format;
use crate::graph::{Object, ObjectGraph, ObjectId, Value};

/// A reference slot reserved during pass 1, filled during pass 2.
///
/// `indices` is the path through nested lists inside the field; empty for a
/// marker sitting directly in a field.
#[derive(Debug)]
struct PendingRef {
    holder: ObjectId,
    field: String,
    indices: Vec<usize>,
    target: u64,
}

/// The decode-side traversal. One decoder serves one `decode` call; the
/// instance table and the pending list do not outlive it.
#[derive(Debug)]
pub struct GraphDecoder<'g> {
    graph: &'g mut ObjectGraph,
    /// Instance table: declared instance id to reconstructed identity.
    instances: HashMap<u64, ObjectId>,
    pending: Vec<PendingRef>,
}

impl<'g> GraphDecoder<'g> {
    /// Creates a decoder that reconstructs into the given graph.
    pub fn new(graph: &'g mut ObjectGraph) -> Self {
        Self {
            graph,
            instances: HashMap::new(),
            pending: Vec::new(),
        }
    }

    /// Decodes a tagged document against an expected class.
    ///
    /// Returns `Ok(None)` when the document's root class tag is absent or
    /// differs from `class`: a soft mismatch, not an error. Nested tags are
    /// the opposite: a tag that the enclosing class did not declare is a
    /// hard [`ColdstoreError::UnknownClass`] failure. The asymmetry is
    /// deliberate and part of the contract.
    ///
    /// # Errors
    /// Any structural violation is fatal: an unknown or ambiguous nested
    /// class tag, a dangling reference, a malformed reserved key, a
    /// duplicate instance id, or a non-object root.
    pub fn decode(
        mut self,
        document: &JsonValue,
        class: &'static ClassDef,
    ) -> Result<Option<ObjectId>> {
        let node = document.as_object().ok_or_else(|| {
            ColdstoreError::Document("root document must be an object".to_string())
        })?;

        if format::class_tag(node)? != Some(class.name()) {
            return Ok(None);
        }

        // Pass 1: structural reconstruction with identity recording.
        let root = self.reconstruct_instance(node, class)?;

        // Pass 2: reference patching, once every declared id is recorded.
        self.patch_references()?;

        Ok(Some(root))
    }

    /// Reconstructs a typed node. The object is created carrying its class;
    /// nested tags inside it resolve against `class`'s dependency list.
    fn reconstruct_instance(
        &mut self,
        node: &Map<String, JsonValue>,
        class: &'static ClassDef,
    ) -> Result<ObjectId> {
        self.reconstruct_node(node, Object::instance(class.name()), class)
    }

    /// Reconstructs a plain structural node. Nested tags inside it still
    /// resolve against the enclosing class's dependency list.
    fn reconstruct_plain(
        &mut self,
        node: &Map<String, JsonValue>,
        context: &'static ClassDef,
    ) -> Result<ObjectId> {
        self.reconstruct_node(node, Object::plain(), context)
    }

    fn reconstruct_node(
        &mut self,
        node: &Map<String, JsonValue>,
        shell: Object,
        context: &'static ClassDef,
    ) -> Result<ObjectId> {
        let id = self.graph.add(shell);

        for (key, value) in node {
            if format::is_reserved(key) || format::is_private(key) {
                continue;
            }
            let mut indices = Vec::new();
            let decoded = self.reconstruct_value(value, id, key, &mut indices, context)?;
            self.graph.get_mut(id).set(key.clone(), decoded);
        }

        // The node's own clone now exists, so its id becomes available to
        // later siblings and descendants.
        if let Some(declared) = format::instance_id(node)? {
            if self.instances.insert(declared, id).is_some() {
                return Err(ColdstoreError::Document(format!(
                    "instance id {declared} declared more than once"
                )));
            }
        }

        Ok(id)
    }

    fn reconstruct_value(
        &mut self,
        value: &JsonValue,
        holder: ObjectId,
        field: &str,
        indices: &mut Vec<usize>,
        context: &'static ClassDef,
    ) -> Result<Value> {
        match value {
            JsonValue::Null => Ok(Value::Null),
            JsonValue::Bool(b) => Ok(Value::Bool(*b)),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Value::Float(f))
                } else {
                    Err(ColdstoreError::Document(format!(
                        "number {n} is not representable"
                    )))
                }
            }
            JsonValue::String(s) => Ok(Value::Text(s.clone())),
            JsonValue::Array(items) => {
                let mut list = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    indices.push(index);
                    let element = self.reconstruct_value(item, holder, field, indices, context)?;
                    indices.pop();
                    list.push(element);
                }
                Ok(Value::List(list))
            }
            JsonValue::Object(map) => {
                if format::is_reference(map) {
                    // Reserve the slot; the target may not be declared yet.
                    let target = format::reference_target(map)?;
                    self.pending.push(PendingRef {
                        holder,
                        field: field.to_string(),
                        indices: indices.clone(),
                        target,
                    });
                    Ok(Value::Null)
                } else if let Some(tag) = format::class_tag(map)? {
                    let class = context.resolve(tag)?;
                    Ok(Value::Object(self.reconstruct_instance(map, class)?))
                } else {
                    Ok(Value::Object(self.reconstruct_plain(map, context)?))
                }
            }
        }
    }

    fn patch_references(&mut self) -> Result<()> {
        let pending = std::mem::take(&mut self.pending);
        for slot in pending {
            let target = *self
                .instances
                .get(&slot.target)
                .ok_or(ColdstoreError::DanglingReference(slot.target))?;

            let mut place = self
                .graph
                .get_mut(slot.holder)
                .get_mut(&slot.field)
                .expect("GraphDecoder invariant violated: pending slot names a missing field");
            for &index in &slot.indices {
                let items = match place {
                    Value::List(items) => Some(items),
                    _ => None,
                }
                .expect("GraphDecoder invariant violated: pending slot path is not a list");
                place = items
                    .get_mut(index)
                    .expect("GraphDecoder invariant violated: pending slot index out of bounds");
            }
            *place = Value::Object(target);
        }
        Ok(())
    }
}
