//! The encode-side engine.
//!
//! Walks a live object graph once, depth-first and pre-order, producing a
//! tagged document. Every distinct identity reachable from the root appears
//! exactly once as a fully expanded node; every later encounter of the same
//! identity, including a cycle back to an ancestor still being emitted,
//! becomes a constant-size reference marker.

use std::collections::HashMap;

use serde_json::{Map, Value as JsonValue};

use crate::error::Result;
use crate::format;
use crate::graph::{ObjectGraph, ObjectId, Value};

/// The encode-side traversal. One encoder serves one `encode` call; the
/// identity table does not outlive it.
#[derive(Debug)]
pub struct GraphEncoder<'g> {
    graph: &'g ObjectGraph,
    /// Identity table: arena identity to assigned instance id, filled in
    /// encounter order.
    identities: HashMap<ObjectId, u64>,
}

impl<'g> GraphEncoder<'g> {
    /// Creates an encoder over the given graph.
    pub fn new(graph: &'g ObjectGraph) -> Self {
        Self {
            graph,
            identities: HashMap::new(),
        }
    }

    /// Encodes the graph reachable from `root` into a tagged document.
    ///
    /// Instance ids are assigned 0-based in pre-order encounter order.
    /// Fields whose name starts with the private prefix are skipped.
    pub fn encode(mut self, root: ObjectId) -> Result<JsonValue> {
        self.encode_object(root)
    }

    fn encode_object(&mut self, id: ObjectId) -> Result<JsonValue> {
        // A previously visited identity collapses to a marker. This includes
        // a cycle back to an ancestor whose node is still being built: the
        // ancestor registered itself below, before recursing.
        if let Some(&assigned) = self.identities.get(&id) {
            return Ok(format::reference_marker(assigned));
        }

        let assigned = self.identities.len() as u64;
        self.identities.insert(id, assigned);

        let graph = self.graph;
        let object = graph.get(id);

        let mut node = Map::new();
        for (name, value) in object.fields() {
            if format::is_private(name) {
                continue;
            }
            node.insert(name.to_string(), self.encode_value(value)?);
        }

        if let Some(class) = object.class() {
            node.insert(format::CLASS_KEY.to_string(), JsonValue::from(class));
        }
        node.insert(format::INSTANCE_KEY.to_string(), JsonValue::from(assigned));

        Ok(JsonValue::Object(node))
    }

    fn encode_value(&mut self, value: &Value) -> Result<JsonValue> {
        Ok(match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::from(*b),
            Value::Int(i) => JsonValue::from(*i),
            // Non-finite floats have no JSON representation and become null.
            Value::Float(f) => {
                serde_json::Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number)
            }
            Value::Text(s) => JsonValue::from(s.as_str()),
            Value::List(items) => JsonValue::Array(
                items
                    .iter()
                    .map(|item| self.encode_value(item))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Object(target) => self.encode_object(*target)?,
        })
    }
}
