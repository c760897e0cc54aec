use serde_json::Value as JsonValue;

use crate::class::ClassDef;
use crate::codec::Encoding;
use crate::decoder::GraphDecoder;
use crate::encoder::GraphEncoder;
use crate::error::Result;
use crate::graph::{ObjectGraph, ObjectId};
use crate::store::Persisted;

/// The main entry point for one-shot encode and decode operations.
#[derive(Debug)]
pub struct Coldstore;

impl Coldstore {
    /// Encodes the graph reachable from `root` into a tagged document.
    pub fn encode(graph: &ObjectGraph, root: ObjectId) -> Result<JsonValue> {
        GraphEncoder::new(graph).encode(root)
    }

    /// Decodes a tagged document against an expected class.
    ///
    /// Returns `Ok(None)` on a root class-tag mismatch. The returned handle
    /// carries no storage location.
    pub fn decode(document: &JsonValue, class: &'static ClassDef) -> Result<Option<Persisted>> {
        let mut graph = ObjectGraph::new();
        match GraphDecoder::new(&mut graph).decode(document, class)? {
            Some(root) => Ok(Some(Persisted::new(graph, root))),
            None => Ok(None),
        }
    }

    /// Encodes to pretty-printed JSON text.
    pub fn to_json(graph: &ObjectGraph, root: ObjectId) -> Result<String> {
        let document = Self::encode(graph, root)?;
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Decodes from JSON text against an expected class.
    pub fn from_json(text: &str, class: &'static ClassDef) -> Result<Option<Persisted>> {
        let document: JsonValue = serde_json::from_str(text)?;
        Self::decode(&document, class)
    }

    /// Encodes to bytes in the selected physical encoding.
    ///
    /// # Errors
    /// Returns [`crate::ColdstoreError::UnsupportedEncoding`] for encodings
    /// that are declared but not implemented.
    pub fn serialize(graph: &ObjectGraph, root: ObjectId, encoding: Encoding) -> Result<Vec<u8>> {
        let document = Self::encode(graph, root)?;
        encoding.encode(&document)
    }

    /// Decodes bytes in the selected physical encoding against an expected
    /// class.
    ///
    /// # Errors
    /// Returns [`crate::ColdstoreError::UnsupportedEncoding`] for encodings
    /// that are declared but not implemented.
    pub fn deserialize(
        bytes: &[u8],
        class: &'static ClassDef,
        encoding: Encoding,
    ) -> Result<Option<Persisted>> {
        let document = encoding.decode(bytes)?;
        Self::decode(&document, class)
    }
}
