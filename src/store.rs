//! Load-or-create persistence on top of the graph engine.
//!
//! [`PersistenceStore`] composes the encoder, the decoder, an [`Encoding`],
//! and a [`Storage`] backend: given a logical name it either decodes the
//! existing document into an instance or constructs a fresh one and writes
//! it immediately, establishing the file for next time.
//!
//! [`Persisted`] is the handle a store hands out: the live graph, its root,
//! and the storage location the instance was tagged with. The location lives
//! on the handle, outside the serializable schema, so it is never visible to
//! the encoder and never round-trips through a document.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::class::ClassDef;
use crate::codec::Encoding;
use crate::decoder::GraphDecoder;
use crate::encoder::GraphEncoder;
use crate::error::{ColdstoreError, Result};
use crate::graph::{ObjectGraph, ObjectId};
use crate::storage::{DirStorage, Storage};

/// A live instance together with its out-of-band persistence state.
#[derive(Debug)]
pub struct Persisted {
    graph: ObjectGraph,
    root: ObjectId,
    location: Option<String>,
}

impl Persisted {
    /// Wraps a graph and root constructed outside any store.
    ///
    /// The handle carries no location; writing it back fails with
    /// [`ColdstoreError::MissingLocation`] until one is supplied.
    pub fn new(graph: ObjectGraph, root: ObjectId) -> Self {
        Self {
            graph,
            root,
            location: None,
        }
    }

    /// Returns the live graph.
    pub fn graph(&self) -> &ObjectGraph {
        &self.graph
    }

    /// Returns the live graph for mutation.
    pub fn graph_mut(&mut self) -> &mut ObjectGraph {
        &mut self.graph
    }

    /// Returns the root object's identity.
    pub fn root(&self) -> ObjectId {
        self.root
    }

    /// Returns the tagged storage location, if the instance has one.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

/// The load-or-create persistence wrapper.
#[derive(Debug)]
pub struct PersistenceStore {
    storage: Box<dyn Storage>,
    encoding: Encoding,
}

impl PersistenceStore {
    /// Creates a store over the given backend with the default encoding.
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self {
            storage,
            encoding: Encoding::default(),
        }
    }

    /// Creates a store over the given backend with an explicit encoding.
    pub fn with_encoding(storage: Box<dyn Storage>, encoding: Encoding) -> Self {
        Self { storage, encoding }
    }

    /// Creates a store over filesystem storage rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(DirStorage::new(root)))
    }

    /// Returns the configured encoding.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Loads the instance stored under `name`, or constructs a fresh one.
    ///
    /// See [`PersistenceStore::load_or_create_with`]; this variant installs
    /// no post-restore hook.
    pub fn load_or_create<F>(
        &self,
        name: &str,
        class: &'static ClassDef,
        init: F,
    ) -> Result<Persisted>
    where
        F: FnOnce(&mut ObjectGraph) -> ObjectId,
    {
        self.load_or_create_with(name, class, init, |_| Ok(()))
    }

    /// Loads the instance stored under `name`, or constructs a fresh one.
    ///
    /// If a document exists under `name` it is decoded, the handle is tagged
    /// with the location, and `restore` runs on the restored instance. If
    /// none exists, `init` builds a fresh graph and returns its root; the
    /// instance is tagged and written back immediately, and `restore` does
    /// not run.
    ///
    /// # Errors
    /// Any decode failure on an existing document is fatal, including a root
    /// class tag that does not match `class`: silently recreating over a
    /// mismatched file would destroy it. An error returned by `restore`
    /// propagates unchanged.
    pub fn load_or_create_with<F, H>(
        &self,
        name: &str,
        class: &'static ClassDef,
        init: F,
        restore: H,
    ) -> Result<Persisted>
    where
        F: FnOnce(&mut ObjectGraph) -> ObjectId,
        H: FnOnce(&mut Persisted) -> Result<()>,
    {
        if self.storage.exists(name) {
            debug!(name = %name, class = class.name(), "restoring instance from storage");
            let bytes = self.storage.read(name)?;
            let document = self.encoding.decode(&bytes)?;

            let mut graph = ObjectGraph::new();
            let root = GraphDecoder::new(&mut graph)
                .decode(&document, class)?
                .ok_or_else(|| {
                    ColdstoreError::Document(format!(
                        "stored document `{name}` is not a `{}`",
                        class.name()
                    ))
                })?;

            let mut instance = Persisted {
                graph,
                root,
                location: Some(name.to_string()),
            };
            restore(&mut instance)?;
            Ok(instance)
        } else {
            debug!(name = %name, class = class.name(), "no stored document, creating fresh instance");
            let mut graph = ObjectGraph::new();
            let root = init(&mut graph);
            let mut instance = Persisted {
                graph,
                root,
                location: Some(name.to_string()),
            };
            self.write_back(&mut instance, None)?;
            Ok(instance)
        }
    }

    /// Encodes the instance and writes it to its tagged location.
    ///
    /// A `new_location` overrides the tag first; subsequent writes use the
    /// new one.
    ///
    /// # Errors
    /// Returns [`ColdstoreError::MissingLocation`] if the instance has never
    /// been tagged with a location.
    pub fn write_back(&self, instance: &mut Persisted, new_location: Option<&str>) -> Result<()> {
        if let Some(location) = new_location {
            instance.location = Some(location.to_string());
        }
        let location = instance
            .location
            .clone()
            .ok_or(ColdstoreError::MissingLocation)?;

        let document = GraphEncoder::new(&instance.graph).encode(instance.root)?;
        let bytes = self.encoding.encode(&document)?;
        trace!(location = %location, bytes = bytes.len(), "writing instance back");
        self.storage.write(&location, &bytes)
    }
}
