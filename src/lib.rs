//! # Coldstore
//!
//! A graph-preserving object serialization engine with load-or-create disk
//! persistence.
//!
//! ## Overview
//!
//! Coldstore converts a live, possibly self-referential object graph into a
//! tagged plain document and back. Unlike a naive structural walk, the
//! traversal tracks *identity*: a sub-object reachable from two places is
//! emitted once and decoded once, and an object that points back at an
//! ancestor encodes and decodes without unbounded recursion.
//!
//! ### Key Features
//!
//! *   **Shared references:** the same sub-object reachable from two fields
//!     becomes one node on decode, not two equal copies.
//! *   **Circular references:** direct and indirect cycles terminate; a
//!     repeat encounter collapses to a constant-size reference marker.
//! *   **Two-pass decoding:** reconstruction records every declared identity
//!     before a separate patch pass resolves reference markers, so forward
//!     references always resolve.
//! *   **Explicit class resolution:** nested typed documents are dispatched
//!     through a caller-declared dependency list, never through global type
//!     discovery.
//! *   **Load-or-create persistence:** a store hydrates an instance from its
//!     backing file or constructs a fresh one and writes it immediately.
//!
//! ## Core Concepts
//!
//! ### `ObjectGraph`
//!
//! The [`graph::ObjectGraph`] is an arena owning every object of one live
//! graph. An [`graph::ObjectId`] is the object's identity: sharing and
//! cycles are expressed by the same id appearing in more than one slot, and
//! the encoder deduplicates on ids rather than on field contents.
//!
//! ### Tagged documents
//!
//! Documents are JSON values carrying out-of-band metadata under reserved
//! keys (see [`format`]): a class tag on typed instance nodes, an instance
//! id on every object node, and reference markers standing in for nodes
//! emitted elsewhere.
//!
//! ### Classes
//!
//! A [`ClassDef`] declares a class name and the closed set of classes it may
//! contain as nested serializable values. The decoder resolves nested class
//! tags through that list alone; an undeclared tag is an error naming the
//! missing class.
//!
//! ### Persistence
//!
//! [`PersistenceStore`] composes the engine with a byte-level [`Storage`]
//! backend and a physical [`Encoding`]. The handle it returns, a
//! [`Persisted`], carries the storage location outside the serializable
//! schema, so the location never appears in a document.
//!
//! ## Usage
//!
//! ```rust
//! use coldstore::{ClassDef, Coldstore, Object, ObjectGraph, Value};
//!
//! static ACTOR: ClassDef = ClassDef::leaf("Actor");
//! static WORLD: ClassDef = ClassDef::new("World", || vec![&ACTOR]);
//!
//! # fn main() -> coldstore::Result<()> {
//! let mut graph = ObjectGraph::new();
//! let hero = graph.add(Object::instance("Actor"));
//! graph.get_mut(hero).set("name", "Ragnar");
//!
//! let world = graph.add(Object::instance("World"));
//! graph.get_mut(world).set("hero", Value::Object(hero));
//! graph.get_mut(world).set("champion", Value::Object(hero)); // shared
//!
//! let document = Coldstore::encode(&graph, world)?;
//! let restored = Coldstore::decode(&document, &WORLD)?.expect("root tag matches");
//!
//! let w = restored.graph().get(restored.root());
//! assert_eq!(w.get("hero"), w.get("champion")); // still one shared Actor
//! # Ok(())
//! # }
//! ```
//!
//! ### Safety and Error Handling
//!
//! * **No unsafe code:** enforced by `#![deny(unsafe_code)]`.
//! * **No panics:** no `unwrap()` or `panic!()` in the library (enforced by
//!   clippy lints); all failures surface as a [`ColdstoreError`].
//! * **Deterministic failures:** every error is structural or
//!   configuration-shaped, never transient, so nothing retries.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

// --- PUBLIC API MODULES ---
pub mod api;
pub mod class;
pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod format;
pub mod graph;
pub mod storage;
pub mod store;

// --- RE-EXPORTS ---

pub use api::Coldstore;
pub use class::ClassDef;
pub use codec::Encoding;
pub use decoder::GraphDecoder;
pub use encoder::GraphEncoder;
pub use error::{ColdstoreError, Result};
pub use graph::{Object, ObjectGraph, ObjectId, Value};
pub use storage::{DirStorage, Storage};
pub use store::{Persisted, PersistenceStore};
