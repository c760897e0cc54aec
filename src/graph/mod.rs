//! The live object-graph model.
//!
//! This module defines the `ObjectGraph` arena, the `Object` node, and the
//! `Value` enum that together represent a live, possibly self-referential
//! object graph. Identity is the arena index, not structural equality.

/// Defines the `ObjectGraph` arena and the `Object` node.
pub mod core;
/// Defines the `ObjectId` type.
pub mod id;
/// Defines the `Value` enum for field contents.
pub mod value;

pub use self::core::{Object, ObjectGraph};
pub use self::id::ObjectId;
pub use self::value::Value;
