use indexmap::IndexMap;

use super::id::ObjectId;
use super::value::Value;

/// A single object in the graph: an optional class tag plus an
/// insertion-ordered field map.
///
/// A `class` of `None` marks a plain structural node; `Some` marks a typed
/// serializable instance whose name participates in class-tag dispatch.
/// Fields whose name starts with the private prefix `_` may live here but
/// are never serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
    class: Option<String>,
    fields: IndexMap<String, Value>,
}

impl Object {
    /// Creates a plain structural node with no class tag.
    pub fn plain() -> Self {
        Self {
            class: None,
            fields: IndexMap::new(),
        }
    }

    /// Creates a typed instance node carrying the given class name.
    pub fn instance(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            fields: IndexMap::new(),
        }
    }

    /// Returns the class name, if this object is a typed instance.
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Sets a field, replacing any previous value under the same name.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Returns a field's value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns a mutable handle on a field's value.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.fields.get_mut(name)
    }

    /// Removes a field, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.shift_remove(name)
    }

    /// Iterates over the fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the object has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// The arena owning every object of one live graph.
///
/// The arena index is the object's identity: encode deduplicates on it, and
/// decode restores sharing by handing the same [`ObjectId`] to every slot
/// that referenced one node. Dropping the graph drops every object, so
/// cyclic graphs do not leak.
#[derive(Debug, Clone)]
pub struct ObjectGraph {
    objects: Vec<Object>,
}

impl ObjectGraph {
    /// Creates a new, empty `ObjectGraph`.
    pub fn new() -> Self {
        Self { objects: Vec::new() }
    }

    /// Adds an object to the graph.
    ///
    /// Returns the `ObjectId` that is this object's identity from now on.
    pub fn add(&mut self, object: Object) -> ObjectId {
        let id = ObjectId::new(u32::try_from(self.objects.len()).unwrap_or(u32::MAX));
        self.objects.push(object);
        id
    }

    /// Retrieves a reference to an object by its identity.
    ///
    /// # Panics
    ///
    /// Panics if the `id` does not belong to this graph.
    pub fn get(&self, id: ObjectId) -> &Object {
        self.objects
            .get(id.as_u32() as usize)
            .expect("ObjectGraph invariant violated: ObjectId out of bounds")
    }

    /// Retrieves a mutable reference to an object by its identity.
    ///
    /// # Panics
    ///
    /// Panics if the `id` does not belong to this graph.
    pub fn get_mut(&mut self, id: ObjectId) -> &mut Object {
        self.objects
            .get_mut(id.as_u32() as usize)
            .expect("ObjectGraph invariant violated: ObjectId out of bounds")
    }

    /// Returns true if the graph has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Returns the number of objects in the graph.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns a slice containing all objects in the graph.
    pub fn objects(&self) -> &[Object] {
        &self.objects
    }
}

impl Default for ObjectGraph {
    fn default() -> Self {
        Self::new()
    }
}
