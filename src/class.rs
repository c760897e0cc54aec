//! Class descriptors and nested-type resolution.
//!
//! Every serializable class is described by a [`ClassDef`]: its declared
//! name plus the closed list of other classes it may contain as nested
//! serializable values. The list is the single source of truth for
//! resolving a tagged nested document into a constructor; there is no
//! global type discovery.
//!
//! A class's own name need not appear in its list: a reference back to the
//! *same* instance travels as a reference marker and never consults the
//! registry. A nested *distinct* instance of the same class is an ordinary
//! tagged node and does require the class to declare itself.
//!
//! ```rust
//! use coldstore::ClassDef;
//!
//! static ACTOR: ClassDef = ClassDef::leaf("Actor");
//! static WORLD: ClassDef = ClassDef::new("World", || vec![&ACTOR]);
//!
//! assert_eq!(WORLD.resolve("Actor").unwrap().name(), "Actor");
//! assert!(WORLD.resolve("Monster").is_err());
//! ```

use std::fmt;

use crate::error::{ColdstoreError, Result};

/// The declared dependency list of a class: the closed set of classes it may
/// contain as nested serializable values.
pub type Dependencies = fn() -> Vec<&'static ClassDef>;

/// A class descriptor: a declared name plus a dependency list.
///
/// Descriptors are plain data intended to live in `static`s, one per
/// concrete serializable class.
#[derive(Clone, Copy)]
pub struct ClassDef {
    name: &'static str,
    dependencies: Dependencies,
}

impl ClassDef {
    /// Creates a class descriptor with the given dependency list.
    pub const fn new(name: &'static str, dependencies: Dependencies) -> Self {
        Self { name, dependencies }
    }

    /// Creates a class descriptor with no nested serializable classes.
    pub const fn leaf(name: &'static str) -> Self {
        Self {
            name,
            dependencies: Vec::new,
        }
    }

    /// Returns the declared class name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declared dependency list.
    pub fn dependencies(&self) -> Vec<&'static ClassDef> {
        (self.dependencies)()
    }

    /// Resolves a nested class tag through the dependency list.
    ///
    /// Exactly one declared class with a matching name delegates decoding to
    /// that class.
    ///
    /// # Errors
    /// Returns [`ColdstoreError::UnknownClass`] when no declared class
    /// matches the tag, or when more than one does. The message names the
    /// tag so the caller knows what to register.
    pub fn resolve(&self, tag: &str) -> Result<&'static ClassDef> {
        let mut matches = self.dependencies().into_iter().filter(|c| c.name == tag);
        match (matches.next(), matches.next()) {
            (Some(class), None) => Ok(class),
            (None, _) => Err(ColdstoreError::UnknownClass(format!(
                "unknown class `{tag}`; did you forget to add it to the dependency list of `{}`?",
                self.name
            ))),
            (Some(_), Some(_)) => Err(ColdstoreError::UnknownClass(format!(
                "ambiguous class `{tag}`: declared more than once in the dependency list of `{}`",
                self.name
            ))),
        }
    }
}

impl fmt::Debug for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassDef({})", self.name)
    }
}
