//! Protocol identifiers.
//!
//! A protocol is any `'static` Rust type, sized or not. Concrete types
//! (`Foo`) and trait objects standing for abstract capabilities
//! (`dyn FooAbc`) are both valid protocols, and the two are compared the
//! same way: by `TypeId`.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An opaque, comparable handle naming a capability.
///
/// Equality and hashing use only the `TypeId`. The type name is carried
/// for log output and [`describe`](crate::registry::AdapterRegistry::describe).
#[derive(Clone, Copy)]
pub struct Protocol {
    id: TypeId,
    name: &'static str,
}

impl Protocol {
    /// The protocol identified by the type `T`.
    ///
    /// ```
    /// use adaptation::Protocol;
    ///
    /// trait Readable {}
    /// struct File;
    ///
    /// assert_eq!(Protocol::of::<File>(), Protocol::of::<File>());
    /// assert_ne!(Protocol::of::<File>(), Protocol::of::<dyn Readable>());
    /// ```
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Full type name of the protocol.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name with module paths stripped (`dyn a::b::Foo` -> `dyn Foo`).
    pub fn short_name(&self) -> String {
        short_type_name(self.name)
    }

    /// The underlying `TypeId`.
    pub fn type_id(&self) -> TypeId {
        self.id
    }
}

impl PartialEq for Protocol {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Protocol {}

impl Hash for Protocol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Protocol({})", self.short_name())
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

/// Strip every `path::` prefix from a type name, keeping generics intact.
fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment = String::new();
    let mut chars = full.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ':' if chars.peek() == Some(&':') => {
                chars.next();
                segment.clear();
            }
            c if c.is_alphanumeric() || c == '_' => segment.push(c),
            other => {
                out.push_str(&segment);
                segment.clear();
                out.push(other);
            }
        }
    }
    out.push_str(&segment);
    out
}
