//! Type-erased shared objects and the adapter contract.
//!
//! The registry never knows the concrete types it moves around. Adaptees
//! and adapters travel as [`Object`] handles: an `Arc<dyn Any>` plus the
//! runtime [`Protocol`] of the value inside, and, for adapters, the link to
//! the object they wrap.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::protocol::Protocol;

/// A wrapper around exactly one adaptee.
///
/// Implementors hold the adaptee they were built from. The adapter does not
/// own the adaptee's lifecycle beyond keeping its `Arc` alive.
pub trait Adapter: Any + Send + Sync {
    /// The object this adapter wraps.
    fn adaptee(&self) -> &Object;
}

/// A shared, type-erased reference to an adaptee or adapter.
///
/// Cloning is cheap and keeps pointing at the same value; use
/// [`ptr_eq`](Self::ptr_eq) to ask whether two handles are the same object.
#[derive(Clone)]
pub struct Object {
    value: Arc<dyn Any + Send + Sync>,
    runtime_type: Protocol,
    adaptee: Option<Box<Object>>,
}

impl Object {
    /// Wrap a plain value.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Wrap an already shared value without copying it.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            value,
            runtime_type: Protocol::of::<T>(),
            adaptee: None,
        }
    }

    /// Wrap an adapter, recording the object it adapts.
    pub fn from_adapter<A: Adapter>(adapter: A) -> Self {
        let adaptee = adapter.adaptee().clone();
        Self {
            value: Arc::new(adapter),
            runtime_type: Protocol::of::<A>(),
            adaptee: Some(Box::new(adaptee)),
        }
    }

    /// Record `adaptee` as the object this one wraps, unless a link is
    /// already present or both handles are the same object.
    pub(crate) fn link_adaptee(mut self, adaptee: &Object) -> Self {
        if self.adaptee.is_none() && !self.ptr_eq(adaptee) {
            self.adaptee = Some(Box::new(adaptee.clone()));
        }
        self
    }

    /// The concrete type of the wrapped value.
    pub fn runtime_type(&self) -> Protocol {
        self.runtime_type
    }

    /// Check if the wrapped value is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Borrow the wrapped value as a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Get a typed shared handle to the wrapped value.
    pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.value.clone().downcast::<T>().ok()
    }

    /// The object this one adapts, when it was built with
    /// [`from_adapter`](Self::from_adapter).
    pub fn adaptee(&self) -> Option<&Object> {
        self.adaptee.as_deref()
    }

    /// Follow `adaptee` links back to the original, unadapted object.
    pub fn root(&self) -> &Object {
        let mut current = self;
        while let Some(next) = current.adaptee() {
            current = next;
        }
        current
    }

    /// Number of adapters between this object and its root.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Some(next) = current.adaptee() {
            depth += 1;
            current = next;
        }
        depth
    }

    /// True when both handles refer to the same allocation.
    pub fn ptr_eq(&self, other: &Object) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.value) as *const (),
            Arc::as_ptr(&other.value) as *const (),
        )
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("runtime_type", &self.runtime_type)
            .field("adaptee", &self.adaptee)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Foo(u32);

    struct FooWrapper {
        adaptee: Object,
    }

    impl Adapter for FooWrapper {
        fn adaptee(&self) -> &Object {
            &self.adaptee
        }
    }

    #[test]
    fn test_object_downcast() {
        let obj = Object::new(Foo(7));
        assert!(obj.is::<Foo>());
        assert!(!obj.is::<String>());
        assert_eq!(obj.downcast_ref::<Foo>(), Some(&Foo(7)));
        assert_eq!(obj.runtime_type(), Protocol::of::<Foo>());
        assert!(obj.downcast_arc::<Foo>().is_some());
        assert!(obj.downcast_arc::<String>().is_none());
    }

    #[test]
    fn test_clone_is_same_object() {
        let obj = Object::new(Foo(1));
        let other = obj.clone();
        assert!(obj.ptr_eq(&other));
        assert!(!obj.ptr_eq(&Object::new(Foo(1))));
    }

    #[test]
    fn test_from_arc_shares_allocation() {
        let shared = Arc::new(Foo(3));
        let a = Object::from_arc(shared.clone());
        let b = Object::from_arc(shared);
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn test_adapter_links_back_to_root() {
        let foo = Object::new(Foo(2));
        let first = Object::from_adapter(FooWrapper { adaptee: foo.clone() });
        let second = Object::from_adapter(FooWrapper { adaptee: first.clone() });

        assert!(foo.adaptee().is_none());
        assert_eq!(foo.depth(), 0);
        assert_eq!(second.depth(), 2);
        assert!(second.adaptee().unwrap().ptr_eq(&first));
        assert!(second.root().ptr_eq(&foo));
        assert_eq!(second.runtime_type(), Protocol::of::<FooWrapper>());
    }

    #[test]
    fn test_link_adaptee_only_fills_missing_link() {
        let foo = Object::new(Foo(4));
        let plain = Object::new(Foo(5)).link_adaptee(&foo);
        assert!(plain.adaptee().unwrap().ptr_eq(&foo));
        assert!(plain.root().ptr_eq(&foo));

        let other = Object::new(Foo(6));
        let wrapped = Object::from_adapter(FooWrapper { adaptee: foo.clone() }).link_adaptee(&other);
        assert!(wrapped.adaptee().unwrap().ptr_eq(&foo));

        let same = foo.clone().link_adaptee(&foo);
        assert!(same.adaptee().is_none());
    }
}
