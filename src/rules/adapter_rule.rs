//! Adapter rules and the factories that materialize them.

use std::fmt;
use std::sync::Arc;

use crate::protocols::{Adapter, Object, Protocol};

/// Builds an adapter around an adaptee.
///
/// The adaptee handed to [`create`](Self::create) conforms to the rule's
/// `from_protocol`; the returned object must conform to its `to_protocol`.
/// Errors are returned to the caller of
/// [`adapt`](crate::registry::AdapterRegistry::adapt) as they are.
pub trait AdapterFactory: Send + Sync {
    /// Wrap `adaptee`.
    fn create(&self, adaptee: Object) -> anyhow::Result<Object>;
}

impl<F> AdapterFactory for F
where
    F: Fn(Object) -> anyhow::Result<Object> + Send + Sync,
{
    fn create(&self, adaptee: Object) -> anyhow::Result<Object> {
        self(adaptee)
    }
}

/// Factory for an [`Adapter`] type with an infallible constructor.
struct AdapterConstructor<A> {
    construct: fn(Object) -> A,
}

impl<A: Adapter> AdapterFactory for AdapterConstructor<A> {
    fn create(&self, adaptee: Object) -> anyhow::Result<Object> {
        Ok(Object::from_adapter((self.construct)(adaptee)))
    }
}

/// An immutable edge `from_protocol -> to_protocol` plus the factory that
/// crosses it.
#[derive(Clone)]
pub struct AdapterRule {
    from_protocol: Protocol,
    to_protocol: Protocol,
    factory: Arc<dyn AdapterFactory>,
    /// Concrete type of the adapters the factory builds, when known up front.
    adapter_type: Option<Protocol>,
}

impl AdapterRule {
    /// Create a rule from any factory.
    pub fn new(
        from_protocol: Protocol,
        to_protocol: Protocol,
        factory: impl AdapterFactory + 'static,
    ) -> Self {
        Self {
            from_protocol,
            to_protocol,
            factory: Arc::new(factory),
            adapter_type: None,
        }
    }

    /// Create a rule whose adapters are built by a plain constructor.
    ///
    /// ```
    /// use adaptation::{Adapter, AdapterRule, Object, Protocol};
    ///
    /// trait Source {}
    /// trait Sink {}
    ///
    /// struct SourceToSink {
    ///     adaptee: Object,
    /// }
    ///
    /// impl Adapter for SourceToSink {
    ///     fn adaptee(&self) -> &Object {
    ///         &self.adaptee
    ///     }
    /// }
    ///
    /// let rule = AdapterRule::for_adapter(
    ///     Protocol::of::<dyn Source>(),
    ///     Protocol::of::<dyn Sink>(),
    ///     |adaptee| SourceToSink { adaptee },
    /// );
    /// assert_eq!(rule.to_protocol(), Protocol::of::<dyn Sink>());
    /// ```
    pub fn for_adapter<A: Adapter>(
        from_protocol: Protocol,
        to_protocol: Protocol,
        construct: fn(Object) -> A,
    ) -> Self {
        Self {
            adapter_type: Some(Protocol::of::<A>()),
            ..Self::new(from_protocol, to_protocol, AdapterConstructor { construct })
        }
    }

    /// Protocol the adaptee must satisfy.
    pub fn from_protocol(&self) -> Protocol {
        self.from_protocol
    }

    /// Protocol the built adapter satisfies.
    pub fn to_protocol(&self) -> Protocol {
        self.to_protocol
    }

    /// Concrete adapter type, for rules built with
    /// [`for_adapter`](Self::for_adapter).
    pub fn adapter_type(&self) -> Option<Protocol> {
        self.adapter_type
    }

    /// Run the factory on `adaptee`.
    pub fn apply(&self, adaptee: Object) -> anyhow::Result<Object> {
        self.factory.create(adaptee)
    }

    /// True when both handles share the same factory instance.
    pub fn same_factory(&self, other: &AdapterRule) -> bool {
        std::ptr::eq(
            Arc::as_ptr(&self.factory) as *const (),
            Arc::as_ptr(&other.factory) as *const (),
        )
    }
}

impl fmt::Debug for AdapterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRule")
            .field("from_protocol", &self.from_protocol)
            .field("to_protocol", &self.to_protocol)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for AdapterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from_protocol, self.to_protocol)
    }
}
