//! # Adaptation
//!
//! A protocol adaptation registry. Given an object and a target protocol,
//! the registry returns the object itself when it already satisfies the
//! protocol, or finds a chain of registered adapter rules that bridges the
//! gap and builds the adapters along it.
//!
//! Protocols are Rust types: concrete types such as `Foo`, or trait objects
//! such as `dyn FooAbc` standing for abstract capabilities. A type satisfies
//! a protocol when it is that protocol, or when it has been declared to
//! provide it.
//!
//! ```
//! use adaptation::{Adapter, AdapterRegistry, AdapterRule, Object, Protocol};
//!
//! trait FooAbc {}
//! trait BarAbc {}
//! struct Foo;
//!
//! struct FooToBar {
//!     adaptee: Object,
//! }
//!
//! impl Adapter for FooToBar {
//!     fn adaptee(&self) -> &Object {
//!         &self.adaptee
//!     }
//! }
//!
//! let registry = AdapterRegistry::new();
//! registry.register_provides(Protocol::of::<Foo>(), Protocol::of::<dyn FooAbc>());
//! registry.register_type_adapters(AdapterRule::for_adapter(
//!     Protocol::of::<dyn FooAbc>(),
//!     Protocol::of::<dyn BarAbc>(),
//!     |adaptee| FooToBar { adaptee },
//! ));
//!
//! let foo = Object::new(Foo);
//! let bar = registry.adapt(&foo, Protocol::of::<dyn BarAbc>()).unwrap().unwrap();
//! assert!(bar.is::<FooToBar>());
//! assert!(bar.adaptee().unwrap().ptr_eq(&foo));
//! ```

pub mod conformance;
pub mod protocols;
pub mod registry;
pub mod resolver;
pub mod rules;

pub use conformance::{ConformanceTable, ExactConformance, LayeredConformance, ProtocolConformance};
pub use protocols::{Adapter, Object, Protocol};
pub use registry::{AdapterRegistry, ConfigError, RegistryConfig, RuleDescription};
pub use resolver::{AdapterPath, ChainResolver};
pub use rules::{AdapterFactory, AdapterRule, RuleStore};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
