//! # Adapter registry
//!
//! [`AdapterRegistry`] ties the pieces together: it owns the rule store and
//! the resolution cache, consults a conformance oracle, asks the chain
//! resolver for paths, and materializes them into adapters.
//!
//! ```text
//! adapt(object, protocol)
//!   │ conforms? ──────────────► object (unchanged)
//!   ▼
//! ResolutionCache ── hit ──► path / none
//!   │ miss
//!   ▼
//! ChainResolver (BFS over RuleStore)
//!   │ path
//!   ▼
//! factory_n(... factory_1(object))
//! ```

pub mod adapter_registry;
pub mod registry_config;
pub mod resolution_cache;

pub use adapter_registry::{AdapterRegistry, RuleDescription};
pub use registry_config::{ConfigError, RegistryConfig};
pub use resolution_cache::{CachedResolution, ResolutionCache};
