//! # Adapter rules
//!
//! An [`AdapterRule`] is a directed edge between two protocols together with
//! the [`AdapterFactory`] that performs the wrapping. [`RuleStore`] holds the
//! registered rules indexed by source protocol.

pub mod adapter_rule;
pub mod rule_store;

pub use adapter_rule::{AdapterFactory, AdapterRule};
pub use rule_store::RuleStore;
