//! # Chain resolution
//!
//! Finds the shortest sequence of adapter rules that takes an adaptee's
//! type to a target protocol. See [`ChainResolver`].

pub mod chain_resolver;

pub use chain_resolver::{AdapterPath, ChainResolver};
