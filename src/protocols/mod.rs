//! # Protocols and objects
//!
//! A [`Protocol`] names a capability. An [`Object`] is a type-erased value
//! that may or may not satisfy one. Adapters implement [`Adapter`] so that
//! chains of them can be walked back to the original adaptee.

pub mod object;
pub mod protocol;

pub use object::{Adapter, Object};
pub use protocol::Protocol;
