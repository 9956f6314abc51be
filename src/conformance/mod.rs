//! # Protocol conformance
//!
//! Answers "does type `T` satisfy protocol `P`?". A type conforms to a
//! protocol when it *is* that protocol (exact match) or when it has been
//! declared to provide it out-of-band (virtual membership).
//!
//! The registry consumes conformance through the [`ProtocolConformance`]
//! trait, so any external declaration mechanism can be plugged in.
//! [`ConformanceTable`] is the in-process implementation used by default.

pub mod layered;
pub mod table;

pub use layered::LayeredConformance;
pub use table::ConformanceTable;

use crate::protocols::Protocol;

/// A conformance oracle.
///
/// Implementations must be side-effect free and must never fail for unknown
/// types: the absence of a relation is simply `false`.
pub trait ProtocolConformance: Send + Sync {
    /// Every protocol `ty` conforms to, in deterministic order.
    ///
    /// The first element must be `ty` itself (exact match); declared
    /// protocols follow in the order the oracle defines.
    fn conformances(&self, ty: Protocol) -> Vec<Protocol>;

    /// Whether `ty` conforms to `protocol`.
    fn conforms(&self, ty: Protocol, protocol: Protocol) -> bool {
        ty == protocol || self.conformances(ty).contains(&protocol)
    }

    /// A counter that changes whenever the oracle's answers may have
    /// changed. Caches built on top of the oracle are dropped when it moves.
    fn generation(&self) -> u64 {
        0
    }
}

/// Conformance by exact type identity only.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactConformance;

impl ProtocolConformance for ExactConformance {
    fn conformances(&self, ty: Protocol) -> Vec<Protocol> {
        vec![ty]
    }

    fn conforms(&self, ty: Protocol, protocol: Protocol) -> bool {
        ty == protocol
    }
}
