//! A conformance view that stacks a second table on top of an oracle.
//!
//! The registry uses it to add "adapter type `A` provides `to_protocol`"
//! facts learned from its own rules to whatever oracle it was built with.

use std::collections::{HashSet, VecDeque};

use super::{ConformanceTable, ProtocolConformance};
use crate::protocols::Protocol;

/// `oracle` answers first; `overlay` declarations are followed from every
/// protocol the oracle reports, and the oracle is asked again about each
/// protocol the overlay adds.
pub struct LayeredConformance<'a, C: ProtocolConformance + ?Sized> {
    oracle: &'a C,
    overlay: &'a ConformanceTable,
}

impl<'a, C: ProtocolConformance + ?Sized> LayeredConformance<'a, C> {
    /// View `oracle` with the declarations in `overlay` added.
    pub fn new(oracle: &'a C, overlay: &'a ConformanceTable) -> Self {
        Self { oracle, overlay }
    }
}

impl<C: ProtocolConformance + ?Sized> ProtocolConformance for LayeredConformance<'_, C> {
    fn conformances(&self, ty: Protocol) -> Vec<Protocol> {
        let mut ordered = self.oracle.conformances(ty);
        if self.overlay.is_empty() {
            return ordered;
        }

        let mut seen: HashSet<Protocol> = ordered.iter().copied().collect();
        let mut queue: VecDeque<Protocol> = ordered.iter().copied().collect();

        while let Some(current) = queue.pop_front() {
            for declared in self.overlay.declared(current) {
                for protocol in self.oracle.conformances(declared) {
                    if seen.insert(protocol) {
                        ordered.push(protocol);
                        queue.push_back(protocol);
                    }
                }
            }
        }

        ordered
    }

    fn conforms(&self, ty: Protocol, protocol: Protocol) -> bool {
        self.oracle.conforms(ty, protocol)
            || (!self.overlay.is_empty() && self.conformances(ty).contains(&protocol))
    }

    /// Both sources only ever count up, so their sum moves whenever either does.
    fn generation(&self) -> u64 {
        self.oracle
            .generation()
            .wrapping_add(self.overlay.generation())
    }
}
