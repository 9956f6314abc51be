//! Conformance table: explicit "provides" declarations between protocols.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use super::ProtocolConformance;
use crate::protocols::Protocol;

/// Thread-safe table of virtual protocol memberships.
///
/// `provider -> [protocol, ...]` in declaration order. Declarations are
/// transitive: if `Foo` provides `FooAbc` and `FooAbc` provides `BaseAbc`,
/// then `Foo` conforms to `BaseAbc`.
#[derive(Debug, Default)]
pub struct ConformanceTable {
    provides: RwLock<HashMap<Protocol, Vec<Protocol>>>,
    generation: AtomicU64,
}

impl ConformanceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that `provider` satisfies `protocol`.
    ///
    /// Re-declaring an existing pair is a no-op and keeps the original
    /// position in the enumeration order.
    pub fn register_provides(&self, provider: Protocol, protocol: Protocol) {
        if provider == protocol {
            return;
        }

        let mut provides = self.provides.write();
        let declared = provides.entry(provider).or_default();
        if declared.contains(&protocol) {
            return;
        }
        declared.push(protocol);
        self.generation.fetch_add(1, Ordering::Release);

        log::debug!("{} now provides {}", provider, protocol);
    }

    /// Typed form of [`register_provides`](Self::register_provides).
    pub fn declare<T: ?Sized + 'static, P: ?Sized + 'static>(&self) {
        self.register_provides(Protocol::of::<T>(), Protocol::of::<P>());
    }

    /// Protocols declared directly on `provider`, in declaration order.
    pub fn declared(&self, provider: Protocol) -> Vec<Protocol> {
        self.provides
            .read()
            .get(&provider)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of providers with at least one declaration.
    pub fn len(&self) -> usize {
        self.provides.read().len()
    }

    /// Check if nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.provides.read().is_empty()
    }

    /// Remove every declaration.
    pub fn clear(&self) {
        self.provides.write().clear();
        self.generation.fetch_add(1, Ordering::Release);
    }
}

impl ProtocolConformance for ConformanceTable {
    /// `ty` first, then breadth-first over declarations in the order they
    /// were registered.
    fn conformances(&self, ty: Protocol) -> Vec<Protocol> {
        let provides = self.provides.read();

        let mut ordered = vec![ty];
        let mut seen: HashSet<Protocol> = HashSet::from([ty]);
        let mut queue: VecDeque<Protocol> = VecDeque::from([ty]);

        while let Some(current) = queue.pop_front() {
            let Some(declared) = provides.get(&current) else {
                continue;
            };
            for protocol in declared {
                if seen.insert(*protocol) {
                    ordered.push(*protocol);
                    queue.push_back(*protocol);
                }
            }
        }

        ordered
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}
