//! Breadth-first search for adapter chains.
//!
//! Nodes are protocols, edges are adapter rules. The search starts from
//! every protocol the adaptee's type conforms to and stops at the first
//! discovery of the target protocol, which yields the shortest chain.

use std::collections::{HashMap, HashSet, VecDeque};
use std::num::NonZeroUsize;

use crate::conformance::ProtocolConformance;
use crate::protocols::Protocol;
use crate::rules::{AdapterRule, RuleStore};

/// An ordered sequence of rules. Empty means "no adaptation needed".
pub type AdapterPath = Vec<AdapterRule>;

/// Searches a [`RuleStore`] for an adapter chain.
///
/// Tie-breaks are deterministic: start protocols are expanded in the order
/// the conformance oracle lists them, and each node's outgoing rules in
/// registration order. The first chain found among equally short ones wins.
pub struct ChainResolver<'a, C: ProtocolConformance + ?Sized> {
    rules: &'a RuleStore,
    conformance: &'a C,
    max_chain_length: Option<NonZeroUsize>,
}

impl<'a, C: ProtocolConformance + ?Sized> ChainResolver<'a, C> {
    /// Search `rules`, asking `conformance` for the start protocols.
    pub fn new(rules: &'a RuleStore, conformance: &'a C) -> Self {
        Self {
            rules,
            conformance,
            max_chain_length: None,
        }
    }

    /// Give up on chains longer than `max` rules.
    pub fn with_max_chain_length(mut self, max: Option<NonZeroUsize>) -> Self {
        self.max_chain_length = max;
        self
    }

    /// Find a chain taking an instance of `adaptee_type` to `target`.
    ///
    /// Returns `Some(vec![])` when no adaptation is needed and `None` when
    /// no chain exists.
    pub fn resolve(&self, adaptee_type: Protocol, target: Protocol) -> Option<AdapterPath> {
        if self.conformance.conforms(adaptee_type, target) {
            return Some(Vec::new());
        }

        let starts = self.conformance.conformances(adaptee_type);

        // Every node is expanded at most once, so cycles terminate.
        let mut visited: HashSet<Protocol> = starts.iter().copied().collect();
        let mut came_from: HashMap<Protocol, (Protocol, AdapterRule)> = HashMap::new();
        let mut queue: VecDeque<(Protocol, usize)> =
            starts.iter().map(|protocol| (*protocol, 0)).collect();

        while let Some((node, depth)) = queue.pop_front() {
            if self.max_chain_length.is_some_and(|max| depth >= max.get()) {
                continue;
            }

            for rule in self.rules.rules_from(node) {
                let next = rule.to_protocol();
                if !visited.insert(next) {
                    continue;
                }
                came_from.insert(next, (node, rule.clone()));

                if next == target {
                    return Some(Self::unwind(&came_from, target));
                }
                queue.push_back((next, depth + 1));
            }
        }

        None
    }

    /// Rebuild the path ending at `target` from the predecessor map.
    fn unwind(came_from: &HashMap<Protocol, (Protocol, AdapterRule)>, target: Protocol) -> AdapterPath {
        let mut path = Vec::new();
        let mut node = target;
        while let Some((previous, rule)) = came_from.get(&node) {
            path.push(rule.clone());
            node = *previous;
        }
        path.reverse();
        path
    }
}
