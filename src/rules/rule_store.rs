//! Rule storage indexed by source protocol.

use std::collections::HashMap;

use super::adapter_rule::AdapterRule;
use crate::protocols::Protocol;

/// Append-only store of adapter rules.
///
/// Rules are grouped by `from_protocol` and keep their registration order
/// within each group. Duplicate `(from, to)` pairs are kept; the earlier
/// one is found first.
#[derive(Debug, Default, Clone)]
pub struct RuleStore {
    by_source: HashMap<Protocol, Vec<AdapterRule>>,
    /// Every rule in global registration order.
    all: Vec<AdapterRule>,
}

impl RuleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule under its source protocol.
    pub fn register(&mut self, rule: AdapterRule) {
        self.by_source
            .entry(rule.from_protocol())
            .or_default()
            .push(rule.clone());
        self.all.push(rule);
    }

    /// Rules whose `from_protocol` is exactly `protocol`, in registration
    /// order. This is an edge lookup, not a conformance check.
    pub fn rules_from(&self, protocol: Protocol) -> &[AdapterRule] {
        self.by_source
            .get(&protocol)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All rules in registration order.
    pub fn rules(&self) -> &[AdapterRule] {
        &self.all
    }

    /// Total number of registered rules.
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// Check if no rule has been registered.
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Drop every rule.
    pub fn clear(&mut self) {
        self.by_source.clear();
        self.all.clear();
    }
}
