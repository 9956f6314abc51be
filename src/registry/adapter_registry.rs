//! AdapterRegistry: the public entry point for adaptation.
//!
//! `adapt(object, protocol)`:
//! 1. If the object already conforms, return it unchanged.
//! 2. Otherwise look up (or resolve and memoize) an adapter chain for the
//!    pair (runtime type, protocol).
//! 3. Fold the chain left to right, feeding each factory the previous
//!    adapter, and return the last one.
//!
//! Every adapter the registry builds conforms to its rule's target
//! protocol. The registry records that fact for the adapter's type on top of
//! the conformance oracle, so adapters can be adapted again.
//!
//! The rule store and the resolution cache share one readers-writer lock.
//! Factories run after the lock is released, so they may call back into
//! the registry.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::registry_config::RegistryConfig;
use super::resolution_cache::{CachedResolution, ResolutionCache};
use crate::conformance::{ConformanceTable, LayeredConformance, ProtocolConformance};
use crate::protocols::{Object, Protocol};
use crate::resolver::{AdapterPath, ChainResolver};
use crate::rules::{AdapterFactory, AdapterRule, RuleStore};

/// Everything guarded by the registry lock.
#[derive(Debug, Default)]
struct RegistryState {
    rules: RuleStore,
    cache: ResolutionCache,
}

/// Serializable summary of a registered rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDescription {
    pub from: String,
    pub to: String,
}

/// Finds or builds adapters that let an object be used as a protocol.
///
/// Registries are explicitly constructed and passed around; there is no
/// process-wide instance.
pub struct AdapterRegistry<C: ProtocolConformance + ?Sized = ConformanceTable> {
    state: RwLock<RegistryState>,
    conformance: Arc<C>,
    /// Adapter types and the protocols their rules promise.
    produced: ConformanceTable,
    config: RegistryConfig,
}

impl AdapterRegistry<ConformanceTable> {
    /// Create a registry with its own empty conformance table.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a registry with its own conformance table and `config`.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self::with_conformance_and_config(Arc::new(ConformanceTable::new()), config)
    }

    /// Declare that `provider` satisfies `protocol` (virtual membership).
    pub fn register_provides(&self, provider: Protocol, protocol: Protocol) {
        self.conformance.register_provides(provider, protocol);
    }
}

impl Default for AdapterRegistry<ConformanceTable> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ProtocolConformance + ?Sized> AdapterRegistry<C> {
    /// Create a registry that asks `conformance` about protocol membership.
    pub fn with_conformance(conformance: Arc<C>) -> Self {
        Self::with_conformance_and_config(conformance, RegistryConfig::default())
    }

    /// Create a registry with an external oracle and `config`.
    pub fn with_conformance_and_config(conformance: Arc<C>, config: RegistryConfig) -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            conformance,
            produced: ConformanceTable::new(),
            config,
        }
    }

    /// The conformance oracle in use.
    pub fn conformance(&self) -> &Arc<C> {
        &self.conformance
    }

    /// Settings the registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// The oracle plus what the registry knows about its own adapters.
    fn conformance_view(&self) -> LayeredConformance<'_, C> {
        LayeredConformance::new(&*self.conformance, &self.produced)
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Register an adapter rule.
    ///
    /// Clears the resolution cache, since the new rule may open paths that
    /// were previously cached as missing.
    pub fn register_type_adapters(&self, rule: AdapterRule) {
        if let Some(adapter_type) = rule.adapter_type() {
            self.produced.register_provides(adapter_type, rule.to_protocol());
        }

        let mut state = self.state.write();
        log::debug!("registering adapter rule {}", rule);
        state.rules.register(rule);
        if !state.cache.is_empty() {
            log::debug!("dropping {} cached resolutions", state.cache.len());
            state.cache.clear();
        }
    }

    /// Register `factory` as the adapter from `from_protocol` to `to_protocol`.
    pub fn register_factory(
        &self,
        factory: impl AdapterFactory + 'static,
        from_protocol: Protocol,
        to_protocol: Protocol,
    ) {
        self.register_type_adapters(AdapterRule::new(from_protocol, to_protocol, factory));
    }

    // -----------------------------------------------------------------------
    // Adaptation
    // -----------------------------------------------------------------------

    /// Adapt `object` to `protocol`.
    ///
    /// Returns the object itself when it already conforms, a new adapter
    /// when a chain of rules exists, and `Ok(None)` when neither holds.
    /// An error from any factory along the chain is returned as is.
    pub fn adapt(&self, object: &Object, protocol: Protocol) -> anyhow::Result<Option<Object>> {
        let adaptee_type = object.runtime_type();

        if self.conformance_view().conforms(adaptee_type, protocol) {
            return Ok(Some(object.clone()));
        }

        match self.resolve(adaptee_type, protocol) {
            Some(path) => self.materialize(object, &path).map(Some),
            None => {
                log::debug!("no adapter from {} to {}", adaptee_type, protocol);
                Ok(None)
            }
        }
    }

    /// Adapt `object` to `protocol`, falling back to `default`.
    pub fn adapt_or(
        &self,
        object: &Object,
        protocol: Protocol,
        default: Object,
    ) -> anyhow::Result<Object> {
        Ok(self.adapt(object, protocol)?.unwrap_or(default))
    }

    /// Whether [`adapt`](Self::adapt) can produce a `protocol` for `object`.
    ///
    /// No factory is invoked.
    pub fn supports_protocol(&self, object: &Object, protocol: Protocol) -> bool {
        let adaptee_type = object.runtime_type();
        self.conformance_view().conforms(adaptee_type, protocol)
            || self.resolve(adaptee_type, protocol).is_some()
    }

    /// Find the chain from `adaptee_type` to `target`, using the cache when
    /// enabled.
    pub fn resolve(&self, adaptee_type: Protocol, target: Protocol) -> Option<AdapterPath> {
        if !self.config.cache_resolutions {
            let state = self.state.read();
            return self.resolve_uncached(&state.rules, adaptee_type, target);
        }

        let generation = self.conformance_view().generation();

        {
            let state = self.state.read();
            if state.cache.generation() == generation {
                if let Some(hit) = state.cache.get(adaptee_type, target) {
                    log::trace!("cache hit for {} -> {}", adaptee_type, target);
                    return hit.clone().into_path();
                }
            }
        }

        let mut guard = self.state.write();
        let state = &mut *guard;

        if state.cache.sync_generation(generation) {
            log::debug!("conformance changed; dropped cached resolutions");
        }
        // Another writer may have filled the entry while we waited.
        if let Some(hit) = state.cache.get(adaptee_type, target) {
            return hit.clone().into_path();
        }

        let resolution = self.resolve_uncached(&state.rules, adaptee_type, target);
        state
            .cache
            .insert(adaptee_type, target, CachedResolution::from(resolution.clone()));
        resolution
    }

    fn resolve_uncached(
        &self,
        rules: &RuleStore,
        adaptee_type: Protocol,
        target: Protocol,
    ) -> Option<AdapterPath> {
        let view = self.conformance_view();
        let path = ChainResolver::new(rules, &view)
            .with_max_chain_length(self.config.max_chain_length)
            .resolve(adaptee_type, target);

        if let Some(path) = &path {
            if !path.is_empty() {
                log::debug!(
                    "resolved {} -> {} via [{}]",
                    adaptee_type,
                    target,
                    path.iter()
                        .map(|rule| rule.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
        }
        path
    }

    /// Invoke each factory along `path`, feeding it the previous result.
    ///
    /// Each result is linked to the adaptee it was built from when the
    /// factory did not do so itself, and its type is recorded as providing
    /// the rule's target protocol.
    fn materialize(&self, object: &Object, path: &[AdapterRule]) -> anyhow::Result<Object> {
        path.iter().try_fold(object.clone(), |adaptee, rule| {
            log::trace!("applying {}", rule);
            let adapter = rule.apply(adaptee.clone())?.link_adaptee(&adaptee);
            self.produced
                .register_provides(adapter.runtime_type(), rule.to_protocol());
            Ok(adapter)
        })
    }

    // -----------------------------------------------------------------------
    // Maintenance and introspection
    // -----------------------------------------------------------------------

    /// Drop memoized resolutions. Rules are kept.
    pub fn clear_cache(&self) {
        self.state.write().cache.clear();
    }

    /// Drop every rule and every memoized resolution.
    pub fn reset(&self) {
        let mut state = self.state.write();
        state.rules.clear();
        state.cache.clear();
        self.produced.clear();
        log::debug!("adapter registry reset");
    }

    /// All registered rules in registration order.
    pub fn rules(&self) -> Vec<AdapterRule> {
        self.state.read().rules.rules().to_vec()
    }

    /// Rules whose source protocol is exactly `protocol`.
    pub fn rules_from(&self, protocol: Protocol) -> Vec<AdapterRule> {
        self.state.read().rules.rules_from(protocol).to_vec()
    }

    /// Number of registered rules.
    pub fn rule_count(&self) -> usize {
        self.state.read().rules.len()
    }

    /// Number of memoized `(type, protocol)` answers, positive or negative.
    pub fn cached_resolutions(&self) -> usize {
        self.state.read().cache.len()
    }

    /// Summaries of all registered rules in registration order.
    pub fn describe(&self) -> Vec<RuleDescription> {
        self.state
            .read()
            .rules
            .rules()
            .iter()
            .map(|rule| RuleDescription {
                from: rule.from_protocol().short_name(),
                to: rule.to_protocol().short_name(),
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
