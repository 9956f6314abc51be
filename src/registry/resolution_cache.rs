//! Memo table for resolved adapter chains.

use std::collections::HashMap;

use crate::protocols::Protocol;
use crate::resolver::AdapterPath;

/// A cached answer for one `(adaptee type, target protocol)` pair.
#[derive(Debug, Clone)]
pub enum CachedResolution {
    /// The chain to materialize.
    Path(AdapterPath),
    /// The resolver found nothing.
    NoPath,
}

impl From<Option<AdapterPath>> for CachedResolution {
    fn from(resolution: Option<AdapterPath>) -> Self {
        match resolution {
            Some(path) => CachedResolution::Path(path),
            None => CachedResolution::NoPath,
        }
    }
}

impl CachedResolution {
    /// The path, or `None` for a cached miss.
    pub fn into_path(self) -> Option<AdapterPath> {
        match self {
            CachedResolution::Path(path) => Some(path),
            CachedResolution::NoPath => None,
        }
    }
}

/// Cache keyed by `(adaptee runtime type, target protocol)`.
///
/// Not synchronized on its own; the registry guards it together with the
/// rule store.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: HashMap<(Protocol, Protocol), CachedResolution>,
    /// Conformance generation the entries were computed against.
    generation: u64,
}

impl ResolutionCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Conformance generation the entries belong to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cached answer for the pair, if any.
    pub fn get(&self, adaptee_type: Protocol, target: Protocol) -> Option<&CachedResolution> {
        self.entries.get(&(adaptee_type, target))
    }

    /// Store the answer for the pair.
    pub fn insert(&mut self, adaptee_type: Protocol, target: Protocol, resolution: CachedResolution) {
        self.entries.insert((adaptee_type, target), resolution);
    }

    /// Drop everything if the conformance oracle moved since the entries
    /// were computed. Returns true when entries were dropped.
    pub fn sync_generation(&mut self, generation: u64) -> bool {
        if self.generation == generation {
            return false;
        }
        self.generation = generation;
        let dropped = !self.entries.is_empty();
        self.entries.clear();
        dropped
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
