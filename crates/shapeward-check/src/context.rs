//! Call-scoped dimension resolution
//!
//! A [`ResolveCtx`] maps a dimension name to the concrete size (or, for
//! named groups, axis count) it was observed to have earlier in the same
//! call. The per-call orchestrator owns one context per checked call and
//! passes it into every `matches_in` for that call; concurrent calls each
//! own their own context, so no synchronization is needed here.
//!
//! Entries are monotone: first observation wins, and a later disagreeing
//! observation is a match failure, never an overwrite.

use std::collections::HashMap;

/// Per-call map from dimension name to observed size
#[derive(Debug, Clone, Default)]
pub struct ResolveCtx {
    sizes: HashMap<Box<str>, u64>,
}

impl ResolveCtx {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size this name resolved to earlier in the call, if any
    pub fn get(&self, name: &str) -> Option<u64> {
        self.sizes.get(name).copied()
    }

    /// Record an observation. Returns `false` when the name was already
    /// pinned to a different value.
    pub fn record(&mut self, name: &str, size: u64) -> bool {
        match self.sizes.get(name) {
            Some(&existing) => existing == size,
            None => {
                self.sizes.insert(name.into(), size);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}
