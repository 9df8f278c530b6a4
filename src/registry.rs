// src/registry.rs

//! Provider registry.
//!
//! A [`Registry`] records which capability each provider produces and which
//! capabilities it needs, and works out a safe construction order from that.
//! Each need becomes an edge `need -> produces` in a [`Dag`], so a
//! topological order lists every provider after everything it needs.
//!
//! The registry is a plain value owned by the caller. It takes `&mut self`
//! to register providers; callers that share one across threads wrap it in a
//! lock of their own. Calling providers is left to the caller.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use thiserror::Error;
use tracing::{debug, warn};

use crate::dag::{CyclicGraphError, Dag};
use crate::set::Set;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The needs form a cycle, so no provider on it can ever be built.
    #[error("unsatisfiable dependencies: {0}")]
    Unsatisfiable(#[from] CyclicGraphError),

    #[error("no provider registered for '{0}'")]
    MissingProvider(String),
}

/// Registry key identifying a Rust type.
///
/// Equality and hashing use the [`TypeId`]; the type name is only kept for
/// display.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[derive(Debug, Clone)]
pub struct Registry<K: Eq + Hash> {
    deps: Dag<K>,
    providers: Set<K>,
}

impl<K: Eq + Hash + Clone> Registry<K> {
    pub fn new() -> Self {
        Self {
            deps: Dag::new(),
            providers: Set::new(),
        }
    }

    /// Register a provider of `produces` that needs each key in `needs`.
    ///
    /// Never fails; cycles are reported by [`Registry::construction_order`].
    /// Registering the same key again adds to its needs.
    pub fn provide(&mut self, produces: K, needs: impl IntoIterator<Item = K>) {
        self.deps.insert(produces.clone());
        let mut count = 0usize;
        for need in needs {
            self.deps.add_edge(need, produces.clone());
            count += 1;
        }
        self.providers.add(produces);

        debug!(
            providers = self.providers.len(),
            needs = count,
            "provider registered"
        );
    }

    pub fn is_provided(&self, key: &K) -> bool {
        self.providers.has(key)
    }

    /// Keys that have a registered provider, in no particular order.
    pub fn providers(&self) -> impl Iterator<Item = &K> {
        self.providers.iter()
    }

    /// Keys that `key`'s provider needs.
    pub fn needs_of(&self, key: &K) -> Vec<&K> {
        self.deps
            .edges()
            .filter(|&(_, to)| to == key)
            .map(|(from, _)| from)
            .collect()
    }

    /// Needed keys that nobody provides.
    pub fn missing(&self) -> Vec<&K> {
        self.deps
            .iter()
            .filter(|key| !self.providers.has(key))
            .collect()
    }

    /// The dependency graph, with edges running from each need to the key
    /// that needs it.
    pub fn graph(&self) -> &Dag<K> {
        &self.deps
    }

    /// Every key, ordered so each one comes after everything it needs.
    ///
    /// Needed keys without a provider are included. Use
    /// [`Registry::resolve`] to reject those.
    pub fn construction_order(&self) -> Result<Vec<K>, RegistryError> {
        self.deps.topological().map_err(|err| {
            warn!(
                cycles = self.deps.cycles().len(),
                "provider dependencies are cyclic"
            );
            RegistryError::Unsatisfiable(err)
        })
    }
}

impl<K: Eq + Hash + Clone + fmt::Display> Registry<K> {
    /// Like [`Registry::construction_order`], but first fails if any needed
    /// key has no provider.
    pub fn resolve(&self) -> Result<Vec<K>, RegistryError> {
        if let Some(key) = self.missing().first() {
            return Err(RegistryError::MissingProvider(key.to_string()));
        }
        self.construction_order()
    }
}

impl<K: Eq + Hash + Clone> Default for Registry<K> {
    fn default() -> Self {
        Self::new()
    }
}
