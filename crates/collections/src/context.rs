//! Collaborators shared by every collection.

use std::sync::Arc;

use semset_core::Config;
use semset_storage::{KeynodeRegistry, SharedStore, Store};

/// Store and keynode registry a collection talks to.
///
/// Cloning is cheap (two `Arc` clones). Collections built from clones of
/// one context share the registry cache.
#[derive(Clone)]
pub struct SetContext {
    store: SharedStore,
    keynodes: Arc<KeynodeRegistry>,
}

impl SetContext {
    pub fn new(store: SharedStore, keynodes: Arc<KeynodeRegistry>) -> Self {
        Self { store, keynodes }
    }

    /// Context with a fresh registry using the default identifiers.
    pub fn from_store(store: SharedStore) -> Self {
        let keynodes = Arc::new(KeynodeRegistry::new(Arc::clone(&store)));
        Self { store, keynodes }
    }

    /// Context with a fresh registry configured from `config`.
    pub fn from_config(store: SharedStore, config: &Config) -> Self {
        let keynodes = Arc::new(KeynodeRegistry::with_config(
            Arc::clone(&store),
            config.keynodes.clone(),
        ));
        Self { store, keynodes }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    pub fn keynodes(&self) -> &KeynodeRegistry {
        &self.keynodes
    }
}

impl std::fmt::Debug for SetContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetContext")
            .field("keynodes", &self.keynodes)
            .finish_non_exhaustive()
    }
}
