//! Keynode registry
//!
//! Resolves well-known system identifiers (`rrel_1`, `rrel_last`,
//! `nrel_basic_sequence`, ...) to handles and caches valid results for the
//! registry's lifetime. The registry is an explicit collaborator: share one
//! `Arc<KeynodeRegistry>` per store instead of reaching for global state.

use std::sync::Arc;

use dashmap::DashMap;
use rustc_hash::FxHashMap;

use semset_core::{ElementType, Handle, KeynodeConfig, SemError, SemResult};

use crate::store::{ResolveParams, SharedStore};

/// Process-scoped cache of keynode handles.
pub struct KeynodeRegistry {
    store: SharedStore,
    config: KeynodeConfig,
    cache: DashMap<String, Handle>,
}

impl KeynodeRegistry {
    /// Registry with the default identifiers and role range [1, 10].
    pub fn new(store: SharedStore) -> Self {
        Self::with_config(store, KeynodeConfig::default())
    }

    pub fn with_config(store: SharedStore, config: KeynodeConfig) -> Self {
        Self {
            store,
            config,
            cache: DashMap::new(),
        }
    }

    /// Convenience: wrap in an `Arc` for sharing.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn config(&self) -> &KeynodeConfig {
        &self.config
    }

    /// The store this registry resolves against.
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// Cached handle for `idtf`, without touching the store.
    pub fn cached(&self, idtf: &str) -> Option<Handle> {
        self.cache.get(idtf).map(|entry| *entry)
    }

    /// Number of cached identifiers.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Resolve `idtf`, creating a keynode of `element_type` when it is given
    /// and the identifier is unknown. May return [`Handle::INVALID`].
    pub async fn resolve(
        &self,
        idtf: &str,
        element_type: Option<ElementType>,
    ) -> SemResult<Handle> {
        if let Some(handle) = self.cached(idtf) {
            return Ok(handle);
        }

        let params = ResolveParams {
            idtf: idtf.to_string(),
            element_type,
        };
        let handle = self
            .store
            .resolve_keynodes(std::slice::from_ref(&params))
            .await?
            .first()
            .copied()
            .unwrap_or(Handle::INVALID);

        if handle.is_valid() {
            self.cache.insert(idtf.to_string(), handle);
        }
        tracing::debug!(
            target: "semset::keynodes",
            idtf = %idtf,
            element_type = ?element_type,
            handle = ?handle,
            "Resolved identifier"
        );
        Ok(handle)
    }

    /// Look up `idtf` without creating it. May return [`Handle::INVALID`].
    pub async fn get(&self, idtf: &str) -> SemResult<Handle> {
        self.resolve(idtf, None).await
    }

    /// Look up `idtf`; an unknown identifier is an error.
    pub async fn get_by_idtf(&self, idtf: &str) -> SemResult<Handle> {
        let handle = self.get(idtf).await?;
        if !handle.is_valid() {
            tracing::error!(
                target: "semset::keynodes",
                idtf = %idtf,
                "Failed to get handle by keynode: handle is invalid"
            );
            return Err(SemError::not_found(format!("keynode '{}'", idtf)));
        }
        Ok(handle)
    }

    /// Erase the keynode from the store and forget it.
    pub async fn erase(&self, idtf: &str) -> SemResult<bool> {
        let handle = self.get_by_idtf(idtf).await?;
        self.cache.remove(idtf);
        self.store.erase_elements(&[handle]).await
    }

    /// Positional role marker `rrel_<index>`, created on demand.
    pub async fn role_marker(&self, index: usize) -> SemResult<Handle> {
        if !self.config.role_range().contains(&index) {
            return Err(SemError::out_of_range(
                index,
                self.config.min_role_index,
                self.config.max_role_index,
            ));
        }
        let idtf = self.config.role_identifier(index);
        self.resolve(&idtf, Some(ElementType::CONST_NODE_ROLE)).await
    }

    /// Every positional role marker in range, keyed by handle.
    pub async fn role_ordinals(&self) -> SemResult<FxHashMap<Handle, usize>> {
        let mut ordinals = FxHashMap::default();
        for index in self.config.role_range() {
            ordinals.insert(self.role_marker(index).await?, index);
        }
        Ok(ordinals)
    }

    /// Head marker of oriented sets: the role marker of position 1.
    pub async fn head_marker(&self) -> SemResult<Handle> {
        let idtf = self.config.role_identifier(1);
        self.resolve(&idtf, Some(ElementType::CONST_NODE_ROLE)).await
    }

    /// Tail marker of oriented sets.
    pub async fn tail_marker(&self) -> SemResult<Handle> {
        self.resolve(&self.config.tail_marker, Some(ElementType::CONST_NODE_ROLE))
            .await
    }

    /// Relation tagging sequence arcs of oriented sets.
    pub async fn sequence_relation(&self) -> SemResult<Handle> {
        self.resolve(
            &self.config.sequence_relation,
            Some(ElementType::CONST_NODE_NON_ROLE),
        )
        .await
    }
}

impl std::fmt::Debug for KeynodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeynodeRegistry")
            .field("config", &self.config)
            .field("cached", &self.cache.len())
            .finish()
    }
}
