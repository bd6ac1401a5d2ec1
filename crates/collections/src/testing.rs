//! Store wrapper counting round trips, for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use semset_core::{Binding, Construction, ElementType, Handle, SemResult, Template};
use semset_storage::{MemoryStore, ResolveParams, SharedStore, Store};

use crate::context::SetContext;

/// Counts every call made through the [`Store`] seam.
pub(crate) struct CountingStore {
    inner: MemoryStore,
    truncate: bool,
    searches: AtomicUsize,
    creates: AtomicUsize,
    erases: AtomicUsize,
}

impl CountingStore {
    pub(crate) fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            truncate: false,
            searches: AtomicUsize::new(0),
            creates: AtomicUsize::new(0),
            erases: AtomicUsize::new(0),
        }
    }

    /// A store whose constructions succeed but report no handles.
    pub(crate) fn truncating() -> Self {
        Self {
            truncate: true,
            ..Self::new()
        }
    }

    /// The wrapped store, bypassing the counters.
    pub(crate) fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    pub(crate) fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub(crate) fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub(crate) fn erases(&self) -> usize {
        self.erases.load(Ordering::SeqCst)
    }

    /// Searches, creates and erases so far.
    pub(crate) fn traffic(&self) -> (usize, usize, usize) {
        (self.searches(), self.creates(), self.erases())
    }
}

#[async_trait]
impl Store for CountingStore {
    async fn create_elements(&self, c: &Construction) -> SemResult<Vec<Handle>> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        let created = self.inner.create_elements(c).await?;
        Ok(if self.truncate { Vec::new() } else { created })
    }
    async fn search_by_template(&self, t: &Template) -> SemResult<Vec<Binding>> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        self.inner.search_by_template(t).await
    }
    async fn erase_elements(&self, h: &[Handle]) -> SemResult<bool> {
        self.erases.fetch_add(1, Ordering::SeqCst);
        self.inner.erase_elements(h).await
    }
    async fn element_types(&self, h: &[Handle]) -> SemResult<Vec<ElementType>> {
        self.inner.element_types(h).await
    }
    async fn resolve_keynodes(&self, p: &[ResolveParams]) -> SemResult<Vec<Handle>> {
        self.inner.resolve_keynodes(p).await
    }
}

/// A counting store and a context over it.
pub(crate) fn counting_context() -> (Arc<CountingStore>, SetContext) {
    let store = Arc::new(CountingStore::new());
    let shared: SharedStore = store.clone();
    (store, SetContext::from_store(shared))
}
