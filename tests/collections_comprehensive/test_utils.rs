//! Shared fixtures.

use std::sync::Arc;

use semset::{ElementType, Handle, MemoryStore, SetContext, SharedStore, Store};

/// A store plus a context over it. The concrete store stays reachable for
/// inspection.
pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub ctx: SetContext,
}

impl Fixture {
    pub fn new() -> Self {
        Self::over(MemoryStore::new())
    }

    /// Fixture whose store permutes every search result.
    pub fn shuffled(seed: u64) -> Self {
        Self::over(MemoryStore::with_shuffled_results(seed))
    }

    fn over(store: MemoryStore) -> Self {
        init_tracing();
        let store = Arc::new(store);
        let shared: SharedStore = store.clone();
        Self {
            store,
            ctx: SetContext::from_store(shared),
        }
    }

    /// `n` fresh constant nodes.
    pub async fn nodes(&self, n: usize) -> Vec<Handle> {
        let mut construction = semset::Construction::new();
        for _ in 0..n {
            construction.generate_node(ElementType::CONST_NODE);
        }
        self.store.create_elements(&construction).await.unwrap()
    }

    pub async fn node_of(&self, element_type: ElementType) -> Handle {
        let mut construction = semset::Construction::new();
        construction.generate_node(element_type);
        self.store.create_elements(&construction).await.unwrap()[0]
    }
}

/// Route `tracing` output to the test harness. Honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Run an async body on a fresh runtime, for use inside `proptest!`.
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}
