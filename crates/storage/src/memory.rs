//! In-memory semantic store
//!
//! Reference implementation of [`Store`] that keeps every element in process
//! memory. Collections behave against it exactly as against a remote store,
//! which makes it the test double for the whole workspace.
//!
//! # Design
//!
//! - Elements: `FxHashMap<Handle, Element>` behind one `parking_lot::RwLock`
//! - Adjacency: outgoing / incoming connector lists per element (`SmallVec`)
//! - Handles: monotonically increasing `AtomicU64`, starting at 1
//! - Search: backtracking match over the template's connector constraints
//!
//! Search results come back in hash-map order. With
//! [`MemoryStore::with_shuffled_results`] they are additionally permuted by
//! a seeded RNG, so code that accidentally relies on result order fails
//! deterministically.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use semset_core::{
    Binding, Construction, ConstructionItem, ElementType, Endpoint, Handle, SemError, SemResult,
    SlotValue, StoreConfig, Template,
};

use crate::store::{ResolveParams, Store};

type Adjacency = SmallVec<[Handle; 4]>;

/// A stored element.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Element {
    Node(ElementType),
    Link(ElementType, String),
    Connector {
        element_type: ElementType,
        source: Handle,
        target: Handle,
    },
}

impl Element {
    fn element_type(&self) -> ElementType {
        match self {
            Element::Node(t) | Element::Link(t, _) => *t,
            Element::Connector { element_type, .. } => *element_type,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    elements: FxHashMap<Handle, Element>,
    outgoing: FxHashMap<Handle, Adjacency>,
    incoming: FxHashMap<Handle, Adjacency>,
    identifiers: FxHashMap<String, Handle>,
}

impl Inner {
    fn type_of(&self, handle: Handle) -> Option<ElementType> {
        self.elements.get(&handle).map(Element::element_type)
    }

    fn insert(&mut self, handle: Handle, element: Element) {
        if let Element::Connector { source, target, .. } = &element {
            self.outgoing.entry(*source).or_default().push(handle);
            self.incoming.entry(*target).or_default().push(handle);
        }
        self.elements.insert(handle, element);
    }

    /// All elements that go away when `roots` are erased: the roots plus
    /// every connector incident to anything already in the set.
    fn erase_closure(&self, roots: impl IntoIterator<Item = Handle>) -> FxHashSet<Handle> {
        let mut doomed = FxHashSet::default();
        let mut stack: Vec<Handle> = roots.into_iter().collect();
        while let Some(handle) = stack.pop() {
            if !doomed.insert(handle) {
                continue;
            }
            for list in [self.outgoing.get(&handle), self.incoming.get(&handle)]
                .into_iter()
                .flatten()
            {
                stack.extend(list.iter().copied().filter(|c| !doomed.contains(c)));
            }
        }
        doomed
    }

    fn remove(&mut self, handle: Handle) {
        if let Some(Element::Connector { source, target, .. }) = self.elements.remove(&handle) {
            if let Some(list) = self.outgoing.get_mut(&source) {
                list.retain(|c| *c != handle);
            }
            if let Some(list) = self.incoming.get_mut(&target) {
                list.retain(|c| *c != handle);
            }
        }
        self.outgoing.remove(&handle);
        self.incoming.remove(&handle);
    }
}

/// In-process implementation of [`Store`].
///
/// # Thread Safety
///
/// All operations take the internal lock for the duration of one call, so
/// each call is atomic. Nothing serializes sequences of calls: two callers
/// mutating the same collection can interleave, exactly as against a
/// remote store.
pub struct MemoryStore {
    inner: RwLock<Inner>,
    next_handle: AtomicU64,
    shuffle: Option<Mutex<StdRng>>,
}

impl MemoryStore {
    /// Create an empty store returning results in natural order.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            next_handle: AtomicU64::new(1),
            shuffle: None,
        }
    }

    /// Create an empty store that permutes every search result list.
    pub fn with_shuffled_results(seed: u64) -> Self {
        Self {
            shuffle: Some(Mutex::new(StdRng::seed_from_u64(seed))),
            ..Self::new()
        }
    }

    /// Create a store from configuration.
    pub fn from_config(config: &StoreConfig) -> Self {
        if config.shuffle_results {
            Self::with_shuffled_results(config.seed)
        } else {
            Self::new()
        }
    }

    /// Convenience: wrap in an `Arc` for sharing.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Number of live elements.
    pub fn element_count(&self) -> usize {
        self.inner.read().elements.len()
    }

    /// Whether `handle` names a live element.
    pub fn contains(&self, handle: Handle) -> bool {
        self.inner.read().elements.contains_key(&handle)
    }

    /// Source and target of a live connector.
    pub fn connector_ends(&self, handle: Handle) -> Option<(Handle, Handle)> {
        match self.inner.read().elements.get(&handle) {
            Some(Element::Connector { source, target, .. }) => Some((*source, *target)),
            _ => None,
        }
    }

    /// Content of a live link.
    pub fn link_content(&self, handle: Handle) -> Option<String> {
        match self.inner.read().elements.get(&handle) {
            Some(Element::Link(_, content)) => Some(content.clone()),
            _ => None,
        }
    }

    fn allocate(&self) -> Handle {
        Handle::new(self.next_handle.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_elements(&self, construction: &Construction) -> SemResult<Vec<Handle>> {
        let aliases = construction.validate()?;
        let mut inner = self.inner.write();

        // Validate everything before the first insert so the batch is atomic.
        for (item, _) in construction.items() {
            match item {
                ConstructionItem::Node { element_type } => {
                    if !element_type.is_node() || element_type.is_link() {
                        return Err(SemError::wrong_type("node type", element_type.to_string()));
                    }
                }
                ConstructionItem::Link { element_type, .. } => {
                    if !element_type.is_link() {
                        return Err(SemError::wrong_type("link type", element_type.to_string()));
                    }
                }
                ConstructionItem::Connector {
                    element_type,
                    source,
                    target,
                } => {
                    if !element_type.is_connector() || !element_type.is_concrete() {
                        return Err(SemError::wrong_type(
                            "connector type",
                            element_type.to_string(),
                        ));
                    }
                    for endpoint in [source, target] {
                        if let Endpoint::Handle(h) = endpoint {
                            if !inner.elements.contains_key(h) {
                                return Err(SemError::not_found(format!(
                                    "connector endpoint {}",
                                    h
                                )));
                            }
                        }
                    }
                }
            }
        }

        let mut created = Vec::with_capacity(construction.len());
        for (item, _) in construction.items() {
            let handle = self.allocate();
            let element = match item {
                ConstructionItem::Node { element_type } => Element::Node(*element_type),
                ConstructionItem::Link {
                    element_type,
                    content,
                } => Element::Link(*element_type, content.clone()),
                ConstructionItem::Connector {
                    element_type,
                    source,
                    target,
                } => {
                    let resolve = |endpoint: &Endpoint| match endpoint {
                        Endpoint::Handle(h) => *h,
                        // validate() guarantees the alias names an earlier item
                        Endpoint::Alias(name) => created[aliases[name.as_str()]],
                    };
                    Element::Connector {
                        element_type: *element_type,
                        source: resolve(source),
                        target: resolve(target),
                    }
                }
            };
            inner.insert(handle, element);
            created.push(handle);
        }

        tracing::trace!(target: "semset::store", count = created.len(), "Created elements");
        Ok(created)
    }

    async fn search_by_template(&self, template: &Template) -> SemResult<Vec<Binding>> {
        let aliases = template.validate()?;
        let rows = {
            let inner = self.inner.read();
            Matcher::new(&inner, template, &aliases).run()
        };

        let aliases = Arc::new(aliases);
        let mut bindings: Vec<Binding> = rows
            .into_iter()
            .map(|values| Binding::new(values, Arc::clone(&aliases)))
            .collect();
        if let Some(rng) = &self.shuffle {
            bindings.shuffle(&mut *rng.lock());
        }

        tracing::trace!(
            target: "semset::store",
            patterns = template.patterns().len(),
            results = bindings.len(),
            "Template search"
        );
        Ok(bindings)
    }

    async fn erase_elements(&self, handles: &[Handle]) -> SemResult<bool> {
        let mut inner = self.inner.write();
        let all_known = handles.iter().all(|h| inner.elements.contains_key(h));
        let roots: Vec<Handle> = handles
            .iter()
            .copied()
            .filter(|h| inner.elements.contains_key(h))
            .collect();

        let doomed = inner.erase_closure(roots);
        for handle in &doomed {
            inner.remove(*handle);
        }
        inner.identifiers.retain(|_, h| !doomed.contains(h));

        tracing::trace!(target: "semset::store", erased = doomed.len(), "Erased elements");
        Ok(all_known)
    }

    async fn element_types(&self, handles: &[Handle]) -> SemResult<Vec<ElementType>> {
        let inner = self.inner.read();
        Ok(handles
            .iter()
            .map(|h| inner.type_of(*h).unwrap_or(ElementType::UNKNOWN))
            .collect())
    }

    async fn resolve_keynodes(&self, params: &[ResolveParams]) -> SemResult<Vec<Handle>> {
        let mut inner = self.inner.write();
        let mut resolved = Vec::with_capacity(params.len());
        for p in params {
            if let Some(handle) = inner.identifiers.get(&p.idtf) {
                resolved.push(*handle);
                continue;
            }
            match p.element_type {
                Some(element_type) => {
                    if !element_type.is_node() || element_type.is_link() {
                        return Err(SemError::wrong_type(
                            "keynode node type",
                            element_type.to_string(),
                        ));
                    }
                    let handle = self.allocate();
                    inner.insert(handle, Element::Node(element_type));
                    inner.identifiers.insert(p.idtf.clone(), handle);
                    resolved.push(handle);
                }
                None => resolved.push(Handle::INVALID),
            }
        }
        Ok(resolved)
    }
}

// =============================================================================
// Template matching
// =============================================================================

/// Backtracking matcher for one template search.
///
/// Every slot position maps to a canonical position (a reference maps to
/// the slot it names). Fixed slots start out assigned; each connector
/// constraint `[source, connector, target]` is then satisfied in template
/// order by enumerating candidate connectors.
struct Matcher<'a> {
    inner: &'a Inner,
    canonical: Vec<usize>,
    wildcard: Vec<Option<ElementType>>,
    edges: Vec<[usize; 3]>,
    assignment: Vec<Option<Handle>>,
    rows: Vec<Vec<Handle>>,
}

impl<'a> Matcher<'a> {
    fn new(inner: &'a Inner, template: &Template, aliases: &HashMap<String, usize>) -> Self {
        let width = template.width();
        let mut canonical = Vec::with_capacity(width);
        let mut wildcard = vec![None; width];
        let mut assignment = vec![None; width];

        for (position, slot) in template.slots().enumerate() {
            match slot.value() {
                SlotValue::Fixed(handle) => {
                    canonical.push(position);
                    assignment[position] = Some(*handle);
                }
                SlotValue::Var(element_type) => {
                    canonical.push(position);
                    wildcard[position] = Some(*element_type);
                }
                SlotValue::Ref(name) => {
                    // validate() guarantees the alias precedes this slot
                    let target = aliases[name.as_str()];
                    canonical.push(canonical[target]);
                }
            }
        }

        let mut edges = Vec::new();
        let mut offset = 0;
        for pattern in template.patterns() {
            for [s, c, t] in pattern.edges() {
                edges.push([
                    canonical[offset + s],
                    canonical[offset + c],
                    canonical[offset + t],
                ]);
            }
            offset += pattern.width();
        }

        Self {
            inner,
            canonical,
            wildcard,
            edges,
            assignment,
            rows: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Vec<Handle>> {
        self.solve(0);
        self.rows
    }

    fn solve(&mut self, depth: usize) {
        if depth == self.edges.len() {
            let row = self
                .canonical
                .iter()
                .map(|&p| self.assignment[p].unwrap_or(Handle::INVALID))
                .collect();
            self.rows.push(row);
            return;
        }

        let [s, c, t] = self.edges[depth];
        for connector in self.candidates(s, c, t) {
            let Some(Element::Connector { source, target, .. }) =
                self.inner.elements.get(&connector)
            else {
                continue;
            };
            let (source, target) = (*source, *target);

            let mut bound = SmallVec::<[usize; 3]>::new();
            if self.bind(c, connector, &mut bound)
                && self.bind(s, source, &mut bound)
                && self.bind(t, target, &mut bound)
            {
                self.solve(depth + 1);
            }
            for position in bound {
                self.assignment[position] = None;
            }
        }
    }

    /// Connectors worth trying for one constraint, narrowest source first.
    fn candidates(&self, s: usize, c: usize, t: usize) -> Vec<Handle> {
        if let Some(connector) = self.assignment[c] {
            return vec![connector];
        }
        if let Some(source) = self.assignment[s] {
            return self
                .inner
                .outgoing
                .get(&source)
                .map(|l| l.to_vec())
                .unwrap_or_default();
        }
        if let Some(target) = self.assignment[t] {
            return self
                .inner
                .incoming
                .get(&target)
                .map(|l| l.to_vec())
                .unwrap_or_default();
        }
        self.inner
            .elements
            .iter()
            .filter(|(_, e)| matches!(e, Element::Connector { .. }))
            .map(|(h, _)| *h)
            .collect()
    }

    /// Bind `position` to `handle` if consistent; record new assignments.
    fn bind(&mut self, position: usize, handle: Handle, bound: &mut SmallVec<[usize; 3]>) -> bool {
        if let Some(existing) = self.assignment[position] {
            return existing == handle;
        }
        let Some(actual) = self.inner.type_of(handle) else {
            return false;
        };
        if let Some(wanted) = self.wildcard[position] {
            if !wanted.matches(actual) {
                return false;
            }
        }
        self.assignment[position] = Some(handle);
        bound.push(position);
        true
    }
}
