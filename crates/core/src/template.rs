//! Search templates and their bindings.
//!
//! A [`Template`] is an ordered list of [`Pattern`]s. A triple
//! `(src, connector, trg)` asks for a connector from `src` to `trg`; a
//! quintuple `(src, connector, trg, relation_connector, relation)` further
//! asks that `relation` reaches `connector` through `relation_connector`,
//! i.e. that the connector is tagged with the relation.
//!
//! Every slot is one of a fixed handle, a typed wildcard, or a reference to
//! an aliased slot defined earlier in the template. A search returns
//! [`Binding`]s: one handle per slot, 3 per triple and 5 per quintuple,
//! in pattern order.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{SemError, SemResult};
use crate::types::{ElementType, Handle};

// =============================================================================
// Slots
// =============================================================================

/// What a template slot matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotValue {
    /// Exactly this element.
    Fixed(Handle),
    /// Any element whose type satisfies the wildcard type.
    Var(ElementType),
    /// Whatever the aliased slot bound.
    Ref(String),
}

/// One position of a pattern, optionally named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    value: SlotValue,
    alias: Option<String>,
}

impl Slot {
    /// Slot matching exactly `handle`.
    pub fn fixed(handle: Handle) -> Self {
        Self {
            value: SlotValue::Fixed(handle),
            alias: None,
        }
    }

    /// Wildcard slot.
    pub fn var(element_type: ElementType) -> Self {
        Self {
            value: SlotValue::Var(element_type),
            alias: None,
        }
    }

    /// Slot bound to the same element as the slot named `alias`.
    pub fn reference(alias: impl Into<String>) -> Self {
        Self {
            value: SlotValue::Ref(alias.into()),
            alias: None,
        }
    }

    /// Give this slot a name that later slots and bindings can refer to.
    pub fn named(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn value(&self) -> &SlotValue {
        &self.value
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

impl From<Handle> for Slot {
    fn from(handle: Handle) -> Self {
        Slot::fixed(handle)
    }
}

impl From<ElementType> for Slot {
    fn from(element_type: ElementType) -> Self {
        Slot::var(element_type)
    }
}

impl From<&str> for Slot {
    fn from(alias: &str) -> Self {
        Slot::reference(alias)
    }
}

impl Handle {
    /// Fixed slot carrying a name.
    pub fn named(self, alias: impl Into<String>) -> Slot {
        Slot::fixed(self).named(alias)
    }
}

impl ElementType {
    /// Wildcard slot carrying a name.
    pub fn named(self, alias: impl Into<String>) -> Slot {
        Slot::var(self).named(alias)
    }
}

// =============================================================================
// Patterns
// =============================================================================

/// A 3- or 5-element pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// `(src, connector, trg)`.
    Triple([Slot; 3]),
    /// `(src, connector, trg, relation_connector, relation)`.
    Quintuple([Slot; 5]),
}

/// Edges of a triple, as `[source, connector, target]` slot offsets.
const TRIPLE_EDGES: &[[usize; 3]] = &[[0, 1, 2]];
/// Edges of a quintuple: the main connector, then the relation connector
/// from the relation node to the main connector.
const QUINTUPLE_EDGES: &[[usize; 3]] = &[[0, 1, 2], [4, 3, 1]];

impl Pattern {
    /// Number of slots (3 or 5).
    pub fn width(&self) -> usize {
        self.slots().len()
    }

    pub fn slots(&self) -> &[Slot] {
        match self {
            Pattern::Triple(slots) => slots,
            Pattern::Quintuple(slots) => slots,
        }
    }

    /// The connector constraints this pattern expresses, as slot offsets
    /// relative to the start of the pattern.
    pub fn edges(&self) -> &'static [[usize; 3]] {
        match self {
            Pattern::Triple(_) => TRIPLE_EDGES,
            Pattern::Quintuple(_) => QUINTUPLE_EDGES,
        }
    }
}

// =============================================================================
// Template
// =============================================================================

/// Ordered list of patterns submitted to a store search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    patterns: Vec<Pattern>,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a triple pattern.
    pub fn triple(
        &mut self,
        src: impl Into<Slot>,
        connector: impl Into<Slot>,
        trg: impl Into<Slot>,
    ) -> &mut Self {
        self.patterns
            .push(Pattern::Triple([src.into(), connector.into(), trg.into()]));
        self
    }

    /// Append a quintuple pattern.
    pub fn quintuple(
        &mut self,
        src: impl Into<Slot>,
        connector: impl Into<Slot>,
        trg: impl Into<Slot>,
        relation_connector: impl Into<Slot>,
        relation: impl Into<Slot>,
    ) -> &mut Self {
        self.patterns.push(Pattern::Quintuple([
            src.into(),
            connector.into(),
            trg.into(),
            relation_connector.into(),
            relation.into(),
        ]));
        self
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Total number of slots, i.e. the width of every binding.
    pub fn width(&self) -> usize {
        self.patterns.iter().map(Pattern::width).sum()
    }

    /// Iterate over all slots in binding order.
    pub fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.patterns.iter().flat_map(|p| p.slots().iter())
    }

    /// Check alias usage and return alias → binding position.
    ///
    /// Aliases must be unique and a reference must name a slot that appears
    /// earlier in the template.
    pub fn validate(&self) -> SemResult<HashMap<String, usize>> {
        if self.patterns.is_empty() {
            return Err(SemError::invalid_input("Template must not be empty"));
        }
        let mut aliases = HashMap::new();
        for (position, slot) in self.slots().enumerate() {
            if let SlotValue::Ref(name) = slot.value() {
                if !aliases.contains_key(name) {
                    return Err(SemError::invalid_input(format!(
                        "Template references alias '{}' before it is defined",
                        name
                    )));
                }
            }
            if let Some(name) = slot.alias() {
                if aliases.insert(name.to_string(), position).is_some() {
                    return Err(SemError::invalid_input(format!(
                        "Template alias '{}' is defined twice",
                        name
                    )));
                }
            }
        }
        Ok(aliases)
    }
}

// =============================================================================
// Binding
// =============================================================================

/// One search result: a handle for every slot of the template.
#[derive(Debug, Clone)]
pub struct Binding {
    values: Vec<Handle>,
    aliases: Arc<HashMap<String, usize>>,
}

impl Binding {
    /// Build a binding. `aliases` maps alias names to positions in `values`.
    pub fn new(values: Vec<Handle>, aliases: Arc<HashMap<String, usize>>) -> Self {
        Self { values, aliases }
    }

    /// Handle bound at `position`, if the position exists.
    pub fn get(&self, position: usize) -> Option<Handle> {
        self.values.get(position).copied()
    }

    /// Handle bound to the slot named `name`.
    pub fn alias(&self, name: &str) -> SemResult<Handle> {
        self.aliases
            .get(name)
            .and_then(|&position| self.get(position))
            .ok_or_else(|| SemError::invalid_input(format!("Unknown template alias '{}'", name)))
    }

    pub fn values(&self) -> &[Handle] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PartialEq for Binding {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for Binding {}
