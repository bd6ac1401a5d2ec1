//! Collection ordered by a linked chain of membership arcs.
//!
//! ```text
//!            rrel_1                                   rrel_last
//!              |                                          |
//!   S ==(m1)==> a      S ==(m2)==> b      S ==(m3)==> c   |
//!        m1 ----------> m2 ----------> m3 <---------------+
//!           nrel_basic_sequence  nrel_basic_sequence
//! ```
//!
//! The head membership arc is tagged with `rrel_1`. Each following arc is
//! reached from its predecessor by a common arc tagged with
//! `nrel_basic_sequence`. The last arc is tagged with `rrel_last` so that
//! appending does not need to walk the chain.
//!
//! Appending tolerates a missing or stale tail marker by walking forward
//! from wherever it starts; a chain that branches, loops, or leaves the set
//! is reported as [`SemError::Corruption`].

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use rustc_hash::FxHashSet;

use semset_core::{Construction, ElementType, Handle, SemError, SemResult, Template};

use crate::collection::{Collection, CreateOptions};
use crate::context::SetContext;
use crate::relations::{self, alias};
use crate::set::BaseSet;

/// Ordered collection that may hold repeated elements.
#[derive(Clone)]
pub struct OrientedSet {
    base: BaseSet,
}

/// Iteration state: the arc last yielded and every arc seen so far.
struct Cursor {
    arc: Option<Handle>,
    seen: FxHashSet<Handle>,
}

impl OrientedSet {
    /// Wrap an existing backing node.
    pub fn new(ctx: SetContext, set_node: Handle) -> SemResult<Self> {
        Ok(Self {
            base: BaseSet::new(ctx, set_node)?,
        })
    }

    pub async fn create(ctx: &SetContext, elements: &[Handle]) -> SemResult<Self> {
        Self::create_with(ctx, CreateOptions::default(), elements).await
    }

    pub async fn create_with(
        ctx: &SetContext,
        options: CreateOptions,
        elements: &[Handle],
    ) -> SemResult<Self> {
        let set = Self {
            base: BaseSet::backing(ctx, options, ElementType::CONST_NODE).await?,
        };
        set.add(elements).await?;
        Ok(set)
    }

    pub fn set_node_type(&self) -> ElementType {
        self.base.set_node_type()
    }

    fn store(&self) -> &dyn semset_storage::Store {
        self.base.context().store()
    }

    /// Head of the chain: the `rrel_1` membership arc and its element.
    async fn head(&self) -> SemResult<Option<relations::RelationTarget>> {
        let head_marker = self.base.context().keynodes().head_marker().await?;
        relations::search_role_relation(self.store(), self.set_node(), head_marker).await
    }

    /// Membership arc tagged as head of a chain that starts with `element`.
    async fn generate_head_arc(&self, element: Handle) -> SemResult<Handle> {
        let head_marker = self.base.context().keynodes().head_marker().await?;
        relations::generate_role_relation(self.store(), self.set_node(), element, &[head_marker])
            .await
    }

    /// Membership arc to `element` chained after `previous`, written as one
    /// batch.
    async fn generate_next_arc(&self, previous: Handle, element: Handle) -> SemResult<Handle> {
        let sequence = self.base.context().keynodes().sequence_relation().await?;
        let mut construction = Construction::new();
        construction.generate_connector_as(
            ElementType::CONST_PERM_POS_ARC,
            self.set_node(),
            element,
            alias::MEMBERSHIP_ARC,
        );
        relations::push_binary_relation(
            &mut construction,
            ElementType::CONST_COMMON_ARC,
            previous,
            alias::MEMBERSHIP_ARC,
            &[sequence],
            alias::SEQUENCE_ARC,
        );
        self.store()
            .create_elements(&construction)
            .await?
            .first()
            .copied()
            .ok_or_else(|| SemError::store("construction returned no handles"))
    }

    async fn mark_tail(&self, arc: Handle) -> SemResult<()> {
        let tail_marker = self.base.context().keynodes().tail_marker().await?;
        relations::generate_connector(
            self.store(),
            ElementType::CONST_PERM_POS_ARC,
            tail_marker,
            arc,
        )
        .await?;
        Ok(())
    }

    /// Find the last arc of a non-empty chain and drop every tail marker.
    async fn take_tail_arc(&self) -> SemResult<Handle> {
        let tail_marker = self.base.context().keynodes().tail_marker().await?;
        let mut template = Template::new();
        template.quintuple(
            self.set_node(),
            ElementType::VAR_PERM_POS_ARC.named(alias::MEMBERSHIP_ARC),
            ElementType::UNKNOWN,
            ElementType::VAR_PERM_POS_ARC.named(alias::RELATION_ARC),
            tail_marker,
        );
        let marked = self.store().search_by_template(&template).await?;

        let (start, from_marker) = match marked.first() {
            Some(binding) => {
                if marked.len() > 1 {
                    tracing::warn!(
                        target: "semset::collections",
                        set_node = %self.set_node(),
                        markers = marked.len(),
                        "Oriented set carries several tail markers"
                    );
                }
                let marker_arcs = marked
                    .iter()
                    .map(|b| b.alias(alias::RELATION_ARC))
                    .collect::<SemResult<Vec<_>>>()?;
                relations::erase_arcs(self.store(), &marker_arcs).await?;
                (binding.alias(alias::MEMBERSHIP_ARC)?, true)
            }
            None => {
                tracing::debug!(
                    target: "semset::collections",
                    set_node = %self.set_node(),
                    "No tail marker, walking from head"
                );
                let head = self.head().await?.ok_or_else(|| {
                    SemError::corruption(format!(
                        "oriented set {} has members but no head arc",
                        self.set_node()
                    ))
                })?;
                (head.arc, false)
            }
        };
        let tail = self.walk_to_end(start).await?;
        if from_marker && tail != start {
            tracing::warn!(
                target: "semset::collections",
                set_node = %self.set_node(),
                marked = %start,
                tail = %tail,
                "Tail marker was stale"
            );
        }
        Ok(tail)
    }

    /// Follow sequence arcs from `start` until an arc with no successor.
    async fn walk_to_end(&self, start: Handle) -> SemResult<Handle> {
        let mut seen = FxHashSet::default();
        seen.insert(start);
        let mut current = start;
        while let Some((next, _)) = self.successor(current).await? {
            if !seen.insert(next) {
                return Err(SemError::corruption(format!(
                    "sequence of oriented set {} loops back to {}",
                    self.set_node(),
                    next
                )));
            }
            current = next;
        }
        Ok(current)
    }

    /// The membership arc following `arc` and its element. A branch, or a
    /// successor that is not a membership arc of this set, is corruption.
    async fn successor(&self, arc: Handle) -> SemResult<Option<(Handle, Handle)>> {
        let sequence = self.base.context().keynodes().sequence_relation().await?;
        let found = relations::search_non_role_relations(self.store(), arc, sequence).await?;
        let next = match found.as_slice() {
            [] => return Ok(None),
            [relation] => relation.element,
            _ => {
                return Err(SemError::corruption(format!(
                    "arc {} of oriented set {} has {} successors",
                    arc,
                    self.set_node(),
                    found.len()
                )))
            }
        };

        let mut membership = Template::new();
        membership.triple(
            self.set_node(),
            next,
            ElementType::UNKNOWN.named(alias::ELEMENT),
        );
        match self.store().search_by_template(&membership).await?.first() {
            Some(binding) => Ok(Some((next, binding.alias(alias::ELEMENT)?))),
            None => Err(SemError::corruption(format!(
                "sequence arc from {} leads to {}, which is not a membership arc of {}",
                arc,
                next,
                self.set_node()
            ))),
        }
    }

    async fn advance(&self, mut cursor: Cursor) -> SemResult<Option<(Handle, Cursor)>> {
        let step = match cursor.arc {
            None => self.head().await?.map(|head| (head.arc, head.element)),
            Some(arc) => self.successor(arc).await?,
        };
        let Some((arc, element)) = step else {
            return Ok(None);
        };
        if !cursor.seen.insert(arc) {
            return Err(SemError::corruption(format!(
                "sequence of oriented set {} loops back to {}",
                self.set_node(),
                arc
            )));
        }
        cursor.arc = Some(arc);
        Ok(Some((element, cursor)))
    }
}

#[async_trait]
impl Collection for OrientedSet {
    fn set_node(&self) -> Handle {
        self.base.set_node()
    }

    fn context(&self) -> &SetContext {
        self.base.context()
    }

    /// Append in order. An empty set starts a new chain at the first
    /// element; otherwise the chain continues after the current tail.
    async fn add(&self, elements: &[Handle]) -> SemResult<()> {
        let Some((&first, rest)) = elements.split_first() else {
            return Ok(());
        };
        let (mut tail, pending) = if self.is_empty().await? {
            (self.generate_head_arc(first).await?, rest)
        } else {
            (self.take_tail_arc().await?, elements)
        };
        for &element in pending {
            tail = self.generate_next_arc(tail, element).await?;
        }
        self.mark_tail(tail).await?;
        tracing::debug!(
            target: "semset::collections",
            set_node = %self.set_node(),
            added = elements.len(),
            tail = %tail,
            "Appended oriented members"
        );
        Ok(())
    }

    async fn remove(&self, elements: &[Handle]) -> SemResult<()> {
        if elements.is_empty() {
            return Ok(());
        }
        let doomed: FxHashSet<Handle> = elements.iter().copied().collect();
        let survivors: Vec<Handle> = self
            .elements_list()
            .await?
            .into_iter()
            .filter(|element| !doomed.contains(element))
            .collect();
        self.clear().await?;
        self.add(&survivors).await
    }

    /// Walks the chain one store round trip per element.
    fn iter(&self) -> BoxStream<'_, SemResult<Handle>> {
        let start = Cursor {
            arc: None,
            seen: FxHashSet::default(),
        };
        stream::try_unfold(start, move |cursor| self.advance(cursor)).boxed()
    }
}
