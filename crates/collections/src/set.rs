//! Unordered collection.
//!
//! A member `e` of set `S` is encoded as one membership arc `S -> e` and
//! nothing else. Adding an existing member is a no-op, so the store never
//! holds two arcs from `S` to the same element through this type.

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use rustc_hash::FxHashSet;

use semset_core::{Construction, ElementType, Handle, SemError, SemResult};

use crate::collection::{Collection, CreateOptions};
use crate::context::SetContext;
use crate::relations::{self, alias};

/// Unordered set of distinct elements.
#[derive(Clone)]
pub struct BaseSet {
    ctx: SetContext,
    set_node: Handle,
    set_node_type: ElementType,
}

impl BaseSet {
    /// Wrap an existing backing node.
    pub fn new(ctx: SetContext, set_node: Handle) -> SemResult<Self> {
        Self::from_parts(ctx, set_node, ElementType::CONST_NODE)
    }

    pub(crate) fn from_parts(
        ctx: SetContext,
        set_node: Handle,
        set_node_type: ElementType,
    ) -> SemResult<Self> {
        if !set_node.is_valid() {
            return Err(SemError::invalid_construction(
                "backing node handle is invalid",
            ));
        }
        Ok(Self {
            ctx,
            set_node,
            set_node_type,
        })
    }

    /// Generate a backing node of `default_type` (or the requested type),
    /// or adopt the requested node.
    pub(crate) async fn backing(
        ctx: &SetContext,
        options: CreateOptions,
        default_type: ElementType,
    ) -> SemResult<Self> {
        let set_node_type = options.set_node_type.unwrap_or(default_type);
        let set_node = match options.set_node {
            Some(node) => node,
            None => relations::generate_node(ctx.store(), set_node_type).await?,
        };
        Self::from_parts(ctx.clone(), set_node, set_node_type)
    }

    /// New set with a generated `CONST_NODE` backing node.
    pub async fn create(ctx: &SetContext, elements: &[Handle]) -> SemResult<Self> {
        Self::create_with(ctx, CreateOptions::default(), elements).await
    }

    pub async fn create_with(
        ctx: &SetContext,
        options: CreateOptions,
        elements: &[Handle],
    ) -> SemResult<Self> {
        let set = Self::backing(ctx, options, ElementType::CONST_NODE).await?;
        set.add(elements).await?;
        Ok(set)
    }

    pub fn set_node_type(&self) -> ElementType {
        self.set_node_type
    }

    /// Membership arcs of this set paired with their targets.
    pub(crate) async fn membership_arcs(&self) -> SemResult<Vec<(Handle, Handle)>> {
        relations::search_members(self.ctx.store(), self.set_node)
            .await?
            .iter()
            .map(|b| Ok((b.alias(alias::MEMBERSHIP_ARC)?, b.alias(alias::ELEMENT)?)))
            .collect()
    }
}

#[async_trait]
impl Collection for BaseSet {
    fn set_node(&self) -> Handle {
        self.set_node
    }

    fn context(&self) -> &SetContext {
        &self.ctx
    }

    async fn add(&self, elements: &[Handle]) -> SemResult<()> {
        if elements.is_empty() {
            return Ok(());
        }
        let mut present = self.elements_set().await?;
        let mut construction = Construction::new();
        for &element in elements {
            if present.insert(element) {
                construction.generate_connector(
                    ElementType::CONST_PERM_POS_ARC,
                    self.set_node,
                    element,
                );
            }
        }
        if construction.is_empty() {
            return Ok(());
        }
        self.ctx.store().create_elements(&construction).await?;
        tracing::debug!(
            target: "semset::collections",
            set_node = %self.set_node,
            added = construction.len(),
            "Added set members"
        );
        Ok(())
    }

    async fn remove(&self, elements: &[Handle]) -> SemResult<()> {
        if elements.is_empty() {
            return Ok(());
        }
        let doomed: FxHashSet<Handle> = elements.iter().copied().collect();
        let arcs: Vec<Handle> = self
            .membership_arcs()
            .await?
            .into_iter()
            .filter(|(_, element)| doomed.contains(element))
            .map(|(arc, _)| arc)
            .collect();
        relations::erase_arcs(self.ctx.store(), &arcs).await
    }

    fn iter(&self) -> BoxStream<'_, SemResult<Handle>> {
        stream::once(self.elements_set())
            .map_ok(|members| stream::iter(members.into_iter().map(Ok::<_, SemError>)))
            .try_flatten()
            .boxed()
    }
}
