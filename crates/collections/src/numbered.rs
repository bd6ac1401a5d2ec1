//! Collection with explicit positions.
//!
//! The member at position `i` (1-based) is reached by a membership arc
//! tagged with the role marker `rrel_<i>`. Positions are dense: after `add`
//! and `remove` the markers in use are exactly `rrel_1..rrel_n`. Removal
//! clears the set and re-adds the survivors in order.

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use rustc_hash::FxHashSet;

use semset_core::{Construction, ElementType, Handle, SemError, SemResult, Template};

use crate::collection::{Collection, CreateOptions};
use crate::context::SetContext;
use crate::relations::alias;
use crate::set::BaseSet;

/// Ordered collection addressed by position.
#[derive(Clone)]
pub struct NumberedSet {
    base: BaseSet,
}

impl NumberedSet {
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

    /// Member at the 0-based `index`.
    ///
    /// An index whose marker lies outside the role range is
    /// [`SemError::OutOfRange`]; a position with no member is
    /// [`SemError::NotFound`].
    pub async fn get_by_index(&self, index: usize) -> SemResult<Handle> {
        let ctx = self.base.context();
        let config = ctx.keynodes().config();
        let position = index.checked_add(1).ok_or_else(|| {
            SemError::out_of_range(index, config.min_role_index, config.max_role_index)
        })?;
        let marker = ctx.keynodes().role_marker(position).await?;
        let mut template = Template::new();
        template.quintuple(
            self.base.set_node(),
            ElementType::VAR_PERM_POS_ARC,
            ElementType::UNKNOWN.named(alias::ELEMENT),
            ElementType::VAR_PERM_POS_ARC,
            marker,
        );
        match ctx.store().search_by_template(&template).await?.first() {
            Some(binding) => binding.alias(alias::ELEMENT),
            None => Err(SemError::not_found(format!(
                "element at index {} of {}",
                index,
                self.base.set_node()
            ))),
        }
    }

    /// Positionally tagged members, sorted by position.
    async fn positional(&self) -> SemResult<Vec<(usize, Handle)>> {
        let ctx = self.base.context();
        let ordinals = ctx.keynodes().role_ordinals().await?;
        let mut template = Template::new();
        template.quintuple(
            self.base.set_node(),
            ElementType::VAR_PERM_POS_ARC,
            ElementType::UNKNOWN.named(alias::ELEMENT),
            ElementType::VAR_PERM_POS_ARC,
            ElementType::VAR_NODE_ROLE.named(alias::ROLE),
        );
        let mut positioned = Vec::new();
        for binding in ctx.store().search_by_template(&template).await? {
            if let Some(&position) = ordinals.get(&binding.alias(alias::ROLE)?) {
                positioned.push((position, binding.alias(alias::ELEMENT)?));
            }
        }
        positioned.sort_unstable();
        Ok(positioned)
    }
}

#[async_trait]
impl Collection for NumberedSet {
    fn set_node(&self) -> Handle {
        self.base.set_node()
    }

    fn context(&self) -> &SetContext {
        self.base.context()
    }

    /// Append at positions `n+1..`, where `n` is the current size. All
    /// markers are resolved before anything is created, so a batch that
    /// would overflow the role range leaves the set untouched.
    async fn add(&self, elements: &[Handle]) -> SemResult<()> {
        if elements.is_empty() {
            return Ok(());
        }
        let ctx = self.base.context();
        let current = self.positional().await?.len();
        let mut markers = Vec::with_capacity(elements.len());
        for offset in 1..=elements.len() {
            markers.push(ctx.keynodes().role_marker(current + offset).await?);
        }

        let mut construction = Construction::new();
        for (i, (&element, &marker)) in elements.iter().zip(&markers).enumerate() {
            let arc = format!("{}_{}", alias::MEMBERSHIP_ARC, i);
            construction
                .generate_connector_as(
                    ElementType::CONST_PERM_POS_ARC,
                    self.base.set_node(),
                    element,
                    arc.as_str(),
                )
                .generate_connector(ElementType::CONST_PERM_POS_ARC, marker, arc.as_str());
        }
        ctx.store().create_elements(&construction).await?;
        tracing::debug!(
            target: "semset::collections",
            set_node = %self.base.set_node(),
            from = current + 1,
            added = elements.len(),
            "Appended numbered members"
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

    fn iter(&self) -> BoxStream<'_, SemResult<Handle>> {
        stream::once(self.positional())
            .map_ok(|positioned| {
                stream::iter(positioned.into_iter().map(|(_, e)| Ok::<_, SemError>(e)))
            })
            .try_flatten()
            .boxed()
    }
}
