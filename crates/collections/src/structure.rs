//! Unordered collection backed by a structure node.

use async_trait::async_trait;
use futures::stream::BoxStream;

use semset_core::{ElementType, Handle, SemError, SemResult};

use crate::collection::{Collection, CreateOptions};
use crate::context::SetContext;
use crate::relations;
use crate::set::BaseSet;

/// A [`BaseSet`] whose backing node is a structure.
#[derive(Clone)]
pub struct StructureSet {
    base: BaseSet,
}

impl StructureSet {
    /// New structure with a generated `CONST_NODE_STRUCTURE` node.
    pub async fn create(ctx: &SetContext, elements: &[Handle]) -> SemResult<Self> {
        Self::create_with(ctx, CreateOptions::default(), elements).await
    }

    /// Adopt an existing node; its stored type must be a structure.
    pub async fn adopt(ctx: &SetContext, set_node: Handle) -> SemResult<Self> {
        Self::create_with(ctx, CreateOptions::adopt(set_node), &[]).await
    }

    /// Validation happens before anything is written: a rejected request
    /// generates no node and adds no members.
    pub async fn create_with(
        ctx: &SetContext,
        options: CreateOptions,
        elements: &[Handle],
    ) -> SemResult<Self> {
        let base = match options.set_node {
            Some(set_node) => {
                if !set_node.is_valid() {
                    return Err(SemError::invalid_construction(
                        "backing node handle is invalid",
                    ));
                }
                let actual = ctx
                    .store()
                    .element_types(&[set_node])
                    .await?
                    .first()
                    .copied()
                    .unwrap_or(ElementType::UNKNOWN);
                if !actual.is_structure() {
                    return Err(SemError::invalid_construction(format!(
                        "provided node {} has type {}, which is not a structure",
                        set_node, actual
                    )));
                }
                BaseSet::from_parts(ctx.clone(), set_node, actual)?
            }
            None => {
                let set_node_type = options
                    .set_node_type
                    .unwrap_or(ElementType::CONST_NODE_STRUCTURE);
                if !set_node_type.is_structure() {
                    return Err(SemError::invalid_construction(format!(
                        "requested type {} is not a structure",
                        set_node_type
                    )));
                }
                let set_node = relations::generate_node(ctx.store(), set_node_type).await?;
                BaseSet::from_parts(ctx.clone(), set_node, set_node_type)?
            }
        };
        let structure = Self { base };
        structure.add(elements).await?;
        Ok(structure)
    }

    /// Stored type of the backing node.
    pub fn set_node_type(&self) -> ElementType {
        self.base.set_node_type()
    }
}

#[async_trait]
impl Collection for StructureSet {
    fn set_node(&self) -> Handle {
        self.base.set_node()
    }

    fn context(&self) -> &SetContext {
        self.base.context()
    }

    async fn add(&self, elements: &[Handle]) -> SemResult<()> {
        self.base.add(elements).await
    }

    async fn remove(&self, elements: &[Handle]) -> SemResult<()> {
        self.base.remove(elements).await
    }

    fn iter(&self) -> BoxStream<'_, SemResult<Handle>> {
        self.base.iter()
    }
}
