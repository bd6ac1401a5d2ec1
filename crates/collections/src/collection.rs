//! The operations every collection supports.

use async_trait::async_trait;
use futures::stream::{BoxStream, TryStreamExt};
use rustc_hash::FxHashSet;

use semset_core::{ElementType, Handle, SemResult};

use crate::context::SetContext;
use crate::relations::{self, alias};
use crate::{BaseSet, NumberedSet, OrientedSet, StructureSet};

/// How a collection obtains its backing node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreateOptions {
    /// Adopt this node instead of generating one.
    pub set_node: Option<Handle>,
    /// Type of a generated node. When a node is adopted this is recorded
    /// as-is, without consulting the store.
    pub set_node_type: Option<ElementType>,
}

impl CreateOptions {
    pub fn adopt(set_node: Handle) -> Self {
        Self {
            set_node: Some(set_node),
            set_node_type: None,
        }
    }

    pub fn of_type(set_node_type: ElementType) -> Self {
        Self {
            set_node: None,
            set_node_type: Some(set_node_type),
        }
    }
}

/// A collection encoded in the store under one backing node.
///
/// Membership queries (`elements_set`, `contains`, `size`, emptiness) read
/// the membership arcs of the backing node and are shared by every encoding.
/// `add`, `remove` and iteration order are encoding-specific.
///
/// Nothing here is transactional: two writers mutating the same collection
/// concurrently may corrupt it.
#[async_trait]
pub trait Collection: Send + Sync {
    /// The node identifying this collection.
    fn set_node(&self) -> Handle;

    /// Collaborators used by every operation.
    fn context(&self) -> &SetContext;

    /// Add elements.
    async fn add(&self, elements: &[Handle]) -> SemResult<()>;

    /// Remove elements. Elements that are not members are ignored.
    async fn remove(&self, elements: &[Handle]) -> SemResult<()>;

    /// Members in the collection's iteration order, fetched lazily.
    fn iter(&self) -> BoxStream<'_, SemResult<Handle>>;

    /// Drop every membership. The backing node survives.
    async fn clear(&self) -> SemResult<()> {
        let store = self.context().store();
        let members = relations::search_members(store, self.set_node()).await?;
        let arcs = members
            .iter()
            .map(|binding| binding.alias(alias::MEMBERSHIP_ARC))
            .collect::<SemResult<Vec<_>>>()?;
        relations::erase_arcs(store, &arcs).await?;
        tracing::debug!(
            target: "semset::collections",
            set_node = %self.set_node(),
            erased = arcs.len(),
            "Cleared collection"
        );
        Ok(())
    }

    /// Distinct members.
    async fn elements_set(&self) -> SemResult<FxHashSet<Handle>> {
        let members = relations::search_members(self.context().store(), self.set_node()).await?;
        members
            .iter()
            .map(|binding| binding.alias(alias::ELEMENT))
            .collect()
    }

    /// Members in iteration order.
    async fn elements_list(&self) -> SemResult<Vec<Handle>> {
        self.iter().try_collect().await
    }

    async fn contains(&self, element: Handle) -> SemResult<bool> {
        Ok(self.elements_set().await?.contains(&element))
    }

    /// Number of distinct members.
    async fn size(&self) -> SemResult<usize> {
        Ok(self.elements_set().await?.len())
    }

    async fn is_empty(&self) -> SemResult<bool> {
        let members = relations::search_members(self.context().store(), self.set_node()).await?;
        Ok(members.is_empty())
    }

    async fn is_nonempty(&self) -> SemResult<bool> {
        Ok(!self.is_empty().await?)
    }
}

/// Identity of a collection is its backing node, whatever the encoding.
macro_rules! collection_identity {
    ($($name:ident),* $(,)?) => {$(
        impl<T: Collection> PartialEq<T> for $name {
            fn eq(&self, other: &T) -> bool {
                self.set_node() == other.set_node()
            }
        }

        impl Eq for $name {}

        impl std::hash::Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.set_node().hash(state);
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("set_node", &self.set_node())
                    .finish()
            }
        }
    )*};
}

collection_identity!(BaseSet, NumberedSet, OrientedSet, StructureSet);
