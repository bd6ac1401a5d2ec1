//! semset: ordered and unordered collections in a semantic memory.
//!
//! The crates of the workspace are re-exported here:
//!
//! - `semset-core`: handles, element types, templates, constructions, errors
//!   and configuration
//! - `semset-storage`: the [`Store`] seam, an in-process [`MemoryStore`] and
//!   the [`KeynodeRegistry`]
//! - `semset-collections`: [`BaseSet`], [`StructureSet`], [`NumberedSet`]
//!   and [`OrientedSet`]
//!
//! ```ignore
//! use semset::*;
//! use std::sync::Arc;
//!
//! let ctx = SetContext::from_store(Arc::new(MemoryStore::new()));
//! let numbered = NumberedSet::create(&ctx, &[a, b]).await?;
//! assert_eq!(numbered.get_by_index(1).await?, b);
//! ```

mod types;

pub use types::*;

/// Element and relation helpers used by the collection encodings.
pub use semset_collections::relations;
