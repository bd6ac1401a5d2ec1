//! Collections encoded in a pattern-addressable graph store.
//!
//! Every collection is identified by a backing node and stores its members
//! as membership arcs leaving that node. The encodings differ in how order
//! is recorded:
//!
//! - [`BaseSet`]: no order, no duplicates
//! - [`StructureSet`]: a [`BaseSet`] whose backing node is a structure
//! - [`NumberedSet`]: position `i` tagged with the role marker `rrel_<i>`
//! - [`OrientedSet`]: a chain of arcs linked by `nrel_basic_sequence`
//!
//! All operations go through a [`SetContext`], which carries the store and
//! the keynode registry. Collection handles are stateless; two handles over
//! the same backing node see the same contents and compare equal.
//!
//! # Example
//!
//! ```ignore
//! let ctx = SetContext::from_store(Arc::new(MemoryStore::new()));
//! let set = OrientedSet::create(&ctx, &[a, b]).await?;
//! set.add(&[c]).await?;
//! assert_eq!(set.elements_list().await?, vec![a, b, c]);
//! ```

#![warn(clippy::all)]

mod collection;
mod context;
mod numbered;
mod oriented;
pub mod relations;
mod set;
mod structure;
#[cfg(test)]
mod testing;

pub use collection::{Collection, CreateOptions};
pub use context::SetContext;
pub use numbered::NumberedSet;
pub use oriented::OrientedSet;
pub use set::BaseSet;
pub use structure::StructureSet;
