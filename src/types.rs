//! Public types for the semset API.
//!
//! This module re-exports types from the internal crates with a flat public
//! interface.

// ============================================================================
// Graph vocabulary
// ============================================================================

pub use semset_core::{ElementType, Handle};

// Batched creation and template search
pub use semset_core::{Binding, Construction, Pattern, Slot, Template};

// Errors
pub use semset_core::{SemError, SemResult};

// Configuration
pub use semset_core::{Config, KeynodeConfig, StoreConfig};

// ============================================================================
// Store seam
// ============================================================================

pub use semset_storage::{KeynodeRegistry, MemoryStore, ResolveParams, SharedStore, Store};

// ============================================================================
// Collections
// ============================================================================

pub use semset_collections::{
    BaseSet, Collection, CreateOptions, NumberedSet, OrientedSet, SetContext, StructureSet,
};
