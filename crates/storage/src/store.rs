//! The store seam.
//!
//! Everything semset knows about the remote semantic memory goes through
//! [`Store`]: atomic batched creation, template search, erasure, type
//! lookup and keynode resolution. Implementations decide how the calls
//! travel; collection code only awaits them.

use std::sync::Arc;

use async_trait::async_trait;
use semset_core::{Binding, Construction, ElementType, Handle, SemResult, Template};

/// Request to resolve a system identifier to a keynode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveParams {
    /// System identifier, e.g. `rrel_1`.
    pub idtf: String,
    /// Type for a keynode created on demand. `None` only looks up.
    pub element_type: Option<ElementType>,
}

impl ResolveParams {
    /// Look up an identifier without creating it.
    pub fn find(idtf: impl Into<String>) -> Self {
        Self {
            idtf: idtf.into(),
            element_type: None,
        }
    }

    /// Look up an identifier, creating a node of `element_type` if absent.
    pub fn resolve(idtf: impl Into<String>, element_type: ElementType) -> Self {
        Self {
            idtf: idtf.into(),
            element_type: Some(element_type),
        }
    }
}

/// Primitives of a pattern-addressable element store.
///
/// # Contract
///
/// - `create_elements` is atomic and returns handles in request order.
/// - `search_by_template` returns every matching binding. Result order is
///   unspecified and must never carry meaning.
/// - `erase_elements` erases the given elements and every connector incident
///   to them; erasing a connector never erases its endpoints. Returns `false`
///   when some handle did not name an element.
/// - `element_types` returns [`ElementType::UNKNOWN`] for unknown handles.
/// - `resolve_keynodes` returns [`Handle::INVALID`] for unknown identifiers
///   requested without a type.
#[async_trait]
pub trait Store: Send + Sync {
    /// Create the elements described by `construction`.
    async fn create_elements(&self, construction: &Construction) -> SemResult<Vec<Handle>>;

    /// Find all bindings of `template`.
    async fn search_by_template(&self, template: &Template) -> SemResult<Vec<Binding>>;

    /// Erase elements.
    async fn erase_elements(&self, handles: &[Handle]) -> SemResult<bool>;

    /// Report element types.
    async fn element_types(&self, handles: &[Handle]) -> SemResult<Vec<ElementType>>;

    /// Resolve system identifiers.
    async fn resolve_keynodes(&self, params: &[ResolveParams]) -> SemResult<Vec<Handle>>;
}

/// Shared, type-erased store.
pub type SharedStore = Arc<dyn Store>;
