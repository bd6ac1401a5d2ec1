//! Element and relation helpers shared by the collection encodings.
//!
//! A binary relation is a connector `src -> trg` tagged by one or more
//! relation nodes, each of which reaches the connector through its own
//! membership arc. Role relations use a membership arc as the tagged
//! connector; non-role relations use a common arc.

use semset_core::{
    Binding, Construction, ElementType, Endpoint, Handle, SemError, SemResult, Template,
};
use semset_storage::Store;

/// Template and construction aliases used across collections.
pub mod alias {
    pub const MEMBERSHIP_ARC: &str = "membership_arc";
    pub const RELATION_ARC: &str = "relation_arc";
    pub const SEQUENCE_ARC: &str = "sequence_arc";
    pub const ELEMENT: &str = "element";
    pub const ROLE: &str = "role";
}

/// A tagged connector found through a relation search, with its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationTarget {
    /// The tagged connector.
    pub arc: Handle,
    /// The element the connector points to.
    pub element: Handle,
}

// =============================================================================
// Generation
// =============================================================================

async fn create(store: &dyn Store, construction: &Construction) -> SemResult<Vec<Handle>> {
    let created = store.create_elements(construction).await?;
    if created.len() != construction.len() {
        return Err(SemError::store(format!(
            "construction of {} items returned {} handles",
            construction.len(),
            created.len()
        )));
    }
    Ok(created)
}

async fn create_first(store: &dyn Store, construction: &Construction) -> SemResult<Handle> {
    create(store, construction)
        .await?
        .first()
        .copied()
        .ok_or_else(|| SemError::store("construction returned no handles"))
}

/// Generate nodes of the given types in one batch.
pub async fn generate_nodes(store: &dyn Store, types: &[ElementType]) -> SemResult<Vec<Handle>> {
    let mut construction = Construction::new();
    for element_type in types {
        construction.generate_node(*element_type);
    }
    if construction.is_empty() {
        return Ok(Vec::new());
    }
    create(store, &construction).await
}

pub async fn generate_node(store: &dyn Store, element_type: ElementType) -> SemResult<Handle> {
    let mut construction = Construction::new();
    construction.generate_node(element_type);
    create_first(store, &construction).await
}

/// Generate one connector of `element_type` from `src` to every target.
pub async fn generate_connectors(
    store: &dyn Store,
    element_type: ElementType,
    src: Handle,
    targets: &[Handle],
) -> SemResult<Vec<Handle>> {
    let mut construction = Construction::new();
    for trg in targets {
        construction.generate_connector(element_type, src, *trg);
    }
    if construction.is_empty() {
        return Ok(Vec::new());
    }
    create(store, &construction).await
}

pub async fn generate_connector(
    store: &dyn Store,
    element_type: ElementType,
    src: Handle,
    trg: Handle,
) -> SemResult<Handle> {
    let mut construction = Construction::new();
    construction.generate_connector(element_type, src, trg);
    create_first(store, &construction).await
}

/// Append a connector `src -> trg` named `name`, tagged by every node in
/// `relations`, to an existing construction.
pub fn push_binary_relation<'a>(
    construction: &'a mut Construction,
    connector_type: ElementType,
    src: impl Into<Endpoint>,
    trg: impl Into<Endpoint>,
    relations: &[Handle],
    name: &str,
) -> &'a mut Construction {
    construction.generate_connector_as(connector_type, src, trg, name);
    for relation in relations {
        construction.generate_connector(ElementType::CONST_PERM_POS_ARC, *relation, name);
    }
    construction
}

/// Generate a connector `src -> trg` tagged by every node in `relations`.
/// Returns the tagged connector.
pub async fn generate_binary_relation(
    store: &dyn Store,
    connector_type: ElementType,
    src: Handle,
    trg: Handle,
    relations: &[Handle],
) -> SemResult<Handle> {
    let mut construction = Construction::new();
    push_binary_relation(
        &mut construction,
        connector_type,
        src,
        trg,
        relations,
        alias::RELATION_ARC,
    );
    create_first(store, &construction).await
}

/// Membership arc `src -> trg` tagged by role nodes.
pub async fn generate_role_relation(
    store: &dyn Store,
    src: Handle,
    trg: Handle,
    roles: &[Handle],
) -> SemResult<Handle> {
    generate_binary_relation(store, ElementType::CONST_PERM_POS_ARC, src, trg, roles).await
}

/// Common arc `src -> trg` tagged by non-role relation nodes.
pub async fn generate_non_role_relation(
    store: &dyn Store,
    src: Handle,
    trg: Handle,
    relations: &[Handle],
) -> SemResult<Handle> {
    generate_binary_relation(store, ElementType::CONST_COMMON_ARC, src, trg, relations).await
}

// =============================================================================
// Search
// =============================================================================

/// Every connector from `source` to `target` whose type satisfies one of
/// `types`, in the order of `types`.
pub async fn search_connectors(
    store: &dyn Store,
    source: Handle,
    target: Handle,
    types: &[ElementType],
) -> SemResult<Vec<Handle>> {
    let mut found = Vec::new();
    for element_type in types {
        let mut template = Template::new();
        template.triple(source, element_type.named(alias::RELATION_ARC), target);
        for binding in store.search_by_template(&template).await? {
            found.push(binding.alias(alias::RELATION_ARC)?);
        }
    }
    Ok(found)
}

/// First connector from `source` to `target` of `element_type`, or
/// [`Handle::INVALID`].
pub async fn search_connector(
    store: &dyn Store,
    source: Handle,
    target: Handle,
    element_type: ElementType,
) -> SemResult<Handle> {
    Ok(search_connectors(store, source, target, &[element_type])
        .await?
        .first()
        .copied()
        .unwrap_or(Handle::INVALID))
}

pub async fn check_connector(
    store: &dyn Store,
    element_type: ElementType,
    source: Handle,
    target: Handle,
) -> SemResult<bool> {
    Ok(search_connector(store, source, target, element_type)
        .await?
        .is_valid())
}

/// Every connector of `connector_type` leaving `src` and tagged with
/// `relation`.
async fn search_relations(
    store: &dyn Store,
    src: Handle,
    relation: Handle,
    connector_type: ElementType,
) -> SemResult<Vec<RelationTarget>> {
    let mut template = Template::new();
    template.quintuple(
        src,
        connector_type.named(alias::RELATION_ARC),
        ElementType::UNKNOWN.named(alias::ELEMENT),
        ElementType::VAR_PERM_POS_ARC,
        relation,
    );
    store
        .search_by_template(&template)
        .await?
        .iter()
        .map(|binding| -> SemResult<RelationTarget> {
            Ok(RelationTarget {
                arc: binding.alias(alias::RELATION_ARC)?,
                element: binding.alias(alias::ELEMENT)?,
            })
        })
        .collect()
}

/// First membership arc from `src` tagged with `role`, if any.
pub async fn search_role_relation(
    store: &dyn Store,
    src: Handle,
    role: Handle,
) -> SemResult<Option<RelationTarget>> {
    Ok(search_relations(store, src, role, ElementType::VAR_PERM_POS_ARC)
        .await?
        .into_iter()
        .next())
}

/// Every common arc from `src` tagged with `relation`.
pub async fn search_non_role_relations(
    store: &dyn Store,
    src: Handle,
    relation: Handle,
) -> SemResult<Vec<RelationTarget>> {
    search_relations(store, src, relation, ElementType::VAR_COMMON_ARC).await
}

/// First common arc from `src` tagged with `relation`, if any.
pub async fn search_non_role_relation(
    store: &dyn Store,
    src: Handle,
    relation: Handle,
) -> SemResult<Option<RelationTarget>> {
    Ok(search_non_role_relations(store, src, relation)
        .await?
        .into_iter()
        .next())
}

/// Element reached from `src` by a `role`-tagged arc, or [`Handle::INVALID`].
pub async fn search_element_by_role_relation(
    store: &dyn Store,
    src: Handle,
    role: Handle,
) -> SemResult<Handle> {
    Ok(search_role_relation(store, src, role)
        .await?
        .map_or(Handle::INVALID, |r| r.element))
}

/// Element reached from `src` by a `relation`-tagged common arc, or
/// [`Handle::INVALID`].
pub async fn search_element_by_non_role_relation(
    store: &dyn Store,
    src: Handle,
    relation: Handle,
) -> SemResult<Handle> {
    Ok(search_non_role_relation(store, src, relation)
        .await?
        .map_or(Handle::INVALID, |r| r.element))
}

/// Every membership arc leaving `set_node`, bound as
/// [`alias::MEMBERSHIP_ARC`] and [`alias::ELEMENT`].
pub(crate) async fn search_members(store: &dyn Store, set_node: Handle) -> SemResult<Vec<Binding>> {
    let mut template = Template::new();
    template.triple(
        set_node,
        ElementType::VAR_PERM_POS_ARC.named(alias::MEMBERSHIP_ARC),
        ElementType::UNKNOWN.named(alias::ELEMENT),
    );
    store.search_by_template(&template).await
}

// =============================================================================
// Erasure
// =============================================================================

/// Erase every connector from `source` to `target` matching one of `types`.
/// Returns `false` when nothing matched or the store did not erase them all.
pub async fn erase_connectors(
    store: &dyn Store,
    source: Handle,
    target: Handle,
    types: &[ElementType],
) -> SemResult<bool> {
    let connectors = search_connectors(store, source, target, types).await?;
    if connectors.is_empty() {
        return Ok(false);
    }
    store.erase_elements(&connectors).await
}

/// Erase arcs found by an earlier search. Makes no store call for an empty
/// list. Arcs that vanished in between are logged, not reported.
pub(crate) async fn erase_arcs(store: &dyn Store, arcs: &[Handle]) -> SemResult<()> {
    if arcs.is_empty() {
        return Ok(());
    }
    if !store.erase_elements(arcs).await? {
        tracing::warn!(
            target: "semset::collections",
            requested = arcs.len(),
            "Store did not erase every requested arc"
        );
    }
    Ok(())
}
