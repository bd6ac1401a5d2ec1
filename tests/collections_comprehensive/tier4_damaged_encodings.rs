//! Tier 4: Damaged Encodings
//!
//! Oriented sets written by other clients may carry a stale, missing or
//! repeated tail marker. Appending must recover from those; a chain that
//! leaves the set must be reported, never extended.

use crate::test_utils::Fixture;
use semset::relations::{self, alias};
use semset::{Collection, Construction, ElementType, Handle, OrientedSet, Store, Template};

/// Chain a new membership arc to `element` after `previous`, without
/// touching the tail marker.
async fn chain_after(f: &Fixture, set_node: Handle, previous: Handle, element: Handle) -> Handle {
    let sequence = f.ctx.keynodes().sequence_relation().await.unwrap();
    let mut construction = Construction::new();
    construction.generate_connector_as(ElementType::CONST_PERM_POS_ARC, set_node, element, "arc");
    relations::push_binary_relation(
        &mut construction,
        ElementType::CONST_COMMON_ARC,
        previous,
        "arc",
        &[sequence],
        "seq",
    );
    f.store.create_elements(&construction).await.unwrap()[0]
}

async fn head_arc(f: &Fixture, set: &OrientedSet) -> Handle {
    let head = f.ctx.keynodes().head_marker().await.unwrap();
    relations::search_role_relation(f.ctx.store(), set.set_node(), head)
        .await
        .unwrap()
        .unwrap()
        .arc
}

/// Relation arcs from the tail marker to membership arcs of `set`.
async fn tail_marker_arcs(f: &Fixture, set: &OrientedSet) -> Vec<Handle> {
    let tail = f.ctx.keynodes().tail_marker().await.unwrap();
    let mut template = Template::new();
    template.quintuple(
        set.set_node(),
        ElementType::VAR_PERM_POS_ARC,
        ElementType::UNKNOWN,
        ElementType::VAR_PERM_POS_ARC.named(alias::RELATION_ARC),
        tail,
    );
    f.store
        .search_by_template(&template)
        .await
        .unwrap()
        .iter()
        .map(|b| b.alias(alias::RELATION_ARC).unwrap())
        .collect()
}

#[tokio::test]
async fn stale_tail_marker_is_walked_past() {
    let f = Fixture::new();
    let e = f.nodes(3).await;
    let set = OrientedSet::create(&f.ctx, &e[..1]).await.unwrap();
    let head = head_arc(&f, &set).await;
    chain_after(&f, set.set_node(), head, e[1]).await;

    set.add(&e[2..]).await.unwrap();
    assert_eq!(set.elements_list().await.unwrap(), e);
    assert_eq!(tail_marker_arcs(&f, &set).await.len(), 1);
}

#[tokio::test]
async fn missing_tail_marker_is_recovered_from_head() {
    let f = Fixture::new();
    let e = f.nodes(4).await;
    let set = OrientedSet::create(&f.ctx, &e[..3]).await.unwrap();
    let markers = tail_marker_arcs(&f, &set).await;
    assert!(f.store.erase_elements(&markers).await.unwrap());

    set.add(&e[3..]).await.unwrap();
    assert_eq!(set.elements_list().await.unwrap(), e);
    assert_eq!(tail_marker_arcs(&f, &set).await.len(), 1);
}

#[tokio::test]
async fn repeated_tail_markers_collapse_to_one() {
    let f = Fixture::new();
    let e = f.nodes(3).await;
    let set = OrientedSet::create(&f.ctx, &e[..2]).await.unwrap();
    let head = head_arc(&f, &set).await;
    let tail = f.ctx.keynodes().tail_marker().await.unwrap();
    relations::generate_connector(f.ctx.store(), ElementType::CONST_PERM_POS_ARC, tail, head)
        .await
        .unwrap();
    assert_eq!(tail_marker_arcs(&f, &set).await.len(), 2);

    set.add(&e[2..]).await.unwrap();
    assert_eq!(set.elements_list().await.unwrap(), e);
    assert_eq!(tail_marker_arcs(&f, &set).await.len(), 1);
}

#[tokio::test]
async fn chain_leaving_the_set_is_corruption() {
    let f = Fixture::new();
    let e = f.nodes(3).await;
    let mine = OrientedSet::create(&f.ctx, &e[..1]).await.unwrap();
    let other = OrientedSet::create(&f.ctx, &e[1..2]).await.unwrap();
    let my_head = head_arc(&f, &mine).await;
    let their_head = head_arc(&f, &other).await;

    let sequence = f.ctx.keynodes().sequence_relation().await.unwrap();
    let mut construction = Construction::new();
    construction
        .generate_connector_as(ElementType::CONST_COMMON_ARC, my_head, their_head, "seq")
        .generate_connector(ElementType::CONST_PERM_POS_ARC, sequence, "seq");
    f.store.create_elements(&construction).await.unwrap();

    let before = f.store.element_count();
    let err = mine.add(&e[2..]).await.unwrap_err();
    assert!(err.is_corruption());
    // the marker of `mine` was consumed before the walk failed; nothing new
    // was chained
    assert!(f.store.element_count() < before);
    assert!(!mine.contains(e[2]).await.unwrap());
    // iteration reports the foreign successor too
    assert!(mine.elements_list().await.unwrap_err().is_corruption());
    assert_eq!(other.elements_list().await.unwrap(), vec![e[1]]);
}

#[tokio::test]
async fn clear_removes_markers_and_sequence_arcs() {
    let f = Fixture::new();
    let e = f.nodes(3).await;
    let set = OrientedSet::create(&f.ctx, &e).await.unwrap();
    set.clear().await.unwrap();
    assert!(tail_marker_arcs(&f, &set).await.is_empty());

    // every element and keynode survives; only arcs were erased
    for element in &e {
        assert!(f.store.contains(*element));
    }
    let sequence = f.ctx.keynodes().sequence_relation().await.unwrap();
    assert!(f.store.contains(sequence));
    set.add(&e[..1]).await.unwrap();
    assert_eq!(set.elements_list().await.unwrap(), vec![e[0]]);
}
