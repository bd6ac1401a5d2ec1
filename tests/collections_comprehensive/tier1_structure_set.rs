//! Tier 1: StructureSet

use crate::test_utils::Fixture;
use semset::{Collection, CreateOptions, ElementType, SemError, StructureSet};

#[tokio::test]
async fn non_structure_node_is_invalid_construction() {
    let f = Fixture::new();
    let plain = f.node_of(ElementType::CONST_NODE).await;
    let e = f.nodes(2).await;
    let before = f.store.element_count();

    let err = StructureSet::create_with(&f.ctx, CreateOptions::adopt(plain), &e)
        .await
        .unwrap_err();
    assert!(matches!(err, SemError::InvalidConstruction { .. }));
    assert_eq!(f.store.element_count(), before);
}

#[tokio::test]
async fn adopted_structure_keeps_existing_members() {
    let f = Fixture::new();
    let e = f.nodes(2).await;
    let first = StructureSet::create(&f.ctx, &e).await.unwrap();
    let adopted = StructureSet::adopt(&f.ctx, first.set_node()).await.unwrap();
    assert_eq!(adopted.size().await.unwrap(), 2);
    assert_eq!(adopted, first);
}

#[tokio::test]
async fn requested_type_must_be_a_structure() {
    let f = Fixture::new();
    let err = StructureSet::create_with(&f.ctx, CreateOptions::of_type(ElementType::CONST_NODE_ROLE), &[])
        .await
        .unwrap_err();
    assert!(err.is_invalid_construction());

    let ok = StructureSet::create_with(
        &f.ctx,
        CreateOptions::of_type(ElementType::CONST_NODE_STRUCTURE),
        &[],
    )
    .await
    .unwrap();
    assert!(ok.set_node_type().is_structure());
}

#[tokio::test]
async fn behaves_as_a_set() {
    let f = Fixture::new();
    let e = f.nodes(3).await;
    let structure = StructureSet::create(&f.ctx, &[e[0], e[0], e[1]]).await.unwrap();
    assert_eq!(structure.size().await.unwrap(), 2);
    structure.add(&[e[2]]).await.unwrap();
    structure.remove(&[e[0]]).await.unwrap();
    assert!(!structure.contains(e[0]).await.unwrap());
    assert!(structure.contains(e[2]).await.unwrap());
    structure.clear().await.unwrap();
    assert!(structure.is_empty().await.unwrap());
}
