//! Tier 2: Cross-Collection Identity
//!
//! A collection is its backing node: handles of any encoding over the same
//! node are equal and hash alike.

use crate::test_utils::Fixture;
use rustc_hash::FxHashSet;
use semset::{
    BaseSet, Collection, CreateOptions, ElementType, NumberedSet, OrientedSet, StructureSet,
};

#[tokio::test]
async fn encodings_over_one_node_are_equal() {
    let f = Fixture::new();
    let oriented = OrientedSet::create(&f.ctx, &[]).await.unwrap();
    let node = oriented.set_node();
    let base = BaseSet::new(f.ctx.clone(), node).unwrap();
    let numbered = NumberedSet::new(f.ctx.clone(), node).unwrap();

    assert_eq!(base, oriented);
    assert_eq!(oriented, numbered);
    assert_eq!(numbered, base);
}

#[tokio::test]
async fn distinct_nodes_are_unequal() {
    let f = Fixture::new();
    let a = BaseSet::create(&f.ctx, &[]).await.unwrap();
    let b = BaseSet::create(&f.ctx, &[]).await.unwrap();
    assert_ne!(a, b);
}

#[tokio::test]
async fn hashing_follows_backing_node() {
    let f = Fixture::new();
    let a = StructureSet::create(&f.ctx, &[]).await.unwrap();
    let b = StructureSet::create(&f.ctx, &[]).await.unwrap();
    let again = StructureSet::adopt(&f.ctx, a.set_node()).await.unwrap();

    let mut seen = FxHashSet::default();
    assert!(seen.insert(a.clone()));
    assert!(seen.insert(b));
    assert!(!seen.insert(again));
    assert!(seen.contains(&a));
}

#[tokio::test]
async fn handles_share_contents() {
    let f = Fixture::new();
    let e = f.nodes(2).await;
    let writer = NumberedSet::create(&f.ctx, &e[..1]).await.unwrap();
    let reader = NumberedSet::new(f.ctx.clone(), writer.set_node()).unwrap();
    writer.add(&e[1..]).await.unwrap();
    assert_eq!(reader.elements_list().await.unwrap(), e);
}

#[tokio::test]
async fn membership_view_is_shared_by_every_encoding() {
    let f = Fixture::new();
    let e = f.nodes(3).await;
    let oriented = OrientedSet::create(&f.ctx, &[e[2], e[0], e[2]]).await.unwrap();
    let base = BaseSet::new(f.ctx.clone(), oriented.set_node()).unwrap();
    assert_eq!(
        base.elements_set().await.unwrap(),
        oriented.elements_set().await.unwrap()
    );
    assert!(base.contains(e[0]).await.unwrap());
    assert!(!base.contains(e[1]).await.unwrap());
}

#[tokio::test]
async fn adopting_with_explicit_type_records_it() {
    let f = Fixture::new();
    let node = f.node_of(ElementType::CONST_NODE_CLASS).await;
    let options = CreateOptions {
        set_node: Some(node),
        set_node_type: Some(ElementType::CONST_NODE_CLASS),
    };
    let set = OrientedSet::create_with(&f.ctx, options, &[]).await.unwrap();
    assert_eq!(set.set_node(), node);
    assert_eq!(set.set_node_type(), ElementType::CONST_NODE_CLASS);
}
