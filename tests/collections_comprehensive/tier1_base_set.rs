//! Tier 1: BaseSet

use crate::test_utils::Fixture;
use rustc_hash::FxHashSet;
use semset::{BaseSet, Collection, CreateOptions, ElementType, Handle, Store};

#[tokio::test]
async fn membership_queries_agree() {
    let f = Fixture::new();
    let e = f.nodes(3).await;
    let set = BaseSet::create(&f.ctx, &e[..2]).await.unwrap();

    assert!(set.contains(e[0]).await.unwrap());
    assert!(!set.contains(e[2]).await.unwrap());
    assert_eq!(set.size().await.unwrap(), 2);
    assert!(set.is_nonempty().await.unwrap());
    let expected: FxHashSet<Handle> = e[..2].iter().copied().collect();
    assert_eq!(set.elements_set().await.unwrap(), expected);
}

#[tokio::test]
async fn empty_set_has_no_members() {
    let f = Fixture::new();
    let set = BaseSet::create(&f.ctx, &[]).await.unwrap();
    assert!(set.is_empty().await.unwrap());
    assert_eq!(set.size().await.unwrap(), 0);
    assert!(set.elements_list().await.unwrap().is_empty());
}

#[tokio::test]
async fn add_with_repeats_keeps_one_arc_per_element() {
    let f = Fixture::new();
    let e = f.nodes(2).await;
    let set = BaseSet::create(&f.ctx, &[e[0]]).await.unwrap();
    let before = f.store.element_count();
    set.add(&[e[0], e[1], e[1]]).await.unwrap();
    // exactly one new membership arc
    assert_eq!(f.store.element_count(), before + 1);
    assert_eq!(set.size().await.unwrap(), 2);
}

#[tokio::test]
async fn empty_add_and_remove_are_no_ops() {
    let f = Fixture::new();
    let e = f.nodes(1).await;
    let set = BaseSet::create(&f.ctx, &e).await.unwrap();
    let before = f.store.element_count();
    set.add(&[]).await.unwrap();
    set.remove(&[]).await.unwrap();
    assert_eq!(f.store.element_count(), before);
}

#[tokio::test]
async fn clear_is_idempotent() {
    let f = Fixture::new();
    let e = f.nodes(3).await;
    let set = BaseSet::create(&f.ctx, &e).await.unwrap();
    set.clear().await.unwrap();
    set.clear().await.unwrap();
    assert!(set.is_empty().await.unwrap());
    assert!(f.store.contains(set.set_node()));
}

#[tokio::test]
async fn requested_type_is_used_for_generated_node() {
    let f = Fixture::new();
    let set = BaseSet::create_with(&f.ctx, CreateOptions::of_type(ElementType::CONST_NODE_CLASS), &[])
        .await
        .unwrap();
    assert_eq!(set.set_node_type(), ElementType::CONST_NODE_CLASS);
    let stored = f.store.element_types(&[set.set_node()]).await.unwrap();
    assert_eq!(stored, vec![ElementType::CONST_NODE_CLASS]);
}

#[tokio::test]
async fn removing_member_keeps_element() {
    let f = Fixture::new();
    let e = f.nodes(1).await;
    let set = BaseSet::create(&f.ctx, &e).await.unwrap();
    set.remove(&e).await.unwrap();
    assert!(set.is_empty().await.unwrap());
    assert!(f.store.contains(e[0]));
}
