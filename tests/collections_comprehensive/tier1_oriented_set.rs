//! Tier 1: OrientedSet

use crate::test_utils::Fixture;
use futures::{StreamExt, TryStreamExt};
use semset::{Collection, OrientedSet};

#[tokio::test]
async fn remove_from_middle_relinks_chain() {
    let f = Fixture::new();
    let e = f.nodes(3).await;
    let (a, b, c) = (e[0], e[1], e[2]);
    let set = OrientedSet::create(&f.ctx, &[a, b]).await.unwrap();
    set.add(&[c]).await.unwrap();
    set.remove(&[b]).await.unwrap();
    assert_eq!(set.elements_list().await.unwrap(), vec![a, c]);
}

#[tokio::test]
async fn repeated_elements_keep_their_places() {
    let f = Fixture::new();
    let e = f.nodes(2).await;
    let order = vec![e[0], e[1], e[0], e[0]];
    let set = OrientedSet::create(&f.ctx, &order).await.unwrap();
    assert_eq!(set.elements_list().await.unwrap(), order);
    assert_eq!(set.size().await.unwrap(), 2);
}

#[tokio::test]
async fn removal_drops_every_occurrence() {
    let f = Fixture::new();
    let e = f.nodes(2).await;
    let set = OrientedSet::create(&f.ctx, &[e[0], e[1], e[0]]).await.unwrap();
    set.remove(&[e[0]]).await.unwrap();
    assert_eq!(set.elements_list().await.unwrap(), vec![e[1]]);
}

#[tokio::test]
async fn many_appends_accumulate() {
    let f = Fixture::new();
    let e = f.nodes(12).await;
    let set = OrientedSet::create(&f.ctx, &[]).await.unwrap();
    for chunk in e.chunks(5) {
        set.add(chunk).await.unwrap();
    }
    assert_eq!(set.elements_list().await.unwrap(), e);
}

#[tokio::test]
async fn iteration_is_lazy() {
    let f = Fixture::new();
    let e = f.nodes(4).await;
    let set = OrientedSet::create(&f.ctx, &e).await.unwrap();
    let first_two: Vec<_> = set.iter().take(2).try_collect().await.unwrap();
    assert_eq!(first_two, e[..2].to_vec());
}

#[tokio::test]
async fn emptied_set_accepts_new_chain() {
    let f = Fixture::new();
    let e = f.nodes(3).await;
    let set = OrientedSet::create(&f.ctx, &e[..2]).await.unwrap();
    set.clear().await.unwrap();
    assert!(set.elements_list().await.unwrap().is_empty());
    set.add(&e[2..]).await.unwrap();
    assert_eq!(set.elements_list().await.unwrap(), vec![e[2]]);
}
