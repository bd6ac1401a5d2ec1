//! Tier 3: Order Independence
//!
//! The store may return search results in any order. Ordered collections
//! must read back the same sequence whatever order the store picks.

use crate::test_utils::{block_on, Fixture};
use proptest::prelude::*;
use semset::{Collection, Handle, NumberedSet, OrientedSet};

/// An edit applied to both the collection and a plain `Vec` model.
#[derive(Debug, Clone)]
enum Edit {
    Add(Vec<usize>),
    Remove(Vec<usize>),
}

fn edits(max_len: usize) -> impl Strategy<Value = Vec<Edit>> {
    let edit = prop_oneof![
        prop::collection::vec(0..6usize, 0..3).prop_map(Edit::Add),
        prop::collection::vec(0..6usize, 0..2).prop_map(Edit::Remove),
    ];
    prop::collection::vec(edit, 0..max_len)
}

fn apply(model: &mut Vec<Handle>, edit: &Edit, pool: &[Handle]) {
    match edit {
        Edit::Add(picks) => model.extend(picks.iter().map(|&i| pool[i])),
        Edit::Remove(picks) => {
            let doomed: Vec<Handle> = picks.iter().map(|&i| pool[i]).collect();
            model.retain(|h| !doomed.contains(h));
        }
    }
}

fn handles(picks: &[usize], pool: &[Handle]) -> Vec<Handle> {
    picks.iter().map(|&i| pool[i]).collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn oriented_order_survives_shuffled_results(seed in any::<u64>(), script in edits(6)) {
        let (listed, model) = block_on(async {
            let f = Fixture::shuffled(seed);
            let pool = f.nodes(6).await;
            let set = OrientedSet::create(&f.ctx, &[]).await.unwrap();
            let mut model = Vec::new();
            for edit in &script {
                match edit {
                    Edit::Add(picks) => set.add(&handles(picks, &pool)).await.unwrap(),
                    Edit::Remove(picks) => set.remove(&handles(picks, &pool)).await.unwrap(),
                }
                apply(&mut model, edit, &pool);
            }
            (set.elements_list().await.unwrap(), model)
        });
        prop_assert_eq!(listed, model);
    }

    #[test]
    fn numbered_order_survives_shuffled_results(
        seed in any::<u64>(),
        picks in prop::collection::vec(0..6usize, 0..10),
        doomed in prop::collection::vec(0..6usize, 0..3),
    ) {
        let (before, after, model) = block_on(async {
            let f = Fixture::shuffled(seed);
            let pool = f.nodes(6).await;
            let order = handles(&picks, &pool);
            let set = NumberedSet::create(&f.ctx, &order).await.unwrap();
            let before = set.elements_list().await.unwrap();

            let mut model = order.clone();
            apply(&mut model, &Edit::Remove(doomed.clone()), &pool);
            set.remove(&handles(&doomed, &pool)).await.unwrap();
            let after = set.elements_list().await.unwrap();
            (before == order, after, model)
        });
        prop_assert!(before);
        prop_assert_eq!(after, model);
    }
}
