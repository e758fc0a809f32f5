//! Property tests for selector pruning.

use cmc::{prune_class_map, ClassMap};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn class_maps() -> impl Strategy<Value = ClassMap> {
    prop::collection::btree_map(
        "[a-z]{1,8}\\.css",
        prop::collection::btree_map(
            "[a-z]{1,8}",
            prop::collection::vec("[a-z]{1,6}", 0..4).prop_map(|tokens| tokens.join(" ")),
            0..4,
        ),
        0..4,
    )
    .prop_map(|entries| entries.into_iter().collect())
}

fn selector_sets() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[a-z]{1,6}", 0..8)
}

proptest! {
    #[test]
    fn every_surviving_token_is_in_the_selector_set(
        map in class_maps(),
        selectors in selector_sets(),
    ) {
        let pruned = prune_class_map(&map, &selectors);
        for (_, locals) in pruned.iter() {
            for value in locals.values() {
                for token in value.split_whitespace() {
                    prop_assert!(selectors.contains(token));
                }
            }
        }
    }

    #[test]
    fn pruning_is_idempotent(
        map in class_maps(),
        selectors in selector_sets(),
    ) {
        let once = prune_class_map(&map, &selectors);
        let twice = prune_class_map(&once, &selectors);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn pruning_never_removes_keys(
        map in class_maps(),
        selectors in selector_sets(),
    ) {
        let pruned = prune_class_map(&map, &selectors);
        let before: Vec<&str> = map.modules().collect();
        let after: Vec<&str> = pruned.modules().collect();
        prop_assert_eq!(before, after);

        for (module, locals) in map.iter() {
            let pruned_locals = pruned.get(module).unwrap();
            let before: Vec<&String> = locals.keys().collect();
            let after: Vec<&String> = pruned_locals.keys().collect();
            prop_assert_eq!(before, after);
        }
    }
}
