//! Selector pruning: narrow the class map to what the bundle defines.
//!
//! After bundling, a class-map token may point at a rule that was never
//! emitted (a reference with no backing CSS) or that disappeared during
//! bundling. Pruning removes exactly those tokens, so the import rewriter
//! only ever writes class names the bundled stylesheet can satisfy.

use crate::core::{ClassMap, LocalImportMap};
use std::collections::BTreeSet;

/// Narrow every map value to the tokens present in `selectors`, keeping
/// original token order. Keys are never removed; an empty value is valid.
pub fn prune_class_map(map: &ClassMap, selectors: &BTreeSet<String>) -> ClassMap {
    map.iter()
        .map(|(module, locals)| {
            let pruned: LocalImportMap = locals
                .iter()
                .map(|(local, tokens)| (local.clone(), prune_tokens(tokens, selectors)))
                .collect();
            (module.clone(), pruned)
        })
        .collect()
}

fn prune_tokens(tokens: &str, selectors: &BTreeSet<String>) -> String {
    tokens
        .split(' ')
        .filter(|token| selectors.contains(*token))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LocalImportMap;

    fn selector_set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn map_of(entries: &[(&str, &[(&str, &str)])]) -> ClassMap {
        entries
            .iter()
            .map(|(module, locals)| {
                let locals: LocalImportMap = locals
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                (module.to_string(), locals)
            })
            .collect()
    }

    #[test]
    fn keeps_only_tokens_the_bundle_defines() {
        let map = map_of(&[(
            "Button.css",
            &[("title", "title"), ("subtitle", "subtitle")],
        )]);
        let pruned = prune_class_map(&map, &selector_set(&["title"]));

        let entry = pruned.get("Button.css").unwrap();
        assert_eq!(entry.get("title").unwrap(), "title");
        assert_eq!(entry.get("subtitle").unwrap(), "");
    }

    #[test]
    fn preserves_token_order_of_survivors() {
        let map = map_of(&[("a.css", &[("x", "one two three")])]);
        let pruned = prune_class_map(&map, &selector_set(&["three", "one"]));
        assert_eq!(pruned.get("a.css").unwrap().get("x").unwrap(), "one three");
    }

    #[test]
    fn never_removes_keys() {
        let map = map_of(&[("a.css", &[("x", "gone")]), ("b.css", &[])]);
        let pruned = prune_class_map(&map, &selector_set(&[]));
        assert_eq!(pruned.len(), 2);
        assert_eq!(pruned.get("a.css").unwrap().get("x").unwrap(), "");
        assert!(pruned.get("b.css").unwrap().is_empty());
    }

    #[test]
    fn pruning_is_idempotent() {
        let map = map_of(&[("a.css", &[("x", "one two"), ("y", "two gone")])]);
        let selectors = selector_set(&["one", "two"]);
        let once = prune_class_map(&map, &selectors);
        let twice = prune_class_map(&once, &selectors);
        assert_eq!(once, twice);
    }
}
