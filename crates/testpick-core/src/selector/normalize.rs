use std::collections::{BTreeMap, BTreeSet};

use super::Selector;

/// Rewrites a selector into its canonical form.
///
/// The result has no single-child or nested unions, no union containing
/// [`Selector::all`], no directly nested or empty tag scopes, and no tag scope
/// directly under a path step. Union members sharing a tag set, or a leading
/// path name, are merged into one scope over the union of their inners.
///
/// Normalizing twice gives the same result as normalizing once.
pub fn normalize(selector: &Selector) -> Selector {
    match selector {
        Selector::Union(children) => normalize_union(children.iter().map(normalize)),
        Selector::Path(name, inner) => scope_path(name.clone(), normalize(inner)),
        Selector::Tags(names, inner) => scope_tags(names.clone(), normalize(inner)),
    }
}

/// Puts a normalized selector under a path step. Tag scopes float above it.
fn scope_path(name: String, inner: Selector) -> Selector {
    match inner {
        Selector::Tags(names, rest) => {
            Selector::Tags(names, Box::new(Selector::Path(name, rest)))
        }
        other => Selector::Path(name, Box::new(other)),
    }
}

/// Puts a normalized selector under a tag scope, merging with a tag scope
/// directly beneath it.
fn scope_tags(mut names: BTreeSet<String>, inner: Selector) -> Selector {
    if names.is_empty() {
        return inner;
    }
    match inner {
        Selector::Tags(more, rest) => {
            names.extend(more);
            Selector::Tags(names, rest)
        }
        other => Selector::Tags(names, Box::new(other)),
    }
}

/// Children must already be normalized.
fn normalize_union(children: impl IntoIterator<Item = Selector>) -> Selector {
    let mut flat = Vec::new();
    for child in children {
        match child {
            Selector::Union(nested) if nested.is_empty() => return Selector::all(),
            Selector::Union(nested) => flat.extend(nested),
            other => flat.push(other),
        }
    }
    if flat.is_empty() {
        return Selector::all();
    }

    let mut by_tags: BTreeMap<BTreeSet<String>, Vec<Selector>> = BTreeMap::new();
    for child in flat {
        match child {
            Selector::Tags(names, inner) => by_tags.entry(names).or_default().push(*inner),
            other => by_tags.entry(BTreeSet::new()).or_default().push(other),
        }
    }

    let mut merged = BTreeSet::new();
    for (names, members) in by_tags {
        if names.is_empty() {
            merged.extend(merge_paths(members));
        } else {
            merged.insert(scope_tags(names, merge_members(members)));
        }
    }

    if merged.len() == 1 {
        if let Some(only) = merged.pop_first() {
            return only;
        }
    }
    Selector::Union(merged)
}

/// Groups untagged members by leading path name.
fn merge_paths(members: Vec<Selector>) -> Vec<Selector> {
    let mut by_name: BTreeMap<String, Vec<Selector>> = BTreeMap::new();
    let mut rest = Vec::new();
    for member in members {
        match member {
            Selector::Path(name, inner) => by_name.entry(name).or_default().push(*inner),
            other => rest.push(other),
        }
    }
    rest.extend(
        by_name
            .into_iter()
            .map(|(name, inners)| scope_path(name, merge_members(inners))),
    );
    rest
}

/// Union of normalized selectors, skipping the rewrite for a lone member.
fn merge_members(mut members: Vec<Selector>) -> Selector {
    if members.len() == 1 {
        if let Some(only) = members.pop() {
            return only;
        }
    }
    normalize_union(members)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn p(segments: &[&str]) -> Selector {
        Selector::from_path(segments.iter().copied())
    }

    fn t(names: &[&str], inner: Selector) -> Selector {
        Selector::tags(names.iter().copied(), inner)
    }

    #[test]
    fn all_is_already_normal() {
        assert_eq!(normalize(&Selector::all()), Selector::all());
    }

    #[test]
    fn union_with_all_is_all() {
        let s = Selector::union([p(&["Foo"]), Selector::all()]);
        assert_eq!(normalize(&s), Selector::all());
    }

    #[test]
    fn all_nested_deep_inside_union_is_absorbed() {
        let s = Selector::union([
            p(&["Foo"]),
            Selector::union([p(&["Bar"]), Selector::union([Selector::all()])]),
        ]);
        assert_eq!(normalize(&s), Selector::all());
    }

    #[test]
    fn singleton_union_unwraps() {
        let s = Selector::union([p(&["Foo", "Bar"])]);
        assert_eq!(normalize(&s), p(&["Foo", "Bar"]));
    }

    #[test]
    fn nested_unions_flatten() {
        let s = Selector::union([
            p(&["a"]),
            Selector::union([p(&["b"]), Selector::union([p(&["c"])])]),
        ]);
        assert_eq!(
            normalize(&s),
            Selector::union([p(&["a"]), p(&["b"]), p(&["c"])])
        );
    }

    #[test]
    fn nested_tags_merge() {
        let s = t(&["a"], t(&["b"], p(&["x"])));
        assert_eq!(normalize(&s), t(&["a", "b"], p(&["x"])));
    }

    #[test]
    fn empty_tags_disappear() {
        let s = t(&[], p(&["x"]));
        assert_eq!(normalize(&s), p(&["x"]));
    }

    #[test]
    fn tags_float_above_path() {
        let s = Selector::within(["Foo", "Bar"], t(&["slow", "fast"], Selector::all()));
        assert_eq!(normalize(&s), t(&["fast", "slow"], p(&["Foo", "Bar"])));
    }

    #[test]
    fn tags_float_through_nested_tags_and_paths() {
        let s = Selector::path("a", t(&["x"], Selector::path("b", t(&["y"], Selector::all()))));
        assert_eq!(normalize(&s), t(&["x", "y"], p(&["a", "b"])));
    }

    #[test]
    fn shared_path_prefix_merges() {
        let s = Selector::union([p(&["Foo", "a"]), p(&["Foo", "b"]), p(&["Bar"])]);
        assert_eq!(
            normalize(&s),
            Selector::union([
                p(&["Bar"]),
                Selector::path("Foo", Selector::union([p(&["a"]), p(&["b"])])),
            ])
        );
    }

    #[test]
    fn shared_path_with_whole_subtree_collapses() {
        let s = Selector::union([p(&["Foo", "a"]), p(&["Foo"])]);
        assert_eq!(normalize(&s), p(&["Foo"]));
    }

    #[test]
    fn shared_tag_set_merges() {
        let s = Selector::union([t(&["x"], p(&["a"])), t(&["x"], p(&["b"]))]);
        assert_eq!(
            normalize(&s),
            t(&["x"], Selector::union([p(&["a"]), p(&["b"])]))
        );
    }

    #[test]
    fn shared_tag_set_merges_after_floating() {
        let s = Selector::union([
            Selector::within(["a"], t(&["x"], Selector::all())),
            Selector::within(["a", "b"], t(&["x"], Selector::all())),
        ]);
        assert_eq!(normalize(&s), t(&["x"], p(&["a"])));
    }

    #[test]
    fn distinct_tag_sets_stay_apart() {
        let s = Selector::union([t(&["x"], p(&["a"])), t(&["y"], p(&["a"])), p(&["a"])]);
        assert_eq!(
            normalize(&s),
            Selector::union([p(&["a"]), t(&["x"], p(&["a"])), t(&["y"], p(&["a"]))])
        );
    }

    #[test]
    fn merge_recurses_through_several_levels() {
        let s = Selector::union([
            p(&["a", "b", "c"]),
            p(&["a", "b", "d"]),
            p(&["a", "e"]),
        ]);
        assert_eq!(
            normalize(&s),
            Selector::path(
                "a",
                Selector::union([
                    Selector::path("b", Selector::union([p(&["c"]), p(&["d"])])),
                    p(&["e"]),
                ])
            )
        );
    }

    #[test]
    fn input_order_does_not_change_output() {
        let parts = [
            t(&["x"], p(&["a", "b"])),
            p(&["c"]),
            Selector::within(["a"], t(&["x"], p(&["d"]))),
            p(&["c", "e"]),
        ];
        let forward = normalize(&Selector::union(parts.iter().cloned()));
        let backward = normalize(&Selector::union(parts.iter().rev().cloned()));
        assert_eq!(forward, backward);
        assert_eq!(forward.to_string(), backward.to_string());
    }

    fn name() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["a", "b", "c"]).prop_map(String::from)
    }

    fn tag_set() -> impl Strategy<Value = BTreeSet<String>> {
        prop::collection::btree_set(
            prop::sample::select(vec!["x", "y", "z"]).prop_map(String::from),
            0..3,
        )
    }

    fn path_like() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(name(), 0..4)
    }

    /// Paths and unions only.
    fn untagged() -> impl Strategy<Value = Selector> {
        Just(Selector::all()).prop_recursive(4, 24, 3, |inner| {
            prop_oneof![
                (name(), inner.clone()).prop_map(|(n, i)| Selector::path(n, i)),
                prop::collection::vec(inner, 0..4).prop_map(|c| Selector::union(c)),
            ]
        })
    }

    /// At most one tag scope on any root-to-leaf line.
    fn single_scoped() -> impl Strategy<Value = Selector> {
        let leaf = prop_oneof![
            untagged(),
            (tag_set(), untagged()).prop_map(|(names, i)| Selector::Tags(names, Box::new(i))),
        ];
        leaf.prop_recursive(3, 24, 3, |inner| {
            prop_oneof![
                (name(), inner.clone()).prop_map(|(n, i)| Selector::path(n, i)),
                prop::collection::vec(inner, 0..4).prop_map(|c| Selector::union(c)),
            ]
        })
    }

    /// Any shape, tag scopes nested freely.
    fn any_selector() -> impl Strategy<Value = Selector> {
        Just(Selector::all()).prop_recursive(5, 32, 3, |inner| {
            prop_oneof![
                (name(), inner.clone()).prop_map(|(n, i)| Selector::path(n, i)),
                (tag_set(), inner.clone())
                    .prop_map(|(names, i)| Selector::Tags(names, Box::new(i))),
                prop::collection::vec(inner, 0..4).prop_map(|c| Selector::union(c)),
            ]
        })
    }

    proptest! {
        #[test]
        fn idempotent(s in any_selector()) {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn preserves_acceptance(
            s in single_scoped(),
            path in path_like(),
            tags in tag_set(),
        ) {
            prop_assert_eq!(s.accepts(&path, &tags), normalize(&s).accepts(&path, &tags));
        }

        #[test]
        fn all_absorbs(s in any_selector()) {
            prop_assert_eq!(normalize(&Selector::union([Selector::all(), s])), Selector::all());
        }

        #[test]
        fn singleton_collapses(s in any_selector()) {
            prop_assert_eq!(normalize(&Selector::union([s.clone()])), normalize(&s));
        }

        #[test]
        fn nested_tags_equal_merged_tags(
            a in tag_set(),
            b in tag_set(),
            s in any_selector(),
        ) {
            let nested = Selector::Tags(a.clone(), Box::new(Selector::Tags(b.clone(), Box::new(s.clone()))));
            let merged = Selector::Tags(a.union(&b).cloned().collect(), Box::new(s));
            prop_assert_eq!(normalize(&nested), normalize(&merged));
        }

        #[test]
        fn tags_become_root_under_path(
            n in name(),
            first in "[xyz]",
            rest in tag_set(),
            s in any_selector(),
        ) {
            let mut names = rest;
            names.insert(first);
            let s = Selector::path(n, Selector::Tags(names, Box::new(s)));
            prop_assert!(matches!(normalize(&s), Selector::Tags(..)));
        }

        #[test]
        fn union_order_is_irrelevant(parts in prop::collection::vec(any_selector(), 0..5)) {
            let forward = normalize(&Selector::union(parts.iter().cloned()));
            let backward = normalize(&Selector::union(parts.iter().rev().cloned()));
            prop_assert_eq!(forward, backward);
        }
    }
}
