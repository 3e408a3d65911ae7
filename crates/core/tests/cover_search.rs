use std::cmp::Reverse;
use std::collections::HashSet;

use proptest::prelude::*;
use saboteur_core::services::cover::{minimal_cover, minimal_cover_default, LargestRemaining};

fn set(items: &[u32]) -> HashSet<u32> {
    items.iter().copied().collect()
}

fn named(name: &str, items: &[u32]) -> (String, HashSet<u32>) {
    (name.to_string(), set(items))
}

/// A family where the greedy first pick leads to a dead end under a bound of
/// two, while `B` + `C` covers everything.
fn trap_family() -> Vec<(String, HashSet<u32>)> {
    vec![
        named("A", &[1, 2, 3, 4]),
        named("B", &[1, 2, 5]),
        named("C", &[3, 4, 6]),
        named("D", &[5]),
        named("E", &[6]),
    ]
}

#[test]
fn empty_universe_yields_empty_selection() {
    let no_candidates: Vec<(String, HashSet<u32>)> = vec![];
    assert_eq!(minimal_cover_default(&HashSet::new(), &no_candidates, None), Some(vec![]));
    assert_eq!(minimal_cover_default(&HashSet::new(), &trap_family(), Some(0)), Some(vec![]));
}

#[test]
fn union_mismatch_is_infeasible() {
    let candidates = vec![named("A", &[1, 2]), named("B", &[3])];
    assert_eq!(minimal_cover_default(&set(&[1, 2, 3, 4]), &candidates, None), None);

    // Candidates reaching outside the universe are rejected as well.
    let wider = vec![named("A", &[1, 2]), named("B", &[3, 9])];
    assert_eq!(minimal_cover_default(&set(&[1, 2, 3]), &wider, None), None);
}

#[test]
fn zero_budget_with_elements_is_infeasible() {
    assert_eq!(minimal_cover_default(&set(&[1]), &[named("A", &[1])], Some(0)), None);
}

#[test]
fn unbounded_search_takes_largest_first() {
    let universe = set(&[1, 2, 3, 4, 5, 6]);
    let selection = minimal_cover_default(&universe, &trap_family(), None).expect("cover");
    assert_eq!(selection.len(), 3);
    assert_eq!(selection[0], "A");
}

#[test]
fn bounded_search_backtracks_past_greedy_choice() {
    let universe = set(&[1, 2, 3, 4, 5, 6]);
    let selection = minimal_cover_default(&universe, &trap_family(), Some(2)).expect("cover");
    assert_eq!(selection, vec!["C".to_string(), "B".to_string()]);
}

#[test]
fn bound_prunes_when_largest_subset_is_too_small() {
    let universe = set(&[1, 2, 3, 4, 5, 6]);
    assert_eq!(minimal_cover_default(&universe, &trap_family(), Some(1)), None);

    let halves = vec![named("L", &[1, 2, 3]), named("R", &[4, 5, 6])];
    assert_eq!(minimal_cover_default(&universe, &halves, Some(1)), None);
    assert_eq!(minimal_cover_default(&universe, &halves, Some(2)).map(|s| s.len()), Some(2));
}

#[test]
fn ties_go_to_the_latest_candidate() {
    let candidates = vec![named("first", &[1, 2]), named("second", &[1, 2])];
    let selection = minimal_cover(&set(&[1, 2]), &candidates, None, &LargestRemaining);
    assert_eq!(selection, Some(vec!["second".to_string()]));
}

#[test]
fn custom_heuristic_controls_probe_order() {
    let candidates =
        vec![named("big", &[1, 2, 3]), named("a", &[1]), named("b", &[2]), named("c", &[3])];
    let smallest_first =
        |_name: &String, remaining: &HashSet<u32>, _selected: &[String]| Reverse(remaining.len());

    let selection = minimal_cover(&set(&[1, 2, 3]), &candidates, None, &smallest_first)
        .expect("cover");
    assert_eq!(selection, vec!["c".to_string(), "b".to_string(), "a".to_string()]);
}

#[test]
fn custom_heuristic_sees_names_selected_so_far() {
    let candidates = vec![named("x", &[1]), named("y", &[2]), named("z", &[3])];
    // Prefer names alphabetically after the last pick, so picks come out in order.
    let after_last = |name: &String, _remaining: &HashSet<u32>, selected: &[String]| {
        let last = selected.last().cloned().unwrap_or_default();
        (name > &last, Reverse(name.clone()))
    };

    let selection = minimal_cover(&set(&[1, 2, 3]), &candidates, None, &after_last)
        .expect("cover");
    assert_eq!(selection, vec!["x".to_string(), "y".to_string(), "z".to_string()]);
}

fn covers(universe: &HashSet<u8>, family: &[(usize, HashSet<u8>)], picked: &[usize]) -> bool {
    let mut union = HashSet::new();
    for name in picked {
        union.extend(family[*name].1.iter().copied());
    }
    &union == universe
}

proptest! {
    #[test]
    fn unbounded_cover_always_covers_the_union(
        subsets in prop::collection::vec(prop::collection::hash_set(0u8..10, 0..5), 0..7)
    ) {
        let family: Vec<(usize, HashSet<u8>)> = subsets.into_iter().enumerate().collect();
        let universe: HashSet<u8> = family.iter().flat_map(|(_, s)| s.iter().copied()).collect();

        let picked = minimal_cover_default(&universe, &family, None);
        prop_assert!(picked.is_some());
        let picked = picked.unwrap();
        prop_assert!(covers(&universe, &family, &picked));

        let distinct: HashSet<usize> = picked.iter().copied().collect();
        prop_assert_eq!(distinct.len(), picked.len());
    }

    #[test]
    fn bounded_cover_respects_its_budget(
        subsets in prop::collection::vec(prop::collection::hash_set(0u8..8, 1..4), 1..6),
        budget in 1usize..4
    ) {
        let family: Vec<(usize, HashSet<u8>)> = subsets.into_iter().enumerate().collect();
        let universe: HashSet<u8> = family.iter().flat_map(|(_, s)| s.iter().copied()).collect();

        if let Some(picked) = minimal_cover_default(&universe, &family, Some(budget)) {
            prop_assert!(picked.len() <= budget);
            prop_assert!(covers(&universe, &family, &picked));
        }
    }

    #[test]
    fn uncoverable_element_makes_search_fail(
        subsets in prop::collection::vec(prop::collection::hash_set(0u8..10, 0..5), 0..6)
    ) {
        let family: Vec<(usize, HashSet<u8>)> = subsets.into_iter().enumerate().collect();
        let mut universe: HashSet<u8> =
            family.iter().flat_map(|(_, s)| s.iter().copied()).collect();
        universe.insert(200);
        prop_assert_eq!(minimal_cover_default(&universe, &family, None), None);
    }
}
