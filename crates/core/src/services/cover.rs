//! Minimal set cover by branch-and-bound backtracking.
//!
//! Given a universe and a list of named candidate subsets, find the fewest
//! candidates whose union is the universe. Candidates are probed best-first
//! according to a [`CoverHeuristic`]; a failed probe is discarded along with
//! every candidate it would have exhausted. When a maximum count is given,
//! a level is abandoned as soon as the largest remaining candidate is too
//! small for that many picks to cover what is left.

use std::collections::HashSet;
use std::hash::Hash;

use tracing::{debug, trace};

/// Strategy used to order candidates at each level of the search.
///
/// Higher scores are probed first. Among equal scores, the candidate that
/// comes last in the current ordering wins.
pub trait CoverHeuristic<N, E> {
    type Score: Ord;

    /// Score a candidate from its name, the part of its subset that is still
    /// uncovered, and the names already selected on the current path.
    fn score(&self, name: &N, remaining: &HashSet<E>, selected: &[N]) -> Self::Score;
}

/// Built-in heuristic: prefer the candidate covering the most uncovered
/// elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct LargestRemaining;

impl<N, E> CoverHeuristic<N, E> for LargestRemaining {
    type Score = usize;

    fn score(&self, _name: &N, remaining: &HashSet<E>, _selected: &[N]) -> usize {
        remaining.len()
    }
}

impl<N, E, S, F> CoverHeuristic<N, E> for F
where
    F: Fn(&N, &HashSet<E>, &[N]) -> S,
    S: Ord,
{
    type Score = S;

    fn score(&self, name: &N, remaining: &HashSet<E>, selected: &[N]) -> S {
        self(name, remaining, selected)
    }
}

/// Find a minimal collection of candidate names whose subsets cover `universe`.
///
/// Returns `None` when the candidates' union differs from `universe`, when
/// `max_count` is `Some(0)` for a non-empty universe, or when no selection of
/// at most `max_count` candidates exists. An empty universe always yields an
/// empty selection.
///
/// Names come back in the order they were chosen along the successful path,
/// not in `candidates` order.
pub fn minimal_cover<N, E, H>(
    universe: &HashSet<E>,
    candidates: &[(N, HashSet<E>)],
    max_count: Option<usize>,
    heuristic: &H,
) -> Option<Vec<N>>
where
    N: Clone,
    E: Hash + Eq + Clone,
    H: CoverHeuristic<N, E> + ?Sized,
{
    if universe.is_empty() {
        return Some(Vec::new());
    }
    if max_count == Some(0) {
        return None;
    }

    let union: HashSet<&E> = candidates.iter().flat_map(|(_, subset)| subset.iter()).collect();
    if union.len() != universe.len() || !universe.iter().all(|e| union.contains(e)) {
        debug!(
            universe = universe.len(),
            covered = union.len(),
            "candidate union does not match the universe"
        );
        return None;
    }

    let result = search(universe.clone(), candidates.to_vec(), max_count, heuristic, &[], 0);
    debug!(
        universe = universe.len(),
        candidates = candidates.len(),
        selected = result.as_ref().map(Vec::len),
        "minimal cover search finished"
    );
    result
}

/// [`minimal_cover`] with the [`LargestRemaining`] heuristic.
pub fn minimal_cover_default<N, E>(
    universe: &HashSet<E>,
    candidates: &[(N, HashSet<E>)],
    max_count: Option<usize>,
) -> Option<Vec<N>>
where
    N: Clone,
    E: Hash + Eq + Clone,
{
    minimal_cover(universe, candidates, max_count, &LargestRemaining)
}

fn search<N, E, H>(
    universe: HashSet<E>,
    candidates: Vec<(N, HashSet<E>)>,
    max_count: Option<usize>,
    heuristic: &H,
    selected: &[N],
    depth: usize,
) -> Option<Vec<N>>
where
    N: Clone,
    E: Hash + Eq + Clone,
    H: CoverHeuristic<N, E> + ?Sized,
{
    if universe.is_empty() {
        return Some(Vec::new());
    }
    if max_count == Some(0) {
        return None;
    }

    let mut ordered: Vec<(N, HashSet<E>)> =
        candidates.into_iter().filter(|(_, subset)| !subset.is_empty()).collect();
    // Stable ascending sort; the best candidate sits at the end.
    ordered.sort_by_cached_key(|(name, subset)| heuristic.score(name, subset, selected));

    trace!(depth, uncovered = universe.len(), candidates = ordered.len(), "cover level");

    while !ordered.is_empty() {
        if let Some(max) = max_count {
            let largest = ordered.iter().map(|(_, subset)| subset.len()).max().unwrap_or(0);
            if largest.saturating_mul(max) < universe.len() {
                trace!(depth, largest, max, "bound prunes level");
                return None;
            }
        }

        let Some((name, subset)) = ordered.pop() else { break };
        let next_universe: HashSet<E> = universe.difference(&subset).cloned().collect();
        let next_candidates: Vec<(N, HashSet<E>)> = ordered
            .iter()
            .map(|(other, other_subset)| {
                (other.clone(), other_subset.difference(&subset).cloned().collect())
            })
            .collect();
        let exhausted: Vec<bool> = next_candidates.iter().map(|(_, s)| s.is_empty()).collect();

        let mut path = selected.to_vec();
        path.push(name.clone());
        let next_max = max_count.map(|m| m - 1);

        if let Some(mut rest) =
            search(next_universe, next_candidates, next_max, heuristic, &path, depth + 1)
        {
            rest.insert(0, name);
            return Some(rest);
        }

        trace!(depth, "backtracking");
        let mut flags = exhausted.into_iter();
        ordered.retain(|_| !flags.next().unwrap_or(true));
    }

    None
}
