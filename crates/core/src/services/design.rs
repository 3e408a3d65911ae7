//! Identifying test-batch design.
//!
//! A batch identifies up to `k` saboteurs when, for every ordered tuple
//! `(x, y1, .., yk)` of distinct elements (a *fault hypothesis*), some
//! selected group contains `x` and none of the `yi`. Such a group fails
//! because of `x` alone whichever of the `yi` are also bad. Picking the
//! fewest groups that cover every hypothesis is a minimal set cover.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{SaboteurError, SaboteurResult};
use crate::model::{Group, GroupBatch};
use crate::services::cover::minimal_cover_default;

/// Prefix used for generated group names when none is given.
pub const DEFAULT_GROUP_PREFIX: &str = "group_";

/// One slot of a combinatorial design and the elements that can fill it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub name: String,
    pub elements: Vec<String>,
}

impl Position {
    pub fn new<I, S>(name: impl Into<String>, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { name: name.into(), elements: elements.into_iter().map(Into::into).collect() }
    }
}

/// Generate every group of a combinatorial design.
///
/// Each group holds exactly one element per position; the last position
/// varies fastest. Names are `prefix` followed by a 1-based index padded to
/// the digit count of the total, so they sort in generation order.
pub fn generate_combinatorial_groups(
    positions: &[Position],
    prefix: &str,
) -> SaboteurResult<GroupBatch> {
    if positions.is_empty() {
        return Err(SaboteurError::InvalidInput("At least one position is required".into()));
    }
    if let Some(empty) = positions.iter().find(|p| p.elements.is_empty()) {
        return Err(SaboteurError::InvalidInput(format!(
            "Position '{}' has no elements",
            empty.name
        )));
    }

    let total = positions
        .iter()
        .try_fold(1usize, |acc, p| acc.checked_mul(p.elements.len()))
        .ok_or_else(|| SaboteurError::InvalidInput("Too many combinations to generate".into()))?;
    let width = total.to_string().len();

    let mut batch = GroupBatch::new();
    let mut indices = vec![0usize; positions.len()];
    for i in 0..total {
        let elements: Vec<String> =
            positions.iter().zip(&indices).map(|(p, &j)| p.elements[j].clone()).collect();
        batch.push(Group { name: format!("{prefix}{:0width$}", i + 1), elements })?;

        for slot in (0..indices.len()).rev() {
            indices[slot] += 1;
            if indices[slot] < positions[slot].elements.len() {
                break;
            }
            indices[slot] = 0;
        }
    }

    debug!(positions = positions.len(), groups = batch.len(), "generated combinatorial groups");
    Ok(batch)
}

/// Ordered tuple of distinct element indices. The first is the element being
/// identified, the rest are the possible confounders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaultHypothesis(pub Vec<usize>);

impl FaultHypothesis {
    pub fn target(&self) -> Option<usize> {
        self.0.first().copied()
    }

    pub fn confounders(&self) -> &[usize] {
        self.0.get(1..).unwrap_or_default()
    }
}

/// Lazy, restartable sequence of every `width`-permutation of `0..n`, in
/// lexicographic order.
#[derive(Debug, Clone)]
pub struct FaultHypotheses {
    n: usize,
    current: Option<Vec<usize>>,
    remaining: usize,
}

impl FaultHypotheses {
    /// All hypotheses over `element_count` elements tolerating
    /// `max_saboteurs` simultaneous saboteurs (tuples of `max_saboteurs + 1`).
    pub fn new(element_count: usize, max_saboteurs: usize) -> Self {
        Self::with_width(element_count, max_saboteurs.saturating_add(1))
    }

    fn with_width(n: usize, width: usize) -> Self {
        let current = (width <= n).then(|| (0..width).collect());
        Self { n, current, remaining: falling_factorial(n, width) }
    }
}

impl Iterator for FaultHypotheses {
    type Item = FaultHypothesis;

    fn next(&mut self) -> Option<FaultHypothesis> {
        let current = self.current.take()?;
        let mut next = current.clone();
        if advance_permutation(&mut next, self.n) {
            self.current = Some(next);
        }
        self.remaining = self.remaining.saturating_sub(1);
        Some(FaultHypothesis(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for FaultHypotheses {}

/// `n * (n - 1) * .. * (n - width + 1)`, saturating on overflow.
pub fn falling_factorial(n: usize, width: usize) -> usize {
    if width > n {
        return 0;
    }
    (0..width).fold(1usize, |acc, i| acc.saturating_mul(n - i))
}

fn advance_permutation(perm: &mut [usize], n: usize) -> bool {
    let width = perm.len();
    for i in (0..width).rev() {
        let mut used: HashSet<usize> = perm[..i].iter().copied().collect();
        if let Some(value) = (perm[i] + 1..n).find(|v| !used.contains(v)) {
            perm[i] = value;
            used.insert(value);
            let free: Vec<usize> = (0..n).filter(|v| !used.contains(v)).collect();
            perm[i + 1..].copy_from_slice(&free[..width - i - 1]);
            return true;
        }
    }
    false
}

/// Hypotheses a group cleanly indicates: the target is in the group and no
/// confounder is. `members` are element indices in `0..element_count`.
pub fn coverage_assignment(
    members: &HashSet<usize>,
    element_count: usize,
    max_saboteurs: usize,
) -> HashSet<FaultHypothesis> {
    let outside: Vec<usize> = (0..element_count).filter(|e| !members.contains(e)).collect();
    let mut targets: Vec<usize> = members.iter().copied().filter(|&e| e < element_count).collect();
    targets.sort_unstable();

    let mut covered = HashSet::new();
    for target in targets {
        for FaultHypothesis(rest) in FaultHypotheses::with_width(outside.len(), max_saboteurs) {
            let mut tuple = Vec::with_capacity(rest.len() + 1);
            tuple.push(target);
            tuple.extend(rest.iter().map(|&r| outside[r]));
            covered.insert(FaultHypothesis(tuple));
        }
    }
    covered
}

/// For each element (first-seen order), the names of the groups containing it.
pub fn element_group_coverage(batch: &GroupBatch) -> Vec<(String, HashSet<String>)> {
    let mut order: Vec<(String, HashSet<String>)> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();
    for group in batch {
        for element in &group.elements {
            let slot = *slots.entry(element.as_str()).or_insert_with(|| {
                order.push((element.clone(), HashSet::new()));
                order.len() - 1
            });
            order[slot].1.insert(group.name.clone());
        }
    }
    order
}

/// Summary of a design run, suitable for JSON export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignReport {
    pub max_saboteurs: usize,
    pub candidate_groups: usize,
    pub elements: usize,
    pub fault_hypotheses: usize,
    pub selected: GroupBatch,
}

/// Select the fewest groups of `possible_groups` whose pass/fail outcomes
/// identify up to `max_saboteurs` bad elements.
///
/// The selection keeps the input order and every selected group is
/// identical to its input entry.
pub fn design_test_batch(
    possible_groups: &GroupBatch,
    max_saboteurs: usize,
) -> SaboteurResult<GroupBatch> {
    design_test_batch_report(possible_groups, max_saboteurs).map(|report| report.selected)
}

/// [`design_test_batch`], also reporting the size of the problem solved.
pub fn design_test_batch_report(
    possible_groups: &GroupBatch,
    max_saboteurs: usize,
) -> SaboteurResult<DesignReport> {
    if possible_groups.is_empty() {
        return Err(SaboteurError::InvalidInput("No candidate groups to select from".into()));
    }
    if max_saboteurs.checked_add(1).is_none() {
        return Err(SaboteurError::InvalidInput(format!(
            "max_saboteurs {max_saboteurs} is too large"
        )));
    }
    check_feasibility(possible_groups, max_saboteurs)?;

    let elements = possible_groups.elements();
    let element_index: HashMap<&str, usize> =
        elements.iter().enumerate().map(|(i, &e)| (e, i)).collect();

    let hypotheses = FaultHypotheses::new(elements.len(), max_saboteurs);
    let hypothesis_count = hypotheses.len();
    let universe: HashSet<FaultHypothesis> = hypotheses.collect();

    let candidates: Vec<(String, HashSet<FaultHypothesis>)> = possible_groups
        .iter()
        .map(|group| {
            let members: HashSet<usize> = group
                .elements
                .iter()
                .filter_map(|e| element_index.get(e.as_str()).copied())
                .collect();
            (group.name.clone(), coverage_assignment(&members, elements.len(), max_saboteurs))
        })
        .collect();

    debug!(
        elements = elements.len(),
        hypotheses = hypothesis_count,
        candidates = candidates.len(),
        "searching for identifying batch"
    );

    let chosen =
        minimal_cover_default(&universe, &candidates, None).ok_or(SaboteurError::NoSolution)?;
    let selected = possible_groups.select(chosen.iter().map(String::as_str));

    info!(
        max_saboteurs,
        candidates = possible_groups.len(),
        selected = selected.len(),
        "designed test batch"
    );

    Ok(DesignReport {
        max_saboteurs,
        candidate_groups: possible_groups.len(),
        elements: elements.len(),
        fault_hypotheses: hypothesis_count,
        selected,
    })
}

/// Reject designs where at most `max_saboteurs` elements touch every group.
///
/// The cover search is bounded by `max_saboteurs`, so any covering set of
/// that size is found even when a larger one is reached first unbounded.
/// Groups with no elements can never fail, so a batch containing one is
/// never rejected here.
fn check_feasibility(batch: &GroupBatch, max_saboteurs: usize) -> SaboteurResult<()> {
    let all_groups: HashSet<String> = batch.names().map(str::to_string).collect();
    let coverage = element_group_coverage(batch);
    match minimal_cover_default(&all_groups, &coverage, Some(max_saboteurs)) {
        Some(covering) => Err(SaboteurError::DesignInfeasible {
            max_saboteurs,
            covering_elements: covering,
        }),
        None => Ok(()),
    }
}
