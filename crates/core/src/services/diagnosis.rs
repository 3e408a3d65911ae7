//! Logical diagnosis of failed groups.
//!
//! An element is suspicious when every group containing it failed (and at
//! least one failed group did not contain it). A suspicious element is a
//! confirmed saboteur when some failed group containing it holds no other
//! suspicious element: without it, that failure would be unexplained.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{SaboteurError, SaboteurResult};
use crate::model::{DiagnosisResult, GroupBatch, MembershipTable};

/// Classify the elements of `groups` given the names of the groups that failed.
///
/// Both result lists follow the order in which elements first appear in the
/// batch. Failed names that are not in the batch are rejected.
pub fn find_logical_saboteurs<'a, I>(
    groups: &GroupBatch,
    failed_group_names: I,
) -> SaboteurResult<DiagnosisResult>
where
    I: IntoIterator<Item = &'a str>,
{
    let failed: HashSet<&str> = failed_group_names.into_iter().collect();
    if let Some(unknown) = failed.iter().find(|name| !groups.contains_name(name)) {
        return Err(SaboteurError::InvalidInput(format!(
            "Failed group '{unknown}' is not part of the batch"
        )));
    }

    let table = MembershipTable::from_batch(groups);
    let memberships: Vec<(&str, HashSet<&str>)> = table
        .rows
        .iter()
        .map(|row| (row.element.as_str(), table.groups_of(&row.element)))
        .collect();

    // Elements in no group are never suspicious.
    let suspicious: Vec<&(&str, HashSet<&str>)> = memberships
        .iter()
        .filter(|(_, member_of)| {
            !member_of.is_empty() && member_of.len() < failed.len() && member_of.is_subset(&failed)
        })
        .collect();

    let mut result = DiagnosisResult::default();
    for (element, member_of) in &suspicious {
        let explained_by_others: HashSet<&str> = suspicious
            .iter()
            .filter(|(other, _)| other != element)
            .flat_map(|(_, other_groups)| other_groups.iter().copied())
            .collect();
        if member_of.is_subset(&explained_by_others) {
            result.suspicious.push(element.to_string());
        } else {
            result.saboteurs.push(element.to_string());
        }
    }

    debug!(
        failed = failed.len(),
        saboteurs = result.saboteurs.len(),
        suspicious = result.suspicious.len(),
        "diagnosed failed groups"
    );
    Ok(result)
}
