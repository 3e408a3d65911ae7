//! Core data model for groups, batches, and diagnosis results.
//!
//! - `Group`: a named collection of elements tested as a whole.
//! - `GroupBatch`: an insertion-ordered collection of groups with unique names.
//! - `MembershipTable`: which element belongs to which group, in batch order.
//! - `DiagnosisResult`: confirmed saboteurs and merely suspicious elements.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{SaboteurError, SaboteurResult};

/// A named group of elements. A group fails if any of its elements is bad.
///
/// Repeated elements are kept as given but count as a single occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub elements: Vec<String>,
}

impl Group {
    pub fn new<I, S>(name: impl Into<String>, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { name: name.into(), elements: elements.into_iter().map(Into::into).collect() }
    }

    pub fn contains(&self, element: &str) -> bool {
        self.elements.iter().any(|e| e == element)
    }

    /// Distinct elements of the group.
    pub fn element_set(&self) -> HashSet<&str> {
        self.elements.iter().map(String::as_str).collect()
    }
}

/// Insertion-ordered mapping from group name to its elements.
///
/// Names are unique; inserting a name twice is rejected. Serializes as a list
/// of groups and re-checks uniqueness when deserialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Group>", into = "Vec<Group>")]
pub struct GroupBatch {
    groups: Vec<Group>,
    index: HashMap<String, usize>,
}

impl GroupBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a batch from `(name, elements)` pairs, failing on duplicate names.
    pub fn from_pairs<I, N, E, S>(pairs: I) -> SaboteurResult<Self>
    where
        I: IntoIterator<Item = (N, E)>,
        N: Into<String>,
        E: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut batch = Self::new();
        for (name, elements) in pairs {
            batch.push(Group::new(name, elements))?;
        }
        Ok(batch)
    }

    /// Append a group at the end of the batch.
    pub fn push(&mut self, group: Group) -> SaboteurResult<()> {
        if self.index.contains_key(&group.name) {
            return Err(SaboteurError::InvalidInput(format!(
                "Duplicate group name '{}'",
                group.name
            )));
        }
        self.index.insert(group.name.clone(), self.groups.len());
        self.groups.push(group);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Group> {
        self.index.get(name).map(|&i| &self.groups[i])
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Position of a group in insertion order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.iter().map(|g| g.name.as_str())
    }

    /// Every distinct element, in the order it is first seen across groups.
    pub fn elements(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        for group in &self.groups {
            for element in &group.elements {
                if seen.insert(element.as_str()) {
                    ordered.push(element.as_str());
                }
            }
        }
        ordered
    }

    /// Sub-batch holding the named groups, in this batch's order.
    ///
    /// Unknown names are ignored.
    pub fn select<'a, I>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let wanted: HashSet<&str> = names.into_iter().collect();
        let mut selected = Self::new();
        for group in self.groups.iter().filter(|g| wanted.contains(g.name.as_str())) {
            selected.index.insert(group.name.clone(), selected.groups.len());
            selected.groups.push(group.clone());
        }
        selected
    }

    /// True when every group here appears, identical and in the same relative
    /// order, in `other`.
    pub fn is_sub_batch_of(&self, other: &GroupBatch) -> bool {
        let mut last = None;
        for group in &self.groups {
            match other.position(&group.name) {
                Some(pos) if other.groups[pos] == *group && last.map_or(true, |l| pos > l) => {
                    last = Some(pos);
                }
                _ => return false,
            }
        }
        true
    }
}

impl TryFrom<Vec<Group>> for GroupBatch {
    type Error = SaboteurError;

    fn try_from(groups: Vec<Group>) -> Result<Self, Self::Error> {
        let mut batch = Self::new();
        for group in groups {
            batch.push(group)?;
        }
        Ok(batch)
    }
}

impl From<GroupBatch> for Vec<Group> {
    fn from(batch: GroupBatch) -> Self {
        batch.groups
    }
}

impl<'a> IntoIterator for &'a GroupBatch {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// For each element (first-seen order), membership in each group of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipTable {
    pub group_names: Vec<String>,
    pub rows: Vec<MembershipRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipRow {
    pub element: String,
    /// `member_of[i]` is true when the element is in the i-th group.
    pub member_of: Vec<bool>,
}

impl MembershipTable {
    pub fn from_batch(batch: &GroupBatch) -> Self {
        let group_sets: Vec<HashSet<&str>> = batch.iter().map(Group::element_set).collect();
        let rows = batch
            .elements()
            .into_iter()
            .map(|element| MembershipRow {
                element: element.to_string(),
                member_of: group_sets.iter().map(|set| set.contains(element)).collect(),
            })
            .collect();
        Self { group_names: batch.names().map(str::to_string).collect(), rows }
    }

    pub fn row(&self, element: &str) -> Option<&[bool]> {
        self.rows.iter().find(|r| r.element == element).map(|r| r.member_of.as_slice())
    }

    /// Names of the groups containing `element`; empty if it is unknown.
    pub fn groups_of(&self, element: &str) -> HashSet<&str> {
        self.row(element)
            .map(|flags| {
                flags
                    .iter()
                    .zip(&self.group_names)
                    .filter(|(member, _)| **member)
                    .map(|(_, name)| name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Outcome of a logical diagnosis. The two lists never share an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    /// Elements that alone explain at least one failure.
    pub saboteurs: Vec<String>,
    /// Elements seen only in failed groups but not uniquely implicated.
    pub suspicious: Vec<String>,
}
