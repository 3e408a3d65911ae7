//! CSV ingestion of group batches and pass/fail outcome sheets.
//!
//! Two sheet layouts are accepted, told apart by the header line:
//!
//! ```text
//! group,result,elements        group,elements
//! g1,success,A,C,D             g1,A,C,D
//! g2,failure,B,C,E             g2,B,C,E
//! ```
//!
//! Cells are trimmed; empty cells and blank lines are skipped. In outcome
//! sheets any result other than `success` marks the group as failed.

use std::path::Path;

use serde::Serialize;

use crate::error::{SaboteurError, SaboteurResult};
use crate::model::{Group, GroupBatch};

/// Result value that marks a group as passing.
pub const SUCCESS_RESULT: &str = "success";

/// Groups read from a sheet, plus the names of failed groups (outcome sheets
/// only; empty for plain batches).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupsData {
    pub groups: GroupBatch,
    pub failed: Vec<String>,
    pub has_results: bool,
}

/// Parse CSV text into groups and failed-group names.
pub fn parse_groups_csv(text: &str) -> SaboteurResult<GroupsData> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, split_cells(line)))
        .filter(|(_, cells)| !cells.is_empty());

    let Some((_, header)) = lines.next() else {
        return Err(SaboteurError::InvalidInput("CSV has no header line".into()));
    };
    let has_results = header.iter().any(|cell| cell.eq_ignore_ascii_case("result"));

    let mut data = GroupsData { has_results, ..GroupsData::default() };
    for (line_no, cells) in lines {
        let Some((name, rest)) = cells.split_first() else { continue };
        let members = if has_results {
            let (result, members) = rest.split_first().ok_or_else(|| missing(line_no, "result"))?;
            if *result != SUCCESS_RESULT {
                data.failed.push(name.to_string());
            }
            members
        } else {
            rest
        };
        if data.groups.contains_name(name) {
            return Err(SaboteurError::InvalidInput(format!(
                "line {line_no}: duplicate group name '{name}'"
            )));
        }
        data.groups.push(Group::new(*name, members.iter().copied()))?;
    }
    Ok(data)
}

/// Read and parse a CSV sheet from disk.
pub fn load_groups_csv(path: impl AsRef<Path>) -> SaboteurResult<GroupsData> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .map_err(|source| SaboteurError::Io { path: path.to_path_buf(), source })?;
    parse_groups_csv(&text)
}

fn split_cells(line: &str) -> Vec<&str> {
    line.split(',').map(str::trim).filter(|cell| !cell.is_empty()).collect()
}

fn missing(line_no: usize, what: &str) -> SaboteurError {
    SaboteurError::InvalidInput(format!("line {line_no}: missing {what}"))
}
