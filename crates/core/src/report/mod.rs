//! Plain-text reports for group batches.
//!
//! - `batch_to_csv`: one line per group, re-readable by `io::parse_groups_csv`.
//! - `render_membership_table`: element-by-group matrix for terminals.
//! - `write_batch_report`: both of the above written into a directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SaboteurError, SaboteurResult};
use crate::model::{GroupBatch, MembershipTable};

/// Word used for groups in report headers and file names by default.
pub const DEFAULT_GROUP_NAMING: &str = "group";

/// Serialize a batch as CSV with a `<naming>,elements` header.
pub fn batch_to_csv(batch: &GroupBatch, group_naming: &str) -> String {
    let mut csv = format!("{group_naming},elements\n");
    for group in batch {
        csv.push_str(&group.name);
        for element in &group.elements {
            csv.push(',');
            csv.push_str(element);
        }
        csv.push('\n');
    }
    csv
}

/// Render which element belongs to which group.
///
/// Rows are elements in first-seen order, columns are groups numbered in
/// batch order (`#` member, `.` not). A legend maps column numbers to names.
pub fn render_membership_table(batch: &GroupBatch) -> String {
    let table = MembershipTable::from_batch(batch);
    let label_width = table.rows.iter().map(|r| r.element.len()).max().unwrap_or(0);
    let column_width = table.group_names.len().to_string().len();

    let mut out = String::new();
    out.push_str(&format!("{:label_width$} |", ""));
    for i in 1..=table.group_names.len() {
        out.push_str(&format!(" {i:>column_width$}"));
    }
    out.push('\n');

    for row in &table.rows {
        out.push_str(&format!("{:label_width$} |", row.element));
        for &member in &row.member_of {
            let mark = if member { "#" } else { "." };
            out.push_str(&format!(" {mark:>column_width$}"));
        }
        out.push('\n');
    }

    if !table.group_names.is_empty() {
        out.push('\n');
        for (i, name) in table.group_names.iter().enumerate() {
            out.push_str(&format!("{:>column_width$}: {name}\n", i + 1));
        }
    }
    out
}

/// Write `<naming>s.csv` and `<naming>s.txt` into `dir`, creating it if
/// needed. Returns the written paths.
pub fn write_batch_report(
    batch: &GroupBatch,
    dir: impl AsRef<Path>,
    group_naming: &str,
) -> SaboteurResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)
        .map_err(|source| SaboteurError::Io { path: dir.to_path_buf(), source })?;

    let csv_path = dir.join(format!("{group_naming}s.csv"));
    let table_path = dir.join(format!("{group_naming}s.txt"));
    write_file(&csv_path, &batch_to_csv(batch, group_naming))?;
    write_file(&table_path, &render_membership_table(batch))?;
    Ok(vec![csv_path, table_path])
}

fn write_file(path: &Path, contents: &str) -> SaboteurResult<()> {
    fs::write(path, contents).map_err(|source| SaboteurError::Io { path: path.to_path_buf(), source })
}
